//! The schedule problem: the validated instance and its encoding into boolean variables.
mod gates;
mod ids;
mod instance;
mod variable_model;

pub use ids::all_pairs;
pub use ids::CartId;
pub use ids::PairId;
pub use ids::ParticipantId;
pub use ids::ParticipantPair;
pub use ids::RoundId;
pub use ids::SlotId;
pub use ids::TeamId;
pub use instance::AloneBounds;
pub use instance::CartSpec;
pub use instance::Participant;
pub use instance::ProblemInstance;
pub use instance::RoundTopology;
pub use instance::RuleCategory;
pub use instance::RuleSet;
pub use instance::Slot;
pub use instance::TeamSpec;
pub use instance::Topology;
pub use variable_model::VariableModel;
