mod config_error;
mod model_error;
mod propagation_status;
mod solution;
mod trail;

pub use config_error::ConfigError;
pub use model_error::ModelError;
pub(crate) use propagation_status::Contradiction;
pub(crate) use propagation_status::PropagationStatus;
pub use solution::PartialAssignment;
pub use solution::Solution;
pub(crate) use trail::Trail;
