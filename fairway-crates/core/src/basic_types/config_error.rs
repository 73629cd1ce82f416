use thiserror::Error;

/// Errors which indicate that the roster, topology or rule set cannot describe a schedule.
///
/// All of these are detected before any variable is created; the input has to be fixed by the
/// caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the number of rounds must be positive")]
    NoRounds,

    #[error("round {round} has no teams")]
    NoTeams { round: usize },

    #[error("team sizes of round {round} sum to {total}, but the roster has {roster_size} participants")]
    TeamSizeMismatch {
        round: usize,
        total: u64,
        roster_size: usize,
    },

    #[error("team {team} of round {round} has size zero")]
    EmptyTeam { round: usize, team: usize },

    #[error("cart occupancies of team {team} in round {round} sum to {total}, but the team has size {size}")]
    CartOccupancyMismatch {
        round: usize,
        team: usize,
        total: u64,
        size: u32,
    },

    #[error("cart {cart} of team {team} in round {round} has occupancy zero")]
    EmptyCart {
        round: usize,
        team: usize,
        cart: usize,
    },

    #[error("participant '{0}' appears more than once in the roster")]
    DuplicateParticipant(String),

    #[error("'{0}' is not a participant in the roster")]
    UnknownParticipant(String),

    #[error("a pairing rule pairs '{0}' with themselves")]
    SelfPairing(String),

    #[error("'{first}' and '{second}' are required to ride together and never to ride together")]
    ContradictoryPairRules { first: String, second: String },

    #[error("'{first}' and '{second}' must ride together, but no cart seats two participants")]
    NoSharedCart { first: String, second: String },

    #[error("'{first}' and '{second}' must ride together, but the maximum times riding together is zero")]
    PairingForbiddenByMaximum { first: String, second: String },

    #[error("the alone-ride bounds are inverted (min {min} > max {max})")]
    InvertedAloneBounds { min: u32, max: u32 },
}
