use thiserror::Error;

use crate::engine::variables::VariableId;

/// Errors raised while wiring variables and constraints into the constraint store.
///
/// These indicate a defect in the code that builds the model, not a problem with the input data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// A constraint refers to a variable that was never declared in the store.
    #[error("constraint references undeclared variable {variable} (only {num_declared} declared)")]
    UndeclaredVariable {
        variable: VariableId,
        num_declared: usize,
    },
    /// The objective refers to a variable that was never declared in the store.
    #[error("objective references undeclared variable {variable} (only {num_declared} declared)")]
    UndeclaredObjectiveVariable {
        variable: VariableId,
        num_declared: usize,
    },
}
