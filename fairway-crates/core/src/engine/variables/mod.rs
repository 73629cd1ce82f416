//! Boolean decision and derived variables, and literals over them.
mod literal;
mod variable_id;

pub use literal::Literal;
pub use variable_id::VariableId;
