use crate::containers::storage_key;

/// The id of a boolean variable declared in the [`ConstraintStore`].
///
/// [`ConstraintStore`]: crate::engine::ConstraintStore
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId {
    id: u32,
}

impl VariableId {
    pub fn id(&self) -> u32 {
        self.id
    }
}

storage_key!(VariableId);

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b{}", self.id)
    }
}

impl std::fmt::Debug for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b{}", self.id)
    }
}
