/// The result of propagating the constraint store. Propagation either reaches a fixed point or
/// detects that the current partial assignment cannot be extended to a solution.
pub(crate) type PropagationStatus = Result<(), Contradiction>;

/// Raised when a constraint can no longer be satisfied under the current partial assignment, or
/// when a variable would receive two conflicting values.
///
/// A contradiction never leaves the search engine: it is always answered by backtracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Contradiction;
