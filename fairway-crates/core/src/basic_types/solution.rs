use crate::containers::KeyedVec;
use crate::engine::variables::Literal;
use crate::engine::variables::VariableId;

/// Read access to a (possibly partial) truth assignment over the declared variables.
///
/// Implemented by the assignments of a running search as well as by [`Solution`], so that
/// constraint status and objective evaluation work on both.
pub trait PartialAssignment {
    /// Returns the value of `variable`, or [`None`] if it is unassigned.
    fn value(&self, variable: VariableId) -> Option<bool>;

    /// Returns whether `literal` is true, false, or undetermined.
    fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.value(literal.variable())
            .map(|value| value == literal.is_positive())
    }
}

/// A complete assignment of every declared variable, taken from a search state in which all
/// constraints were satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    values: KeyedVec<VariableId, bool>,
}

impl Solution {
    pub(crate) fn new(values: KeyedVec<VariableId, bool>) -> Solution {
        Solution { values }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Returns the value of `variable` in this solution.
    ///
    /// # Panics
    /// If `variable` was not declared in the store the solution was taken from.
    pub fn get_value(&self, variable: VariableId) -> bool {
        self.values[variable]
    }
}

impl PartialAssignment for Solution {
    fn value(&self, variable: VariableId) -> Option<bool> {
        self.values.get(variable).copied()
    }
}
