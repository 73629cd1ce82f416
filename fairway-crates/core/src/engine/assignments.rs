use crate::basic_types::Contradiction;
use crate::basic_types::PartialAssignment;
use crate::basic_types::Solution;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::variables::Literal;
use crate::engine::variables::VariableId;
use crate::fairway_assert_moderate;

/// The truth values of all boolean variables during search, together with the trail which records
/// the order (and decision level) in which they were assigned.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    values: KeyedVec<VariableId, Option<bool>>,
    trail: Trail<VariableId>,
}

impl Assignments {
    pub(crate) fn with_num_variables(num_variables: usize) -> Assignments {
        let mut values = KeyedVec::default();
        values.resize(num_variables, None);

        Assignments {
            values,
            trail: Trail::default(),
        }
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn num_assigned(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn is_assigned(&self, variable: VariableId) -> bool {
        self.values[variable].is_some()
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.trail.decision_level()
    }

    pub(crate) fn increase_decision_level(&mut self) {
        self.trail.increase_decision_level()
    }

    /// The variables assigned at `level`, in assignment order. The first entry of a positive level
    /// is the decision which opened it.
    pub(crate) fn assigned_at_level(&self, level: usize) -> &[VariableId] {
        self.trail.entries_at_level(level)
    }

    /// Makes `literal` true at the current decision level.
    ///
    /// Returns `Ok(true)` if the variable was unassigned, `Ok(false)` if the literal was already
    /// true, and a [`Contradiction`] if the literal is already false.
    pub(crate) fn assign(&mut self, literal: Literal) -> Result<bool, Contradiction> {
        let variable = literal.variable();
        match self.values[variable] {
            Some(value) if value == literal.is_positive() => Ok(false),
            Some(_) => Err(Contradiction),
            None => {
                self.values[variable] = Some(literal.is_positive());
                self.trail.push(variable);
                Ok(true)
            }
        }
    }

    /// Undoes every assignment made above `decision_level`, returning the unassigned variables
    /// together with the value they had, most recent first.
    pub(crate) fn synchronise(&mut self, decision_level: usize) -> Vec<(VariableId, bool)> {
        let removed = self.trail.synchronise(decision_level).collect::<Vec<_>>();

        removed
            .into_iter()
            .map(|variable| {
                let value = self.values[variable]
                    .take()
                    .unwrap_or_else(|| unreachable!("variable {variable} on the trail is assigned"));
                (variable, value)
            })
            .collect()
    }

    /// Takes a snapshot of a complete assignment.
    pub(crate) fn to_solution(&self) -> Solution {
        fairway_assert_moderate!(
            self.num_assigned() == self.num_variables(),
            "a solution is only taken from a complete assignment"
        );

        let values = self
            .values
            .iter()
            .map(|value| value.unwrap_or(false))
            .collect::<Vec<_>>();

        Solution::new(values.into())
    }
}

impl PartialAssignment for Assignments {
    fn value(&self, variable: VariableId) -> Option<bool> {
        self.values[variable]
    }
}
