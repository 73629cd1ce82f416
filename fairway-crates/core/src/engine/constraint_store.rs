//! The central registry of hard constraints and the objective.
//!
//! Every constraint, whatever rule it came from, is kept as a [`Constraint`]. Internally each one
//! is normalised to a cardinality constraint `lower <= #true(literals) <= upper`, which is the only
//! form the propagation engine has to understand.
use itertools::Itertools;
use log::trace;

use super::objective::Objective;
use crate::basic_types::ModelError;
use crate::basic_types::PartialAssignment;
use crate::containers::storage_key;
use crate::containers::KeyedVec;
use crate::engine::variables::Literal;
use crate::engine::variables::VariableId;

/// A hard constraint over boolean variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// Exactly `rhs` of the literals are true.
    SumEquals { literals: Box<[Literal]>, rhs: u32 },
    /// At most `rhs` of the literals are true.
    SumAtMost { literals: Box<[Literal]>, rhs: u32 },
    /// At least `rhs` of the literals are true.
    SumAtLeast { literals: Box<[Literal]>, rhs: u32 },
    /// At least one of the literals is true.
    Clause { literals: Box<[Literal]> },
    /// If `antecedent` is true then `consequent` is true.
    Implication {
        antecedent: Literal,
        consequent: Literal,
    },
}

impl Constraint {
    pub fn sum_equals(literals: impl IntoIterator<Item = Literal>, rhs: u32) -> Constraint {
        Constraint::SumEquals {
            literals: literals.into_iter().collect(),
            rhs,
        }
    }

    pub fn sum_at_most(literals: impl IntoIterator<Item = Literal>, rhs: u32) -> Constraint {
        Constraint::SumAtMost {
            literals: literals.into_iter().collect(),
            rhs,
        }
    }

    pub fn sum_at_least(literals: impl IntoIterator<Item = Literal>, rhs: u32) -> Constraint {
        Constraint::SumAtLeast {
            literals: literals.into_iter().collect(),
            rhs,
        }
    }

    pub fn clause(literals: impl IntoIterator<Item = Literal>) -> Constraint {
        Constraint::Clause {
            literals: literals.into_iter().collect(),
        }
    }

    pub fn implication(antecedent: impl Into<Literal>, consequent: impl Into<Literal>) -> Constraint {
        Constraint::Implication {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
        }
    }

    /// The literals this constraint counts, after normalisation.
    fn normalise(&self) -> Cardinality {
        match self {
            Constraint::SumEquals { literals, rhs } => Cardinality::new(literals.clone(), *rhs, *rhs),
            Constraint::SumAtMost { literals, rhs } => Cardinality::new(literals.clone(), 0, *rhs),
            Constraint::SumAtLeast { literals, rhs } => {
                let upper = literals.len() as u32;
                Cardinality::new(literals.clone(), *rhs, upper)
            }
            Constraint::Clause { literals } => {
                let upper = literals.len() as u32;
                Cardinality::new(literals.clone(), 1, upper)
            }
            Constraint::Implication {
                antecedent,
                consequent,
            } => Cardinality::new([!*antecedent, *consequent].into(), 1, 2),
        }
    }

    fn variables(&self) -> Box<dyn Iterator<Item = VariableId> + '_> {
        match self {
            Constraint::SumEquals { literals, .. }
            | Constraint::SumAtMost { literals, .. }
            | Constraint::SumAtLeast { literals, .. }
            | Constraint::Clause { literals } => Box::new(literals.iter().map(Literal::variable)),
            Constraint::Implication {
                antecedent,
                consequent,
            } => Box::new([antecedent.variable(), consequent.variable()].into_iter()),
        }
    }
}

/// The id of a constraint in the [`ConstraintStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId {
    id: u32,
}

storage_key!(ConstraintId);

/// Whether a constraint holds under a partial assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintStatus {
    /// The constraint holds for every extension of the assignment.
    Satisfied,
    /// No extension of the assignment satisfies the constraint.
    Violated,
    /// Whether the constraint holds depends on variables which are not yet assigned.
    Undetermined,
}

/// The normalised form `lower <= #true(literals) <= upper` of a [`Constraint`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cardinality {
    pub(crate) literals: Box<[Literal]>,
    pub(crate) lower: u32,
    pub(crate) upper: u32,
}

impl Cardinality {
    fn new(literals: Box<[Literal]>, lower: u32, upper: u32) -> Cardinality {
        Cardinality {
            literals,
            lower,
            upper,
        }
    }

    pub(crate) fn len(&self) -> u32 {
        self.literals.len() as u32
    }

    fn status(&self, assignment: &impl PartialAssignment) -> ConstraintStatus {
        let (num_true, num_undetermined) =
            self.literals
                .iter()
                .fold((0, 0), |(num_true, num_undetermined), &literal| {
                    match assignment.literal_value(literal) {
                        Some(true) => (num_true + 1, num_undetermined),
                        Some(false) => (num_true, num_undetermined),
                        None => (num_true, num_undetermined + 1),
                    }
                });

        if num_true > self.upper || num_true + num_undetermined < self.lower {
            ConstraintStatus::Violated
        } else if num_true >= self.lower && num_true + num_undetermined <= self.upper {
            ConstraintStatus::Satisfied
        } else {
            ConstraintStatus::Undetermined
        }
    }
}

/// An occurrence of a variable in a constraint, with the polarity under which it is counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub(crate) constraint: ConstraintId,
    pub(crate) is_positive: bool,
}

/// Holds the declared variables, every hard constraint, and the (optional) objective.
///
/// The store is read-only once search starts; it is shared between search workers by reference.
#[derive(Clone, Debug, Default)]
pub struct ConstraintStore {
    variable_names: KeyedVec<VariableId, String>,
    constraints: KeyedVec<ConstraintId, Constraint>,
    cardinalities: KeyedVec<ConstraintId, Cardinality>,
    occurrences: KeyedVec<VariableId, Vec<Occurrence>>,
    objective: Option<Objective>,
}

impl ConstraintStore {
    /// Declares a new boolean variable. The name is only used for logging.
    pub fn new_variable(&mut self, name: impl Into<String>) -> VariableId {
        let variable = self.variable_names.push(name.into());
        let _ = self.occurrences.push(Vec::new());
        variable
    }

    pub fn num_variables(&self) -> usize {
        self.variable_names.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable_name(&self, variable: VariableId) -> &str {
        &self.variable_names[variable]
    }

    /// The names of the variables in `constraint`, in the order they appear.
    pub(crate) fn variable_names_of(&self, constraint: &Constraint) -> String {
        constraint
            .variables()
            .map(|variable| self.variable_name(variable))
            .join(", ")
    }

    /// Adds a hard constraint to the store.
    ///
    /// Fails with [`ModelError::UndeclaredVariable`] if the constraint mentions a variable which
    /// was not created through [`ConstraintStore::new_variable`].
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ModelError> {
        if let Some(variable) = constraint
            .variables()
            .find(|variable| self.variable_names.get(*variable).is_none())
        {
            return Err(ModelError::UndeclaredVariable {
                variable,
                num_declared: self.num_variables(),
            });
        }

        let cardinality = constraint.normalise();
        let constraint_id = self.cardinalities.push(cardinality);

        for &literal in self.cardinalities[constraint_id].literals.iter() {
            self.occurrences[literal.variable()].push(Occurrence {
                constraint: constraint_id,
                is_positive: literal.is_positive(),
            });
        }

        trace!(
            "posted constraint {constraint_id:?} over [{}]: {constraint:?}",
            self.variable_names_of(&constraint)
        );
        let _ = self.constraints.push(constraint);

        Ok(constraint_id)
    }

    pub fn constraint(&self, constraint_id: ConstraintId) -> &Constraint {
        &self.constraints[constraint_id]
    }

    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints.iter_enumerated()
    }

    /// Sets the objective which is to be maximised.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        if let Some(variable) = objective
            .literals()
            .map(|literal| literal.variable())
            .find(|variable| self.variable_names.get(*variable).is_none())
        {
            return Err(ModelError::UndeclaredObjectiveVariable {
                variable,
                num_declared: self.num_variables(),
            });
        }

        self.objective = Some(objective);
        Ok(())
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// Determines whether the given constraint is satisfied, violated, or still undetermined under
    /// `assignment`.
    pub fn status(
        &self,
        constraint_id: ConstraintId,
        assignment: &impl PartialAssignment,
    ) -> ConstraintStatus {
        self.cardinalities[constraint_id].status(assignment)
    }

    /// Returns the constraints which are violated under `assignment`.
    pub fn violated_constraints<'a>(
        &'a self,
        assignment: &'a impl PartialAssignment,
    ) -> impl Iterator<Item = ConstraintId> + 'a {
        self.cardinalities
            .iter_enumerated()
            .filter(|(_, cardinality)| cardinality.status(assignment) == ConstraintStatus::Violated)
            .map(|(constraint_id, _)| constraint_id)
    }

    /// Returns the constraints whose status still depends on unassigned variables.
    pub fn undetermined_constraints<'a>(
        &'a self,
        assignment: &'a impl PartialAssignment,
    ) -> impl Iterator<Item = ConstraintId> + 'a {
        self.cardinalities
            .iter_enumerated()
            .filter(|(_, cardinality)| {
                cardinality.status(assignment) == ConstraintStatus::Undetermined
            })
            .map(|(constraint_id, _)| constraint_id)
    }

    pub(crate) fn cardinality(&self, constraint_id: ConstraintId) -> &Cardinality {
        &self.cardinalities[constraint_id]
    }

    pub(crate) fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> {
        self.cardinalities.keys()
    }

    pub(crate) fn occurrences(&self, variable: VariableId) -> &[Occurrence] {
        &self.occurrences[variable]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;
    use crate::engine::Assignments;

    fn store_with_variables(num_variables: usize) -> (ConstraintStore, Vec<VariableId>) {
        let mut store = ConstraintStore::default();
        let variables = (0..num_variables)
            .map(|index| store.new_variable(format!("v{index}")))
            .collect();
        (store, variables)
    }

    #[test]
    fn constraints_are_described_by_variable_name() {
        let (store, variables) = store_with_variables(3);

        let constraint = Constraint::implication(variables[2], variables[0]);

        assert_eq!("v1", store.variable_name(variables[1]));
        assert_eq!("v2, v0", store.variable_names_of(&constraint));
    }

    #[test]
    fn undeclared_variables_are_rejected() {
        let (mut store, _) = store_with_variables(2);
        let undeclared = VariableId::create_from_index(5);

        let result = store.add_constraint(Constraint::clause([undeclared.into()]));

        assert_eq!(
            Err(ModelError::UndeclaredVariable {
                variable: undeclared,
                num_declared: 2
            }),
            result
        );
        assert_eq!(0, store.num_constraints());
    }

    #[test]
    fn implication_is_normalised_to_a_binary_clause() {
        let (mut store, variables) = store_with_variables(2);

        let constraint_id = store
            .add_constraint(Constraint::implication(variables[0], variables[1]))
            .expect("declared variables");

        let cardinality = store.cardinality(constraint_id);
        assert_eq!(
            &[Literal::negative(variables[0]), Literal::positive(variables[1])],
            &*cardinality.literals
        );
        assert_eq!((1, 2), (cardinality.lower, cardinality.upper));
    }

    #[test]
    fn status_follows_the_partial_assignment() {
        let (mut store, variables) = store_with_variables(3);
        let constraint_id = store
            .add_constraint(Constraint::sum_equals(
                variables.iter().map(|&variable| Literal::positive(variable)),
                2,
            ))
            .expect("declared variables");

        let mut assignments = Assignments::with_num_variables(3);
        assert_eq!(
            ConstraintStatus::Undetermined,
            store.status(constraint_id, &assignments)
        );

        let _ = assignments.assign(Literal::positive(variables[0]));
        let _ = assignments.assign(Literal::positive(variables[1]));
        assert_eq!(
            ConstraintStatus::Undetermined,
            store.status(constraint_id, &assignments)
        );

        let _ = assignments.assign(Literal::positive(variables[2]));
        assert_eq!(
            ConstraintStatus::Violated,
            store.status(constraint_id, &assignments)
        );
        assert_eq!(
            vec![constraint_id],
            store.violated_constraints(&assignments).collect::<Vec<_>>()
        );
    }

    #[test]
    fn at_most_is_entailed_once_enough_literals_are_false() {
        let (mut store, variables) = store_with_variables(3);
        let constraint_id = store
            .add_constraint(Constraint::sum_at_most(
                variables.iter().map(|&variable| Literal::positive(variable)),
                1,
            ))
            .expect("declared variables");

        let mut assignments = Assignments::with_num_variables(3);
        let _ = assignments.assign(Literal::negative(variables[0]));
        let _ = assignments.assign(Literal::negative(variables[1]));

        assert_eq!(
            ConstraintStatus::Satisfied,
            store.status(constraint_id, &assignments)
        );
        assert_eq!(0, store.undetermined_constraints(&assignments).count());
    }
}
