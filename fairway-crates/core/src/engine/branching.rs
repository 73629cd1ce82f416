use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::VariableId;
use crate::engine::Assignments;

/// The static variable order of the search.
///
/// Variables are partitioned into groups which are resolved one after the other. Within the first
/// group that still has an unassigned variable, the search tries the first unassigned variable as
/// true; its refutation (the variable set to false) is explored on backtracking. For the schedule
/// model a group holds the slot variables of one participant in one round, ordered by team then
/// cart, and groups are ordered by round then participant.
#[derive(Clone, Debug, Default)]
pub struct BranchingOrder {
    groups: Vec<Box<[VariableId]>>,
}

impl BranchingOrder {
    pub fn new(groups: impl IntoIterator<Item = Vec<VariableId>>) -> BranchingOrder {
        BranchingOrder {
            groups: groups.into_iter().map(Vec::into_boxed_slice).collect(),
        }
    }

    /// Returns the unassigned variables of the first group which is not fully assigned.
    pub(crate) fn first_open_group(&self, assignments: &Assignments) -> Option<Vec<VariableId>> {
        self.groups
            .iter()
            .find(|group| {
                group
                    .iter()
                    .any(|&variable| !assignments.is_assigned(variable))
            })
            .map(|group| {
                group
                    .iter()
                    .copied()
                    .filter(|&variable| !assignments.is_assigned(variable))
                    .collect()
            })
    }

    /// Selects the next decision, or [`None`] if every variable is assigned.
    ///
    /// Variables outside of the groups are only ever branched on once all groups are resolved, and
    /// then they are tried as false first. For a model whose derived variables are functionally
    /// determined by the grouped variables this never happens.
    pub(crate) fn next_decision(&self, assignments: &Assignments) -> Option<Literal> {
        let grouped = self.groups.iter().find_map(|group| {
            group
                .iter()
                .copied()
                .find(|&variable| !assignments.is_assigned(variable))
        });

        if let Some(variable) = grouped {
            return Some(Literal::positive(variable));
        }

        (0..assignments.num_variables())
            .map(VariableId::create_from_index)
            .find(|&variable| !assignments.is_assigned(variable))
            .map(Literal::negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(index: usize) -> VariableId {
        VariableId::create_from_index(index)
    }

    #[test]
    fn groups_are_resolved_in_order() {
        let order = BranchingOrder::new([vec![variable(2), variable(1)], vec![variable(0)]]);
        let mut assignments = Assignments::with_num_variables(4);

        assert_eq!(Some(Literal::positive(variable(2))), order.next_decision(&assignments));

        let _ = assignments.assign(Literal::negative(variable(2)));
        assert_eq!(Some(Literal::positive(variable(1))), order.next_decision(&assignments));

        let _ = assignments.assign(Literal::positive(variable(1)));
        assert_eq!(Some(Literal::positive(variable(0))), order.next_decision(&assignments));
    }

    #[test]
    fn ungrouped_variables_are_tried_false() {
        let order = BranchingOrder::new([vec![variable(0)]]);
        let mut assignments = Assignments::with_num_variables(2);
        let _ = assignments.assign(Literal::positive(variable(0)));

        assert_eq!(Some(Literal::negative(variable(1))), order.next_decision(&assignments));

        let _ = assignments.assign(Literal::negative(variable(1)));
        assert_eq!(None, order.next_decision(&assignments));
    }

    #[test]
    fn open_group_lists_only_unassigned_variables() {
        let order = BranchingOrder::new([vec![variable(0), variable(1), variable(2)]]);
        let mut assignments = Assignments::with_num_variables(3);
        let _ = assignments.assign(Literal::negative(variable(0)));

        assert_eq!(
            Some(vec![variable(1), variable(2)]),
            order.first_open_group(&assignments)
        );
    }
}
