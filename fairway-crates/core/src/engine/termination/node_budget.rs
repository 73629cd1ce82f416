use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the given number of decisions (search nodes) has
/// been made.
///
/// When the search runs on several workers, every worker receives its own copy of the budget.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    budget: u64,
    num_decisions: u64,
}

impl NodeBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_decisions: 0,
        }
    }
}

impl TerminationCondition for NodeBudget {
    fn should_stop(&mut self) -> bool {
        self.num_decisions >= self.budget
    }

    fn decision_has_been_made(&mut self) {
        self.num_decisions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_stops_immediately() {
        assert!(NodeBudget::new(0).should_stop());
    }

    #[test]
    fn budget_counts_decisions() {
        let mut budget = NodeBudget::new(2);

        budget.decision_has_been_made();
        assert!(!budget.should_stop());

        budget.decision_has_been_made();
        assert!(budget.should_stop());
    }
}
