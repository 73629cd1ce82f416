//! Derived variables which are a boolean function of other variables.
//!
//! Both gates expose the two directions of their definition separately. The `implications` alone
//! make the output an under-approximation (AND) or an over-approximation (OR) of the function,
//! which is all a constraint bounding the outputs from above needs. The `completion` makes the
//! output functionally determined by its inputs; the schedule model posts both directions because
//! the search never branches on derived variables.
use crate::basic_types::ModelError;
use crate::engine::Constraint;
use crate::engine::ConstraintStore;
use crate::engine::variables::Literal;
use crate::engine::variables::VariableId;

/// `output <-> input_1 & ... & input_n`
#[derive(Clone, Debug)]
pub(crate) struct AndGate {
    output: VariableId,
    inputs: Box<[VariableId]>,
}

impl AndGate {
    pub(crate) fn new(output: VariableId, inputs: impl IntoIterator<Item = VariableId>) -> AndGate {
        AndGate {
            output,
            inputs: inputs.into_iter().collect(),
        }
    }

    /// `output -> input_i` for every input.
    pub(crate) fn implications(&self) -> impl Iterator<Item = Constraint> + '_ {
        self.inputs
            .iter()
            .map(|&input| Constraint::implication(self.output, input))
    }

    /// `!input_1 | ... | !input_n | output`
    pub(crate) fn completion(&self) -> Constraint {
        Constraint::clause(
            self.inputs
                .iter()
                .map(|&input| Literal::negative(input))
                .chain(std::iter::once(Literal::positive(self.output))),
        )
    }

    pub(crate) fn post(&self, store: &mut ConstraintStore) -> Result<(), ModelError> {
        for constraint in self.implications() {
            let _ = store.add_constraint(constraint)?;
        }
        let _ = store.add_constraint(self.completion())?;
        Ok(())
    }
}

/// `output <-> input_1 | ... | input_n`; with no inputs the output is false.
#[derive(Clone, Debug)]
pub(crate) struct OrGate {
    output: VariableId,
    inputs: Box<[VariableId]>,
}

impl OrGate {
    pub(crate) fn new(output: VariableId, inputs: impl IntoIterator<Item = VariableId>) -> OrGate {
        OrGate {
            output,
            inputs: inputs.into_iter().collect(),
        }
    }

    /// `input_i -> output` for every input.
    pub(crate) fn implications(&self) -> impl Iterator<Item = Constraint> + '_ {
        self.inputs
            .iter()
            .map(|&input| Constraint::implication(input, self.output))
    }

    /// `!output | input_1 | ... | input_n`
    pub(crate) fn completion(&self) -> Constraint {
        Constraint::clause(
            std::iter::once(Literal::negative(self.output))
                .chain(self.inputs.iter().map(|&input| Literal::positive(input))),
        )
    }

    pub(crate) fn post(&self, store: &mut ConstraintStore) -> Result<(), ModelError> {
        for constraint in self.implications() {
            let _ = store.add_constraint(constraint)?;
        }
        let _ = store.add_constraint(self.completion())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::termination::Indefinite;
    use crate::engine::BranchingOrder;
    use crate::engine::SearchOptions;
    use crate::engine::SearchResult;

    type PostGate = fn(&mut ConstraintStore, VariableId, Vec<VariableId>) -> Result<(), ModelError>;

    /// Fixes the inputs to `values` and returns the value the output takes.
    fn output_for(post: PostGate, values: &[bool]) -> bool {
        let mut store = ConstraintStore::default();
        let output = store.new_variable("output");
        let inputs = (0..values.len())
            .map(|index| store.new_variable(format!("input{index}")))
            .collect::<Vec<_>>();
        post(&mut store, output, inputs.clone()).expect("declared variables");

        for (&input, &value) in inputs.iter().zip(values) {
            let _ = store
                .add_constraint(Constraint::clause([Literal::new(input, value)]))
                .expect("declared variables");
        }

        let (result, _) = crate::engine::search(
            &store,
            &BranchingOrder::default(),
            SearchOptions::default(),
            &mut Indefinite,
        );
        let SearchResult::Feasible(solution) = result else {
            panic!("gate must be satisfiable for fixed inputs, got {result:?}");
        };
        solution.get_value(output)
    }

    fn and_gate(
        store: &mut ConstraintStore,
        output: VariableId,
        inputs: Vec<VariableId>,
    ) -> Result<(), ModelError> {
        AndGate::new(output, inputs).post(store)
    }

    fn or_gate(
        store: &mut ConstraintStore,
        output: VariableId,
        inputs: Vec<VariableId>,
    ) -> Result<(), ModelError> {
        OrGate::new(output, inputs).post(store)
    }

    #[test]
    fn and_gate_is_true_only_when_all_inputs_are() {
        assert!(output_for(and_gate, &[true, true]));
        assert!(!output_for(and_gate, &[true, false]));
        assert!(!output_for(and_gate, &[false, false]));
    }

    #[test]
    fn or_gate_is_true_when_any_input_is() {
        assert!(output_for(or_gate, &[false, true]));
        assert!(!output_for(or_gate, &[false, false]));
    }

    #[test]
    fn or_gate_without_inputs_is_false() {
        assert!(!output_for(or_gate, &[]));
    }

    #[test]
    fn and_gate_exposes_both_directions() {
        let mut store = ConstraintStore::default();
        let output = store.new_variable("output");
        let a = store.new_variable("a");
        let b = store.new_variable("b");
        let gate = AndGate::new(output, [a, b]);

        assert_eq!(
            vec![Constraint::implication(output, a), Constraint::implication(output, b)],
            gate.implications().collect::<Vec<_>>()
        );
        assert_eq!(
            Constraint::clause([Literal::negative(a), Literal::negative(b), Literal::positive(output)]),
            gate.completion()
        );
    }
}
