use super::VariableId;
use crate::containers::StorageKey;

/// A [`VariableId`] with a polarity: the positive literal is true when the variable is true, the
/// negative literal when it is false.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    code: u32,
}

impl Literal {
    pub fn new(variable: VariableId, is_positive: bool) -> Literal {
        Literal {
            code: variable.index() as u32 * 2 + (is_positive as u32),
        }
    }

    pub fn positive(variable: VariableId) -> Literal {
        Literal::new(variable, true)
    }

    pub fn negative(variable: VariableId) -> Literal {
        Literal::new(variable, false)
    }

    pub fn is_positive(&self) -> bool {
        (self.code & 1) == 1
    }

    pub fn variable(&self) -> VariableId {
        VariableId::create_from_index((self.code / 2) as usize)
    }
}

impl From<VariableId> for Literal {
    fn from(variable: VariableId) -> Self {
        Literal::positive(variable)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            code: self.code ^ 1,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_positive() {
            write!(f, "{}", self.variable())
        } else {
            write!(f, "~{}", self.variable())
        }
    }
}

impl std::fmt::Debug for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_flips_polarity_only() {
        let variable = VariableId::create_from_index(5);
        let literal = Literal::positive(variable);

        assert!(!(!literal).is_positive());
        assert_eq!(variable, (!literal).variable());
        assert_eq!(literal, !!literal);
    }

    #[test]
    fn display_marks_negative_literals() {
        let variable = VariableId::create_from_index(3);

        assert_eq!("b3", Literal::positive(variable).to_string());
        assert_eq!("~b3", Literal::negative(variable).to_string());
    }
}
