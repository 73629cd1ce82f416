use crate::basic_types::PartialAssignment;
use crate::engine::variables::Literal;

/// A term of an [`ObjectiveGroup`]: it counts once if any of its alternatives is true.
///
/// For the friend objective, a term is one round and its alternatives are the teamed-together
/// indicators of that round; a pair shares at most one team per round so at most one alternative is
/// ever true.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveTerm {
    alternatives: Box<[Literal]>,
}

impl ObjectiveTerm {
    pub fn new(alternatives: impl IntoIterator<Item = Literal>) -> ObjectiveTerm {
        ObjectiveTerm {
            alternatives: alternatives.into_iter().collect(),
        }
    }

    pub fn alternatives(&self) -> &[Literal] {
        &self.alternatives
    }

    fn is_true(&self, assignment: &impl PartialAssignment) -> bool {
        self.alternatives
            .iter()
            .any(|&literal| assignment.literal_value(literal) == Some(true))
    }

    fn can_be_true(&self, assignment: &impl PartialAssignment) -> bool {
        self.alternatives
            .iter()
            .any(|&literal| assignment.literal_value(literal) != Some(false))
    }
}

/// A weighted set of terms, typically all rounds for one friend pair.
///
/// `cap` is an upper limit on the number of terms which can be true together that is enforced by a
/// hard constraint elsewhere; it only tightens [`Objective::upper_bound`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveGroup {
    weight: u32,
    cap: Option<u32>,
    terms: Vec<ObjectiveTerm>,
}

impl ObjectiveGroup {
    pub fn new(weight: u32, cap: Option<u32>, terms: Vec<ObjectiveTerm>) -> ObjectiveGroup {
        ObjectiveGroup { weight, cap, terms }
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn terms(&self) -> &[ObjectiveTerm] {
        &self.terms
    }

    fn value(&self, assignment: &impl PartialAssignment) -> i64 {
        let num_true = self
            .terms
            .iter()
            .filter(|term| term.is_true(assignment))
            .count() as i64;

        self.weight as i64 * num_true
    }

    fn upper_bound(&self, assignment: &impl PartialAssignment) -> i64 {
        let num_possible = self
            .terms
            .iter()
            .filter(|term| term.can_be_true(assignment))
            .count() as u32;
        let num_possible = self.cap.map_or(num_possible, |cap| num_possible.min(cap));

        self.weight as i64 * num_possible as i64
    }
}

/// A linear objective over boolean literals which is to be maximised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Objective {
    groups: Vec<ObjectiveGroup>,
}

impl Objective {
    pub fn new(groups: Vec<ObjectiveGroup>) -> Objective {
        Objective { groups }
    }

    pub fn groups(&self) -> &[ObjectiveGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.weight == 0 || group.terms.is_empty())
    }

    pub(crate) fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.terms.iter())
            .flat_map(|term| term.alternatives.iter().copied())
    }

    /// The value of the objective counting only literals that are already true.
    pub fn value(&self, assignment: &impl PartialAssignment) -> i64 {
        self.groups.iter().map(|group| group.value(assignment)).sum()
    }

    /// An upper bound on the value of any extension of `assignment`.
    pub fn upper_bound(&self, assignment: &impl PartialAssignment) -> i64 {
        self.groups
            .iter()
            .map(|group| group.upper_bound(assignment))
            .sum()
    }
}
