use crate::containers::storage_key;
use crate::containers::StorageKey;

macro_rules! index_type {
    ($(#[$documentation:meta])* $name:ident, $display:literal) => {
        $(#[$documentation])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            id: u32,
        }

        storage_key!($name);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($display, "{}"), self.id)
            }
        }
    };
}

index_type!(
    /// The position of a participant in the roster.
    ParticipantId,
    "p"
);
index_type!(
    /// The index of a round.
    RoundId,
    "r"
);
index_type!(
    /// The index of a team within its round.
    TeamId,
    "t"
);
index_type!(
    /// The index of a cart within its team.
    CartId,
    "c"
);
index_type!(
    /// A (round, team, cart) triple, numbered consecutively over all rounds.
    SlotId,
    "s"
);
index_type!(
    /// The index of an unordered pair of participants, see [`ParticipantPair::id`].
    PairId,
    "pair"
);

/// An unordered pair of distinct participants; `first` is always the smaller id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantPair {
    first: ParticipantId,
    second: ParticipantId,
}

impl ParticipantPair {
    /// Creates the pair of `a` and `b`, or [`None`] if they are the same participant.
    pub fn new(a: ParticipantId, b: ParticipantId) -> Option<ParticipantPair> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(ParticipantPair {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Some(ParticipantPair {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> ParticipantId {
        self.first
    }

    pub fn second(&self) -> ParticipantId {
        self.second
    }

    /// The dense index of this pair among all pairs of `num_participants` participants, in the
    /// order (0, 1), (0, 2), ..., (0, n-1), (1, 2), ...
    pub fn id(&self, num_participants: usize) -> PairId {
        let i = self.first.index();
        let j = self.second.index();
        PairId::create_from_index(i * (2 * num_participants - i - 1) / 2 + (j - i - 1))
    }
}

/// Returns every pair of `num_participants` participants, in the order of [`ParticipantPair::id`].
pub fn all_pairs(num_participants: usize) -> impl Iterator<Item = ParticipantPair> {
    (0..num_participants).flat_map(move |i| {
        (i + 1..num_participants).map(move |j| ParticipantPair {
            first: ParticipantId::create_from_index(i),
            second: ParticipantId::create_from_index(j),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unordered() {
        let a = ParticipantId::create_from_index(3);
        let b = ParticipantId::create_from_index(1);

        assert_eq!(ParticipantPair::new(a, b), ParticipantPair::new(b, a));
        assert_eq!(None, ParticipantPair::new(a, a));
    }

    #[test]
    fn pair_ids_are_dense_and_follow_enumeration_order() {
        let num_participants = 5;

        for (index, pair) in all_pairs(num_participants).enumerate() {
            assert_eq!(index, pair.id(num_participants).index());
        }
        assert_eq!(10, all_pairs(num_participants).count());
    }
}
