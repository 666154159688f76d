//! Entity traits: identity plus ordering inside a parent collection.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity positioned by a 1-based `sequence` inside its parent
/// (chapters in a course, lessons in a chapter, flashcards in a lesson).
pub trait Sequenced {
    fn sequence(&self) -> u32;
}

/// Sequence number for the next item appended to `items`.
///
/// This is `max(sequence) + 1`, or `1` for an empty collection. Gaps left by
/// deletions are not reused.
pub fn next_sequence<'a, T, I>(items: I) -> u32
where
    T: Sequenced + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(Sequenced::sequence)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slot(u32);

    impl Sequenced for Slot {
        fn sequence(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn next_sequence_of_empty_is_one() {
        let items: Vec<Slot> = Vec::new();
        assert_eq!(next_sequence(&items), 1);
    }

    #[test]
    fn next_sequence_skips_gaps() {
        let items = vec![Slot(1), Slot(4), Slot(2)];
        assert_eq!(next_sequence(&items), 5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the next sequence is strictly greater than every existing one.
            #[test]
            fn next_sequence_exceeds_all(seqs in proptest::collection::vec(0u32..10_000, 0..50)) {
                let items: Vec<Slot> = seqs.iter().copied().map(Slot).collect();
                let next = next_sequence(&items);
                prop_assert!(items.iter().all(|s| s.0 < next));
                prop_assert!(next >= 1);
            }
        }
    }
}
