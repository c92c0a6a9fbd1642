use std::fmt::Display;
use std::hash::Hash;

/// Items that can be reordered by a [`ReorderableView`](crate::ReorderableView).
///
/// Two items are the *same item* when their ids are equal, regardless of any other field. Ids must
/// be unique within a collection and stable for as long as the item lives in it; the view uses
/// them to find positions, to key egui widgets and as the drag payload text.
pub trait ReorderableItem {
    type Id: Clone + Eq + Hash + Display;

    fn id(&self) -> Self::Id;

    /// Identity comparison. Not structural equality.
    fn same_item(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Position of the first item with `id` in `items`.
///
/// Duplicate ids are the caller's problem: the first match wins.
pub fn position_of<T: ReorderableItem>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| &item.id() == id)
}

macro_rules! impl_reorderable_for_primitive {
    ($($ty:ty),*) => {
        $(
            impl ReorderableItem for $ty {
                type Id = $ty;

                fn id(&self) -> Self::Id {
                    self.clone()
                }
            }
        )*
    };
}

// plain values are their own identity
impl_reorderable_for_primitive!(String, &'static str, char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Card {
        id: u32,
        title: &'static str,
    }

    impl ReorderableItem for Card {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn identity_ignores_other_fields() {
        let a = Card { id: 1, title: "a" };
        let renamed = Card { id: 1, title: "renamed" };
        let b = Card { id: 2, title: "a" };

        assert!(a.same_item(&renamed));
        assert!(!a.same_item(&b));
    }

    #[test]
    fn position_of_finds_first_match() {
        let cards = vec![
            Card { id: 4, title: "x" },
            Card { id: 7, title: "y" },
            Card { id: 7, title: "duplicate" },
        ];

        assert_eq!(position_of(&cards, &7), Some(1));
        assert_eq!(position_of(&cards, &4), Some(0));
        assert_eq!(position_of(&cards, &9), None);
    }

    #[test]
    fn strings_are_their_own_id() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(position_of(&items, &"b".to_string()), Some(1));
    }
}
