use std::ops::{Index, IndexMut};

/* ---------------------------------- Index --------------------------------- */

pub use crate::new_key_type;

/// A typed handle into an [`ArenaDense`].
pub trait IndexLike: Clone + Copy + Eq + std::hash::Hash {
    fn new(idx: usize) -> Self;
    fn index(&self) -> usize;
}

/* ---------------------------------- Arena --------------------------------- */

/// Append-only storage addressed by typed ids; ids are handed out in
/// allocation order, so a later id was always allocated after an earlier one.
#[derive(Debug, Clone)]
pub struct ArenaDense<Id, T> {
    vec: Vec<T>,
    _marker: std::marker::PhantomData<Id>,
}

mod impls {
    use super::*;

    impl<Id, T> Default for ArenaDense<Id, T> {
        fn default() -> Self {
            Self { vec: Vec::new(), _marker: Default::default() }
        }
    }

    impl<Id: IndexLike, T> ArenaDense<Id, T> {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn alloc(&mut self, val: T) -> Id {
            let id = Id::new(self.vec.len());
            self.vec.push(val);
            id
        }
        pub fn get(&self, id: &Id) -> Option<&T> {
            self.vec.get(id.index())
        }
        pub fn get_mut(&mut self, id: &Id) -> Option<&mut T> {
            self.vec.get_mut(id.index())
        }
        pub fn len(&self) -> usize {
            self.vec.len()
        }
        pub fn is_empty(&self) -> bool {
            self.vec.is_empty()
        }
        pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Id, &T)> {
            self.vec.iter().enumerate().map(|(i, val)| (Id::new(i), val))
        }
        pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (Id, &mut T)> {
            self.vec.iter_mut().enumerate().map(|(i, val)| (Id::new(i), val))
        }
        /// Consumes the arena, yielding entries newest first.
        pub fn drain_rev(self) -> impl Iterator<Item = (Id, T)> {
            self.vec.into_iter().enumerate().rev().map(|(i, val)| (Id::new(i), val))
        }
    }

    impl<Id: IndexLike, T> Index<&Id> for ArenaDense<Id, T> {
        type Output = T;
        fn index(&self, id: &Id) -> &Self::Output {
            &self.vec[id.index()]
        }
    }

    impl<Id: IndexLike, T> IndexMut<&Id> for ArenaDense<Id, T> {
        fn index_mut(&mut self, id: &Id) -> &mut Self::Output {
            &mut self.vec[id.index()]
        }
    }
}

/* --------------------------------- Macros --------------------------------- */

#[macro_export]
macro_rules! new_key_type {
    ( $(#[$outer:meta])* $vis:vis struct $name:ident ; $($rest:tt)* ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
        $vis struct $name(usize);

        impl $crate::arena::IndexLike for $name {
            fn new(idx: usize) -> Self {
                Self(idx)
            }
            fn index(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        $crate::new_key_type!($($rest)*);
    };

    () => {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    new_key_type! {
        struct SlotId;
    }

    #[test]
    fn alloc_in_order() {
        let mut arena: ArenaDense<SlotId, &str> = ArenaDense::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert!(a < b);
        assert_eq!(arena[&b], "b");
        arena[&a] = "z";
        assert_eq!(arena.drain_rev().map(|(_, v)| v).collect::<Vec<_>>(), vec!["b", "z"]);
    }
}
