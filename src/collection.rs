//! Map-like, set-like and sequence-like shape classes.
//!
//! [`Collection`] is the iteration contract shared by the dispatcher's default
//! container rendering and the [`Windowed`](crate::Windowed) container formatter.
//! It exposes the collection's [`CollectionKind`], its logical size, and its
//! entries in iteration order. Map entries render as `key: value`.
//!
//! | Kind       | Types                                               | Default rendering |
//! |------------|-----------------------------------------------------|-------------------|
//! | `Map`      | `HashMap`, `BTreeMap`, `IndexMap`                   | `{k1: v1, k2: v2}` |
//! | `Set`      | `HashSet`, `BTreeSet`, `IndexSet`                   | `{e1, e2}`        |
//! | `Sequence` | `[T]`, `[T; N]`, `Vec`, `VecDeque`, `LinkedList`, `BinaryHeap` | `[e1, e2]` |
//!
//! Hash-based collections render in whatever order they iterate; the order is
//! not normalized.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{render, Collection, CollectionKind};
//! use std::collections::{BTreeMap, BTreeSet};
//!
//! let mut data = BTreeMap::new();
//! data.insert("evens", BTreeSet::from([2, 4, 6]));
//! data.insert("odds", BTreeSet::from([1, 3, 5]));
//!
//! assert_eq!(render(&data), "{evens: {2, 4, 6}, odds: {1, 3, 5}}");
//! assert_eq!(<BTreeMap<&str, BTreeSet<i32>> as Collection>::KIND, CollectionKind::Map);
//! assert_eq!(data.entry_count(), 2);
//! ```

use crate::render::write_joined;
use crate::Render;
use indexmap::{IndexMap, IndexSet};
use std::collections::{
    binary_heap, btree_map, btree_set, hash_map, hash_set, linked_list, vec_deque, BTreeMap,
    BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque,
};
use std::{iter, slice};

/// The container shape a [`Collection`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Map,
    Set,
    Sequence,
}

impl CollectionKind {
    /// Opening and closing text used by the default rendering.
    #[must_use]
    pub const fn brackets(self) -> (&'static str, &'static str) {
        match self {
            CollectionKind::Map | CollectionKind::Set => ("{", "}"),
            CollectionKind::Sequence => ("[", "]"),
        }
    }
}

/// An iterable container whose entries can be rendered.
pub trait Collection {
    /// A single renderable entry; `key: value` for maps.
    type Entry<'a>: Render
    where
        Self: 'a;

    type Entries<'a>: Iterator<Item = Self::Entry<'a>>
    where
        Self: 'a;

    const KIND: CollectionKind;

    /// Entries in iteration order.
    fn entries(&self) -> Self::Entries<'_>;

    /// Logical size; counts by traversal unless the container knows its length.
    fn entry_count(&self) -> usize {
        self.entries().count()
    }
}

/// A borrowed key/value pair rendered as `key: value`.
#[derive(Debug)]
pub struct MapEntry<'a, K, V> {
    pub key: &'a K,
    pub value: &'a V,
}

impl<K: Render, V: Render> Render for MapEntry<'_, K, V> {
    fn render_to(&self, out: &mut String) {
        self.key.render_to(out);
        out.push_str(": ");
        self.value.render_to(out);
    }
}

fn map_entry<'a, K, V>((key, value): (&'a K, &'a V)) -> MapEntry<'a, K, V> {
    MapEntry { key, value }
}

type MapEntries<'a, I, K, V> = iter::Map<I, fn((&'a K, &'a V)) -> MapEntry<'a, K, V>>;

/// Renders a collection with its kind's default brackets.
pub(crate) fn write_collection<C: Collection + ?Sized>(out: &mut String, collection: &C) {
    let (open, close) = C::KIND.brackets();
    write_joined(out, open, close, collection.entries());
}

impl<C: Collection + ?Sized> Collection for &C {
    type Entry<'a> = C::Entry<'a> where Self: 'a;
    type Entries<'a> = C::Entries<'a> where Self: 'a;

    const KIND: CollectionKind = C::KIND;

    fn entries(&self) -> Self::Entries<'_> {
        (**self).entries()
    }

    fn entry_count(&self) -> usize {
        (**self).entry_count()
    }
}

macro_rules! sequence_impl {
    ($kind:expr, [$($gen:tt)*] $ty:ty, $iter:ty) => {
        impl<$($gen)*> Collection for $ty {
            type Entry<'a> = &'a T where Self: 'a;
            type Entries<'a> = $iter where Self: 'a;

            const KIND: CollectionKind = $kind;

            fn entries(&self) -> Self::Entries<'_> {
                self.iter()
            }

            fn entry_count(&self) -> usize {
                self.len()
            }
        }

        impl<$($gen)*> Render for $ty {
            fn render_to(&self, out: &mut String) {
                write_collection(out, self);
            }
        }
    };
}

macro_rules! map_impl {
    ([$($gen:tt)*] $ty:ty, $iter:ident) => {
        impl<$($gen)*> Collection for $ty {
            type Entry<'a> = MapEntry<'a, K, V> where Self: 'a;
            type Entries<'a> = MapEntries<'a, $iter<'a, K, V>, K, V> where Self: 'a;

            const KIND: CollectionKind = CollectionKind::Map;

            fn entries(&self) -> Self::Entries<'_> {
                self.iter().map(map_entry as fn(_) -> _)
            }

            fn entry_count(&self) -> usize {
                self.len()
            }
        }

        impl<$($gen)*> Render for $ty {
            fn render_to(&self, out: &mut String) {
                write_collection(out, self);
            }
        }
    };
}

sequence_impl!(CollectionKind::Sequence, [T: Render] [T], slice::Iter<'a, T>);
sequence_impl!(CollectionKind::Sequence, [T: Render, const N: usize] [T; N], slice::Iter<'a, T>);
sequence_impl!(CollectionKind::Sequence, [T: Render] Vec<T>, slice::Iter<'a, T>);
sequence_impl!(CollectionKind::Sequence, [T: Render] VecDeque<T>, vec_deque::Iter<'a, T>);
sequence_impl!(CollectionKind::Sequence, [T: Render] LinkedList<T>, linked_list::Iter<'a, T>);
sequence_impl!(CollectionKind::Sequence, [T: Render] BinaryHeap<T>, binary_heap::Iter<'a, T>);
sequence_impl!(CollectionKind::Set, [T: Render, S] HashSet<T, S>, hash_set::Iter<'a, T>);
sequence_impl!(CollectionKind::Set, [T: Render] BTreeSet<T>, btree_set::Iter<'a, T>);
sequence_impl!(CollectionKind::Set, [T: Render, S] IndexSet<T, S>, indexmap::set::Iter<'a, T>);

map_impl!([K: Render, V: Render, S] HashMap<K, V, S>, HashMapIter);
map_impl!([K: Render, V: Render] BTreeMap<K, V>, BTreeMapIter);
map_impl!([K: Render, V: Render, S] IndexMap<K, V, S>, IndexMapIter);

type HashMapIter<'a, K, V> = hash_map::Iter<'a, K, V>;
type BTreeMapIter<'a, K, V> = btree_map::Iter<'a, K, V>;
type IndexMapIter<'a, K, V> = indexmap::map::Iter<'a, K, V>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    #[test]
    fn test_sequences() {
        assert_eq!(render(&vec![1, 2, 3, 4, 5]), "[1, 2, 3, 4, 5]");
        assert_eq!(render(&Vec::<i32>::new()), "[]");
        assert_eq!(render(&[10, 20, 30]), "[10, 20, 30]");
        assert_eq!(render(&VecDeque::from([1.1, 2.2])), "[1.1, 2.2]");
        assert_eq!(
            render(&LinkedList::from(["hello", "world"])),
            "[hello, world]"
        );
        assert_eq!(render(&BinaryHeap::from([7])), "[7]");
        assert_eq!(render(&vec![Some(42), None, Some(100)]), "[42, nullopt, 100]");
    }

    #[test]
    fn test_slices_and_arrays_are_sequences() {
        let arr = [1, 2, 3];
        let slice: &[i32] = &arr;
        assert_eq!(render(slice), "[1, 2, 3]");
        assert_eq!(<[i32; 3] as Collection>::KIND, CollectionKind::Sequence);
    }

    #[test]
    fn test_sets() {
        assert_eq!(render(&BTreeSet::from([3, 1, 2])), "{1, 2, 3}");
        assert_eq!(render(&BTreeSet::<i32>::new()), "{}");

        let set: IndexSet<&str> = ["c", "a", "b"].into_iter().collect();
        assert_eq!(render(&set), "{c, a, b}");

        let hashed = HashSet::from([1, 2, 3]);
        let rendered = render(&hashed);
        assert!(rendered.starts_with('{') && rendered.ends_with('}'));
        for digit in ["1", "2", "3"] {
            assert!(rendered.contains(digit));
        }
    }

    #[test]
    fn test_maps() {
        let map = BTreeMap::from([("one", 1), ("two", 2)]);
        assert_eq!(render(&map), "{one: 1, two: 2}");
        assert_eq!(render(&BTreeMap::<i32, i32>::new()), "{}");

        let mut ordered = IndexMap::new();
        ordered.insert(2, "second");
        ordered.insert(1, "first");
        assert_eq!(render(&ordered), "{2: second, 1: first}");

        let hashed = HashMap::from([(1, 'a'), (2, 'c')]);
        let rendered = render(&hashed);
        assert!(rendered.contains("1: a"));
        assert!(rendered.contains("2: c"));
    }

    #[test]
    fn test_nested() {
        let cube = vec![vec![vec![1, 2], vec![3, 4]], vec![vec![5, 6], vec![7, 8]]];
        assert_eq!(render(&cube), "[[[1, 2], [3, 4]], [[5, 6], [7, 8]]]");

        let complex = vec![
            (vec![1, 2], BTreeSet::from(['a', 'b'])),
            (vec![3, 4, 5], BTreeSet::from(['x', 'y', 'z'])),
        ];
        assert_eq!(
            render(&complex),
            "[([1, 2], {a, b}), ([3, 4, 5], {x, y, z})]"
        );

        let data = BTreeMap::from([("a", vec![1, 2]), ("b", vec![3])]);
        assert_eq!(render(&data), "{a: [1, 2], b: [3]}");
    }

    #[test]
    fn test_entry_count_through_reference() {
        let v = vec![1, 2, 3];
        let r = &v;
        assert_eq!(Collection::entry_count(&r), 3);
        assert_eq!(<&Vec<i32> as Collection>::KIND, CollectionKind::Sequence);
    }
}
