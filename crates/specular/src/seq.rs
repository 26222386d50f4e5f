//! Ordered-sequence helpers.
//!
//! Reflection consumers often hold a fixed, ordered collection of types
//! and narrow it by structure ("which of these have a member `a`?").
//! These helpers keep relative order stable, which the formatter also
//! relies on when zipping member names against member values.

use crate::descriptor::TypeDescriptor;
use crate::registry::Introspect;
use crate::tag::NameTag;

/// One entry in an ordered type sequence: a snapshot of a type's
/// registered descriptor (or the absence of one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    descriptor: Option<&'static TypeDescriptor>,
}

impl TypeEntry {
    /// Snapshot for `T`.
    pub const fn of<T: Introspect>() -> Self {
        Self { descriptor: T::DESCRIPTOR }
    }

    pub const fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.descriptor
    }

    /// Existence query against this entry; `false` when unreflected.
    pub const fn has(&self, tag: NameTag) -> bool {
        match self.descriptor {
            Some(descriptor) => descriptor.has(tag),
            None => false,
        }
    }
}

/// Order-preserving filter over an ordered type sequence.
pub fn filter(seq: &[TypeEntry], keep: impl Fn(&TypeEntry) -> bool) -> Vec<TypeEntry> {
    seq.iter().copied().filter(|entry| keep(entry)).collect()
}

/// Merges `entry` into `seq`, yielding a sequence one longer with the new
/// entry first.
pub fn merge(entry: TypeEntry, seq: &[TypeEntry]) -> Vec<TypeEntry> {
    let mut merged = Vec::with_capacity(seq.len() + 1);
    merged.push(entry);
    merged.extend_from_slice(seq);
    merged
}

/// Position-zipped iteration over two equal-length ordered sequences.
/// A length mismatch is a programming error, not a runtime condition.
pub fn zip_for_each<A, B>(lhs: &[A], rhs: &[B], mut visit: impl FnMut(usize, &A, &B)) {
    debug_assert_eq!(lhs.len(), rhs.len(), "zipped sequences must have equal length");
    for (i, (a, b)) in lhs.iter().zip(rhs.iter()).enumerate() {
        visit(i, a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MemberDescriptor;

    struct WithA;

    impl Introspect for WithA {
        const DESCRIPTOR: Option<&'static TypeDescriptor> = Some(&TypeDescriptor {
            name: "WithA",
            qualified_name: "WithA",
            members: &[MemberDescriptor { name: "a" }],
            methods: &[],
        });
    }

    struct AlsoWithA;

    impl Introspect for AlsoWithA {
        const DESCRIPTOR: Option<&'static TypeDescriptor> = Some(&TypeDescriptor {
            name: "AlsoWithA",
            qualified_name: "AlsoWithA",
            members: &[MemberDescriptor { name: "a" }, MemberDescriptor { name: "b" }],
            methods: &[],
        });
    }

    #[test]
    fn filter_keeps_matching_entries_in_order() {
        let seq = [
            TypeEntry::of::<i32>(),
            TypeEntry::of::<f32>(),
            TypeEntry::of::<WithA>(),
            TypeEntry::of::<f64>(),
            TypeEntry::of::<AlsoWithA>(),
        ];
        let filtered = filter(&seq, |entry| entry.has(NameTag::member("a")));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0], TypeEntry::of::<WithA>());
        assert_eq!(filtered[1], TypeEntry::of::<AlsoWithA>());
    }

    #[test]
    fn filter_empty_sequence() {
        let filtered = filter(&[], |entry| entry.has(NameTag::member("a")));
        assert!(filtered.is_empty());
    }

    #[test]
    fn merge_prepends() {
        let seq = [TypeEntry::of::<i32>(), TypeEntry::of::<WithA>()];
        let merged = merge(TypeEntry::of::<AlsoWithA>(), &seq);
        assert_eq!(merged.len(), seq.len() + 1);
        assert_eq!(merged[0], TypeEntry::of::<AlsoWithA>());
        assert_eq!(&merged[1..], &seq);
    }

    #[test]
    fn merge_into_empty() {
        let merged = merge(TypeEntry::of::<WithA>(), &[]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn zip_visits_in_order() {
        let names = ["a", "b", "c"];
        let values = [1, 2, 3];
        let mut seen = Vec::new();
        zip_for_each(&names, &values, |i, name, value| {
            seen.push((i, *name, *value));
        });
        assert_eq!(seen, vec![(0, "a", 1), (1, "b", 2), (2, "c", 3)]);
    }
}
