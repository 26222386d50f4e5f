//! Descriptor-driven pretty-printer.
//!
//! A value whose type carries a descriptor serializes as a brace-enclosed
//! block of `"name" : value` lines in member declaration order; a value
//! without one falls back to its native text form. Member names come from
//! the descriptor, member values from the generated accessor, zipped by
//! position.

use std::fmt;
use std::fmt::Write as _;

use crate::descriptor::TypeDescriptor;
use crate::registry::Introspect;
use crate::seq::zip_for_each;

/// Indentation step used by [`fmt`].
pub const DEFAULT_STEP: usize = 4;

/// Recursive structural serialization.
///
/// Generated code implements this for every reflected type by delegating
/// to [`pretty_reflected`]; the leaf impls below cover the scalar and
/// string types that render through their native `Display` form.
pub trait Pretty {
    fn pretty_to(&self, out: &mut String, indent: usize, step: usize);
}

macro_rules! pretty_leaf {
    ($($ty:ty),* $(,)?) => {
        $(impl Pretty for $ty {
            fn pretty_to(&self, out: &mut String, _indent: usize, _step: usize) {
                let _ = write!(out, "{}", self);
            }
        })*
    };
}

pretty_leaf!(bool, char, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize, f32, f64);
pretty_leaf!(String, &str);

/// Serializes one descriptor-bearing value.
///
/// `values` must hold one entry per descriptor member, in the same order;
/// a length mismatch is a programming error in the generated accessor,
/// not a runtime condition.
pub fn pretty_fields(
    out: &mut String,
    indent: usize,
    step: usize,
    descriptor: &TypeDescriptor,
    values: &[&dyn Pretty],
) {
    debug_assert_eq!(
        descriptor.members.len(),
        values.len(),
        "member arity mismatch for {}",
        descriptor.qualified_name
    );

    out.push_str("{\n");
    let last = descriptor.members.len().saturating_sub(1);
    zip_for_each(descriptor.members, values, |i, member, value| {
        push_spaces(out, indent);
        out.push('"');
        out.push_str(member.name);
        out.push_str("\" : ");
        value.pretty_to(out, indent + step, step);
        out.push_str(if i == last { "\n" } else { ",\n" });
    });
    push_spaces(out, indent.saturating_sub(step));
    out.push('}');
}

/// Entry point for generated `Pretty` impls: looks up `T`'s descriptor
/// and serializes `values` against it.
pub fn pretty_reflected<T: Introspect>(
    out: &mut String,
    indent: usize,
    step: usize,
    values: &[&dyn Pretty],
) {
    let Some(descriptor) = T::DESCRIPTOR else {
        debug_assert!(false, "pretty_reflected on a type without a descriptor");
        return;
    };
    pretty_fields(out, indent, step, descriptor, values);
}

fn push_spaces(out: &mut String, n: usize) {
    for _ in 0..n {
        out.push(' ');
    }
}

/// Transient wrapper pairing a value reference with an indentation step;
/// selects the pretty-printing `Display` entry point and is not persisted.
pub struct Formatted<'a, T: ?Sized> {
    value: &'a T,
    step: usize,
}

impl<T: Pretty + ?Sized> fmt::Display for Formatted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.value.pretty_to(&mut out, self.step, self.step);
        f.write_str(&out)
    }
}

/// Wraps a value for formatted serialization with the default step.
pub fn fmt<T: Pretty + ?Sized>(value: &T) -> Formatted<'_, T> {
    fmt_with_step(value, DEFAULT_STEP)
}

/// Wraps a value for formatted serialization with an explicit step.
pub fn fmt_with_step<T: Pretty + ?Sized>(value: &T, step: usize) -> Formatted<'_, T> {
    Formatted { value, step }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::descriptor::MemberDescriptor;

    struct Inner {
        real_number: f32,
    }

    impl Introspect for Inner {
        const DESCRIPTOR: Option<&'static TypeDescriptor> = Some(&TypeDescriptor {
            name: "Inner",
            qualified_name: "Inner",
            members: &[MemberDescriptor { name: "real_number" }],
            methods: &[],
        });
    }

    impl Pretty for Inner {
        fn pretty_to(&self, out: &mut String, indent: usize, step: usize) {
            pretty_reflected::<Self>(out, indent, step, &[&self.real_number]);
        }
    }

    struct Outer {
        a: i32,
        b: f32,
        inner: Inner,
    }

    impl Introspect for Outer {
        const DESCRIPTOR: Option<&'static TypeDescriptor> = Some(&TypeDescriptor {
            name: "Outer",
            qualified_name: "Outer",
            members: &[
                MemberDescriptor { name: "a" },
                MemberDescriptor { name: "b" },
                MemberDescriptor { name: "inner" },
            ],
            methods: &[],
        });
    }

    impl Pretty for Outer {
        fn pretty_to(&self, out: &mut String, indent: usize, step: usize) {
            pretty_reflected::<Self>(out, indent, step, &[&self.a, &self.b, &self.inner]);
        }
    }

    #[test]
    fn leaves_use_native_display() {
        assert_eq!(fmt(&42i32).to_string(), "42");
        assert_eq!(fmt(&true).to_string(), "true");
        assert_eq!(fmt(&"hi").to_string(), "hi");
    }

    #[test]
    fn flat_struct() {
        let value = Inner { real_number: 0.5 };
        assert_eq!(fmt(&value).to_string(), "{\n    \"real_number\" : 0.5\n}");
    }

    #[test]
    fn comma_separators_except_last() {
        let value = Outer { a: 1, b: 2.0, inner: Inner { real_number: 3.0 } };
        let text = fmt_with_step(&value, 2).to_string();
        let expected = "{\n  \"a\" : 1,\n  \"b\" : 2,\n  \"inner\" : {\n    \"real_number\" : 3\n  }\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn nested_members_expand_recursively() {
        let value = Outer { a: 7, b: 0.25, inner: Inner { real_number: 1.5 } };
        let text = fmt(&value).to_string();
        assert!(text.contains("\"inner\" : {\n"));
        assert!(text.contains("\"real_number\" : 1.5"));
        // Nested block closes at the member's own indentation.
        assert!(text.contains("1.5\n    }"));
    }

    #[test]
    fn zero_member_descriptor_renders_empty_block() {
        struct Empty;

        impl Introspect for Empty {
            const DESCRIPTOR: Option<&'static TypeDescriptor> = Some(&TypeDescriptor {
                name: "Empty",
                qualified_name: "Empty",
                members: &[],
                methods: &[],
            });
        }

        impl Pretty for Empty {
            fn pretty_to(&self, out: &mut String, indent: usize, step: usize) {
                pretty_reflected::<Self>(out, indent, step, &[]);
            }
        }

        assert_eq!(fmt(&Empty).to_string(), "{\n}");
    }
}
