//! Existence registry.
//!
//! Generated code overrides [`Introspect::DESCRIPTOR`] per reflected type.
//! Queries stay total over unreflected types: the default `None` answers
//! `false` to everything, so asking about a nonexistent member is a
//! negative result, never an error.

use crate::descriptor::{EnumDescriptor, TypeDescriptor};
use crate::tag::NameTag;

/// A type with (possibly absent) generated reflection metadata.
pub trait Introspect {
    const DESCRIPTOR: Option<&'static TypeDescriptor> = None;
}

/// An enum with generated reflection metadata.
pub trait IntrospectEnum {
    const DESCRIPTOR: &'static EnumDescriptor;
}

/// Whether `T`'s registered descriptor contains an entry with the tag's
/// exact category and character sequence. `false` for every tag when `T`
/// has no descriptor.
pub const fn has<T: Introspect>(tag: NameTag) -> bool {
    match T::DESCRIPTOR {
        Some(descriptor) => descriptor.has(tag),
        None => false,
    }
}

/// Whether `T` has a registered descriptor at all. Distinguishes "no
/// descriptor" from "descriptor with zero members".
pub const fn has_reflection_info<T: Introspect>() -> bool {
    T::DESCRIPTOR.is_some()
}

/// Unqualified type name from `T`'s descriptor, if registered.
pub const fn name_of<T: Introspect>() -> Option<&'static str> {
    match T::DESCRIPTOR {
        Some(descriptor) => Some(descriptor.name),
        None => None,
    }
}

/// Fully qualified type name from `T`'s descriptor, if registered.
pub const fn qualified_name_of<T: Introspect>() -> Option<&'static str> {
    match T::DESCRIPTOR {
        Some(descriptor) => Some(descriptor.qualified_name),
        None => None,
    }
}

/// Renders an underlying enum value through `T`'s descriptor.
pub fn enum_to_string<T: IntrospectEnum>(value: i64) -> String {
    T::DESCRIPTOR.render(value)
}

// Scalars and strings never carry generated metadata; registering the
// default here keeps existence queries total over them.
macro_rules! opaque {
    ($($ty:ty),* $(,)?) => {
        $(impl Introspect for $ty {})*
    };
}

opaque!(bool, char, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize, f32, f64);
opaque!(String, &str);
