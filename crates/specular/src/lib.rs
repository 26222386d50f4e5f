//! Consumption side of the Specular reflection toolkit.
//!
//! The generator (`specular-gen`) emits descriptor registrations for C++
//! types discovered in a Clang AST dump. This crate defines the shape of
//! those registrations and everything a program needs to use them:
//!
//! - [`TypeDescriptor`] / [`EnumDescriptor`]: immutable `&'static` metadata
//!   describing a type's public structure
//! - [`NameTag`]: category-qualified name keys with `const`-evaluable
//!   equality, so existence queries never scan strings at runtime
//! - [`has`] / [`has_reflection_info`]: total existence queries over any
//!   type, reflected or not
//! - [`Pretty`] / [`fmt`]: a descriptor-driven recursive pretty-printer
//! - ordered-sequence helpers ([`filter`], [`merge`], [`zip_for_each`])
//!   for walking fixed-length member lists
//!
//! Descriptors are static program structure: built once by code
//! generation, never mutated, safe to read from any thread.

mod descriptor;
mod format;
mod registry;
mod seq;
mod tag;

pub use descriptor::{EnumDescriptor, MemberDescriptor, TypeDescriptor};
pub use format::{fmt, fmt_with_step, pretty_fields, pretty_reflected, Formatted, Pretty, DEFAULT_STEP};
pub use registry::{enum_to_string, has, has_reflection_info, name_of, qualified_name_of, Introspect, IntrospectEnum};
pub use seq::{filter, merge, zip_for_each, TypeEntry};
pub use tag::{NameTag, TagKind};
