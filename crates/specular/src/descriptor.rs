//! Generated descriptor data.
//!
//! Every item here is meant to appear in generated code as a `&'static`
//! constant. Nothing is mutated after registration.

use crate::tag::{kind_eq, str_eq, NameTag, TagKind};

/// Metadata for one public member variable, in declaration order within
/// its owning [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: &'static str,
}

/// Generated metadata describing a class or class template.
///
/// `members` preserves the declaration order of the type's public member
/// variables; `methods` records public method names for existence queries
/// only (methods are queryable, not invokable, through the descriptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub qualified_name: &'static str,
    pub members: &'static [MemberDescriptor],
    pub methods: &'static [NameTag],
}

impl TypeDescriptor {
    /// Whether this descriptor registers an entry with the tag's exact
    /// category and character sequence.
    pub const fn has(&self, tag: NameTag) -> bool {
        match tag.kind() {
            TagKind::Member => self.has_member(tag.name()),
            TagKind::Method => self.has_method(tag.name()),
        }
    }

    pub const fn has_member(&self, name: &str) -> bool {
        let mut i = 0;
        while i < self.members.len() {
            if str_eq(self.members[i].name, name) {
                return true;
            }
            i += 1;
        }
        false
    }

    pub const fn has_method(&self, name: &str) -> bool {
        let mut i = 0;
        while i < self.methods.len() {
            let tag = self.methods[i];
            if kind_eq(tag.kind(), TagKind::Method) && str_eq(tag.name(), name) {
                return true;
            }
            i += 1;
        }
        false
    }
}

/// Generated metadata describing an enum: `(label, underlying value)`
/// pairs in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub qualified_name: &'static str,
    pub labels: &'static [(&'static str, i64)],
}

impl EnumDescriptor {
    /// The label declared for `value`, if any.
    pub const fn label_of(&self, value: i64) -> Option<&'static str> {
        let mut i = 0;
        while i < self.labels.len() {
            if self.labels[i].1 == value {
                return Some(self.labels[i].0);
            }
            i += 1;
        }
        None
    }

    /// Value-to-text conversion.
    ///
    /// A declared value renders as `"<EnumName>::<LabelName>"`; anything
    /// else renders as the sentinel `"INVALID <<EnumName>>"`.
    pub fn render(&self, value: i64) -> String {
        match self.label_of(value) {
            Some(label) => format!("{}::{}", self.name, label),
            None => format!("INVALID <<{}>>", self.name),
        }
    }
}
