//! Recursive tree ingestion.
//!
//! Builds the element arena from the dump tree, threading an
//! [`AccessContext`] through each sibling list. Contexts are scoped
//! strictly to one child list: recursion into a node's children gets a
//! fresh context, so visibility changes can never leak across subtrees.

use smol_str::SmolStr;
use tracing::debug;

use crate::classify::{classify, Classification};
use crate::element::{Arena, Element, ElementId, ElementKind};
use crate::schema::DumpNode;

/// Visibility state for the sibling list currently being ingested.
///
/// Updated only by access-specifier nodes: `"public"` clears it, any
/// other label (protected included) sets it. Protected and private
/// collapse into "not public".
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessContext {
    pub is_private: bool,
}

impl AccessContext {
    pub fn new(is_private: bool) -> Self {
        Self { is_private }
    }
}

/// Consumes a dump tree into an [`Arena`].
pub struct TreeBuilder {
    arena: Arena,
}

impl TreeBuilder {
    /// Ingests `root` and returns the arena. An empty arena means the
    /// root itself was dropped by classification.
    pub fn build(root: &DumpNode) -> Arena {
        let mut builder = TreeBuilder { arena: Arena::new() };
        let mut ctx = AccessContext::default();
        builder.parse(root, &mut ctx, None);
        builder.arena
    }

    fn parse(
        &mut self,
        node: &DumpNode,
        ctx: &mut AccessContext,
        parent: Option<ElementId>,
    ) -> Option<ElementId> {
        let mut kind = match classify(&node.kind) {
            Classification::Keep(kind) => kind,
            Classification::Ignored => {
                debug!(kind = %node.kind, "dropping ignored node");
                return None;
            }
            Classification::Unrecognized => {
                debug!(kind = %node.kind, "dropping unrecognized node");
                return None;
            }
        };

        if matches!(kind, ElementKind::EnumLabel { .. }) {
            kind = ElementKind::EnumLabel { value: node.enum_value() };
        }

        // The element captures the visibility in force when it was
        // declared; an access specifier changes the context only for the
        // siblings that follow it.
        let is_private = ctx.is_private;
        if matches!(kind, ElementKind::AccessSpecifier) {
            ctx.is_private = node.access.as_deref() != Some("public");
        }

        let name = if parent.is_none() {
            SmolStr::default()
        } else {
            node.name.as_deref().map(SmolStr::new).unwrap_or_default()
        };

        let id = self.arena.push(Element {
            parent,
            kind,
            name,
            is_private,
            children: Vec::new(),
        });

        if !node.inner.is_empty() {
            let mut child_ctx = AccessContext::new(default_private(kind, node));
            let mut children = Vec::new();
            for child in &node.inner {
                if let Some(child_id) = self.parse(child, &mut child_ctx, Some(id)) {
                    children.push(child_id);
                }
            }
            self.arena.set_children(id, children);
        }

        Some(id)
    }
}

/// Default visibility seeded when entering a node's child list.
///
/// A `class` body starts private and a `struct` body public, matching the
/// language's default-access rules; every other scope starts public.
fn default_private(kind: ElementKind, node: &DumpNode) -> bool {
    match kind {
        ElementKind::Class | ElementKind::ClassTemplate => {
            node.tag_used.as_deref() == Some("class")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(json: &str) -> Arena {
        let root: DumpNode = serde_json::from_str(json).expect("test dump should parse");
        TreeBuilder::build(&root)
    }

    #[test]
    fn root_has_no_parent_and_no_name() {
        let arena = build(r#"{"kind": "TranslationUnitDecl", "name": "ignored-on-root"}"#);
        let root = arena.get(arena.root().unwrap());
        assert!(root.parent.is_none());
        assert!(root.name.is_empty());
        assert_eq!(root.kind, ElementKind::TranslationUnit);
    }

    #[test]
    fn children_preserve_declaration_order() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "NamespaceDecl", "name": "first"},
                {"kind": "NamespaceDecl", "name": "second"}
            ]}"#,
        );
        let root = arena.get(arena.root().unwrap());
        let names: Vec<_> = root
            .children
            .iter()
            .map(|&id| arena.get(id).name.to_string())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn parents_precede_children_in_creation_order() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "NamespaceDecl", "name": "ns", "inner": [
                    {"kind": "CXXRecordDecl", "name": "Deep", "tagUsed": "struct", "inner": [
                        {"kind": "FieldDecl", "name": "x"}
                    ]}
                ]}
            ]}"#,
        );
        for (id, element) in arena.iter() {
            if let Some(parent) = element.parent {
                assert!(parent.index() < id.index());
            }
        }
    }

    #[test]
    fn ignored_node_is_absent_and_subtree_dropped() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "ParmVarDecl", "name": "arg", "inner": [
                    {"kind": "NamespaceDecl", "name": "inside_dropped"}
                ]},
                {"kind": "NamespaceDecl", "name": "kept"}
            ]}"#,
        );
        assert!(arena.find_by_name("arg").is_none());
        assert!(arena.find_by_name("inside_dropped").is_none());
        assert!(arena.find_by_name("kept").is_some());
    }

    #[test]
    fn unrecognized_node_is_absent() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "CompoundStmt", "name": "nope"},
                {"kind": "NamespaceDecl", "name": "kept"}
            ]}"#,
        );
        assert!(arena.find_by_name("nope").is_none());
        assert!(arena.find_by_name("kept").is_some());
    }

    #[test]
    fn dropped_node_does_not_affect_sibling_access_context() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "CXXRecordDecl", "name": "S", "tagUsed": "class", "inner": [
                    {"kind": "AccessSpecDecl", "access": "public"},
                    {"kind": "ParmVarDecl", "name": "noise"},
                    {"kind": "FieldDecl", "name": "a"}
                ]}
            ]}"#,
        );
        let (_, field) = arena.find_by_name("a").unwrap();
        assert!(!field.is_private);
    }

    #[test]
    fn public_access_specifier_clears_privacy() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "CXXRecordDecl", "name": "C", "tagUsed": "class", "inner": [
                    {"kind": "AccessSpecDecl", "access": "public"},
                    {"kind": "FieldDecl", "name": "a"}
                ]}
            ]}"#,
        );
        assert!(!arena.find_by_name("a").unwrap().1.is_private);
    }

    #[test]
    fn protected_and_private_both_mean_not_public() {
        for access in ["protected", "private"] {
            let json = format!(
                r#"{{"kind": "TranslationUnitDecl", "inner": [
                    {{"kind": "CXXRecordDecl", "name": "S", "tagUsed": "struct", "inner": [
                        {{"kind": "AccessSpecDecl", "access": "{access}"}},
                        {{"kind": "FieldDecl", "name": "a"}}
                    ]}}
                ]}}"#
            );
            let arena = build(&json);
            assert!(arena.find_by_name("a").unwrap().1.is_private, "access = {access}");
        }
    }

    #[test]
    fn class_body_defaults_to_private() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "CXXRecordDecl", "name": "C", "tagUsed": "class", "inner": [
                    {"kind": "FieldDecl", "name": "hidden"}
                ]}
            ]}"#,
        );
        assert!(arena.find_by_name("hidden").unwrap().1.is_private);
    }

    #[test]
    fn struct_body_defaults_to_public() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "CXXRecordDecl", "name": "S", "tagUsed": "struct", "inner": [
                    {"kind": "FieldDecl", "name": "open"}
                ]}
            ]}"#,
        );
        assert!(!arena.find_by_name("open").unwrap().1.is_private);
    }

    #[test]
    fn access_specifier_element_captures_prior_visibility() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "CXXRecordDecl", "name": "C", "tagUsed": "class", "inner": [
                    {"kind": "AccessSpecDecl", "access": "public"}
                ]}
            ]}"#,
        );
        let (_, spec) = arena
            .iter()
            .find(|(_, e)| e.kind == ElementKind::AccessSpecifier)
            .unwrap();
        // Declared while the class body was still private.
        assert!(spec.is_private);
    }

    #[test]
    fn nested_class_context_does_not_leak_to_outer_siblings() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "CXXRecordDecl", "name": "Outer", "tagUsed": "struct", "inner": [
                    {"kind": "CXXRecordDecl", "name": "Inner", "tagUsed": "struct", "inner": [
                        {"kind": "AccessSpecDecl", "access": "private"},
                        {"kind": "FieldDecl", "name": "inner_field"}
                    ]},
                    {"kind": "FieldDecl", "name": "outer_field"}
                ]}
            ]}"#,
        );
        assert!(arena.find_by_name("inner_field").unwrap().1.is_private);
        // The nested body's private switch must not leak back out.
        assert!(!arena.find_by_name("outer_field").unwrap().1.is_private);
    }

    #[test]
    fn enum_labels_capture_values() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "EnumDecl", "name": "E", "inner": [
                    {"kind": "EnumConstantDecl", "name": "A",
                     "inner": [{"kind": "ConstantExpr", "value": "4"}]},
                    {"kind": "EnumConstantDecl", "name": "B"}
                ]}
            ]}"#,
        );
        let (_, a) = arena.find_by_name("A").unwrap();
        assert_eq!(a.kind, ElementKind::EnumLabel { value: Some(4) });
        let (_, b) = arena.find_by_name("B").unwrap();
        assert_eq!(b.kind, ElementKind::EnumLabel { value: None });
    }

    #[test]
    fn anonymous_entities_get_empty_names() {
        let arena = build(
            r#"{"kind": "TranslationUnitDecl", "inner": [
                {"kind": "NamespaceDecl", "inner": [
                    {"kind": "CXXRecordDecl", "name": "Hidden", "tagUsed": "struct"}
                ]}
            ]}"#,
        );
        let root = arena.get(arena.root().unwrap());
        let ns = arena.get(root.children[0]);
        assert!(ns.name.is_empty());
        assert_eq!(ns.kind, ElementKind::Namespace);
    }
}
