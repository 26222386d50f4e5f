//! Element arena.
//!
//! Ingestion replaces the dump's pointer-shaped tree with an append-only
//! arena of [`Element`]s linked by indices. Every non-root element's
//! parent precedes it in creation order, so traversal is cheap and
//! cycle-free by construction.

use smol_str::SmolStr;

/// Index of an element in its [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Internal classification of a kept node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    TranslationUnit,
    Namespace,
    AccessSpecifier,
    Class,
    ClassCtor,
    ClassVariable,
    ClassMethod,
    ClassTemplate,
    ClassTemplateParam,
    FunctionTemplate,
    Typedef,
    Builtin,
    Enum,
    EnumLabel { value: Option<i64> },
    Comment,
}

/// One arena entry.
#[derive(Debug, Clone)]
pub struct Element {
    /// None for the root.
    pub parent: Option<ElementId>,
    pub kind: ElementKind,
    /// Empty for anonymous entities and the root.
    pub name: SmolStr,
    /// Visibility captured from the enclosing access context at creation.
    pub is_private: bool,
    /// Direct children, declaration order preserved.
    pub children: Vec<ElementId>,
}

/// Append-only store of elements for one generator invocation.
#[derive(Debug, Default)]
pub struct Arena {
    elements: Vec<Element>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The translation-unit element, when ingestion produced one.
    pub fn root(&self) -> Option<ElementId> {
        if self.elements.is_empty() {
            None
        } else {
            Some(ElementId::new(0))
        }
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| (ElementId::new(i), element))
    }

    pub(crate) fn push(&mut self, element: Element) -> ElementId {
        let id = ElementId::new(self.elements.len());
        self.elements.push(element);
        id
    }

    pub(crate) fn set_children(&mut self, id: ElementId, children: Vec<ElementId>) {
        self.elements[id.index()].children = children;
    }

    /// Looks up an element by name anywhere in the arena. Test helper.
    pub fn find_by_name(&self, name: &str) -> Option<(ElementId, &Element)> {
        self.iter().find(|(_, element)| element.name == name)
    }
}
