//! Node-kind classification.
//!
//! Maps the dump's `kind` labels onto the internal element vocabulary.
//! The label set is closed: the match below is the single place a new
//! kind gets wired in, and adding an [`ElementKind`] variant without a
//! label here is a compile-visible gap rather than a silent runtime miss.

use crate::element::ElementKind;

/// Outcome of classifying one node-kind label.
///
/// The two drop forms are deliberately distinct even though today both
/// exclude the node and its subtree: `Ignored` labels are known and
/// uninteresting, while `Unrecognized` labels are candidates for future
/// diagnostics. Conflating them would lose that signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Keep(ElementKind),
    /// Known label, explicitly uninteresting. Dropped silently.
    Ignored,
    /// Label not in the vocabulary. Dropped, but distinct so a later
    /// version can warn.
    Unrecognized,
}

pub fn classify(kind: &str) -> Classification {
    use ElementKind::*;

    match kind {
        "TranslationUnitDecl" => Classification::Keep(TranslationUnit),
        "NamespaceDecl" => Classification::Keep(Namespace),
        "AccessSpecDecl" => Classification::Keep(AccessSpecifier),
        "CXXRecordDecl" => Classification::Keep(Class),
        "CXXConstructorDecl" => Classification::Keep(ClassCtor),
        "FieldDecl" => Classification::Keep(ClassVariable),
        "CXXMethodDecl" => Classification::Keep(ClassMethod),
        "ClassTemplateDecl" => Classification::Keep(ClassTemplate),
        "TemplateTypeParmDecl" => Classification::Keep(ClassTemplateParam),
        "FunctionTemplateDecl" => Classification::Keep(FunctionTemplate),
        "TypedefDecl" => Classification::Keep(Typedef),
        "BuiltinType" => Classification::Keep(Builtin),
        "EnumDecl" => Classification::Keep(Enum),
        "EnumConstantDecl" => Classification::Keep(EnumLabel { value: None }),
        "FullComment" | "TextComment" | "BlockCommandComment" | "ParagraphComment" => {
            Classification::Keep(Comment)
        }
        "ParmVarDecl" | "InitListExpr" => Classification::Ignored,
        _ => Classification::Unrecognized,
    }
}
