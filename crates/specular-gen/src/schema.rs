//! External AST dump schema.
//!
//! The input contract is a Clang `-ast-dump=json` document: a tree of
//! objects carrying `kind`, optional `name`/`access`, and ordered children
//! under `inner`. Nodes are consumed once during ingestion and never
//! owned past it. Fields we do not model are ignored on deserialization.

use serde::Deserialize;

/// One node of the external syntax-tree dump.
#[derive(Debug, Clone, Deserialize)]
pub struct DumpNode {
    /// Node-kind label, e.g. `"CXXRecordDecl"`. Required.
    pub kind: String,

    /// Entity name; absent for anonymous entities and most non-declarations.
    #[serde(default)]
    pub name: Option<String>,

    /// Access label; meaningful only on access-specifier nodes. Any value
    /// other than `"public"` is treated as non-public.
    #[serde(default)]
    pub access: Option<String>,

    /// `"class"` or `"struct"` on record declarations; drives default
    /// member visibility when entering the record's body.
    #[serde(default, rename = "tagUsed")]
    pub tag_used: Option<String>,

    /// Evaluated value, as emitted for enumerator constants. Clang nests
    /// it in an inner `ConstantExpr` for most dumps; some carry it
    /// directly, as a number or a decimal string.
    #[serde(default)]
    pub value: Option<serde_json::Value>,

    /// Ordered children.
    #[serde(default)]
    pub inner: Vec<DumpNode>,
}

impl DumpNode {
    /// The enumerator value for this node, if the dump carries one.
    pub fn enum_value(&self) -> Option<i64> {
        if let Some(value) = self.value.as_ref().and_then(json_to_i64) {
            return Some(value);
        }
        self.inner
            .iter()
            .find(|child| child.kind == "ConstantExpr")
            .and_then(|child| child.value.as_ref())
            .and_then(json_to_i64)
    }
}

fn json_to_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
