//! Descriptor emission.
//!
//! Walks the element arena depth-first and renders two generated source
//! texts: descriptor registrations (`Introspect` + `Pretty` impls) and
//! enum display registrations (`IntrospectEnum` + `Display` impls). Type
//! paths in the output are resolved against whatever module includes the
//! generated file; descriptors themselves carry the faithful qualified
//! name from the dump.

use indexmap::map::Entry;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::element::{Arena, ElementId, ElementKind};

/// Rust reserved words that need raw identifier syntax in generated paths.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

fn sanitize_ident(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Rendered generator output.
#[derive(Debug)]
pub struct GeneratedCode {
    /// Descriptor registrations for classes, class templates, and enums.
    pub meta: String,
    /// Display conversions for enums.
    pub enum_display: String,
    pub type_count: usize,
    pub enum_count: usize,
}

/// Renders generated code for every reflectable type in the arena.
///
/// Nodes dropped during ingestion never reach this point, so the walk
/// assumes a well-formed arena and raises no further diagnostics.
pub fn generate(arena: &Arena) -> GeneratedCode {
    let mut collector = Collector {
        arena,
        types: IndexMap::new(),
        enums: IndexMap::new(),
    };
    if let Some(root) = arena.root() {
        let mut path = ScopePath::default();
        collector.visit(root, &mut path);
    }
    collector.render()
}

/// Collected registration for one class or class template.
#[derive(Debug)]
struct TypeReg {
    name: String,
    qualified: String,
    rust_path: String,
    type_params: Vec<String>,
    members: Vec<String>,
    methods: Vec<String>,
}

impl TypeReg {
    fn is_forward_decl(&self) -> bool {
        self.members.is_empty() && self.methods.is_empty()
    }
}

/// Collected registration for one enum.
#[derive(Debug)]
struct EnumReg {
    name: String,
    qualified: String,
    rust_path: String,
    labels: Vec<(String, i64)>,
}

/// Qualification context during the walk: enclosing namespaces plus
/// enclosing type names (for nested types).
#[derive(Debug, Default)]
struct ScopePath {
    namespaces: Vec<String>,
    types: Vec<String>,
}

impl ScopePath {
    /// Source-language qualified name, e.g. `my_ns::MyClass::NestedEnum`.
    fn qualified(&self, name: &str) -> String {
        let mut segments: Vec<&str> = Vec::new();
        segments.extend(self.namespaces.iter().map(String::as_str));
        segments.extend(self.types.iter().map(String::as_str));
        segments.push(name);
        segments.join("::")
    }

    /// Path the generated impls target. Namespaces map to modules; nested
    /// type names flatten into the mirror type's name, so
    /// `my_ns::MyClass::NestedEnum` targets `my_ns::MyClass_NestedEnum`.
    fn rust_path(&self, name: &str) -> String {
        let mut flat: Vec<&str> = self.types.iter().map(String::as_str).collect();
        flat.push(name);
        let leaf = flat.join("_");
        let mut segments: Vec<String> = self.namespaces.iter().map(|ns| sanitize_ident(ns)).collect();
        segments.push(sanitize_ident(&leaf));
        segments.join("::")
    }
}

struct Collector<'a> {
    arena: &'a Arena,
    types: IndexMap<String, TypeReg>,
    enums: IndexMap<String, EnumReg>,
}

impl Collector<'_> {
    fn visit(&mut self, id: ElementId, path: &mut ScopePath) {
        let (kind, name, children) = {
            let element = self.arena.get(id);
            (element.kind, element.name.to_string(), element.children.clone())
        };

        match kind {
            ElementKind::TranslationUnit => {
                for child in children {
                    self.visit(child, path);
                }
            }
            ElementKind::Namespace => {
                // Anonymous namespaces are transparent for qualification.
                let named = !name.is_empty();
                if named {
                    path.namespaces.push(name);
                }
                for child in children {
                    self.visit(child, path);
                }
                if named {
                    path.namespaces.pop();
                }
            }
            ElementKind::Class => self.visit_class(id, path),
            ElementKind::ClassTemplate => self.visit_class_template(id, path),
            ElementKind::Enum => self.visit_enum(id, path),
            _ => {}
        }
    }

    fn visit_class(&mut self, id: ElementId, path: &mut ScopePath) {
        let name = self.arena.get(id).name.to_string();
        if name.is_empty() {
            return;
        }
        let mut reg = TypeReg {
            qualified: path.qualified(&name),
            rust_path: path.rust_path(&name),
            name,
            type_params: Vec::new(),
            members: Vec::new(),
            methods: Vec::new(),
        };
        let mut seen_methods = FxHashSet::default();
        self.collect_record(id, path, &mut reg, &mut seen_methods);
        self.register_type(reg);
    }

    fn visit_class_template(&mut self, id: ElementId, path: &mut ScopePath) {
        let name = self.arena.get(id).name.to_string();
        if name.is_empty() {
            return;
        }
        let children = self.arena.get(id).children.clone();

        let mut type_params = Vec::new();
        for &child_id in &children {
            let child = self.arena.get(child_id);
            if child.kind == ElementKind::ClassTemplateParam {
                if child.name.is_empty() {
                    type_params.push(format!("T{}", type_params.len()));
                } else {
                    type_params.push(child.name.to_string());
                }
            }
        }

        let mut reg = TypeReg {
            qualified: path.qualified(&name),
            rust_path: path.rust_path(&name),
            name,
            type_params,
            members: Vec::new(),
            methods: Vec::new(),
        };
        let mut seen_methods = FxHashSet::default();
        // Members sit either directly under the template declaration or
        // inside the nested pattern record; collect_record handles both.
        self.collect_record(id, path, &mut reg, &mut seen_methods);
        self.register_type(reg);
    }

    /// Gathers public structure from a record's direct children into
    /// `reg`, recursing into public nested types so they get their own
    /// registrations.
    fn collect_record(
        &mut self,
        id: ElementId,
        path: &mut ScopePath,
        reg: &mut TypeReg,
        seen_methods: &mut FxHashSet<String>,
    ) {
        let children = self.arena.get(id).children.clone();
        for child_id in children {
            let (kind, child_name, is_private) = {
                let child = self.arena.get(child_id);
                (child.kind, child.name.to_string(), child.is_private)
            };
            match kind {
                ElementKind::ClassVariable if !is_private => {
                    reg.members.push(child_name);
                }
                ElementKind::ClassMethod if !is_private => {
                    // Overloads register a single existence entry.
                    if seen_methods.insert(child_name.clone()) {
                        reg.methods.push(child_name);
                    }
                }
                ElementKind::Class if !is_private => {
                    if child_name == reg.name {
                        // The record the dump nests under a template (and
                        // the injected self-reference) contributes to the
                        // enclosing registration instead of its own.
                        self.collect_record(child_id, path, reg, seen_methods);
                    } else {
                        path.types.push(reg.name.clone());
                        self.visit_class(child_id, path);
                        path.types.pop();
                    }
                }
                ElementKind::Enum if !is_private => {
                    path.types.push(reg.name.clone());
                    self.visit_enum(child_id, path);
                    path.types.pop();
                }
                // Ctors, typedefs, builtins, template params, function
                // templates, and comments carry no descriptor entries.
                _ => {}
            }
        }
    }

    fn visit_enum(&mut self, id: ElementId, path: &mut ScopePath) {
        let name = self.arena.get(id).name.to_string();
        if name.is_empty() {
            return;
        }
        let children = self.arena.get(id).children.clone();

        let mut labels = Vec::new();
        let mut next_value = 0i64;
        for child_id in children {
            let child = self.arena.get(child_id);
            if let ElementKind::EnumLabel { value } = child.kind {
                // Enumerator rule: explicit value wins, otherwise
                // previous + 1 starting from zero.
                let value = value.unwrap_or(next_value);
                labels.push((child.name.to_string(), value));
                next_value = value.wrapping_add(1);
            }
        }

        let reg = EnumReg {
            qualified: path.qualified(&name),
            rust_path: path.rust_path(&name),
            name,
            labels,
        };
        match self.enums.entry(reg.qualified.clone()) {
            Entry::Occupied(mut slot) => {
                if slot.get().labels.is_empty() && !reg.labels.is_empty() {
                    slot.insert(reg);
                } else {
                    debug!(qualified = %reg.qualified, "skipping duplicate enum registration");
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(reg);
            }
        }
    }

    fn register_type(&mut self, reg: TypeReg) {
        match self.types.entry(reg.qualified.clone()) {
            Entry::Occupied(mut slot) => {
                // Forward declaration and definition of the same type:
                // the occurrence with structure wins, first encounter
                // keeps the emission position.
                if slot.get().is_forward_decl() && !reg.is_forward_decl() {
                    slot.insert(reg);
                } else {
                    debug!(qualified = %reg.qualified, "skipping duplicate type registration");
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(reg);
            }
        }
    }

    fn render(self) -> GeneratedCode {
        let type_count = self.types.len();
        let enum_count = self.enums.len();

        let mut meta = Writer::new();
        render_meta_header(&mut meta);
        for reg in self.types.values() {
            render_type(&mut meta, reg);
        }
        for reg in self.enums.values() {
            render_enum_meta(&mut meta, reg);
        }

        let mut display = Writer::new();
        render_enum_display_header(&mut display);
        for reg in self.enums.values() {
            render_enum_display(&mut display, reg);
        }

        GeneratedCode {
            meta: meta.finish(),
            enum_display: display.finish(),
            type_count,
            enum_count,
        }
    }
}

/// Text writer with indentation tracking.
struct Writer {
    output: String,
    indent: usize,
}

impl Writer {
    fn new() -> Self {
        Self { output: String::new(), indent: 0 }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn finish(self) -> String {
        self.output
    }
}

fn render_meta_header(w: &mut Writer) {
    w.line("// THIS CODE WAS AUTO-GENERATED BY specular-gen. DO NOT EDIT.");
    w.line("//");
    w.line("// Type paths are resolved against the module that includes this file.");
    w.blank();
    w.line("#![allow(unused_imports)]");
    w.blank();
    w.line("use specular::{Introspect, MemberDescriptor, NameTag, Pretty, TypeDescriptor};");
    w.blank();
}

fn render_enum_display_header(w: &mut Writer) {
    w.line("// THIS CODE WAS AUTO-GENERATED BY specular-gen. DO NOT EDIT.");
    w.line("//");
    w.line("// Type paths are resolved against the module that includes this file.");
    w.blank();
    w.line("#![allow(unused_imports)]");
    w.blank();
    w.line("use specular::{EnumDescriptor, IntrospectEnum, Pretty};");
    w.blank();
}

fn render_type(w: &mut Writer, reg: &TypeReg) {
    let generics = if reg.type_params.is_empty() {
        String::new()
    } else {
        format!("<{}>", reg.type_params.join(", "))
    };
    let target = format!("{}{}", reg.rust_path, generics);

    w.line(&format!("impl{generics} Introspect for {target} {{"));
    w.indent += 1;
    w.line("const DESCRIPTOR: Option<&'static TypeDescriptor> = Some(&TypeDescriptor {");
    w.indent += 1;
    w.line(&format!("name: \"{}\",", reg.name));
    w.line(&format!("qualified_name: \"{}\",", reg.qualified));
    if reg.members.is_empty() {
        w.line("members: &[],");
    } else {
        w.line("members: &[");
        w.indent += 1;
        for member in &reg.members {
            w.line(&format!("MemberDescriptor {{ name: \"{member}\" }},"));
        }
        w.indent -= 1;
        w.line("],");
    }
    if reg.methods.is_empty() {
        w.line("methods: &[],");
    } else {
        w.line("methods: &[");
        w.indent += 1;
        for method in &reg.methods {
            w.line(&format!("NameTag::method(\"{method}\"),"));
        }
        w.indent -= 1;
        w.line("],");
    }
    w.indent -= 1;
    w.line("});");
    w.indent -= 1;
    w.line("}");
    w.blank();

    let bounded = if reg.type_params.is_empty() {
        String::new()
    } else {
        let bounds: Vec<String> = reg
            .type_params
            .iter()
            .map(|param| format!("{param}: Pretty"))
            .collect();
        format!("<{}>", bounds.join(", "))
    };
    let values: Vec<String> = reg
        .members
        .iter()
        .map(|m| format!("&self.{}", sanitize_ident(m)))
        .collect();

    w.line(&format!("impl{bounded} Pretty for {target} {{"));
    w.indent += 1;
    w.line("fn pretty_to(&self, out: &mut String, indent: usize, step: usize) {");
    w.indent += 1;
    w.line(&format!(
        "specular::pretty_reflected::<Self>(out, indent, step, &[{}]);",
        values.join(", ")
    ));
    w.indent -= 1;
    w.line("}");
    w.indent -= 1;
    w.line("}");
    w.blank();
}

// An enum registers a name-only descriptor so name lookups work on it.
fn render_enum_meta(w: &mut Writer, reg: &EnumReg) {
    w.line(&format!("impl Introspect for {} {{", reg.rust_path));
    w.indent += 1;
    w.line("const DESCRIPTOR: Option<&'static TypeDescriptor> = Some(&TypeDescriptor {");
    w.indent += 1;
    w.line(&format!("name: \"{}\",", reg.name));
    w.line(&format!("qualified_name: \"{}\",", reg.qualified));
    w.line("members: &[],");
    w.line("methods: &[],");
    w.indent -= 1;
    w.line("});");
    w.indent -= 1;
    w.line("}");
    w.blank();
}

fn render_enum_display(w: &mut Writer, reg: &EnumReg) {
    w.line(&format!("impl IntrospectEnum for {} {{", reg.rust_path));
    w.indent += 1;
    w.line("const DESCRIPTOR: &'static EnumDescriptor = &EnumDescriptor {");
    w.indent += 1;
    w.line(&format!("name: \"{}\",", reg.name));
    w.line(&format!("qualified_name: \"{}\",", reg.qualified));
    if reg.labels.is_empty() {
        w.line("labels: &[],");
    } else {
        w.line("labels: &[");
        w.indent += 1;
        for (label, value) in &reg.labels {
            w.line(&format!("(\"{label}\", {value}),"));
        }
        w.indent -= 1;
        w.line("],");
    }
    w.indent -= 1;
    w.line("};");
    w.indent -= 1;
    w.line("}");
    w.blank();

    w.line(&format!("impl std::fmt::Display for {} {{", reg.rust_path));
    w.indent += 1;
    w.line("fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {");
    w.indent += 1;
    w.line("f.write_str(&<Self as IntrospectEnum>::DESCRIPTOR.render(*self as i64))");
    w.indent -= 1;
    w.line("}");
    w.indent -= 1;
    w.line("}");
    w.blank();

    // Lets reflected members of this enum type render through Display.
    w.line(&format!("impl Pretty for {} {{", reg.rust_path));
    w.indent += 1;
    w.line("fn pretty_to(&self, out: &mut String, _indent: usize, _step: usize) {");
    w.indent += 1;
    w.line("use std::fmt::Write as _;");
    w.line("let _ = write!(out, \"{}\", self);");
    w.indent -= 1;
    w.line("}");
    w.indent -= 1;
    w.line("}");
    w.blank();
}
