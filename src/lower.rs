//! Lower the inferred registry into Dart-facing class models.
//!
//! Everything target-language specific that both emitters share lives here:
//! type names, JSON lookup chains, and the decode/encode expressions of the
//! plain style.
use crate::inference::Generation;
use crate::ir::{ClassSchema, FieldDescriptor, TypeTag};

pub const MAP_TYPE: &str = "Map<String,dynamic>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DartClass {
    pub name: String,
    pub fields: Vec<DartField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DartField {
    pub name: String,
    pub json_key: String,
    /// Alias keys, lookup order.
    pub aliases: Vec<String>,
    pub dart_type: String,
    /// `json['alias'] ?? ... ?? json['key']`
    pub lookup: String,
    /// Plain-style expression reading this field out of `json`.
    pub decode: String,
    /// Plain-style expression producing the JSON value of this field.
    pub encode: String,
}

pub fn lower_classes(generation: &Generation) -> Vec<DartClass> {
    generation.registry().classes().map(lower_class).collect()
}

pub fn lower_class(schema: &ClassSchema) -> DartClass {
    DartClass {
        name: schema.name.clone(),
        fields: schema.fields.iter().map(lower_field).collect(),
    }
}

fn lower_field(field: &FieldDescriptor) -> DartField {
    let lookup = lookup_expr(field);
    DartField {
        name: field.field_name.clone(),
        json_key: field.source_key.clone(),
        aliases: field.aliases.iter().cloned().collect(),
        dart_type: dart_type(&field.ty),
        decode: decode_field(&field.ty, &lookup, !field.aliases.is_empty()),
        lookup,
        encode: encode_field(&field.ty, &field.field_name),
    }
}

impl DartField {
    /// The field needs an explicit `@JsonKey(name: ...)` in the annotation
    /// style.
    pub fn needs_json_key(&self) -> bool {
        self.json_key != self.name || !self.aliases.is_empty()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

pub fn dart_type(ty: &TypeTag) -> String {
    match ty {
        TypeTag::Int => "int".into(),
        TypeTag::Double => "double".into(),
        TypeTag::Bool => "bool".into(),
        TypeTag::String => "String".into(),
        TypeTag::DateTime => "DateTime".into(),
        TypeTag::Dynamic => "dynamic".into(),
        TypeTag::Map => MAP_TYPE.into(),
        TypeTag::List(item) => format!("List<{}>", dart_type(item)),
        TypeTag::Class(name) => name.clone(),
    }
}

/// `json['alias'] ?? ... ?? json['key']`
pub fn lookup_expr(field: &FieldDescriptor) -> String {
    field
        .lookup_keys()
        .map(|key| format!("json[{}]", quote(key)))
        .collect::<Vec<_>>()
        .join(" ?? ")
}

/// Single-quoted Dart string literal. `$` is escaped so keys are never
/// interpolated.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

// ————————————————————————————————————————————————————————————————————————————
// DECODE
// ————————————————————————————————————————————————————————————————————————————

fn decode_field(ty: &TypeTag, lookup: &str, has_aliases: bool) -> String {
    // `a ?? b` has to be parenthesized before `!=`/`as` are applied
    let src = if has_aliases { format!("({lookup})") } else { lookup.to_string() };
    match ty {
        TypeTag::Int => format!("({src} as num?)?.toInt()"),
        TypeTag::Double => format!("({src} as num?)?.toDouble()"),
        TypeTag::DateTime => format!("{src}!=null ? DateTime.parse({src}.toString()) : null"),
        TypeTag::Map => format!("{src}!=null ? {MAP_TYPE}.from({src}) : null"),
        TypeTag::Class(name) => format!("{src}!=null ? {name}.fromJson({src}) : null"),
        TypeTag::List(item) => format!("{src}!=null ? {} : null", decode_list(item, &src)),
        TypeTag::Bool | TypeTag::String | TypeTag::Dynamic => lookup.to_string(),
    }
}

/// Non-null list expression built from `src`.
fn decode_list(item: &TypeTag, src: &str) -> String {
    match decode_element(item, "e") {
        None => format!("List<{}>.from({src})", dart_type(item)),
        Some(convert) => format!("List.from({src}).map((e)=> {convert}).toList()"),
    }
}

/// Conversion for one list element bound to `var`, `None` for passthrough.
///
/// Elements are non-null: a `null` element folds the list to
/// `list<dynamic>`, which is passed through.
fn decode_element(ty: &TypeTag, var: &str) -> Option<String> {
    let expr = match ty {
        TypeTag::Int => format!("({var} as num).toInt()"),
        TypeTag::Double => format!("({var} as num).toDouble()"),
        TypeTag::DateTime => format!("DateTime.parse({var}.toString())"),
        TypeTag::Map => format!("{MAP_TYPE}.from({var})"),
        TypeTag::Class(name) => format!("{name}.fromJson({var})"),
        TypeTag::List(inner) => {
            let nested = format!("{var}{}", depth_suffix(var));
            match decode_element(inner, &nested) {
                None => format!("List<{}>.from({var})", dart_type(inner)),
                Some(convert) => {
                    format!("List.from({var}).map(({nested})=> {convert}).toList()")
                }
            }
        }
        TypeTag::Bool | TypeTag::String | TypeTag::Dynamic => return None,
    };
    Some(expr)
}

// ————————————————————————————————————————————————————————————————————————————
// ENCODE
// ————————————————————————————————————————————————————————————————————————————

fn encode_field(ty: &TypeTag, name: &str) -> String {
    match ty {
        TypeTag::DateTime => format!("{name}?.toIso8601String()"),
        TypeTag::Class(_) => format!("{name}?.toJson()"),
        TypeTag::List(item) => match encode_element(item, "e") {
            None => name.to_string(),
            Some(convert) => format!("{name}?.map((e)=>{convert}).toList()"),
        },
        _ => name.to_string(),
    }
}

fn encode_element(ty: &TypeTag, var: &str) -> Option<String> {
    match ty {
        TypeTag::DateTime => Some(format!("{var}.toIso8601String()")),
        TypeTag::Class(_) => Some(format!("{var}.toJson()")),
        TypeTag::List(inner) => {
            let nested = format!("{var}{}", depth_suffix(var));
            encode_element(inner, &nested)
                .map(|convert| format!("{var}.map(({nested})=>{convert}).toList()"))
        }
        _ => None,
    }
}

/// Nested lambdas need distinct parameter names: `e`, `e1`, `e12`, ...
fn depth_suffix(var: &str) -> usize {
    var.len()
}
