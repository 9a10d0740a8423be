//! `freezed` / `json_serializable` classes. Serialization bodies are left to
//! the Dart code generators; key renames and aliases go through `@JsonKey`.
use std::fmt::{self, Write};

use super::nullable;
use crate::inference::{Generation, str};
use crate::lower::{DartClass, DartField, quote};

/// Packages the generated file depends on.
pub const INSTALL_COMMANDS: &str = "flutter pub add freezed_annotation json_annotation\n\
                                    flutter pub add --dev build_runner freezed json_serializable";

pub fn emit(out: &mut String, generation: &Generation, classes: &[DartClass]) -> fmt::Result {
    let base = str::snake(&generation.root);
    writeln!(out, "import 'package:freezed_annotation/freezed_annotation.dart';")?;
    writeln!(out, "part '{base}.freezed.dart';")?;
    writeln!(out, "part '{base}.g.dart';")?;
    writeln!(out)?;
    for class in classes {
        emit_class(out, class)?;
    }
    Ok(())
}

fn emit_class(out: &mut String, class: &DartClass) -> fmt::Result {
    let name = &class.name;
    writeln!(out, "@freezed")?;
    writeln!(out, "class {name} with _${name} {{")?;
    writeln!(out, "  const factory {name}({{")?;
    for f in &class.fields {
        let ty = nullable(&f.dart_type);
        match json_key(class, f) {
            Some(annotation) => writeln!(out, "    {annotation} {ty} {},", f.name)?,
            None => writeln!(out, "    {ty} {},", f.name)?,
        }
    }
    writeln!(out, "  }}) = _{name};")?;
    writeln!(out)?;
    writeln!(out, "  factory {name}.fromJson(Map<String,dynamic> json) => _${name}FromJson(json);")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    for f in class.fields.iter().filter(|f| !f.aliases.is_empty()) {
        writeln!(out, "Object? {}(Map json, String key) => {};", reader_name(class, f), f.lookup)?;
        writeln!(out)?;
    }
    Ok(())
}

fn json_key(class: &DartClass, f: &DartField) -> Option<String> {
    if !f.needs_json_key() {
        return None;
    }
    let name = quote(&f.json_key);
    if f.aliases.is_empty() {
        Some(format!("@JsonKey(name: {name})"))
    } else {
        Some(format!("@JsonKey(name: {name}, readValue: {})", reader_name(class, f)))
    }
}

/// `_readProductId`
fn reader_name(class: &DartClass, f: &DartField) -> String {
    format!("_read{}{}", class.name, str::pascal(&f.name))
}
