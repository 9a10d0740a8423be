//! Infer Dart data classes from a sample JSON document.
//!
//! ```
//! use json_dart_gen::{GenerateOptions, OutputStyle, generate};
//!
//! let options = GenerateOptions::new()
//!     .with_root_class("Product")
//!     .with_style(OutputStyle::Plain);
//! let file = generate(r#"{"id": 1, "rating": {"rate": 3.9}}"#, &options).unwrap();
//! assert_eq!(file.file_name, "product.dart");
//! assert!(file.contents.contains("class Rating {"));
//! ```
pub mod cli;
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod registry;
pub mod settings;

use serde_json::Value;

pub use codegen::{Codegen, OutputStyle};
pub use error::{Error, Result};
pub use inference::{Generation, Inference};
pub use registry::SchemaRegistry;
pub use settings::GenerateOptions;

/// One generated Dart file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// `<snake_case root>.dart`
    pub file_name: String,
    pub contents: String,
    pub root_class: String,
    pub class_count: usize,
}

/// Parse `source` and apply the optional JSON Pointer.
pub fn parse_document(source: &str, json_pointer: Option<&str>) -> Result<Value> {
    let mut document: Value = serde_json::from_str(source)?;
    match json_pointer {
        None | Some("") => Ok(document),
        Some(pointer) => document
            .pointer_mut(pointer)
            .map(Value::take)
            .ok_or_else(|| Error::PointerNotFound { pointer: pointer.to_string() }),
    }
}

/// Parse and infer. Invalid JSON fails here, before a registry exists.
pub fn infer(source: &str, options: &GenerateOptions) -> Result<Generation> {
    let document = parse_document(source, options.json_pointer.as_deref())?;
    Ok(Inference::new().observe_document(&document, &options.root_class))
}

pub fn render(generation: &Generation, style: OutputStyle) -> Result<String> {
    let mut cg = Codegen::new(style);
    cg.emit(generation)?;
    Ok(cg.into_string())
}

/// Parse, infer and emit in one go.
pub fn generate(source: &str, options: &GenerateOptions) -> Result<GeneratedFile> {
    let generation = infer(source, options)?;
    let contents = render(&generation, options.style)?;
    Ok(GeneratedFile {
        file_name: codegen::file_name(&generation.root),
        contents,
        root_class: generation.root.clone(),
        class_count: generation.registry().len(),
    })
}
