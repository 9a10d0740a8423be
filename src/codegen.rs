//! Dart code generation from a finished [`Generation`].
//!
//! Inference never writes text; the emitters only read the registry. The
//! output style picks the emitter.
pub mod freezed;
pub mod plain;

use std::fmt;

use serde::Serialize;

use crate::inference::{Generation, str};
use crate::lower;

/// Extension of every generated file.
pub const FILE_EXTENSION: &str = "dart";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Hand-written fromJson/toJson/copyWith classes
    #[default]
    Plain,
    /// freezed + json_serializable annotated classes
    Freezed,
}

pub struct Codegen {
    style: OutputStyle,
    out: String,
}

impl Codegen {
    pub fn new(style: OutputStyle) -> Self {
        Self { style, out: String::new() }
    }

    pub fn emit(&mut self, generation: &Generation) -> fmt::Result {
        let classes = lower::lower_classes(generation);
        match self.style {
            OutputStyle::Plain => plain::emit(&mut self.out, generation, &classes),
            OutputStyle::Freezed => freezed::emit(&mut self.out, generation, &classes),
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// `ProductList` → `product_list.dart`
pub fn file_name(root: &str) -> String {
    format!("{}.{FILE_EXTENSION}", str::snake(root))
}

/// Dart declaration type for a nullable field. `dynamic` is already nullable.
pub(crate) fn nullable(dart_type: &str) -> String {
    if dart_type == "dynamic" {
        dart_type.to_string()
    } else {
        format!("{dart_type}?")
    }
}
