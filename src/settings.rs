//! Settings for one generation run.
use crate::codegen::OutputStyle;

/// Root class name used when none (or a blank one) is given.
pub const DEFAULT_ROOT_CLASS: &str = "RootModel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Name of the class inferred from the root object. Used verbatim.
    pub root_class: String,
    pub style: OutputStyle,
    /// JSON Pointer (RFC 6901) selecting the sample inside the document.
    pub json_pointer: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root_class: DEFAULT_ROOT_CLASS.to_string(),
            style: OutputStyle::default(),
            json_pointer: None,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_root_class(mut self, root_class: impl AsRef<str>) -> Self {
        let trimmed = root_class.as_ref().trim();
        self.root_class = if trimmed.is_empty() {
            DEFAULT_ROOT_CLASS.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_json_pointer(mut self, pointer: Option<String>) -> Self {
        self.json_pointer = pointer;
        self
    }
}
