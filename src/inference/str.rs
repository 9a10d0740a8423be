//! String classification and key normalization.
use once_cell::sync::Lazy;
use regex::Regex;

/// Class name used when a key has no alphanumeric characters.
pub const DEFAULT_CLASS_NAME: &str = "AutoGen";

/// Field name used when a key normalizes to nothing (e.g. `"_"`).
pub const DEFAULT_FIELD_NAME: &str = "field";

/// File slug used when the root class name has no usable characters.
pub const DEFAULT_FILE_SLUG: &str = "root_model";

// ASCII digits only; `\d` would also accept other Unicode digits.
static ISO_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?Z?$")
        .expect("date-time pattern is valid")
});

static LOWER_UPPER_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("boundary pattern is valid"));

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]+").expect("slug pattern is valid"));

/// `YYYY-MM-DDTHH:MM:SS[.fraction][Z]`. Shape only; the date is not validated.
pub fn looks_like_date_time(s: &str) -> bool {
    ISO_DATE_TIME.is_match(s)
}

/// lowerCamelCase field name for a JSON key.
///
/// Leading underscores are dropped; every run of non-alphanumeric characters
/// followed by an alphanumeric one is removed and that character uppercased.
/// A trailing run with nothing after it is kept as-is.
pub fn camel(key: &str) -> String {
    let trimmed = key.trim_start_matches('_');
    let mut out = String::with_capacity(trimmed.len());
    let mut run = String::new();
    for c in trimmed.chars() {
        if c.is_ascii_alphanumeric() {
            if run.is_empty() {
                out.push(c);
            } else {
                run.clear();
                out.push(c.to_ascii_uppercase());
            }
        } else {
            run.push(c);
        }
    }
    out.push_str(&run);

    let mut chars = out.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            first.to_ascii_lowercase().to_string() + chars.as_str()
        }
        _ => out,
    }
}

/// [`camel`] with the empty-result guard applied.
pub fn field_name(key: &str) -> String {
    let name = camel(key);
    if name.is_empty() { DEFAULT_FIELD_NAME.to_string() } else { name }
}

/// PascalCase class name for a key. Non-alphanumeric runs are word
/// boundaries; only the first letter of each word changes case.
pub fn pascal(key: &str) -> String {
    let name: String = key
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect();
    if name.is_empty() { DEFAULT_CLASS_NAME.to_string() } else { name }
}

/// Filesystem-safe snake_case slug (`ProductList` → `product_list`).
pub fn snake(name: &str) -> String {
    let split = LOWER_UPPER_BOUNDARY.replace_all(name, "${1}_${2}");
    let replaced = NON_SLUG_RUN.replace_all(&split, "_");
    let slug = replaced.trim_matches('_').to_lowercase();
    if slug.is_empty() { DEFAULT_FILE_SLUG.to_string() } else { slug }
}
