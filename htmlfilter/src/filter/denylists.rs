/// Tags removed by the default configuration.
pub const DEFAULT_FORBIDDEN_TAGS: &[&str] = &[
    "script", "form", "button", "input", "style", "meta", "base", "xss", "xml",
];

/// Attribute names removed by the default configuration, on top of every
/// `on*` event handler.
pub const DEFAULT_FORBIDDEN_ATTRIBUTES: &[&str] = &["seekSegmentTime", "FSCommand"];

/// Forbidden tags whose body is removed along with the tag.
pub const DEFAULT_STRIP_CONTENT_OF: &[&str] = &["script", "style"];

// URI scheme markers rejected anywhere inside an attribute value
pub const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Prefix shared by all inline event handler attributes.
pub const EVENT_HANDLER_PREFIX: &str = "on";

/// Case-insensitive (ASCII) substring search.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// Returns the scheme marker found in `value`, if any.
pub fn find_dangerous_scheme(value: &str) -> Option<&'static str> {
    DANGEROUS_SCHEMES
        .iter()
        .copied()
        .find(|scheme| contains_ignore_ascii_case(value, scheme))
}

/// `true` for attribute names that start with `on`, in any case.
pub fn is_event_handler(name: &str) -> bool {
    name.as_bytes()
        .get(..EVENT_HANDLER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(EVENT_HANDLER_PREFIX.as_bytes()))
}
