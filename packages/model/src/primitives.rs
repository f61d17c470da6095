/// Type produced by `exists()` and `is()`
pub const BOOLEAN_TYPE_NAME: &str = "boolean";

/// Map a primitive keyword used in casts (`as(date)`, `as(Range)`) to the
/// nominal name of its concrete type. Matching ignores case; names outside the
/// table return `None` and are looked up as nominal names directly.
pub fn canonical_type_name(keyword: &str) -> Option<&'static str> {
    match keyword.to_ascii_uppercase().as_str() {
        "AGE" => Some("Age"),
        "DATETIME" | "DATE" => Some("dateTime"),
        "URI" => Some("uri"),
        "BOOLEAN" => Some(BOOLEAN_TYPE_NAME),
        "STRING" => Some("string"),
        "PERIOD" => Some("Period"),
        "RANGE" => Some("Range"),
        _ => None,
    }
}
