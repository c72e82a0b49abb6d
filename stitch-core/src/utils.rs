//! Shared string helpers for code generation.

/// Convert a snake_case key to PascalCase (e.g., "json_class" -> "JsonClass")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first character.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Whether `name` follows the `isX` boolean property convention.
fn is_prefixed(name: &str) -> bool {
    name.strip_prefix("is")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| !c.is_lowercase())
}

/// JVM getter for a property (e.g., "name" -> "getName", "isActive" -> "isActive").
pub fn getter_name(property: &str) -> String {
    if is_prefixed(property) {
        property.to_string()
    } else {
        format!("get{}", capitalize(property))
    }
}

/// JVM setter for a property (e.g., "name" -> "setName", "isActive" -> "setActive").
pub fn setter_name(property: &str) -> String {
    match property.strip_prefix("is") {
        Some(rest) if is_prefixed(property) => format!("set{rest}"),
        _ => format!("set{}", capitalize(property)),
    }
}

/// Escape text for use inside a Java string literal (without the quotes).
pub fn escape_java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
