//! Name helpers shared by descriptors and the metadata engine.

/// Short form of a Rust type name with module paths removed.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
#[must_use]
pub fn short_type_name<V: ?Sized>() -> String {
    shorten_type_name(std::any::type_name::<V>())
}

/// Strip module paths from every segment of a fully qualified type name.
#[must_use]
pub fn shorten_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            ':' => segment.clear(),
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                out.push_str(&segment);
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(&segment);
    out
}

/// Convert a `snake_case` fragment to `UpperCamel` (`home_page` -> `HomePage`).
#[must_use]
pub fn upper_camel(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}
