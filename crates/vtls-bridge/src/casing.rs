//! Case conversion for component and attribute names.

/// Convert a camelCase or PascalCase name to kebab-case. A hyphen is only
/// inserted when the uppercase letter follows a word character, so segment
/// separators like `:` never gain one (`update:modelValue` becomes
/// `update:model-value`).
#[must_use]
pub fn hyphenate(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_is_word = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_is_word {
                result.push('-');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
        prev_is_word = c.is_ascii_alphanumeric() || c == '_';
    }
    result
}

/// Convert a kebab-case name to camelCase.
#[must_use]
pub fn camelize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            result.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert kebab-case or camelCase to PascalCase.
#[must_use]
pub fn pascal_case(name: &str) -> String {
    capitalize(&camelize(name))
}
