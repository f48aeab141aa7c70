//! Query and field tokenization.

/// Split text into lower-cased word tokens.
///
/// A token is a maximal run of ASCII letters, digits, underscore, or
/// apostrophe; everything else is a separator. Pure and total — empty
/// input yields an empty vec.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '\'' {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
