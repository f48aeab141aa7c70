//! `{{ dotted.path }}` template substitution.

use serde_json::Value;

/// Render a template against a JSON context mapping.
///
/// Every `{{ path.to.field }}` placeholder is replaced by the value found
/// by walking the context through each dot-separated segment. A missing
/// key, or a non-mapping encountered mid-path, resolves to an empty
/// string. A terminal array renders as its elements joined with `", "`.
/// Text that merely looks like a placeholder but carries an invalid path
/// is left verbatim. Rendering never fails.
pub fn render(template: &str, context: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        match after_open.find("}}") {
            Some(close) if is_path(after_open[..close].trim()) => {
                out.push_str(&lookup(after_open[..close].trim(), context));
                rest = &after_open[close + 2..];
            }
            _ => {
                // not a well-formed placeholder; emit one brace and rescan
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);

    out
}

/// A valid placeholder path: non-empty, ASCII alphanumerics, `_` and `.`.
fn is_path(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn lookup(path: &str, context: &Value) -> String {
    let mut current = context;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return String::new(),
        }
    }
    stringify(current)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
