use super::environment::Environment;
use crate::error::{RuntimeError, RuntimeErrorKind};
use compact_str::{CompactString, ToCompactString};

/// Finds every distinct `#{name}` marker, in order of first appearance.
fn markers(text: &str) -> Vec<(&str, &str)> {
    let mut found: Vec<(&str, &str)> = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("#{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            let marker = &rest[start..start + end + 3];
            if !found.iter().any(|(m, _)| *m == marker) {
                found.push((marker, name));
            }
            rest = &after[end + 1..];
        } else {
            rest = after;
        }
    }
    found
}

/// Substitutes bound values into a string literal.
///
/// Replacement is done one marker text at a time over the whole string, so
/// repeated markers are filled in together.
pub fn interpolate(
    text: &str,
    environment: &Environment,
    line: u32,
) -> Result<CompactString, RuntimeError> {
    let markers = markers(text);
    if markers.is_empty() {
        return Ok(text.into());
    }

    let mut result = text.to_string();
    for (marker, name) in markers {
        let value = environment.access(name).ok_or_else(|| {
            RuntimeError::new(RuntimeErrorKind::UndefinedVariable(name.into()), line)
        })?;
        result = result.replace(marker, &value.to_compact_string());
    }
    Ok(result.into())
}
