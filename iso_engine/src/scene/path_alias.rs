/// Model path resolution.
///
/// A model path is either a literal filesystem path or `@key/rest`, where `key` is
/// looked up in an ordered alias table (first match wins) and replaced by its value.
/// The separator after the key may be `/` or `\`; the first one found ends the key.

use std::path::{Component, Path, PathBuf};
use crate::error::{Error, Result};

/// Substitute a leading `@key` with its alias value
///
/// Paths not starting with `@` are returned unchanged.
///
/// # Errors
///
/// - `MalformedPath` if the path is empty or `@` is not followed by a separator
/// - `UnresolvedAlias` if no alias has the key
pub fn resolve_alias(model_path: &str, aliases: &[(String, String)]) -> Result<String> {
    if model_path.is_empty() {
        return Err(Error::MalformedPath(model_path.to_string()));
    }
    let Some(reference) = model_path.strip_prefix('@') else {
        return Ok(model_path.to_string());
    };

    let separator = reference.find(['/', '\\'])
        .ok_or_else(|| Error::MalformedPath(model_path.to_string()))?;
    let (key, rest) = reference.split_at(separator);

    aliases.iter()
        .find(|(alias, _)| alias == key)
        .map(|(_, value)| format!("{}{}", value, rest))
        .ok_or_else(|| Error::UnresolvedAlias(model_path.to_string()))
}

/// Absolute form of `path`: absolute paths verbatim, relative ones joined to `base`
///
/// # Errors
///
/// `MalformedPath` for an empty path.
pub fn to_absolute(path: &str, base: &Path) -> Result<PathBuf> {
    if path.is_empty() {
        return Err(Error::MalformedPath(path.to_string()));
    }
    let path = Path::new(path);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(normalize_path(&base.join(path)))
}

/// Lexically remove `.` and `..` components (no filesystem access)
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(normalized.components().next_back(), Some(Component::Normal(_)))
                    && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "path_alias_tests.rs"]
mod tests;
