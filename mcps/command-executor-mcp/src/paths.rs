//! Path helpers: working-directory resolution and WSL path conversion

use std::path::{Component, Path, PathBuf};

use crate::types::ResolveError;

/// Resolve a user-supplied directory to an absolute, normalized path
///
/// `~` expands to the home directory, relative paths are taken from the
/// process cwd, and `.`/`..` are folded lexically. The filesystem is not
/// consulted, so the directory does not have to exist yet.
pub fn resolve_path(input: &str) -> Result<PathBuf, ResolveError> {
    if input.contains('\0') {
        return Err(ResolveError::InvalidCharacters(input.to_string()));
    }

    let expanded = expand_home(input);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map_err(ResolveError::CurrentDir)?
            .join(expanded)
    };

    Ok(normalize(&absolute))
}

fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Convert a Windows host path into the `/mnt/<drive>/...` form WSL expects
///
/// Paths already starting with `/` pass through. Anything else is read as
/// `<drive>:<rest>`; malformed input yields a wrong path, never an error.
pub fn to_wsl_path(host_path: &str) -> String {
    if host_path.starts_with('/') {
        return host_path.to_string();
    }

    let drive = host_path
        .chars()
        .next()
        .map(|c| c.to_lowercase().to_string())
        .unwrap_or_default();
    let rest = host_path
        .char_indices()
        .nth(2)
        .map(|(i, _)| &host_path[i..])
        .unwrap_or("");

    format!("/mnt/{}{}", drive, rest.replace('\\', "/"))
}
