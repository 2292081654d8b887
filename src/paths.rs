use std::path::{Component, Path, PathBuf};

use crate::errors::AppError;

// Checked against the raw request path before any resolution happens.
const FORBIDDEN_PATH_CHARS: &[char] = &[
    '*', '?', '"', '<', '>', '|', ';', '&', '`', '\'', '\\',
];

#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    // Both failure causes collapse into the same rejection.
    pub fn validate(&self, request_path: &str) -> Result<PathBuf, AppError> {
        if request_path.contains(FORBIDDEN_PATH_CHARS) {
            tracing::warn!(path = request_path, "Rejected path with forbidden character");
            return Err(AppError::InvalidPath);
        }

        match resolve_under(&self.root, request_path) {
            Some(resolved) => Ok(resolved),
            None => {
                tracing::warn!(path = request_path, "Rejected path escaping storage root");
                Err(AppError::InvalidPath)
            }
        }
    }
}

// Rooted request paths are refused rather than re-anchored.
pub fn resolve_under(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();

    for component in Path::new(request_path).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    resolved.starts_with(root).then_some(resolved)
}
