use std::path::PathBuf;

use tokio::fs;

use crate::paths::resolve_under;

#[derive(Debug, Clone)]
pub struct RedirectResolver {
    root: PathBuf,
}

impl RedirectResolver {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    // Directories get a trailing slash, files do not; a path with no entry
    // on disk keeps the trailing slash of the request as sent.
    pub async fn resolve(&self, request_path: &str) -> String {
        let relative = request_path.trim_matches('/');
        if relative.is_empty() {
            return "/files/".to_string();
        }

        let target = format!("/files/{relative}");
        // Out-of-root probes count as nonexistent.
        let is_directory = match resolve_under(&self.root, relative) {
            Some(on_disk) => fs::metadata(on_disk).await.map(|meta| meta.is_dir()).ok(),
            None => None,
        };

        match is_directory {
            Some(true) => format!("{target}/"),
            Some(false) => target,
            None if request_path.ends_with('/') => format!("{target}/"),
            None => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn root_always_resolves_to_the_files_root() {
        let temp = tempdir().expect("tempdir");
        let resolver = RedirectResolver::new(temp.path().to_path_buf());

        assert_eq!(resolver.resolve("").await, "/files/");
        assert_eq!(resolver.resolve("/").await, "/files/");
    }

    #[tokio::test]
    async fn existing_file_gets_no_trailing_slash() {
        let temp = tempdir().expect("tempdir");
        std::fs::create_dir(temp.path().join("images")).expect("mkdir");
        std::fs::write(temp.path().join("images/disk.img"), b"bytes").expect("write");
        let resolver = RedirectResolver::new(temp.path().to_path_buf());

        assert_eq!(
            resolver.resolve("images/disk.img").await,
            "/files/images/disk.img"
        );
        assert_eq!(
            resolver.resolve("images/disk.img/").await,
            "/files/images/disk.img"
        );
    }

    #[tokio::test]
    async fn existing_directory_gets_a_trailing_slash() {
        let temp = tempdir().expect("tempdir");
        std::fs::create_dir(temp.path().join("images")).expect("mkdir");
        let resolver = RedirectResolver::new(temp.path().to_path_buf());

        assert_eq!(resolver.resolve("images").await, "/files/images/");
        assert_eq!(resolver.resolve("images/").await, "/files/images/");
    }

    #[tokio::test]
    async fn missing_path_mirrors_the_request_slash() {
        let temp = tempdir().expect("tempdir");
        let resolver = RedirectResolver::new(temp.path().to_path_buf());

        assert_eq!(resolver.resolve("missing").await, "/files/missing");
        assert_eq!(resolver.resolve("missing/").await, "/files/missing/");
    }

    #[tokio::test]
    async fn out_of_root_probe_is_treated_as_missing() {
        let temp = tempdir().expect("tempdir");
        let resolver = RedirectResolver::new(temp.path().to_path_buf());

        assert_eq!(resolver.resolve("../outside").await, "/files/../outside");
    }
}
