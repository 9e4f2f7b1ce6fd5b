//! Discovery of the files under the deploy target

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::DeployError;

/// Every regular file under `root`, recursively. Order is not significant.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, DeployError> {
    if !root.is_dir() {
        return Err(DeployError::TargetNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| DeployError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Object key for `path`: its location relative to `root`, `/`-separated on
/// every platform
pub fn object_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_recurses() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::create_dir_all(dir.path().join("assets/img")).unwrap();
        fs::write(dir.path().join("assets/app.js"), "console.log(1)").unwrap();
        fs::write(dir.path().join("assets/img/logo.png"), [0x89, b'P']).unwrap();

        let mut keys: Vec<String> = collect_files(dir.path())
            .unwrap()
            .iter()
            .filter_map(|p| object_key(dir.path(), p))
            .collect();
        keys.sort();

        assert_eq!(keys, vec!["assets/app.js", "assets/img/logo.png", "index.html"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(collect_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("dist");
        let err = collect_files(&missing).unwrap_err();
        assert!(matches!(err, DeployError::TargetNotFound(p) if p == missing));
    }

    #[test]
    fn test_object_key_uses_forward_slashes() {
        let root = Path::new("site");
        let path = root.join("assets").join("css").join("style.css");
        assert_eq!(object_key(root, &path).as_deref(), Some("assets/css/style.css"));
        assert_eq!(object_key(root, &root.join("index.html")).as_deref(), Some("index.html"));
    }

    #[test]
    fn test_object_key_outside_root() {
        assert_eq!(object_key(Path::new("site"), Path::new("other/a.txt")), None);
        assert_eq!(object_key(Path::new("site"), Path::new("site")), None);
    }
}
