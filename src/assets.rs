use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Marker image lookup
// ---------------------------------------------------------------------------

/// Resolves a record's relative logo path to an image URI the UI can load.
pub trait AssetStore {
    fn resolve(&self, relative: &str) -> Option<String>;
}

/// Used when no asset directory is configured: every point is drawn plain.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetStore for NoAssets {
    fn resolve(&self, _relative: &str) -> Option<String> {
        None
    }
}

/// Image files under a root directory, indexed once at startup.
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
    files: HashSet<String>,
}

impl DirAssetStore {
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let mut files = HashSet::new();
        index_dir(&root, &root, &mut files)?;
        log::info!("Indexed {} asset files under {}", files.len(), root.display());
        Ok(DirAssetStore { root, files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetStore for DirAssetStore {
    fn resolve(&self, relative: &str) -> Option<String> {
        let key = normalise(relative);
        if !self.files.contains(&key) {
            return None;
        }
        Some(format!("file://{}", self.root.join(&key).display()))
    }
}

fn index_dir(root: &Path, dir: &Path, files: &mut HashSet<String>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            index_dir(root, &path, files)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            files.insert(normalise(&rel.to_string_lossy()));
        }
    }
    Ok(())
}

/// `.\logos\buf.png` and `logos/buf.png` name the same asset.
fn normalise(relative: &str) -> String {
    let unified = relative.trim().replace('\\', "/");
    unified.trim_start_matches("./").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_indexed_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("logos")).unwrap();
        std::fs::write(dir.path().join("logos").join("buf.png"), b"png").unwrap();

        let store = DirAssetStore::open(dir.path()).unwrap();
        assert_eq!(store.len(), 1);

        let uri = store.resolve("logos/buf.png").unwrap();
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with("buf.png"));
        assert_eq!(store.resolve(r".\logos\buf.png"), Some(uri));
        assert_eq!(store.resolve("logos/mia.png"), None);
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(DirAssetStore::open("/nonexistent/assets").is_err());
    }

    #[test]
    fn no_assets_resolves_nothing() {
        assert_eq!(NoAssets.resolve("logos/buf.png"), None);
    }
}
