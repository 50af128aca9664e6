//! Read-only static asset store

use core::fmt;

/// Error type for the asset store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetError {
    /// No asset is stored under the requested path
    NotFound,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound => write!(f, "asset not found"),
        }
    }
}

/// An opened asset.
#[derive(Debug, Clone, Copy)]
pub struct Asset<'a> {
    name: &'a str,
    bytes: &'a [u8],
}

impl<'a> Asset<'a> {
    pub const fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }

    pub const fn name(&self) -> &'a str {
        self.name
    }

    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Read-only store of named static files.
pub trait AssetStore {
    /// Check whether an asset is stored under `path`.
    fn exists(&self, path: &str) -> bool;

    /// Open the asset stored under `path` for reading.
    fn open(&self, path: &str) -> Result<Asset<'_>, AssetError>;
}

/// Asset store over a table linked into the firmware image.
///
/// Paths are matched with or without a leading `/`.
#[derive(Debug, Clone, Copy)]
pub struct StaticAssetStore {
    entries: &'static [(&'static str, &'static [u8])],
}

impl StaticAssetStore {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// Iterate over every stored asset.
    pub fn assets(&self) -> impl Iterator<Item = Asset<'static>> + '_ {
        self.entries
            .iter()
            .map(|&(name, bytes)| Asset::new(name, bytes))
    }

    fn find(&self, path: &str) -> Option<Asset<'static>> {
        let name = path.trim_start_matches('/');
        self.assets().find(|asset| asset.name() == name)
    }
}

impl AssetStore for StaticAssetStore {
    fn exists(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    fn open(&self, path: &str) -> Result<Asset<'_>, AssetError> {
        self.find(path).ok_or(AssetError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: [(&str, &[u8]); 2] = [
        ("index.html", b"<html></html>"),
        ("styles.css", b"body {}"),
    ];

    #[test]
    fn lookup_ignores_leading_slash() {
        let store = StaticAssetStore::new(&TABLE);

        assert!(store.exists("index.html"));
        assert!(store.exists("/index.html"));
        assert!(!store.exists("/script.js"));

        let asset = store.open("/styles.css").unwrap();
        assert_eq!(asset.name(), "styles.css");
        assert_eq!(asset.bytes(), b"body {}");
    }

    #[test]
    fn open_missing_asset_fails() {
        let store = StaticAssetStore::new(&TABLE);

        assert_eq!(store.open("/script.js").unwrap_err(), AssetError::NotFound);
    }

    #[test]
    fn assets_lists_table_in_order() {
        let store = StaticAssetStore::new(&TABLE);
        let mut names = store.assets().map(|asset| asset.name());

        assert_eq!(names.next(), Some("index.html"));
        assert_eq!(names.next(), Some("styles.css"));
        assert_eq!(names.next(), None);
    }
}
