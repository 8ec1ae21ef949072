//! File URI conversion

use std::path::{Path, PathBuf};

use url::Url;

/// `file://` URI for a path, made absolute first
pub fn path_to_uri(path: &Path) -> Option<String> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(absolute).ok().map(|url| url.to_string())
}

/// Filesystem path for a `file://` URI; other schemes yield `None`
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let path = Path::new("/work/app/model/Customer.mez");
        let uri = path_to_uri(path).unwrap();
        assert_eq!(uri, "file:///work/app/model/Customer.mez");
        assert_eq!(uri_to_path(&uri).unwrap(), path);
    }

    #[test]
    fn test_spaces_are_escaped() {
        let uri = path_to_uri(Path::new("/work/my app/model/a.mez")).unwrap();
        assert_eq!(uri, "file:///work/my%20app/model/a.mez");
        assert_eq!(
            uri_to_path(&uri).unwrap(),
            PathBuf::from("/work/my app/model/a.mez")
        );
    }

    #[test]
    fn test_non_file_schemes() {
        assert!(uri_to_path("untitled:Untitled-1").is_none());
        assert!(uri_to_path("https://example.com/a.mez").is_none());
        assert!(uri_to_path("not a uri").is_none());
    }
}
