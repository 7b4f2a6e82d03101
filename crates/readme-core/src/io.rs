use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Readers never observe a half-written README.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read `path` as UTF-8, returning an empty string when the file does not exist.
///
/// Any other I/O failure (permissions, invalid UTF-8) propagates.
pub fn read_or_empty(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// Write `data` to `path` only when the current content differs.
/// Returns true if the file was written.
pub fn write_if_changed(path: &Path, data: &str) -> Result<bool> {
    if read_or_empty(path)? == data && path.exists() {
        return Ok(false);
    }
    atomic_write(path, data.as_bytes())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        atomic_write(&path, b"# Hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Hello");
    }

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/README.md");
        atomic_write(&path, b"data").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn read_or_empty_missing_file() {
        let dir = TempDir::new().unwrap();
        let text = read_or_empty(&dir.path().join("README.md")).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn read_or_empty_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Title\n").unwrap();
        assert_eq!(read_or_empty(&path).unwrap(), "# Title\n");
    }

    #[test]
    fn write_if_changed_skips_identical_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "same\n").unwrap();
        assert!(!write_if_changed(&path, "same\n").unwrap());
        assert!(write_if_changed(&path, "different\n").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "different\n");
    }

    #[test]
    fn write_if_changed_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        assert!(write_if_changed(&path, "").unwrap());
        assert!(path.exists());
    }
}
