//! Whole-file reads and crash-safe writes.
//!
//! Writes go to a temporary file in the target's directory which is then
//! renamed over the target, so a failed write leaves the old content in
//! place.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{CliError, CliResult};

/// Path that stands for standard input or output.
pub const STDIO: &str = "-";

/// Reads a whole file as UTF-8, or standard input for `-`.
pub fn read_text(path: &Path) -> CliResult<String> {
    if path.as_os_str() == STDIO {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(CliError::io(path))?;
        return Ok(text);
    }

    let text = fs::read_to_string(path).map_err(CliError::io(path))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read file");
    Ok(text)
}

/// Writes text to standard output.
pub fn write_stdout(text: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(CliError::io(STDIO))
}

/// How the permissions of a replaced file are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permissions {
    /// Owner read/write only.
    Private,
    /// Keep the permissions of the file being replaced, if any.
    Preserve,
}

/// Atomically replaces `path` with `text`.
pub fn write_atomic(path: &Path, text: &str, permissions: Permissions) -> CliResult<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(CliError::io(dir))?;
    tmp.write_all(text.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(CliError::io(tmp.path()))?;

    match permissions {
        // Temporary files are created owner-only on Unix.
        Permissions::Private => {}
        Permissions::Preserve => {
            if let Ok(meta) = fs::metadata(path) {
                fs::set_permissions(tmp.path(), meta.permissions())
                    .map_err(CliError::io(tmp.path()))?;
            }
        }
    }

    tmp.persist(path).map_err(|err| CliError::io(path)(err.error))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg.mime");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new", Permissions::Preserve).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_keeps_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("msg.mime");
        let err = write_atomic(&path, "text", Permissions::Private).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let private = dir.path().join("private.mime");
        write_atomic(&private, "x", Permissions::Private).unwrap();
        let mode = fs::metadata(&private).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let shared = dir.path().join("shared.mime");
        fs::write(&shared, "x").unwrap();
        fs::set_permissions(&shared, fs::Permissions::from_mode(0o644)).unwrap();
        write_atomic(&shared, "y", Permissions::Preserve).unwrap();
        let mode = fs::metadata(&shared).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_read_text_missing_file() {
        let err = read_text(Path::new("/nonexistent/ignite/msg.mime")).unwrap_err();
        match err {
            CliError::Io { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/ignite/msg.mime"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
