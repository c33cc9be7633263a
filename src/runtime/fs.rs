//! File system operations (read, write, directory).

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to file {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_private_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(path)
            .with_context(|| format!("Failed to open file {:?}", path))?;

        // mode() only applies on creation
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict permissions of {:?}", path))?;
        }

        file.write_all(contents)
            .with_context(|| format!("Failed to write to file {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_lifecycle() {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let nested = dir.path().join("a").join("b");
        let file = nested.join("session.json");

        runtime.create_dir_all(&nested).unwrap();
        assert!(runtime.exists(&nested));

        runtime.write(&file, b"{\"token\":\"abc\"}").unwrap();
        assert!(runtime.exists(&file));
        assert_eq!(runtime.read_to_string(&file).unwrap(), "{\"token\":\"abc\"}");

        runtime.remove_file(&file).unwrap();
        assert!(!runtime.exists(&file));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_private_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let file = dir.path().join("session.json");

        // pre-existing world-readable file gets tightened too
        std::fs::write(&file, b"old").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o644)).unwrap();

        runtime.write_private(&file, b"new").unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(runtime.read_to_string(&file).unwrap(), "new");
    }

    #[test]
    fn test_real_runtime_read_missing_file_fails() {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;

        let err = runtime
            .read_to_string(&dir.path().join("missing.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
