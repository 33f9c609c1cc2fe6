use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tether";
const DB_FILENAME: &str = "tether.sqlite3";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path.join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    ensure_dir(&dir)?;
    Ok(dir)
}

pub fn db_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(DB_FILENAME))
}

pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join(DB_FILENAME)
}

/// Explicit paths win over the XDG default. The parent directory of an
/// explicit path is created when missing but its permissions are left alone.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() || path.is_dir() {
                return Err(StoreError::InvalidDataPath(path));
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            Ok(path)
        }
        None => db_path(),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    restrict_dir_permissions(dir)
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{db_path_in, resolve_db_path};
    use crate::error::StoreError;
    use tempfile::TempDir;

    #[test]
    fn resolve_db_path_creates_parent_of_explicit_path() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("nested").join("crm.sqlite3");
        let resolved = resolve_db_path(Some(path.clone())).expect("resolve");
        assert_eq!(resolved, path);
        assert!(temp.path().join("nested").is_dir());
    }

    #[test]
    fn resolve_db_path_rejects_directories() {
        let temp = TempDir::new().expect("tempdir");
        let err = resolve_db_path(Some(temp.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDataPath(_)));
    }

    #[test]
    fn db_path_in_uses_default_filename() {
        let temp = TempDir::new().expect("tempdir");
        assert_eq!(
            db_path_in(temp.path()),
            temp.path().join("tether.sqlite3")
        );
    }
}
