//! Atomic TOML file operations.
//!
//! Writers go through a temp file, fsync and rename while holding an exclusive
//! lock, so a concurrent reader sees either the old document or the new one.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic TOML operations.
#[derive(Debug)]
pub enum AtomicTomlError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML deserialization error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::IoError(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::TomlSerError(e)
    }
}

/// A handle to a TOML document that is replaced atomically.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Replaces the document with `data`.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Deletes the document. Removing a missing file succeeds.
    pub fn remove(&self) -> Result<(), AtomicTomlError> {
        if self.path.parent().is_some_and(|p| !p.exists()) {
            return Ok(());
        }

        let _lock = FileLock::acquire(&self.path)?;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicTomlError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicTomlError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// Exclusive lock held for the duration of a write.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicTomlError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}
