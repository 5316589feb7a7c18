//! Cookie file storage with XDG path support.
//!
//! The jar is stored as JSON at `~/.local/share/lf/cookies.json` on Linux.
//! Both synchronous (`std::fs`) and asynchronous (`tokio::fs`) I/O methods
//! are provided.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Utc;
use directories::ProjectDirs;
use tracing::debug;

use super::{CookieJar, CookieOptions, PreferenceStore, PrefsError, Result};

/// Default cookie filename.
const COOKIE_FILENAME: &str = "cookies.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "lf";

/// Persistent storage for a [`CookieJar`].
///
/// Writes are atomic (temp file + rename) but not synchronized across
/// processes. In typical CLI usage the file is owned by a single process.
#[derive(Debug, Clone)]
pub struct CookieFile {
    /// Path to the cookie file.
    path: PathBuf,
}

impl CookieFile {
    /// Creates a `CookieFile` at the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a `CookieFile` with a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG data path for the cookie file.
    ///
    /// On Unix: `~/.local/share/lf/cookies.json`
    /// On macOS: `~/Library/Application Support/lf/cookies.json`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\lf\data\cookies.json`
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(PrefsError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(COOKIE_FILENAME))
    }

    /// Returns the path to the cookie file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the jar from disk.
    ///
    /// # Errors
    ///
    /// - Returns `PrefsError::ReadError` if the file cannot be read.
    /// - Returns `PrefsError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<CookieJar> {
        let contents = fs::read_to_string(&self.path).map_err(|e| PrefsError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the jar from disk, returning an empty jar if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `PrefsError::ReadError` for I/O errors other than "file not found".
    /// - Returns `PrefsError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<CookieJar> {
        match self.load() {
            Ok(jar) => Ok(jar),
            Err(PrefsError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(CookieJar::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the jar to disk atomically, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// - Returns `PrefsError::CreateDirError` if the directory cannot be created.
    /// - Returns `PrefsError::WriteError` if the file cannot be written.
    /// - Returns `PrefsError::Json` if serialization fails.
    pub fn save(&self, jar: &CookieJar) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PrefsError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(jar)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| PrefsError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| PrefsError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    /// Deletes the cookie file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::DeleteError` if the file cannot be deleted.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PrefsError::DeleteError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    // =========================================================================
    // Async I/O Methods
    // =========================================================================

    /// Async equivalent of [`load()`](Self::load).
    ///
    /// # Errors
    ///
    /// - Returns `PrefsError::ReadError` if the file cannot be read.
    /// - Returns `PrefsError::Json` if the file contains invalid JSON.
    pub async fn load_async(&self) -> Result<CookieJar> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| PrefsError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Async equivalent of [`load_or_default()`](Self::load_or_default).
    ///
    /// # Errors
    ///
    /// - Returns `PrefsError::ReadError` for I/O errors other than "file not found".
    /// - Returns `PrefsError::Json` if the file contains invalid JSON.
    pub async fn load_or_default_async(&self) -> Result<CookieJar> {
        match self.load_async().await {
            Ok(jar) => Ok(jar),
            Err(PrefsError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(CookieJar::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// A cookie jar that writes itself to a [`CookieFile`] after every change.
#[derive(Debug, Clone)]
pub struct PersistentCookieJar {
    jar: CookieJar,
    file: CookieFile,
}

impl PersistentCookieJar {
    /// Loads the jar from `file`, or starts empty if the file is missing.
    /// Cookies that expired while stored are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(file: CookieFile) -> Result<Self> {
        let mut jar = file.load_or_default()?;
        let purged = jar.purge_expired(Utc::now());
        debug!(path = %file.path().display(), cookies = jar.cookies().len(), purged, "opened cookie file");
        Ok(Self { jar, file })
    }

    /// Async equivalent of [`open()`](Self::open).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open_async(file: CookieFile) -> Result<Self> {
        let mut jar = file.load_or_default_async().await?;
        jar.purge_expired(Utc::now());
        Ok(Self { jar, file })
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    pub fn file(&self) -> &CookieFile {
        &self.file
    }
}

impl PreferenceStore for PersistentCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name)
    }

    fn set(&mut self, name: &str, value: Option<&str>, options: &CookieOptions) -> Result<()> {
        self.jar.set(name, value, options);
        self.file.save(&self.jar)?;
        debug!(name, deleted = value.is_none(), path = %self.file.path().display(), "saved preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_path_returns_xdg_path() {
        let path = CookieFile::default_path().expect("should get default path");
        let path_str = path.to_string_lossy();

        assert!(
            path_str.ends_with("cookies.json"),
            "path should end with cookies.json: {}",
            path_str
        );
        assert!(path_str.contains("lf"), "path should contain 'lf': {}", path_str);
        assert!(path.is_absolute(), "path should be absolute: {:?}", path);
    }

    #[test]
    fn test_with_custom_path() {
        let custom_path = PathBuf::from("/tmp/test/cookies.json");
        let file = CookieFile::with_path(custom_path.clone());
        assert_eq!(file.path(), &custom_path);
    }

    #[test]
    fn test_read_error_includes_file_path() {
        let file = CookieFile::with_path(PathBuf::from("/nonexistent/path/to/cookies.json"));

        let error = file.load().unwrap_err();
        let error_msg = error.to_string();
        assert!(
            error_msg.contains("/nonexistent/path/to/cookies.json"),
            "error should include file path: {}",
            error_msg
        );
        assert!(
            error_msg.contains("failed to read cookie file"),
            "error should describe the operation: {}",
            error_msg
        );
    }

    #[test]
    fn test_load_or_default_for_missing_file() {
        let file = CookieFile::with_path(PathBuf::from("/nonexistent/path/to/cookies.json"));
        let jar = file.load_or_default().expect("missing file should give empty jar");
        assert!(jar.is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("cookies.json");
        fs::write(&path, "not json").expect("failed to write file");

        let result = CookieFile::with_path(path).load_or_default();
        assert!(matches!(result, Err(PrefsError::Json(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = CookieFile::with_path(temp_dir.path().join("nested").join("cookies.json"));

        let mut jar = CookieJar::new();
        jar.set("filter4NameIgnoreCase", Some("true"), &CookieOptions::default());
        file.save(&jar).expect("save failed");

        assert!(file.path().exists());
        assert!(!file.path().with_extension("tmp").exists());
        assert_eq!(file.load().expect("load failed"), jar);
    }

    #[test]
    fn test_delete_missing_file_is_ok() {
        let file = CookieFile::with_path(PathBuf::from("/nonexistent/path/to/cookies.json"));
        assert!(file.delete().is_ok());
    }

    #[test]
    fn test_error_message_format_write() {
        let error = PrefsError::WriteError {
            path: PathBuf::from("/home/user/.local/share/lf/cookies.json"),
            source: io::Error::other("disk full"),
        };

        assert_eq!(
            error.to_string(),
            "failed to write cookie file '/home/user/.local/share/lf/cookies.json': disk full"
        );
    }

    #[test]
    fn test_persistent_jar_writes_through() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("cookies.json");

        let mut prefs = PersistentCookieJar::open(CookieFile::with_path(path.clone())).unwrap();
        prefs
            .set("filter4NameAsRegExp", Some("true"), &CookieOptions::default())
            .unwrap();

        let reopened = PersistentCookieJar::open(CookieFile::with_path(path)).unwrap();
        assert_eq!(reopened.get("filter4NameAsRegExp").as_deref(), Some("true"));
    }

    #[test]
    fn test_persistent_jar_delete() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("cookies.json");

        let mut prefs = PersistentCookieJar::open(CookieFile::with_path(path.clone())).unwrap();
        prefs.set("a", Some("1"), &CookieOptions::default()).unwrap();
        prefs.set("a", None, &CookieOptions::default()).unwrap();

        let reopened = PersistentCookieJar::open(CookieFile::with_path(path)).unwrap();
        assert_eq!(reopened.get("a"), None);
        assert!(reopened.jar().is_empty());
    }

    #[tokio::test]
    async fn test_load_async() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = CookieFile::with_path(temp_dir.path().join("cookies.json"));

        let jar = CookieJar::from_cookie_string("a=1; b=2");
        file.save(&jar).expect("save failed");

        let loaded = file.load_async().await.expect("load_async failed");
        assert_eq!(loaded.cookie_string(), "a=1; b=2");
    }

    #[tokio::test]
    async fn test_open_async_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = CookieFile::with_path(temp_dir.path().join("cookies.json"));

        let prefs = PersistentCookieJar::open_async(file).await.unwrap();
        assert!(prefs.jar().is_empty());
    }
}
