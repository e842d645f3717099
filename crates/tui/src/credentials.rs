use std::{fmt, fs, io::ErrorKind, path::Path};

use crate::error::{AppError, Result};

/// Rate provider API key, read once at startup.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Reads the key from the first line of `path`.
    ///
    /// A missing file or an empty first line is a startup error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let missing = || AppError::CredentialMissing {
            path: path.display().to_string(),
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(missing()),
            Err(err) => return Err(err.into()),
        };

        let key = content.lines().next().unwrap_or("").trim();
        if key.is_empty() {
            return Err(missing());
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spendlog_credentials_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_first_line_trimmed() {
        let path = scratch_file("key_ok.txt", "  abc123  \nignored\n");
        let key = ApiKey::load(&path).unwrap();
        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn missing_file_is_credential_error() {
        let path = std::env::temp_dir().join("spendlog_no_such_key_file.txt");
        let err = ApiKey::load(&path).unwrap_err();
        assert!(matches!(err, AppError::CredentialMissing { .. }));
    }

    #[test]
    fn empty_file_is_credential_error() {
        let path = scratch_file("key_empty.txt", "\n\n");
        let err = ApiKey::load(&path).unwrap_err();
        assert!(matches!(err, AppError::CredentialMissing { .. }));
    }

    #[test]
    fn debug_hides_key() {
        let key = ApiKey::from("secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }
}
