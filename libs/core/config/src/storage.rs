use crate::{env_or_default, ConfigError, FromEnv};

/// Upload storage configuration.
///
/// `root` is the directory attachment blobs are written to; `public_prefix`
/// is the URL prefix the static-file layer serves that directory under.
/// References stored on items are `<public_prefix>/<blob-name>`.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub root: String,
    pub public_prefix: String,
}

impl StorageConfig {
    pub fn new(root: impl Into<String>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }
}

impl FromEnv for StorageConfig {
    /// Reads from environment variables with sensible defaults:
    /// - UPLOAD_DIR: defaults to "uploads"
    /// - UPLOAD_PUBLIC_PREFIX: defaults to "/uploads"
    fn from_env() -> Result<Self, ConfigError> {
        let root = env_or_default("UPLOAD_DIR", "uploads");
        let public_prefix = env_or_default("UPLOAD_PUBLIC_PREFIX", "/uploads");

        if !public_prefix.starts_with('/') {
            return Err(ConfigError::ParseError {
                key: "UPLOAD_PUBLIC_PREFIX".to_string(),
                details: "must start with '/'".to_string(),
            });
        }

        Ok(Self {
            root,
            public_prefix,
        })
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: "uploads".to_string(),
            public_prefix: "/uploads".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("UPLOAD_DIR", None::<&str>),
                ("UPLOAD_PUBLIC_PREFIX", None::<&str>),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.root, "uploads");
                assert_eq!(config.public_prefix, "/uploads");
            },
        );
    }

    #[test]
    fn test_storage_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("UPLOAD_DIR", Some("/var/lib/inventory/blobs")),
                ("UPLOAD_PUBLIC_PREFIX", Some("/static/images")),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.root, "/var/lib/inventory/blobs");
                assert_eq!(config.public_prefix, "/static/images");
            },
        );
    }

    #[test]
    fn test_storage_config_rejects_relative_prefix() {
        temp_env::with_var("UPLOAD_PUBLIC_PREFIX", Some("uploads"), || {
            let result = StorageConfig::from_env();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert!(err.to_string().contains("UPLOAD_PUBLIC_PREFIX"));
        });
    }
}
