//! Integration tests for config

#[cfg(test)]
mod tests {
    use jslaunch_config::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[paths]
install_root = "/opt/jsonschema"

[quarantine]
enabled = false

[logging]
json = true
filter = "debug"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.install_root(), PathBuf::from("/opt/jsonschema"));
        assert!(!config.quarantine.enabled);
        // Unset fields keep their defaults
        assert_eq!(config.quarantine.utility, PathBuf::from("/usr/bin/xattr"));
        assert!(config.logging.json);
        assert_eq!(config.logging.filter, "debug");
    }

    #[tokio::test]
    async fn test_empty_file_is_default() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[paths\ninstall_root = 1").unwrap();

        let err = Config::load_from_file(temp_file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            jslaunch_errors::Error::Config(jslaunch_errors::ConfigError::ParseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::load_or_default(Some(missing.as_path())).await.unwrap_err();
        assert!(matches!(
            err,
            jslaunch_errors::Error::Config(jslaunch_errors::ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_default_install_root_is_absolute() {
        assert!(default_install_root().is_absolute());
    }
}
