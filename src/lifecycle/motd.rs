//! Message of the day.

use std::fs;

use crate::config::error::{record, ConfigError, Warning};
use crate::config::locator::FileLocator;
use crate::observability::logging::VERBOSE_TARGET;

/// Text served when no MOTD file exists.
pub const NO_MOTD: &str = "No MOTD set.";

/// Load the MOTD named in the settings.
///
/// A missing file records a warning and yields a single placeholder line. A
/// file that exists but cannot be read is fatal. Bytes that are not UTF-8 are
/// replaced rather than rejected.
pub fn load_motd(
    name: &str,
    locator: &dyn FileLocator,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<String>, ConfigError> {
    let Some(path) = locator.find(name) else {
        record(
            warnings,
            Warning::MotdNotFound {
                name: name.to_string(),
            },
        );
        return Ok(vec![NO_MOTD.to_string()]);
    };

    let bytes = fs::read(&path).map_err(|source| ConfigError::MotdUnreadable {
        path: path.clone(),
        source,
    })?;

    let lines: Vec<String> = String::from_utf8_lossy(&bytes)
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();

    tracing::info!(
        target: VERBOSE_TARGET,
        file = %path.display(),
        lines = lines.len(),
        "Loaded MOTD"
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::config::locator::SearchPath;

    #[test]
    fn test_missing_motd_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let locator = SearchPath::new(dir.path(), dir.path());
        let mut warnings = Vec::new();

        let lines = load_motd("ircd.motd", &locator, &mut warnings).unwrap();
        assert_eq!(lines, vec![NO_MOTD.to_string()]);
        assert_eq!(
            warnings,
            vec![Warning::MotdNotFound {
                name: "ircd.motd".to_string()
            }]
        );
    }

    #[test]
    fn test_motd_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ircd.motd"), "Welcome\r\nBe nice\n").unwrap();
        let locator = SearchPath::new(dir.path(), dir.path());
        let mut warnings = Vec::new();

        let lines = load_motd("ircd.motd", &locator, &mut warnings).unwrap();
        assert_eq!(lines, vec!["Welcome".to_string(), "Be nice".to_string()]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_non_utf8_motd_loads() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ircd.motd"), b"Bienvenue \xe0 tous\n").unwrap();
        let locator = SearchPath::new(dir.path(), dir.path());
        let mut warnings = Vec::new();

        let lines = load_motd("ircd.motd", &locator, &mut warnings).unwrap();
        assert_eq!(lines, vec!["Bienvenue \u{FFFD} tous".to_string()]);
        assert!(warnings.is_empty());
    }

    /// Always hands back a directory, which exists but cannot be read as a file.
    struct DirectoryLocator(PathBuf);

    impl FileLocator for DirectoryLocator {
        fn find(&self, _name: &str) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_unreadable_motd_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let locator = DirectoryLocator(dir.path().to_path_buf());
        let mut warnings = Vec::new();

        let err = load_motd("ircd.motd", &locator, &mut warnings).unwrap_err();
        assert!(matches!(err, ConfigError::MotdUnreadable { .. }));
        assert!(warnings.is_empty());
    }
}
