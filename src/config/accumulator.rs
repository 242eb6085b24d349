//! Mutable aggregate filled while walking the import tree.
//!
//! Lists only ever grow; singleton slots are overwritten by whichever file is
//! processed last. [`Accumulator::finish`] applies the post-load shaping and
//! freezes the result into [`Settings`].

use std::path::PathBuf;

use crate::config::error::{record, Warning};
use crate::config::schema::{
    AccessRule, OperServSettings, OperatorAccount, ServerSettings, Settings, DEFAULT_PORT,
};

#[derive(Debug, Default)]
pub struct Accumulator {
    server: ServerSettings,
    operserv: Option<OperServSettings>,
    admin: Vec<String>,
    auth: Vec<AccessRule>,
    operators: Vec<OperatorAccount>,
    ports: Vec<u16>,
    imported_files: Vec<PathBuf>,
    warnings: Vec<Warning>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_mut(&mut self) -> &mut ServerSettings {
        &mut self.server
    }

    pub fn operserv(&self) -> Option<&OperServSettings> {
        self.operserv.as_ref()
    }

    /// Callers check [`Accumulator::operserv`] first; a second block is fatal.
    pub fn set_operserv(&mut self, settings: OperServSettings) {
        debug_assert!(self.operserv.is_none());
        self.operserv = Some(settings);
    }

    pub fn push_admin(&mut self, line: String) {
        self.admin.push(line);
    }

    pub fn push_auth(&mut self, rule: AccessRule) {
        self.auth.push(rule);
    }

    pub fn push_operator(&mut self, account: OperatorAccount) {
        self.operators.push(account);
    }

    pub fn push_port(&mut self, port: u16) {
        self.ports.push(port);
    }

    pub fn push_imported(&mut self, path: PathBuf) {
        self.imported_files.push(path);
    }

    /// Record a recoverable condition and report it on the warning channel.
    pub fn warn(&mut self, warning: Warning) {
        record(&mut self.warnings, warning);
    }

    /// Fill defaults for empty lists, shape the admin text and freeze.
    pub fn finish(mut self) -> (Settings, Vec<Warning>) {
        if self.auth.is_empty() {
            self.warn(Warning::NoAccessRules);
            self.auth.push(AccessRule::allow_all());
        }

        if self.operators.is_empty() {
            self.warn(Warning::NoOperators);
        }

        if self.ports.is_empty() {
            self.warn(Warning::NoPorts {
                default: DEFAULT_PORT,
            });
            self.ports.push(DEFAULT_PORT);
        }

        let (admin, truncated) = normalize_admin(std::mem::take(&mut self.admin));
        if let Some(warning) = truncated {
            self.warn(warning);
        }

        let settings = Settings {
            server: self.server,
            admin,
            operserv: self.operserv.unwrap_or_default(),
            auth: self.auth,
            operators: self.operators,
            ports: self.ports,
            imported_files: self.imported_files,
        };
        (settings, self.warnings)
    }
}

/// Built-in admin text used when no `<admin>` line is configured.
pub fn default_admin() -> [String; 3] {
    [
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        "The administrator has not set any admin information.".to_string(),
        "Ask the server owner to fill in <admin> lines.".to_string(),
    ]
}

/// Shape admin lines to exactly three entries.
///
/// Extra lines are dropped (reported through the returned warning), missing
/// lines are padded with empty strings, and an empty list is replaced by
/// [`default_admin`].
pub fn normalize_admin(mut lines: Vec<String>) -> ([String; 3], Option<Warning>) {
    let mut warning = None;
    match lines.len() {
        0 => return (default_admin(), None),
        n if n > 3 => {
            warning = Some(Warning::AdminTruncated { found: n });
            lines.truncate(3);
        }
        _ => lines.resize(3, String::new()),
    }

    let mut lines = lines.into_iter();
    let mut next = || lines.next().unwrap_or_default();
    ([next(), next(), next()], warning)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_admin_exactly_three_is_unchanged() {
        let (admin, warning) = normalize_admin(lines(&["a", "b", "c"]));
        assert_eq!(admin, ["a", "b", "c"].map(String::from));
        assert!(warning.is_none());

        let (again, warning) = normalize_admin(admin.to_vec());
        assert_eq!(again, admin);
        assert!(warning.is_none());
    }

    #[test]
    fn test_admin_padding() {
        let (admin, _) = normalize_admin(lines(&["a", "b"]));
        assert_eq!(admin, ["a", "b", ""].map(String::from));

        let (admin, _) = normalize_admin(lines(&["a"]));
        assert_eq!(admin, ["a", "", ""].map(String::from));
    }

    #[test]
    fn test_admin_truncation_warns() {
        let (admin, warning) = normalize_admin(lines(&["1", "2", "3", "4", "5"]));
        assert_eq!(admin, ["1", "2", "3"].map(String::from));
        assert_eq!(warning, Some(Warning::AdminTruncated { found: 5 }));
    }

    #[test]
    fn test_admin_empty_uses_defaults() {
        let (admin, warning) = normalize_admin(Vec::new());
        assert_eq!(admin, default_admin());
        assert!(admin[0].starts_with(env!("CARGO_PKG_NAME")));
        assert!(warning.is_none());
    }

    #[test]
    fn test_finish_substitutes_defaults() {
        let (settings, warnings) = Accumulator::new().finish();

        assert_eq!(settings.auth, vec![AccessRule::allow_all()]);
        assert!(settings.operators.is_empty());
        assert_eq!(settings.ports, vec![DEFAULT_PORT]);
        assert!(!settings.operserv.enabled);
        assert_eq!(
            warnings,
            vec![
                Warning::NoAccessRules,
                Warning::NoOperators,
                Warning::NoPorts {
                    default: DEFAULT_PORT
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_ports_are_kept() {
        let mut acc = Accumulator::new();
        acc.push_port(6667);
        acc.push_port(6667);
        let (settings, _) = acc.finish();
        assert_eq!(settings.ports, vec![6667, 6667]);
    }
}
