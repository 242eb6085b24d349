//! Resolved settings handed to the server runtime.
//!
//! Everything here is plain data. Once [`Settings`] has been produced it is
//! never mutated again; the runtime receives it by value.

use std::path::PathBuf;

use serde::Serialize;

/// Port used when no `<port>` is configured anywhere.
pub const DEFAULT_PORT: u16 = 6667;

/// Mask admitting every client.
pub const ANY_MASK: &str = "*@*";

/// Root of the frozen configuration snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Singleton server fields.
    pub server: ServerSettings,

    /// Administrator text, always exactly three lines.
    pub admin: [String; 3],

    /// OperServ service pseudo-client.
    pub operserv: OperServSettings,

    /// Connection rules, first match wins at runtime.
    pub auth: Vec<AccessRule>,

    /// IRC operator accounts.
    pub operators: Vec<OperatorAccount>,

    /// Ports to listen on, duplicates preserved.
    pub ports: Vec<u16>,

    /// Every file pulled in through `<import>`, in completion order.
    pub imported_files: Vec<PathBuf>,
}

/// Server-wide singleton settings. Later definitions replace earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub name: String,
    pub nick_length: u32,
    pub network: String,
    pub max_targets: u32,
    pub max_channels: u32,
    pub info: String,
    pub description: String,
    pub motd: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "irc.localhost".to_string(),
            nick_length: 9,
            network: "IRCNet".to_string(),
            max_targets: 4,
            max_channels: 10,
            info: "An IRC server".to_string(),
            description: "IRC server".to_string(),
            motd: "ircd.motd".to_string(),
        }
    }
}

/// OperServ configuration. At most one `<operserv>` block may exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperServSettings {
    pub enabled: bool,
    pub nick: String,
    pub irc_name: String,
    pub channel_control: bool,
}

impl Default for OperServSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            nick: "OperServ".to_string(),
            irc_name: "Operator Services".to_string(),
            channel_control: false,
        }
    }
}

/// A connection rule from an `<auth>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRule {
    pub mask: String,
    pub password: Option<String>,
    pub spoof: Option<String>,
    /// Reject idents carrying the `~` prefix.
    pub no_tilde: Option<bool>,
    pub source_file: PathBuf,
}

impl AccessRule {
    /// Open rule used when no `<auth>` entry exists.
    pub fn allow_all() -> Self {
        Self {
            mask: ANY_MASK.to_string(),
            password: None,
            spoof: None,
            no_tilde: None,
            source_file: PathBuf::new(),
        }
    }
}

/// An operator account from an `<operator>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorAccount {
    pub username: String,
    pub password: String,
    pub ip_mask: Option<String>,
    pub source_file: PathBuf,
}
