//! Per-field validation.
//!
//! # Responsibilities
//! - Enforce arity: singleton fields may appear once per scope, repeatable
//!   fields any number of times
//! - Check types: booleans are `0`/`1`, numbers are positive decimals
//! - Turn one file's `<operator>`, `<auth>`, `<operserv>` and `<config>`
//!   blocks into entries in the [`Accumulator`]
//!
//! # Design Decisions
//! - Stops at the first violation; the error names file, element and field
//! - Singleton and repeated occurrences go through the same [`Field`] match

use std::path::Path;
use std::str::FromStr;

use crate::config::accumulator::Accumulator;
use crate::config::document::{Field, RawNode, Value};
use crate::config::error::ConfigError;
use crate::config::schema::{AccessRule, OperServSettings, OperatorAccount};
use crate::observability::logging::VERBOSE_TARGET;

/// Typed access to the fields of one block.
struct FieldReader<'a> {
    file: &'a Path,
    element: &'static str,
    node: &'a RawNode,
}

impl<'a> FieldReader<'a> {
    fn new(file: &'a Path, element: &'static str, node: &'a RawNode) -> Self {
        Self {
            file,
            element,
            node,
        }
    }

    /// Text exactly as written in the document.
    fn raw(&self, field: &'static str, value: &'a Value) -> Result<&'a str, ConfigError> {
        match value {
            Value::Text(text) => Ok(text.as_str()),
            Value::Node(_) => Err(ConfigError::ExpectedText {
                file: self.file.to_path_buf(),
                element: self.element,
                field,
            }),
        }
    }

    fn text(&self, field: &'static str, value: &'a Value) -> Result<&'a str, ConfigError> {
        self.raw(field, value).map(str::trim)
    }

    fn optional_raw(&self, field: &'static str) -> Result<Option<&'a str>, ConfigError> {
        match self.node.field(field) {
            Field::Absent => Ok(None),
            Field::One(value) => self.raw(field, value).map(Some),
            Field::Many(_) => Err(ConfigError::RepeatedField {
                file: self.file.to_path_buf(),
                element: self.element,
                field,
            }),
        }
    }

    fn optional_text(&self, field: &'static str) -> Result<Option<&'a str>, ConfigError> {
        Ok(self.optional_raw(field)?.map(str::trim))
    }

    fn required_text(&self, field: &'static str) -> Result<&'a str, ConfigError> {
        match self.optional_text(field)? {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ConfigError::MissingField {
                file: self.file.to_path_buf(),
                element: self.element,
                field,
            }),
        }
    }

    /// Booleans must be exactly `0` or `1`, surrounding whitespace included.
    fn optional_bool(&self, field: &'static str) -> Result<Option<bool>, ConfigError> {
        self.optional_raw(field)?
            .map(|raw| self.boolean(field, raw))
            .transpose()
    }

    fn boolean(&self, field: &'static str, raw: &str) -> Result<bool, ConfigError> {
        match raw {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(ConfigError::InvalidBoolean {
                file: self.file.to_path_buf(),
                element: self.element,
                field,
                value: raw.to_string(),
            }),
        }
    }

    fn optional_number<T>(&self, field: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr + PartialEq + From<u8>,
    {
        self.optional_text(field)?
            .map(|raw| self.number(field, raw))
            .transpose()
    }

    fn number<T>(&self, field: &'static str, raw: &str) -> Result<T, ConfigError>
    where
        T: FromStr + PartialEq + From<u8>,
    {
        let invalid = || ConfigError::InvalidNumber {
            file: self.file.to_path_buf(),
            element: self.element,
            field,
            value: raw.to_string(),
        };

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match raw.parse::<T>() {
            Ok(n) if n != T::from(0) => Ok(n),
            _ => Err(invalid()),
        }
    }

    /// Every occurrence of a repeatable text field, in declaration order.
    fn repeated_text(&self, field: &'static str) -> Result<Vec<&'a str>, ConfigError> {
        self.node
            .field(field)
            .values()
            .iter()
            .map(|value| self.text(field, value))
            .collect()
    }
}

/// View a value as a block. Empty text (`<auth/>`) counts as an empty block.
fn block<'a>(
    file: &Path,
    element: &'static str,
    value: &'a Value,
) -> Result<&'a RawNode, ConfigError> {
    match value {
        Value::Node(node) => Ok(node),
        Value::Text(text) if text.trim().is_empty() => Ok(RawNode::empty_ref()),
        Value::Text(text) => Err(ConfigError::ExpectedBlock {
            file: file.to_path_buf(),
            element,
            value: text.trim().to_string(),
        }),
    }
}

/// Append one `<operator>` entry.
pub fn apply_operator(
    file: &Path,
    value: &Value,
    acc: &mut Accumulator,
) -> Result<(), ConfigError> {
    let fields = FieldReader::new(file, "operator", block(file, "operator", value)?);

    let account = OperatorAccount {
        username: fields.required_text("username")?.to_string(),
        password: fields.required_text("password")?.to_string(),
        ip_mask: fields.optional_text("ipmask")?.map(str::to_string),
        source_file: file.to_path_buf(),
    };

    tracing::info!(
        target: VERBOSE_TARGET,
        file = %file.display(),
        username = %account.username,
        "Loaded operator"
    );
    acc.push_operator(account);
    Ok(())
}

/// Append one `<auth>` entry.
pub fn apply_auth(
    file: &Path,
    value: &Value,
    acc: &mut Accumulator,
) -> Result<(), ConfigError> {
    let fields = FieldReader::new(file, "auth", block(file, "auth", value)?);

    let rule = AccessRule {
        mask: fields.required_text("mask")?.to_string(),
        password: fields.optional_text("password")?.map(str::to_string),
        spoof: fields.optional_text("spoof")?.map(str::to_string),
        no_tilde: fields.optional_bool("no_tilde")?,
        source_file: file.to_path_buf(),
    };

    tracing::info!(
        target: VERBOSE_TARGET,
        file = %file.display(),
        mask = %rule.mask,
        "Loaded auth rule"
    );
    acc.push_auth(rule);
    Ok(())
}

/// Store the `<operserv>` block. Fails if one was already seen anywhere.
pub fn apply_operserv(
    file: &Path,
    value: &Value,
    acc: &mut Accumulator,
) -> Result<(), ConfigError> {
    if acc.operserv().is_some() {
        return Err(ConfigError::DuplicateOperServ {
            file: file.to_path_buf(),
        });
    }

    let fields = FieldReader::new(file, "operserv", block(file, "operserv", value)?);
    let mut settings = OperServSettings::default();

    if let Some(enabled) = fields.optional_bool("use")? {
        settings.enabled = enabled;
    }
    if let Some(nick) = fields.optional_text("nick")? {
        settings.nick = nick.to_string();
    }
    if let Some(irc_name) = fields.optional_text("username")? {
        settings.irc_name = irc_name.to_string();
    }
    if let Some(control) = fields.optional_bool("control")? {
        settings.channel_control = control;
    }

    tracing::info!(
        target: VERBOSE_TARGET,
        file = %file.display(),
        enabled = settings.enabled,
        nick = %settings.nick,
        "Loaded operserv"
    );
    acc.set_operserv(settings);
    Ok(())
}

/// Merge one `<config>` block: singletons overwrite, repeatables append.
pub fn apply_config(
    file: &Path,
    value: &Value,
    acc: &mut Accumulator,
) -> Result<(), ConfigError> {
    let node = block(file, "config", value)?;
    let fields = FieldReader::new(file, "config", node);

    for raw in fields.repeated_text("port")? {
        let port = fields.number::<u16>("port", raw)?;
        acc.push_port(port);
    }
    for line in fields.repeated_text("admin")? {
        acc.push_admin(line.to_string());
    }

    let info = fields.repeated_text("info")?;
    let name = fields.optional_text("name")?;
    let network = fields.optional_text("network")?;
    let description = fields.optional_text("description")?;
    let motd = fields.optional_text("motd")?;
    let nick_length = fields.optional_number::<u32>("nicklength")?;
    let max_targets = fields.optional_number::<u32>("max_targets")?;
    let max_channels = fields.optional_number::<u32>("max_channels")?;

    let server = acc.server_mut();
    if !info.is_empty() {
        server.info = info.join("\n");
    }
    if let Some(name) = name {
        server.name = name.to_string();
    }
    if let Some(network) = network {
        server.network = network.to_string();
    }
    if let Some(description) = description {
        server.description = description.to_string();
    }
    if let Some(motd) = motd {
        server.motd = motd.to_string();
    }
    if let Some(n) = nick_length {
        server.nick_length = n;
    }
    if let Some(n) = max_targets {
        server.max_targets = n;
    }
    if let Some(n) = max_channels {
        server.max_channels = n;
    }

    for unknown in node.names().filter(|name| !CONFIG_FIELDS.contains(name)) {
        tracing::debug!(
            target: VERBOSE_TARGET,
            file = %file.display(),
            field = unknown,
            "Ignoring unknown config field"
        );
    }

    tracing::info!(target: VERBOSE_TARGET, file = %file.display(), "Loaded config block");
    Ok(())
}

const CONFIG_FIELDS: &[&str] = &[
    "port",
    "admin",
    "info",
    "name",
    "network",
    "description",
    "motd",
    "nicklength",
    "max_targets",
    "max_channels",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::document;

    fn parse_str(text: &str) -> RawNode {
        document::parse_str(Path::new("t.xml"), text).unwrap()
    }

    fn first<'a>(node: &'a RawNode, name: &str) -> &'a Value {
        &node.field(name).values()[0]
    }

    #[test]
    fn test_number_rules() {
        let node = RawNode::empty();
        let fields = FieldReader::new(Path::new("t.xml"), "config", &node);

        assert_eq!(fields.number::<u32>("nicklength", "30").unwrap(), 30);
        for bad in ["", "abc", "0", "-1", "+5", "1.5", "12a"] {
            assert!(
                matches!(
                    fields.number::<u32>("nicklength", bad),
                    Err(ConfigError::InvalidNumber { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
        assert!(fields.number::<u16>("port", "70000").is_err());
        assert_eq!(fields.number::<u16>("port", "65535").unwrap(), 65535);
    }

    #[test]
    fn test_operator_subfield_repeated() {
        let doc = parse_str(
            "<ircd><operator><username>a</username><username>b</username>\
             <password>p</password></operator></ircd>",
        );
        let mut acc = Accumulator::new();
        let err = apply_operator(Path::new("t.xml"), first(&doc, "operator"), &mut acc).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RepeatedField { element: "operator", field: "username", .. }
        ));
    }

    #[test]
    fn test_operator_requires_non_empty_password() {
        let doc = parse_str("<ircd><operator username=\"a\" password=\"\"/></ircd>");
        let mut acc = Accumulator::new();
        let err = apply_operator(Path::new("t.xml"), first(&doc, "operator"), &mut acc).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "password", .. }));
    }

    #[test]
    fn test_block_given_as_text() {
        let doc = parse_str("<ircd><auth>*@*</auth></ircd>");
        let mut acc = Accumulator::new();
        let err = apply_auth(Path::new("t.xml"), first(&doc, "auth"), &mut acc).unwrap_err();
        assert!(matches!(err, ConfigError::ExpectedBlock { element: "auth", .. }));
    }

    #[test]
    fn test_nested_block_where_text_expected() {
        let doc = parse_str("<ircd><config><name><x>1</x></name></config></ircd>");
        let mut acc = Accumulator::new();
        let err = apply_config(Path::new("t.xml"), first(&doc, "config"), &mut acc).unwrap_err();
        assert!(matches!(err, ConfigError::ExpectedText { field: "name", .. }));
    }

    #[test]
    fn test_empty_operserv_block_uses_defaults() {
        let doc = parse_str("<ircd><operserv/></ircd>");
        let mut acc = Accumulator::new();
        apply_operserv(Path::new("t.xml"), first(&doc, "operserv"), &mut acc).unwrap();
        assert_eq!(acc.operserv(), Some(&OperServSettings::default()));
    }

    #[test]
    fn test_operserv_subfield_repeated() {
        let doc = parse_str("<ircd><operserv><nick>a</nick><nick>b</nick></operserv></ircd>");
        let mut acc = Accumulator::new();
        let err = apply_operserv(Path::new("t.xml"), first(&doc, "operserv"), &mut acc).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RepeatedField { element: "operserv", field: "nick", .. }
        ));
        assert!(acc.operserv().is_none());
    }

    #[test]
    fn test_booleans_are_not_trimmed() {
        let doc = parse_str("<ircd><operserv><use> 1 </use></operserv></ircd>");
        let mut acc = Accumulator::new();
        let err = apply_operserv(Path::new("t.xml"), first(&doc, "operserv"), &mut acc).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBoolean { field: "use", ref value, .. } if value == " 1 "
        ));

        let doc = parse_str("<ircd><auth><mask>*@*</mask><no_tilde>\n0\n</no_tilde></auth></ircd>");
        let err = apply_auth(Path::new("t.xml"), first(&doc, "auth"), &mut acc).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBoolean { field: "no_tilde", ref value, .. } if value == "\n0\n"
        ));
    }

    #[test]
    fn test_other_scalars_are_trimmed() {
        let doc = parse_str(
            "<ircd><config>\n<name>\n  irc.example.net\n</name><port> 7000 </port>\n</config></ircd>",
        );
        let mut acc = Accumulator::new();
        apply_config(Path::new("t.xml"), first(&doc, "config"), &mut acc).unwrap();
        assert_eq!(acc.server_mut().name, "irc.example.net");
    }
}
