//! Module dedicated to the mailer configuration.
//!
//! The [`MailerConfig`] gathers the site-wide sending options: the
//! default sender identity, the subject prefix, the charset, the
//! defer switch and the transport to deliver with. It can be
//! deserialized from a TOML file with [`MailerConfig::from_file`].

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{transport::TransportConfig, Error, Result};

/// The mailer configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MailerConfig {
    /// The default sender address.
    ///
    /// Applied to composed messages that do not set their own sender.
    /// An invalid address is ignored with a warning.
    pub sender: Option<String>,

    /// The display name of the default sender.
    pub sender_name: Option<String>,

    /// The prefix prepended to message subjects.
    pub subject_prefix: Option<String>,

    /// The charset declared for message text bodies.
    pub charset: Option<String>,

    /// The defer switch.
    ///
    /// When enabled, [`Mailer::send`] submits messages to the event
    /// queue instead of delivering them.
    ///
    /// [`Mailer::send`]: crate::mailer::Mailer::send
    pub defer: bool,

    /// The transport configuration.
    pub transport: TransportConfig,
}

impl MailerConfig {
    /// Reads and parses the TOML configuration file at the given
    /// path.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!(path = %path.display(), "reading configuration file");

        let content =
            fs::read_to_string(&path).map_err(|err| Error::ReadConfigError(err, path.clone()))?;
        let config = toml::from_str(&content).map_err(|err| Error::ParseConfigError(err, path))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::MailerConfig;

    #[test]
    fn parse_empty_config() {
        let config: MailerConfig = toml::from_str("").unwrap();

        assert_eq!(config, MailerConfig::default());

        #[cfg(feature = "sendmail")]
        assert!(matches!(
            config.transport,
            crate::transport::TransportConfig::Sendmail(_)
        ));
    }

    #[cfg(feature = "sendmail")]
    #[test]
    fn parse_sendmail_config() {
        use concat_with::concat_line;
        use process::Command;

        use crate::transport::TransportConfig;

        let config: MailerConfig = toml::from_str(&concat_line!(
            "sender = \"noreply@doe.org\"",
            "sender-name = \"Doe notifications\"",
            "subject-prefix = \"[doe]\"",
            "",
            "[transport.sendmail]",
            "cmd = \"msmtp --read-recipients\"",
        ))
        .unwrap();

        assert_eq!(config.sender.as_deref(), Some("noreply@doe.org"));
        assert_eq!(config.sender_name.as_deref(), Some("Doe notifications"));
        assert_eq!(config.subject_prefix.as_deref(), Some("[doe]"));
        assert!(!config.defer);

        match config.transport {
            TransportConfig::Sendmail(config) => {
                assert_eq!(config.cmd(), &Command::new("msmtp --read-recipients"));
            }
            transport => panic!("unexpected transport {transport:?}"),
        }
    }

    #[cfg(feature = "smtp")]
    #[test]
    fn parse_smtp_config() {
        use std::time::Duration;

        use concat_with::concat_line;

        use crate::transport::TransportConfig;

        let config: MailerConfig = toml::from_str(&concat_line!(
            "sender = \"noreply@doe.org\"",
            "defer = true",
            "",
            "[transport.smtp]",
            "host = \"smtp.doe.org\"",
            "port = 465",
            "encryption = \"ssl\"",
            "login = \"noreply\"",
            "timeout = 30",
        ))
        .unwrap();

        assert!(config.defer);

        match config.transport {
            TransportConfig::Smtp(config) => {
                assert_eq!(config.host, "smtp.doe.org");
                assert_eq!(config.port, 465);
                assert!(config.is_encryption_enabled());
                assert!(!config.is_start_tls_encryption_enabled());
                assert_eq!(config.login, "noreply");
                assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
            }
            transport => panic!("unexpected transport {transport:?}"),
        }
    }
}
