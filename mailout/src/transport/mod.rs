//! Module dedicated to message transports.
//!
//! A transport takes a composed [`Message`] and delivers it. The
//! configured transport is built on demand by the
//! [`TransportBuilder`], behind the [`Transport`] trait.

#[cfg(feature = "sendmail")]
pub mod sendmail;
#[cfg(feature = "smtp")]
pub mod smtp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{message::Message, Error, Result};

#[cfg(feature = "sendmail")]
use self::sendmail::{config::SendmailConfig, Sendmail};
#[cfg(feature = "smtp")]
use self::smtp::{config::SmtpConfig, SmtpClient};

/// The message transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers the given message.
    async fn send(&self, msg: &Message) -> Result<()>;
}

/// The transport configuration.
///
/// Defaults to the local sendmail command.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportConfig {
    /// No transport: messages can only be composed or queued.
    None,

    /// The SMTP transport configuration.
    #[cfg(feature = "smtp")]
    Smtp(SmtpConfig),

    /// The sendmail transport configuration.
    #[cfg(feature = "sendmail")]
    Sendmail(SendmailConfig),
}

#[cfg(feature = "sendmail")]
impl Default for TransportConfig {
    fn default() -> Self {
        Self::Sendmail(SendmailConfig::default())
    }
}

#[cfg(not(feature = "sendmail"))]
impl Default for TransportConfig {
    fn default() -> Self {
        Self::None
    }
}

/// The transport builder.
///
/// Turns a [`TransportConfig`] into a ready-to-use transport.
#[derive(Clone, Debug, Default)]
pub struct TransportBuilder {
    config: TransportConfig,
}

impl TransportBuilder {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Builds the configured transport.
    ///
    /// The SMTP transport connects to its server at this moment.
    pub async fn build(&self) -> Result<Box<dyn Transport>> {
        match &self.config {
            TransportConfig::None => Err(Error::BuildUndefinedTransportError),
            #[cfg(feature = "smtp")]
            TransportConfig::Smtp(config) => Ok(Box::new(SmtpClient::new(config.clone()).await?)),
            #[cfg(feature = "sendmail")]
            TransportConfig::Sendmail(config) => Ok(Box::new(Sendmail::new(config.clone()))),
        }
    }
}
