//! Module dedicated to the sendmail transport.
//!
//! Delivers messages by piping them to a sendmail-compatible
//! command.

pub mod config;

use async_trait::async_trait;
use tracing::info;

use crate::{message::Message, transport::Transport, Error, Result};

#[doc(inline)]
pub use self::config::{SendmailConfig, SENDMAIL_DEFAULT_COMMAND};

/// The sendmail transport.
///
/// The rendered message keeps its Bcc header, so commands reading
/// their recipients from the headers can deliver blind copies.
#[derive(Clone, Debug, Default)]
pub struct Sendmail {
    /// The sendmail configuration.
    pub config: SendmailConfig,
}

impl Sendmail {
    pub fn new(config: SendmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Transport for Sendmail {
    async fn send(&self, msg: &Message) -> Result<()> {
        info!("sending email via sendmail command");

        let raw = msg.render_with_bcc()?;

        self.config
            .cmd()
            .run_with(&raw)
            .await
            .map_err(Error::RunSendmailCommandError)?;

        Ok(())
    }
}
