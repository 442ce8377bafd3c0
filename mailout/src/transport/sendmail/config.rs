//! Module dedicated to the sendmail transport configuration.

use once_cell::sync::Lazy;
use process::Command;
use serde::{Deserialize, Serialize};

/// The command used when none is configured.
pub static SENDMAIL_DEFAULT_COMMAND: Lazy<Command> =
    Lazy::new(|| Command::new("/usr/bin/sendmail"));

/// The sendmail transport configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SendmailConfig {
    /// The sendmail command.
    pub cmd: Option<Command>,
}

impl SendmailConfig {
    pub fn cmd(&self) -> &Command {
        self.cmd.as_ref().unwrap_or(&*SENDMAIL_DEFAULT_COMMAND)
    }
}
