use std::{io, path::PathBuf};

use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse email address {0:?}")]
    ParseAddressError(String),

    #[error("cannot read attachment at {1:?}")]
    ReadAttachmentError(#[source] io::Error, PathBuf),
    #[error("cannot build email")]
    WriteMessageError(#[source] io::Error),

    #[error("cannot read configuration file at {1:?}")]
    ReadConfigError(#[source] io::Error, PathBuf),
    #[error("cannot parse configuration file at {1:?}")]
    ParseConfigError(#[source] toml::de::Error, PathBuf),

    #[error("cannot send message without a sender")]
    SendMessageMissingSenderError,
    #[error("cannot send message without a recipient")]
    SendMessageMissingRecipientError,
    #[error("cannot send message separately: empty recipient list")]
    SendSeparatelyMissingRecipientError,
    #[error("cannot build undefined transport")]
    BuildUndefinedTransportError,

    #[cfg(feature = "smtp")]
    #[error("cannot get smtp password")]
    GetPasswdError(#[source] secret::Error),
    #[cfg(feature = "smtp")]
    #[error("cannot get smtp password: password is empty")]
    GetPasswdEmptyError,
    #[cfg(feature = "smtp")]
    #[error("cannot connect to smtp server using tcp")]
    ConnectTcpError(#[source] mail_send::Error),
    #[cfg(feature = "smtp")]
    #[error("cannot connect to smtp server using tls")]
    ConnectTlsError(#[source] mail_send::Error),
    #[cfg(feature = "smtp")]
    #[error("cannot send email over smtp")]
    SendSmtpMessageError(#[source] mail_send::Error),

    #[cfg(feature = "sendmail")]
    #[error("cannot run sendmail command")]
    RunSendmailCommandError(#[source] process::Error),

    #[error("cannot submit send job to the event queue")]
    SubmitSendJobError(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("cannot defer message send: no event queue configured")]
    DeferSendMissingQueueError,
}
