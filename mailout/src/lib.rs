#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Rust library to compose and send emails.
//!
//! The main purpose of this library is to help applications send
//! notification emails without caring about MIME internals nor about
//! how the host delivers mail.
//!
//! The entry point is the [`Mailer`]: it composes [`Message`]s with
//! the sender identity, subject prefix and charset taken from the
//! [`MailerConfig`], then delivers them through the configured
//! transport. Two transports are available, behind cargo features of
//! the same name:
//!
//! - `smtp`: delivers to a SMTP server using [`mail-send`], with
//!   optional SSL/TLS or STARTTLS encryption and password
//!   authentication;
//! - `sendmail`: pipes the message to a local sendmail-compatible
//!   command using [`process-lib`].
//!
//! Sends can also be deferred: when the [`MailerConfig`] enables
//! `defer`, messages are snapshotted into [`SendJob`]s and submitted
//! to the [`EventQueue`] collaborator instead of being delivered.
//! The queue manager replays them later via [`Mailer::replay`].
//!
//! [`mail-send`]: https://docs.rs/mail-send/latest/mail_send/
//! [`process-lib`]: https://docs.rs/process-lib/latest/process/

pub mod address;
pub mod config;
mod error;
pub mod mailer;
pub mod message;
pub mod queue;
pub mod transport;

#[doc(inline)]
pub use self::{
    address::{Address, Recipients},
    config::MailerConfig,
    error::{Error, Result},
    mailer::Mailer,
    message::{Attachment, Message, Priority},
    queue::{EventQueue, SendJob},
    transport::{Transport, TransportBuilder, TransportConfig},
};
