//! Module dedicated to deferred message sending.
//!
//! When the mailer runs with `defer` enabled, [`Mailer::send`] does
//! not contact any transport. It snapshots the message and its
//! transport configuration into a [`SendJob`] and submits the job to
//! the [`EventQueue`] collaborator. The queue manager later hands the
//! job back to [`Mailer::replay`].
//!
//! [`Mailer::send`]: crate::mailer::Mailer::send
//! [`Mailer::replay`]: crate::mailer::Mailer::replay

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{message::Message, transport::TransportConfig, Result};

/// The name of the handler in charge of replaying queued jobs.
pub const SEND_JOB_HANDLER: &str = "mailout::send-queued";

/// The grouping key queued jobs are filed under.
pub const SEND_JOB_CONTEXT: &str = "mailout";

/// The deferred send job descriptor.
///
/// A self-contained snapshot: the message as composed at defer time
/// plus the transport configuration to replay it with. Replaying a
/// job never re-defers it, whatever the mailer configuration says by
/// then.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SendJob {
    /// The handler expected to pick the job up.
    pub handler: String,

    /// The grouping key of the job.
    pub context: String,

    /// The snapshot of the message to send.
    pub message: Message,

    /// The snapshot of the transport configuration to send with.
    pub transport: TransportConfig,

    /// The date the job was submitted at.
    pub submitted_at: DateTime<Utc>,
}

impl SendJob {
    pub fn new(message: Message, transport: TransportConfig) -> Self {
        Self {
            handler: SEND_JOB_HANDLER.to_owned(),
            context: SEND_JOB_CONTEXT.to_owned(),
            message,
            transport,
            submitted_at: Utc::now(),
        }
    }
}

/// The event queue collaborator.
///
/// The crate does not persist jobs itself: implementors are expected
/// to store the job and invoke [`Mailer::replay`] when it is due.
///
/// [`Mailer::replay`]: crate::mailer::Mailer::replay
#[async_trait]
pub trait EventQueue: Send + Sync {
    /// Submits the given job to the queue.
    async fn submit(&self, job: SendJob) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::{message::Message, transport::TransportConfig};

    use super::SendJob;

    #[test]
    fn snapshot_survives_serialization() {
        let mut msg = Message::default();
        msg.subject("Deferred")
            .body("See you later.")
            .priority(1)
            .request_receipt();
        msg.from("alice@doe.org").unwrap();
        msg.to("bob@doe.org, carol@doe.org").unwrap();

        let job = SendJob::new(msg, TransportConfig::default());

        let json = serde_json::to_string(&job).unwrap();
        let replayed: SendJob = serde_json::from_str(&json).unwrap();

        assert_eq!(job, replayed);
    }
}
