//! Module dedicated to the mailer.
//!
//! The [`Mailer`] is the high-level entry point of this crate. It
//! composes messages with the configured identity, sends them through
//! the configured transport and, when `defer` is enabled, hands them
//! to the event queue instead.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    address::{Address, Recipients},
    config::MailerConfig,
    message::Message,
    queue::{EventQueue, SendJob},
    transport::TransportBuilder,
    Error, Result,
};

/// The mailer.
#[derive(Clone)]
pub struct Mailer {
    /// The mailer configuration.
    pub config: MailerConfig,

    queue: Option<Arc<dyn EventQueue>>,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            config,
            queue: None,
        }
    }

    /// Injects the event queue deferred sends are submitted to.
    pub fn with_queue(mut self, queue: impl EventQueue + 'static) -> Self {
        self.queue = Some(Arc::new(queue));
        self
    }

    /// Composes a new message with the configured identity.
    ///
    /// The returned message carries the configured sender, subject
    /// prefix and charset, and is ready to be filled then given to
    /// [`Mailer::send`].
    pub fn compose(&self) -> Message {
        let mut msg = Message::default();
        msg.from = self.sender_address();
        msg.subject_prefix = self.config.subject_prefix.clone();
        msg.charset = self.config.charset.clone();
        msg
    }

    fn sender_address(&self) -> Option<Address> {
        let sender = self.config.sender.as_ref()?;

        match Address::parse(sender) {
            Ok(mut addr) => {
                if addr.name.is_none() {
                    addr.name = self.config.sender_name.clone();
                }
                Some(addr)
            }
            Err(err) => {
                warn!("skipping invalid sender address from config");
                debug!("skipping invalid sender address from config: {err:?}");
                None
            }
        }
    }

    /// Sends the given message.
    ///
    /// The message needs a sender and at least one recipient. When
    /// the mailer is configured with `defer`, the message is
    /// submitted to the event queue instead of being delivered.
    pub async fn send(&self, msg: &Message) -> Result<()> {
        if msg.from.is_none() {
            return Err(Error::SendMessageMissingSenderError);
        }

        if msg.recipients().is_empty() {
            return Err(Error::SendMessageMissingRecipientError);
        }

        if self.config.defer {
            return self.defer(msg).await;
        }

        info!(subject = msg.subject, "sending message");

        let transport = TransportBuilder::new(self.config.transport.clone())
            .build()
            .await?;

        transport.send(msg).await
    }

    async fn defer(&self, msg: &Message) -> Result<()> {
        let queue = self
            .queue
            .as_ref()
            .ok_or(Error::DeferSendMissingQueueError)?;

        info!(subject = msg.subject, "deferring message send");

        let job = SendJob::new(msg.clone(), self.config.transport.clone());

        queue.submit(job).await
    }

    /// Sends a copy of the given message to every recipient, one
    /// message each.
    ///
    /// The given recipients are merged with the message's To ones,
    /// in that order, without duplicate. Each copy is addressed to a
    /// single recipient and carries no Cc nor Bcc. Sending stops at
    /// the first copy that fails.
    pub async fn send_separately_to(
        &self,
        msg: &Message,
        rcpts: impl Into<Recipients>,
    ) -> Result<()> {
        let rcpts = rcpts.into();

        if rcpts.is_empty() {
            return Err(Error::SendSeparatelyMissingRecipientError);
        }

        let mut all = Vec::<Address>::new();

        for addr in rcpts.parse()?.into_iter().chain(msg.to.iter().cloned()) {
            if !all.contains(&addr) {
                all.push(addr);
            }
        }

        info!(count = all.len(), "sending message separately");

        for rcpt in all {
            let mut copy = msg.clone();
            copy.to = vec![rcpt];
            copy.cc = Vec::new();
            copy.bcc = Vec::new();

            self.send(&copy).await?;
        }

        Ok(())
    }

    /// Replays the given deferred send job.
    ///
    /// This is the entry point queue managers are expected to call
    /// when a submitted job is due. The snapshotted message goes
    /// straight to the snapshotted transport: replaying never defers
    /// again.
    pub async fn replay(job: SendJob) -> Result<()> {
        info!(handler = job.handler, "replaying deferred send job");

        let transport = TransportBuilder::new(job.transport).build().await?;

        transport.send(&job.message).await
    }
}
