//! Module dedicated to the SMTP transport.
//!
//! Delivers messages through an SMTP session managed by
//! [`mail_send`].

pub mod config;

use async_trait::async_trait;
use mail_send::{
    smtp::message::{Address as SmtpAddress, IntoMessage, Message as SmtpMessage},
    SmtpClientBuilder,
};
use tokio::{net::TcpStream, sync::Mutex};
use tokio_rustls::client::TlsStream;
use tracing::{debug, info};

use crate::{message::Message, transport::Transport, Error, Result};

#[doc(inline)]
pub use self::config::{PasswordConfig, SmtpAuthConfig, SmtpConfig, SmtpEncryptionKind};

/// The SMTP transport client.
///
/// The session is established at build time and kept behind a mutex,
/// so the same client can deliver messages from multiple tasks.
pub struct SmtpClient {
    /// The SMTP configuration.
    pub config: SmtpConfig,

    client: Mutex<SmtpClientStream>,
}

impl SmtpClient {
    /// Connects to the configured SMTP server.
    pub async fn new(config: SmtpConfig) -> Result<Self> {
        info!(host = config.host, port = config.port, "connecting to smtp server");

        let mut client_builder = SmtpClientBuilder::new(config.host.clone(), config.port)
            .implicit_tls(!config.is_start_tls_encryption_enabled());

        if let Some(credentials) = config.credentials().await? {
            client_builder = client_builder.credentials(credentials);
        }

        if let Some(timeout) = config.timeout() {
            client_builder = client_builder.timeout(timeout);
        }

        if config.insecure() {
            debug!("accepting invalid tls certificates");
            client_builder = client_builder.allow_invalid_certs();
        }

        let client = if config.is_encryption_enabled() {
            build_tls_client(&client_builder).await?
        } else {
            build_tcp_client(&client_builder).await?
        };

        Ok(Self {
            config,
            client: Mutex::new(client),
        })
    }
}

#[async_trait]
impl Transport for SmtpClient {
    async fn send(&self, msg: &Message) -> Result<()> {
        info!("sending email over smtp");

        let smtp_msg = into_smtp_msg(msg)?;

        let mut client = self.client.lock().await;
        client
            .send(smtp_msg)
            .await
            .map_err(Error::SendSmtpMessageError)?;

        Ok(())
    }
}

pub enum SmtpClientStream {
    Tcp(mail_send::SmtpClient<TcpStream>),
    Tls(mail_send::SmtpClient<TlsStream<TcpStream>>),
}

impl SmtpClientStream {
    pub async fn send(&mut self, msg: impl IntoMessage<'_>) -> mail_send::Result<()> {
        match self {
            Self::Tcp(client) => client.send(msg).await,
            Self::Tls(client) => client.send(msg).await,
        }
    }
}

async fn build_tcp_client(
    client_builder: &SmtpClientBuilder<String>,
) -> Result<SmtpClientStream> {
    match client_builder.connect_plain().await {
        Ok(client) => Ok(SmtpClientStream::Tcp(client)),
        Err(err) => Err(Error::ConnectTcpError(err)),
    }
}

async fn build_tls_client(
    client_builder: &SmtpClientBuilder<String>,
) -> Result<SmtpClientStream> {
    match client_builder.connect().await {
        Ok(client) => Ok(SmtpClientStream::Tls(client)),
        Err(err) => Err(Error::ConnectTlsError(err)),
    }
}

/// Derives the SMTP envelope from the typed message: MAIL FROM from
/// the sender, RCPT TO from all recipients deduplicated, DATA from
/// the rendered MIME bytes (without the Bcc header).
fn into_smtp_msg(msg: &Message) -> Result<SmtpMessage<'static>> {
    let from = msg
        .from
        .as_ref()
        .ok_or(Error::SendMessageMissingSenderError)?;

    let rcpts = msg.recipients();

    if rcpts.is_empty() {
        return Err(Error::SendMessageMissingRecipientError);
    }

    let body = msg.render()?;

    Ok(SmtpMessage {
        mail_from: from.addr.clone().into(),
        rcpt_to: rcpts
            .into_iter()
            .map(|addr| SmtpAddress {
                email: addr.addr.into(),
                ..Default::default()
            })
            .collect(),
        body: body.into(),
    })
}
