//! Module dedicated to the email message model.
//!
//! The core concept of this module is the [`Message`] structure,
//! which collects everything needed to render a complete MIME
//! message: sender, recipients, subject, body, priority, optional
//! headers and attachments.

pub mod attachment;
pub mod priority;

use std::collections::HashSet;

use mail_builder::{
    headers::{address::Address as MimeAddress, content_type::ContentType, raw::Raw, text::Text},
    mime::MimePart,
    MessageBuilder,
};
use serde::{Deserialize, Serialize};

use crate::{
    address::{Address, Recipients},
    Error, Result,
};

#[doc(inline)]
pub use self::{attachment::Attachment, priority::Priority};

/// The charset declared for text bodies when none is configured.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// The email message.
///
/// Recipient setters validate their whole input before mutating the
/// message: either every address of a call is registered or none of
/// them is. The message can be rendered to MIME bytes at any moment,
/// and serialized as-is into a send job for deferred delivery.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Message {
    /// The sender address.
    pub from: Option<Address>,

    /// The address replies should be directed to.
    pub reply_to: Option<Address>,

    /// The To recipients, in registration order.
    pub to: Vec<Address>,

    /// The Cc recipients, in registration order.
    pub cc: Vec<Address>,

    /// The Bcc recipients, in registration order.
    pub bcc: Vec<Address>,

    /// The subject, stored with the prefix already applied.
    pub subject: String,

    /// The prefix prepended by the subject setter.
    pub subject_prefix: Option<String>,

    /// The plain text body.
    pub body: String,

    /// The charset declared for the text body.
    pub charset: Option<String>,

    /// The message priority.
    pub priority: Priority,

    /// The Organization header value.
    pub organization: Option<String>,

    /// Whether a read receipt is requested.
    pub receipt: bool,

    /// The attachments, in registration order.
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender address.
    pub fn from(&mut self, addr: impl AsRef<str>) -> Result<&mut Self> {
        self.from = Some(Address::parse(addr)?);
        Ok(self)
    }

    /// Sets the reply-to address.
    pub fn reply_to(&mut self, addr: impl AsRef<str>) -> Result<&mut Self> {
        self.reply_to = Some(Address::parse(addr)?);
        Ok(self)
    }

    /// Appends recipients to the To list.
    pub fn to(&mut self, rcpts: impl Into<Recipients>) -> Result<&mut Self> {
        let addrs = rcpts.into().parse()?;
        self.to.extend(addrs);
        Ok(self)
    }

    /// Appends recipients to the Cc list.
    pub fn cc(&mut self, rcpts: impl Into<Recipients>) -> Result<&mut Self> {
        let addrs = rcpts.into().parse()?;
        self.cc.extend(addrs);
        Ok(self)
    }

    /// Appends recipients to the Bcc list.
    pub fn bcc(&mut self, rcpts: impl Into<Recipients>) -> Result<&mut Self> {
        let addrs = rcpts.into().parse()?;
        self.bcc.extend(addrs);
        Ok(self)
    }

    /// Clears recipient lists and attachments, so the same message
    /// can be reused across several sends.
    pub fn reset_recipients(&mut self) -> &mut Self {
        self.to.clear();
        self.cc.clear();
        self.bcc.clear();
        self.attachments.clear();
        self
    }

    /// Sets the subject, prepending the configured prefix and a
    /// single space when a prefix is set.
    pub fn subject(&mut self, subject: impl AsRef<str>) -> &mut Self {
        self.subject = match &self.subject_prefix {
            Some(prefix) => format!("{prefix} {}", subject.as_ref()),
            None => subject.as_ref().to_owned(),
        };
        self
    }

    /// Sets the plain text body.
    pub fn body(&mut self, body: impl ToString) -> &mut Self {
        self.body = body.to_string();
        self
    }

    /// Sets the plain text body together with its declared charset.
    ///
    /// The charset is declarative only: contents are written to the
    /// wire as-is.
    pub fn body_with_charset(&mut self, body: impl ToString, charset: impl ToString) -> &mut Self {
        self.body = body.to_string();
        self.charset = Some(charset.to_string());
        self
    }

    /// Sets the message priority.
    pub fn priority(&mut self, priority: impl Into<Priority>) -> &mut Self {
        self.priority = priority.into();
        self
    }

    /// Sets the Organization header, unless the given value is blank.
    pub fn organization(&mut self, organization: impl AsRef<str>) -> &mut Self {
        let organization = organization.as_ref().trim();
        if !organization.is_empty() {
            self.organization = Some(organization.to_owned());
        }
        self
    }

    /// Requests a read receipt.
    ///
    /// At render time the `Disposition-Notification-To` header points
    /// at the reply-to address when set, at the sender otherwise.
    pub fn request_receipt(&mut self) -> &mut Self {
        self.receipt = true;
        self
    }

    /// Appends an attachment.
    pub fn attach(&mut self, attachment: Attachment) -> &mut Self {
        self.attachments.push(attachment);
        self
    }

    /// Returns all recipients (To, Cc then Bcc), deduplicated by
    /// email address.
    pub fn recipients(&self) -> Vec<Address> {
        let mut seen = HashSet::new();
        let mut addrs = Vec::new();

        for addr in self.to.iter().chain(&self.cc).chain(&self.bcc) {
            if seen.insert(addr.addr.clone()) {
                addrs.push(addr.clone());
            }
        }

        addrs
    }

    /// Renders the whole message as MIME bytes.
    ///
    /// The Bcc header is omitted, which makes the output suitable for
    /// SMTP data as well as for previews.
    pub fn render(&self) -> Result<Vec<u8>> {
        self.render_mime(false)
    }

    /// Renders the whole message as MIME bytes, Bcc header included.
    ///
    /// Sendmail-compatible commands reading their recipients from the
    /// headers need the Bcc header to deliver blind copies.
    pub fn render_with_bcc(&self) -> Result<Vec<u8>> {
        self.render_mime(true)
    }

    fn render_mime(&self, with_bcc: bool) -> Result<Vec<u8>> {
        let mut builder = MessageBuilder::new();

        if let Some(from) = &self.from {
            builder = builder.from(from);
        }

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to);
        }

        if !self.to.is_empty() {
            builder = builder.to(mime_addresses(&self.to));
        }

        if !self.cc.is_empty() {
            builder = builder.cc(mime_addresses(&self.cc));
        }

        if with_bcc && !self.bcc.is_empty() {
            builder = builder.bcc(mime_addresses(&self.bcc));
        }

        builder = builder.subject(self.subject.clone());
        builder = builder.header("X-Priority", Raw::new(self.priority.level().to_string()));

        if let Some(organization) = &self.organization {
            builder = builder.header("Organization", Text::new(organization.clone()));
        }

        if self.receipt {
            if let Some(addr) = self.reply_to.as_ref().or(self.from.as_ref()) {
                builder = builder.header("Disposition-Notification-To", MimeAddress::from(addr));
            }
        }

        let text = self.text_part();

        if self.attachments.is_empty() {
            builder = builder.body(text);
        } else {
            let mut parts = vec![text];
            parts.extend(self.attachments.iter().map(attachment_part));
            builder = builder.body(MimePart::new("multipart/mixed", parts));
        }

        builder.write_to_vec().map_err(Error::WriteMessageError)
    }

    fn text_part(&self) -> MimePart<'static> {
        let charset = self.charset.as_deref().unwrap_or(DEFAULT_CHARSET);
        let ctype = ContentType::new("text/plain").attribute("charset", charset.to_owned());
        MimePart::new(ctype, self.body.clone())
    }
}

fn mime_addresses(addrs: &[Address]) -> Vec<MimeAddress<'static>> {
    addrs.iter().map(Into::into).collect()
}

fn attachment_part(attachment: &Attachment) -> MimePart<'static> {
    let ctype = ContentType::new(attachment.content_type.clone())
        .attribute("name", attachment.filename.clone());
    MimePart::new(ctype, attachment.contents.clone()).attachment(attachment.filename.clone())
}

#[cfg(test)]
mod tests {
    use mail_parser::MessageParser;

    use super::{Attachment, Message};

    #[test]
    fn prepend_subject_prefix() {
        let mut msg = Message::new();
        msg.subject_prefix = Some("[Notif]".into());
        msg.subject("hello");
        assert_eq!("[Notif] hello", msg.subject);

        let mut msg = Message::new();
        msg.subject("hello");
        assert_eq!("hello", msg.subject);
    }

    #[test]
    fn register_recipients_all_or_nothing() {
        let mut msg = Message::new();

        let res = msg.to(["a@b.com", "bad"]);
        assert!(res.is_err());
        assert!(msg.to.is_empty());

        msg.to("a@b.com, c@d.com").unwrap();
        assert_eq!(2, msg.to.len());
    }

    #[test]
    fn collect_recipients_deduplicated() {
        let mut msg = Message::new();
        msg.to("a@b.com, c@d.com").unwrap();
        msg.cc("c@d.com, e@f.com").unwrap();
        msg.bcc("a@b.com").unwrap();

        let rcpts = msg.recipients();
        let addrs: Vec<_> = rcpts.iter().map(|a| a.addr.as_str()).collect();
        assert_eq!(vec!["a@b.com", "c@d.com", "e@f.com"], addrs);
    }

    #[test]
    fn reset_recipients_and_attachments() {
        let mut msg = Message::new();
        msg.to("a@b.com").unwrap();
        msg.cc("c@d.com").unwrap();
        msg.attach(Attachment::new("note.txt", "text/plain", *b"hi"));

        msg.reset_recipients();

        assert!(msg.to.is_empty());
        assert!(msg.cc.is_empty());
        assert!(msg.bcc.is_empty());
        assert!(msg.attachments.is_empty());
    }

    #[test]
    fn render_headers() {
        let mut msg = Message::new();
        msg.from("Alice <alice@localhost>").unwrap();
        msg.reply_to("replies@localhost").unwrap();
        msg.to("bob@localhost").unwrap();
        msg.cc("carol@localhost").unwrap();
        msg.subject("hello");
        msg.body("Hello, world!");
        msg.priority(1);
        msg.organization("ACME");
        msg.request_receipt();

        let raw = msg.render().unwrap();
        let rendered = String::from_utf8_lossy(&raw);

        assert!(rendered.contains("alice@localhost"));
        assert!(rendered.contains("bob@localhost"));
        assert!(rendered.contains("carol@localhost"));
        assert!(rendered.contains("Subject: hello"));
        assert!(rendered.contains("X-Priority: 1"));
        assert!(rendered.contains("Organization: ACME"));
        assert!(rendered.contains("Disposition-Notification-To:"));
        assert!(rendered.contains("replies@localhost"));

        let parsed = MessageParser::new().parse(&raw).unwrap();
        assert_eq!(Some("hello"), parsed.subject());
        assert_eq!(Some("Hello, world!"), parsed.body_text(0).as_deref());
    }

    #[test]
    fn render_receipt_fallback_to_sender() {
        let mut msg = Message::new();
        msg.from("alice@localhost").unwrap();
        msg.to("bob@localhost").unwrap();
        msg.request_receipt();

        let raw = msg.render().unwrap();
        let rendered = String::from_utf8_lossy(&raw);

        assert!(rendered.contains("Disposition-Notification-To:"));
    }

    #[test]
    fn render_default_priority() {
        let mut msg = Message::new();
        msg.from("alice@localhost").unwrap();
        msg.to("bob@localhost").unwrap();

        let raw = msg.render().unwrap();
        let rendered = String::from_utf8_lossy(&raw);

        assert!(rendered.contains("X-Priority: 3"));
    }

    #[test]
    fn render_bcc_on_demand_only() {
        let mut msg = Message::new();
        msg.from("alice@localhost").unwrap();
        msg.to("bob@localhost").unwrap();
        msg.bcc("hidden@localhost").unwrap();

        let rendered = String::from_utf8_lossy(&msg.render().unwrap()).to_string();
        assert!(!rendered.contains("hidden@localhost"));

        let rendered = String::from_utf8_lossy(&msg.render_with_bcc().unwrap()).to_string();
        assert!(rendered.contains("Bcc:"));
        assert!(rendered.contains("hidden@localhost"));
    }

    #[test]
    fn render_declared_charset() {
        let mut msg = Message::new();
        msg.from("alice@localhost").unwrap();
        msg.to("bob@localhost").unwrap();
        msg.body_with_charset("hola", "iso-8859-1");

        let raw = msg.render().unwrap();
        let rendered = String::from_utf8_lossy(&raw);

        assert!(rendered.contains("iso-8859-1"));
    }

    #[test]
    fn render_attachments_as_multipart() {
        let mut msg = Message::new();
        msg.from("alice@localhost").unwrap();
        msg.to("bob@localhost").unwrap();
        msg.body("see attached");
        msg.attach(Attachment::new("note.txt", "text/plain", *b"hi"));

        let raw = msg.render().unwrap();
        let rendered = String::from_utf8_lossy(&raw);

        assert!(rendered.contains("multipart/mixed"));
        assert!(rendered.contains("Content-Disposition: attachment"));
        assert!(rendered.contains("note.txt"));
    }
}
