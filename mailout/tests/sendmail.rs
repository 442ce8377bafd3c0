#![cfg(feature = "sendmail")]

use mail_parser::MessageParser;
use mailout::{
    transport::{sendmail::SendmailConfig, TransportConfig},
    Error, Mailer, MailerConfig,
};
use process::Command;
use tempfile::NamedTempFile;
use tokio::test;

fn mailer(cmd: Command) -> Mailer {
    Mailer::new(MailerConfig {
        sender: Some("alice@localhost".into()),
        sender_name: Some("Alice".into()),
        subject_prefix: Some("[notif]".into()),
        transport: TransportConfig::Sendmail(SendmailConfig { cmd: Some(cmd) }),
        ..Default::default()
    })
}

#[test_log::test(test)]
async fn deliver_via_sendmail_command() {
    let file = NamedTempFile::new().unwrap();
    let mailer = mailer(Command::new(format!("cat > {}", file.path().display())));

    let mut msg = mailer.compose();
    msg.to("bob@localhost").unwrap();
    msg.bcc("hidden@localhost").unwrap();
    msg.subject("Plain message!").body("Plain message!");

    mailer.send(&msg).await.unwrap();

    // checking that the command received the full rendered message

    let raw = std::fs::read(file.path()).unwrap();
    let rendered = String::from_utf8_lossy(&raw);

    assert!(rendered.contains("alice@localhost"));
    assert!(rendered.contains("bob@localhost"));
    assert!(rendered.contains("Subject: [notif] Plain message!"));
    assert!(rendered.contains("X-Priority: 3"));

    // checking that the Bcc header reached the command, since
    // sendmail-compatible commands read recipients from the headers

    assert!(rendered.contains("Bcc:"));
    assert!(rendered.contains("hidden@localhost"));

    let parsed = MessageParser::new().parse(&raw).unwrap();
    assert_eq!(Some("[notif] Plain message!"), parsed.subject());
    assert_eq!(Some("Plain message!"), parsed.body_text(0).as_deref());
}

#[test_log::test(test)]
async fn deliver_separate_copies_via_sendmail_command() {
    let file = NamedTempFile::new().unwrap();
    let mailer = mailer(Command::new(format!("cat >> {}", file.path().display())));

    let mut msg = mailer.compose();
    msg.to("bob@localhost").unwrap();
    msg.cc("carol@localhost").unwrap();
    msg.subject("Plain message!").body("Plain message!");

    mailer
        .send_separately_to(&msg, "dave@localhost, bob@localhost")
        .await
        .unwrap();

    // checking that the command received one single-recipient copy
    // per deduplicated recipient, given list first

    let raw = std::fs::read(file.path()).unwrap();
    let rendered = String::from_utf8_lossy(&raw);

    assert_eq!(2, rendered.matches("Subject: [notif] Plain message!").count());
    assert_eq!(2, rendered.matches("To:").count());
    assert!(!rendered.contains("Cc:"));

    let dave = rendered.find("dave@localhost").unwrap();
    let bob = rendered.find("bob@localhost").unwrap();
    assert!(dave < bob);
}

#[test_log::test(test)]
async fn report_failed_sendmail_command() {
    let mailer = mailer(Command::new("false"));

    let mut msg = mailer.compose();
    msg.to("bob@localhost").unwrap();
    msg.subject("Plain message!").body("Plain message!");

    let res = mailer.send(&msg).await;
    assert!(matches!(res, Err(Error::RunSendmailCommandError(_))));
}
