use mailout::{Mailer, MailerConfig};
use tokio::main;

#[test_log::test(main)]
async fn main() {
    let mailer = Mailer::new(MailerConfig {
        sender: Some("noreply@doe.org".into()),
        sender_name: Some("Doe notifications".into()),
        subject_prefix: Some("[doe]".into()),
        ..Default::default()
    });

    let mut msg = mailer.compose();
    msg.to("alice@doe.org, bob@doe.org").unwrap();
    msg.cc("carol@doe.org").unwrap();
    msg.subject("Weekly report").body("All green this week.");
    msg.priority(2).request_receipt();

    let mime = String::from_utf8(msg.render().unwrap()).unwrap();

    println!("================================");
    println!("COMPOSED MESSAGE");
    println!("================================");
    println!();
    println!("{msg:#?}");
    println!();

    println!("================================");
    println!("RENDERED MIME MESSAGE");
    println!("================================");
    println!();
    println!("{mime}");
}
