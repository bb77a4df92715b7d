//! Send a test message through the configured Zoho account
//!
//! Run with: cargo run -p zomail-mailer --example send_test -- recipient@example.com

use zomail_mailer::{Email, Mailer, ZohoMailer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let recipient = match std::env::args().nth(1) {
        Some(recipient) => recipient,
        None => {
            eprintln!("usage: send_test <recipient>");
            std::process::exit(2);
        }
    };

    println!("Building mailer from ZOHO_* environment...");
    let mailer = ZohoMailer::from_env()?;

    let email = Email::builder()
        .to(&recipient)
        .subject("Zomail test message")
        .text("Hello from the Zomail example sender.")
        .build()?;

    println!("Sending to {recipient}...");
    mailer.send(&email).await?;
    println!("Sent.");

    Ok(())
}
