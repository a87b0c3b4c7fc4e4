use anyhow::{ensure, Context};
use carbon_config::Config;
use carbon_email_contracts::{ContentType, Email, EmailService};
use carbon_models::email_address::EmailAddressWithName;
use clap::Subcommand;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email to `recipient`
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_config = config
        .email
        .as_ref()
        .context("No smtp server configured, add an [email] section to the config")?;
    let email_service = email::connect(email_config)?;

    let ok = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Smtp server did not accept the test email");
    println!("Test email has been sent");

    Ok(())
}
