use anyhow::{anyhow, Context};
use carbon_email_contracts::{ContentType, Email, EmailService};
use carbon_models::email_address::EmailAddressWithName;
use carbon_utils::{trace_instrument, Apply};
use lettre::{
    message::{header, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    /// Creates the smtp transport. No connection is opened until the first
    /// email is sent or [`EmailService::ping`] is called.
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Failed to parse smtp url")?
            .build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .context("Failed to build email message")
    }
}

impl EmailService for EmailServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .context("Failed to send email")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await
            .context("Failed to connect to smtp server")?
            .then_some(())
            .ok_or_else(|| anyhow!("Smtp server rejected the connection test"))
    }
}
