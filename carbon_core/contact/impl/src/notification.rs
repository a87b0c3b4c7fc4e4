use std::sync::Arc;

use anyhow::anyhow;
use carbon_core_contact_contracts::notification::ContactNotificationService;
use carbon_di::Build;
use carbon_email_contracts::{ContentType, Email, EmailService};
use carbon_models::{contact::ContactSubmission, email_address::EmailAddress};
use carbon_utils::trace_instrument;
use tracing::debug;

/// Sends the administrator a plain text email for each new submission.
///
/// Notifications are disabled if either no email service is available or no
/// recipient is configured.
#[derive(Debug, Clone, Build, Default)]
pub struct ContactNotificationServiceImpl<Email> {
    email: Option<Email>,
    config: ContactNotificationConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ContactNotificationConfig {
    pub recipient: Option<Arc<EmailAddress>>,
}

impl<EmailS> ContactNotificationService for ContactNotificationServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    #[trace_instrument(skip(self))]
    async fn notify(&self, submission: &ContactSubmission) -> anyhow::Result<bool> {
        let (Some(email), Some(recipient)) = (&self.email, &self.config.recipient) else {
            debug!("contact notifications are disabled");
            return Ok(false);
        };

        let message = Email {
            recipient: (**recipient).clone().into(),
            subject: format!("New Contact Form Submission from {}", *submission.full_name),
            body: format_body(submission),
            content_type: ContentType::Text,
            reply_to: Some(submission.email.clone().into()),
        };

        if !email.send(message).await? {
            return Err(anyhow!("Smtp server did not accept the notification email"));
        }

        Ok(true)
    }
}

fn format_body(submission: &ContactSubmission) -> String {
    let interests = submission
        .interests
        .iter()
        .map(|x| x.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "New contact form submission received:\n\nName: {}\nEmail: {}\nInterests: \
         {interests}\n\nMessage:\n{}\n\nSubmitted at: {}\n",
        *submission.full_name, submission.email, *submission.inquiry_message, submission.created_at
    )
}
