use anyhow::Context;
use carbon_config::EmailConfig;
use carbon_email_impl::EmailServiceImpl;

/// Creates the smtp client. The connection itself is opened lazily.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .context("Failed to create smtp client")
}
