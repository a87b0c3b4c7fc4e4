use anyhow::Context;
use carbon_core_contact_contracts::{
    notification::ContactNotificationService, submission::ContactSubmissionService,
    ContactFeatureService, ContactSubmitError,
};
use carbon_di::Build;
use carbon_models::contact::{form::ContactForm, ContactSubmission, ContactSubmissionFilter};
use carbon_persistence_contracts::{
    contact::ContactSubmissionRepository, Database, Transaction,
};
use carbon_utils::trace_instrument;
use tracing::error;

pub mod notification;
pub mod submission;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
#[cfg_attr(test, derive(Default))]
pub struct ContactFeatureServiceImpl<
    Db,
    ContactSubmission,
    ContactNotification,
    ContactSubmissionRepo,
> {
    db: Db,
    contact_submission: ContactSubmission,
    contact_notification: ContactNotification,
    contact_submission_repo: ContactSubmissionRepo,
}

impl<Db, ContactSubmissionS, ContactNotification, ContactSubmissionRepo> ContactFeatureService
    for ContactFeatureServiceImpl<Db, ContactSubmissionS, ContactNotification, ContactSubmissionRepo>
where
    Db: Database,
    ContactSubmissionS: ContactSubmissionService<Db::Transaction>,
    ContactNotification: ContactNotificationService,
    ContactSubmissionRepo: ContactSubmissionRepository<Db::Transaction>,
{
    #[trace_instrument(skip(self))]
    async fn list(
        &self,
        filter: ContactSubmissionFilter,
    ) -> anyhow::Result<Vec<ContactSubmission>> {
        let mut txn = self.db.begin_transaction().await?;

        self.contact_submission_repo
            .list(&mut txn, &filter)
            .await
            .context("Failed to get contact submissions from database")
    }

    #[trace_instrument(skip(self, form))]
    async fn submit(&self, form: ContactForm) -> Result<ContactSubmission, ContactSubmitError> {
        let new_submission = form.validate().map_err(ContactSubmitError::Invalid)?;

        let mut txn = self.db.begin_transaction().await?;

        let submission = self
            .contact_submission
            .create(&mut txn, new_submission)
            .await?;

        txn.commit().await?;

        if let Err(err) = self.contact_notification.notify(&submission).await {
            error!(
                submission_id = %*submission.id,
                "Failed to send contact notification email: {err:#}"
            );
        }

        Ok(submission)
    }
}
