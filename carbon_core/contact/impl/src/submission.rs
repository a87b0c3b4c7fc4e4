use anyhow::Context;
use carbon_core_contact_contracts::submission::ContactSubmissionService;
use carbon_di::Build;
use carbon_models::contact::{ContactSubmission, NewContactSubmission};
use carbon_persistence_contracts::contact::ContactSubmissionRepository;
use carbon_shared_contracts::{IdService, TimeService};
use carbon_utils::trace_instrument;

#[derive(Debug, Clone, Build, Default)]
pub struct ContactSubmissionServiceImpl<Id, Time, ContactSubmissionRepo> {
    id: Id,
    time: Time,
    contact_submission_repo: ContactSubmissionRepo,
}

impl<Txn, Id, Time, ContactSubmissionRepo> ContactSubmissionService<Txn>
    for ContactSubmissionServiceImpl<Id, Time, ContactSubmissionRepo>
where
    Txn: Send + Sync + 'static,
    Id: IdService,
    Time: TimeService,
    ContactSubmissionRepo: ContactSubmissionRepository<Txn>,
{
    #[trace_instrument(skip(self, txn))]
    async fn create(
        &self,
        txn: &mut Txn,
        submission: NewContactSubmission,
    ) -> anyhow::Result<ContactSubmission> {
        let submission = submission.into_submission(self.id.generate(), self.time.now());

        self.contact_submission_repo
            .create(txn, &submission)
            .await
            .context("Failed to create contact submission in database")?;

        Ok(submission)
    }
}
