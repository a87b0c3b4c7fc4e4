use std::future::Future;

use carbon_models::contact::{ContactSubmission, ContactSubmissionFilter};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactSubmissionRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Returns all submissions matching the filter, newest first.
    fn list(
        &self,
        txn: &mut Txn,
        filter: &ContactSubmissionFilter,
    ) -> impl Future<Output = anyhow::Result<Vec<ContactSubmission>>> + Send;

    /// Stores a new submission.
    fn create(
        &self,
        txn: &mut Txn,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSubmissionRepoError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmissionRepoError {
    #[error("A contact submission with the same id already exists.")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactSubmissionRepository<Txn> {
    pub fn with_list(
        mut self,
        filter: ContactSubmissionFilter,
        result: Vec<ContactSubmission>,
    ) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(filter))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_create(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactSubmissionRepoError>,
    ) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(submission),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
