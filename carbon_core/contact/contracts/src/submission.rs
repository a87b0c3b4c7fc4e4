use std::future::Future;

use carbon_models::contact::{ContactSubmission, NewContactSubmission};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactSubmissionService<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Assigns an id and creation timestamp to a validated submission and
    /// stores it.
    fn create(
        &self,
        txn: &mut Txn,
        submission: NewContactSubmission,
    ) -> impl Future<Output = anyhow::Result<ContactSubmission>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactSubmissionService<Txn> {
    pub fn with_create(
        mut self,
        submission: NewContactSubmission,
        result: ContactSubmission,
    ) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(submission),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
