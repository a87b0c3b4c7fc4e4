use std::future::Future;

use carbon_models::contact::ContactSubmission;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactNotificationService: Send + Sync + 'static {
    /// Emails the administrator about a new submission.
    ///
    /// Returns `Ok(false)` if notifications are disabled.
    fn notify(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactNotificationService {
    pub fn with_notify(mut self, submission: ContactSubmission, result: bool) -> Self {
        self.expect_notify()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_notify_error(mut self, submission: ContactSubmission, error: anyhow::Error) -> Self {
        self.expect_notify()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Err(error))));
        self
    }
}
