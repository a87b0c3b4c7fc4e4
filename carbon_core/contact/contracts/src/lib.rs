use std::future::Future;

use carbon_models::contact::{
    form::{ContactForm, ContactFormErrors},
    ContactSubmission, ContactSubmissionFilter,
};
use thiserror::Error;

pub mod notification;
pub mod submission;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Returns all contact submissions matching the filter, newest first.
    fn list(
        &self,
        filter: ContactSubmissionFilter,
    ) -> impl Future<Output = anyhow::Result<Vec<ContactSubmission>>> + Send;

    /// Validates and stores a contact form, then notifies the administrator.
    ///
    /// A failed notification is logged but does not fail the submission.
    fn submit(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<ContactSubmission, ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("The contact form is invalid.")]
    Invalid(ContactFormErrors),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_list(
        mut self,
        filter: ContactSubmissionFilter,
        result: anyhow::Result<Vec<ContactSubmission>>,
    ) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::eq(filter))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_submit(
        mut self,
        form: ContactForm,
        result: Result<ContactSubmission, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
