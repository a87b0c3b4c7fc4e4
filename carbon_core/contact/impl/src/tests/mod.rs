use carbon_core_contact_contracts::{
    notification::MockContactNotificationService, submission::MockContactSubmissionService,
};
use carbon_models::contact::{form::ContactForm, ContactSubmission, NewContactSubmission};
use carbon_persistence_contracts::{
    contact::MockContactSubmissionRepository, MockDatabase, MockTransaction,
};
use serde_json::json;

use crate::ContactFeatureServiceImpl;

mod list;

type Sut = ContactFeatureServiceImpl<
    MockDatabase,
    MockContactSubmissionService<MockTransaction>,
    MockContactNotificationService,
    MockContactSubmissionRepository<MockTransaction>,
>;

/// A valid form whose normalized content equals the given submission.
fn form_for(submission: &ContactSubmission) -> ContactForm {
    ContactForm {
        full_name: Some(json!(format!("  {}  ", *submission.full_name))),
        email: Some(json!(submission.email.as_str().to_uppercase())),
        interests: Some(json!(submission.interests)),
        inquiry_message: Some(json!(*submission.inquiry_message)),
    }
}

fn new_submission(submission: &ContactSubmission) -> NewContactSubmission {
    NewContactSubmission {
        full_name: submission.full_name.clone(),
        email: submission.email.clone(),
        interests: submission.interests.clone(),
        inquiry_message: submission.inquiry_message.clone(),
    }
}
