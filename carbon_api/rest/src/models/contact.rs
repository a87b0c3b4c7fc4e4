use carbon_models::{
    contact::{ContactInterest, ContactSubmission, ContactSubmissionFilter},
    SearchTerm,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiContactSubmission {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub interests: Vec<ContactInterest>,
    pub inquiry_message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactSubmission> for ApiContactSubmission {
    fn from(value: ContactSubmission) -> Self {
        Self {
            id: *value.id,
            full_name: value.full_name.into_inner(),
            email: value.email.as_str().into(),
            interests: value.interests.into_inner(),
            inquiry_message: value.inquiry_message.into_inner(),
            created_at: value.created_at,
        }
    }
}

/// Query parameters of the list endpoint. Empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactFilter {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<ApiContactFilter> for ContactSubmissionFilter {
    fn from(value: ApiContactFilter) -> Self {
        let term = |x: Option<String>| x.and_then(|x| SearchTerm::try_new(x).ok());
        Self {
            name: term(value.name),
            email: term(value.email),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactSubmitted {
    pub success: bool,
    pub message: &'static str,
    pub data: ApiContactSubmission,
}
