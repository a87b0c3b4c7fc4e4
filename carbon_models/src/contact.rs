use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    email_address::EmailAddress,
    macros::id,
    SearchTerm,
};

pub mod form;

pub static CONTACT_FULL_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s\-']+$").unwrap());

pub const CONTACT_FULL_NAME_MIN_LEN: usize = 2;
pub const CONTACT_FULL_NAME_MAX_LEN: usize = 100;
pub const CONTACT_INQUIRY_MESSAGE_MAX_LEN: usize = 2000;
pub const CONTACT_INTERESTS_MAX: usize = 5;

id!(ContactSubmissionId);

/// A persisted contact form submission. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub id: ContactSubmissionId,
    pub full_name: ContactFullName,
    pub email: EmailAddress,
    pub interests: ContactInterests,
    pub inquiry_message: ContactInquiryMessage,
    pub created_at: DateTime<Utc>,
}

/// A validated and normalized contact form which has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactSubmission {
    pub full_name: ContactFullName,
    pub email: EmailAddress,
    pub interests: ContactInterests,
    pub inquiry_message: ContactInquiryMessage,
}

impl NewContactSubmission {
    pub fn into_submission(
        self,
        id: ContactSubmissionId,
        created_at: DateTime<Utc>,
    ) -> ContactSubmission {
        let Self {
            full_name,
            email,
            interests,
            inquiry_message,
        } = self;

        ContactSubmission {
            id,
            full_name,
            email,
            interests,
            inquiry_message,
            created_at,
        }
    }
}

#[nutype(
    sanitize(trim),
    validate(
        len_char_min = 2,
        len_char_max = 100,
        regex = CONTACT_FULL_NAME_REGEX
    ),
    derive(Debug, Clone, PartialEq, Eq, Hash, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct ContactFullName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_max = 2000),
    derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Default, TryFrom, Serialize, Deserialize),
    default = ""
)]
pub struct ContactInquiryMessage(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContactInterest {
    #[serde(rename = "Offset Emissions")]
    OffsetEmissions,
    #[serde(rename = "Explore Partnership")]
    ExplorePartnership,
    #[serde(rename = "Support Farmers")]
    SupportFarmers,
    #[serde(rename = "Join as a Volunteer")]
    JoinAsVolunteer,
    #[serde(rename = "Other")]
    Other,
}

impl ContactInterest {
    pub const ALL: [Self; 5] = [
        Self::OffsetEmissions,
        Self::ExplorePartnership,
        Self::SupportFarmers,
        Self::JoinAsVolunteer,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OffsetEmissions => "Offset Emissions",
            Self::ExplorePartnership => "Explore Partnership",
            Self::SupportFarmers => "Support Farmers",
            Self::JoinAsVolunteer => "Join as a Volunteer",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ContactInterest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid interest option.")]
pub struct InvalidContactInterestError(pub String);

impl FromStr for ContactInterest {
    type Err = InvalidContactInterestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interest| interest.as_str() == s)
            .ok_or_else(|| InvalidContactInterestError(s.into()))
    }
}

#[nutype(
    validate(predicate = |x| !x.is_empty() && x.len() <= 5),
    derive(Debug, Clone, PartialEq, Eq, Hash, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct ContactInterests(Vec<ContactInterest>);

/// Case-insensitive substring filters for listing submissions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactSubmissionFilter {
    pub name: Option<SearchTerm>,
    pub email: Option<SearchTerm>,
}
