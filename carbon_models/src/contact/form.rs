//! Validation of raw contact form payloads.
//!
//! Every field is checked independently and all failures are collected, so a
//! caller can report the complete set of problems at once.

use std::{borrow::Cow, collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    ContactFullName, ContactInquiryMessage, ContactInterest, ContactInterests,
    NewContactSubmission, CONTACT_FULL_NAME_MAX_LEN, CONTACT_FULL_NAME_MIN_LEN,
    CONTACT_FULL_NAME_REGEX, CONTACT_INQUIRY_MESSAGE_MAX_LEN, CONTACT_INTERESTS_MAX,
};
use crate::email_address::EmailAddress;

pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

pub const CONTACT_EMAIL_MAX_LEN: usize = 254;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";

/// A contact form as received from a client.
///
/// `None` means the field was absent, `Some(Value::Null)` that it was
/// explicitly set to `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub full_name: Option<Value>,
    pub email: Option<Value>,
    pub interests: Option<Value>,
    pub inquiry_message: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ContactFormField {
    #[serde(rename = "full_name")]
    FullName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "interests")]
    Interests,
    #[serde(rename = "inquiry_message")]
    InquiryMessage,
    /// Errors which do not belong to a single field.
    #[serde(rename = "non_field_errors")]
    NonField,
}

/// Error messages grouped by the field they refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactFormErrors(BTreeMap<ContactFormField, Vec<String>>);

impl ContactFormErrors {
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(ContactFormField::NonField, message);
        errors
    }

    pub fn add(&mut self, field: ContactFormField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: ContactFormField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactFormField> + '_ {
        self.0.keys().copied()
    }

    fn collect<T>(&mut self, field: ContactFormField, result: Result<T, Vec<String>>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(messages) => {
                for message in messages {
                    self.add(field, message);
                }
                None
            }
        }
    }
}

impl ContactForm {
    /// Takes the known fields out of a JSON object. Unknown keys are ignored.
    pub fn from_json(mut object: Map<String, Value>) -> Self {
        Self {
            full_name: object.remove("full_name"),
            email: object.remove("email"),
            interests: object.remove("interests"),
            inquiry_message: object.remove("inquiry_message"),
        }
    }

    /// Checks and normalizes all fields of the form.
    pub fn validate(&self) -> Result<NewContactSubmission, ContactFormErrors> {
        let mut errors = ContactFormErrors::default();

        let full_name = errors.collect(
            ContactFormField::FullName,
            validate_full_name(self.full_name.as_ref()),
        );
        let email = errors.collect(ContactFormField::Email, validate_email(self.email.as_ref()));
        let interests = errors.collect(
            ContactFormField::Interests,
            validate_interests(self.interests.as_ref()),
        );
        let inquiry_message = errors.collect(
            ContactFormField::InquiryMessage,
            validate_inquiry_message(self.inquiry_message.as_ref()),
        );

        match (full_name, email, interests, inquiry_message) {
            (Some(full_name), Some(email), Some(interests), Some(inquiry_message)) => {
                Ok(NewContactSubmission {
                    full_name,
                    email,
                    interests,
                    inquiry_message,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Strings are trimmed and numbers are accepted in their JSON notation.
/// Booleans, lists and objects are not strings.
fn text(value: &Value) -> Result<Cow<'_, str>, Vec<String>> {
    match value {
        Value::String(value) => Ok(Cow::Borrowed(value.trim())),
        Value::Number(value) => Ok(Cow::Owned(value.to_string())),
        _ => Err(vec![NOT_A_STRING.into()]),
    }
}

fn required_str(value: Option<&Value>) -> Result<Cow<'_, str>, Vec<String>> {
    let value = match value {
        None => return Err(vec![REQUIRED.into()]),
        Some(Value::Null) => return Err(vec![NOT_NULL.into()]),
        Some(value) => text(value)?,
    };
    if value.is_empty() {
        return Err(vec![NOT_BLANK.into()]);
    }
    Ok(value)
}

fn validate_full_name(value: Option<&Value>) -> Result<ContactFullName, Vec<String>> {
    let value = required_str(value)?;
    let len = value.chars().count();

    if len > CONTACT_FULL_NAME_MAX_LEN {
        return Err(vec![format!(
            "Ensure this field has no more than {CONTACT_FULL_NAME_MAX_LEN} characters."
        )]);
    }
    if len < CONTACT_FULL_NAME_MIN_LEN {
        return Err(vec![format!(
            "Full name must be at least {CONTACT_FULL_NAME_MIN_LEN} characters long."
        )]);
    }
    if !CONTACT_FULL_NAME_REGEX.is_match(&value) {
        return Err(vec!["Full name contains invalid characters.".into()]);
    }

    ContactFullName::try_new(value).map_err(|err| vec![err.to_string()])
}

fn validate_email(value: Option<&Value>) -> Result<EmailAddress, Vec<String>> {
    const INVALID: &str = "Enter a valid email address.";

    let value = required_str(value)?;

    if value.chars().count() > CONTACT_EMAIL_MAX_LEN {
        return Err(vec![format!(
            "Ensure this field has no more than {CONTACT_EMAIL_MAX_LEN} characters."
        )]);
    }
    if value.parse::<EmailAddress>().is_err() {
        return Err(vec![INVALID.into()]);
    }
    if !CONTACT_EMAIL_REGEX.is_match(&value) {
        return Err(vec!["Email format is invalid.".into()]);
    }

    value
        .to_lowercase()
        .parse()
        .map_err(|_| vec![INVALID.into()])
}

fn validate_interests(value: Option<&Value>) -> Result<ContactInterests, Vec<String>> {
    let entries = match value {
        None => return Err(vec![REQUIRED.into()]),
        Some(Value::Null) => return Err(vec![NOT_NULL.into()]),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(vec!["Interests must be a list.".into()]),
    };

    if entries.is_empty() {
        return Err(vec!["At least one interest must be selected.".into()]);
    }
    if entries.len() > CONTACT_INTERESTS_MAX {
        return Err(vec![format!(
            "Maximum {CONTACT_INTERESTS_MAX} interests can be selected."
        )]);
    }

    let interests = entries
        .iter()
        .map(|entry| match entry {
            Value::String(entry) => entry.parse::<ContactInterest>(),
            other => other.to_string().parse::<ContactInterest>(),
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| vec![err.to_string()])?;

    ContactInterests::try_new(interests).map_err(|err| vec![err.to_string()])
}

fn validate_inquiry_message(value: Option<&Value>) -> Result<ContactInquiryMessage, Vec<String>> {
    let value = match value {
        None | Some(Value::Null) => return Ok(ContactInquiryMessage::default()),
        Some(value) => text(value)?,
    };

    if value.chars().count() > CONTACT_INQUIRY_MESSAGE_MAX_LEN {
        return Err(vec![format!(
            "Inquiry message cannot exceed {CONTACT_INQUIRY_MESSAGE_MAX_LEN} characters."
        )]);
    }

    ContactInquiryMessage::try_new(value).map_err(|err| vec![err.to_string()])
}

#[cfg(test)]
mod tests {
    use carbon_utils::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn form(value: Value) -> ContactForm {
        let Value::Object(object) = value else {
            panic!("expected a json object");
        };
        ContactForm::from_json(object)
    }

    fn valid() -> Value {
        json!({
            "full_name": "John Doe",
            "email": "john@example.com",
            "interests": ["Offset Emissions", "Explore Partnership"],
            "inquiry_message": "I'm interested in carbon offset programs...",
        })
    }

    fn with(field: &str, value: Value) -> ContactForm {
        let mut payload = valid();
        payload[field] = value;
        form(payload)
    }

    fn errors(form: ContactForm) -> ContactFormErrors {
        form.validate().unwrap_err()
    }

    #[test]
    fn ok() {
        // Act
        let result = form(valid()).validate().unwrap();

        // Assert
        assert_eq!(result.full_name.as_str(), "John Doe");
        assert_eq!(result.email.as_str(), "john@example.com");
        assert_eq!(
            *result.interests,
            [
                ContactInterest::OffsetEmissions,
                ContactInterest::ExplorePartnership
            ]
        );
        assert_eq!(
            result.inquiry_message.as_str(),
            "I'm interested in carbon offset programs..."
        );
    }

    #[test]
    fn full_name() {
        for (name, expected) in [
            ("Anne-Marie O'Brien", Ok("Anne-Marie O'Brien")),
            ("  Jane Smith  ", Ok("Jane Smith")),
            ("Al", Ok("Al")),
            (" A ", Err("Full name must be at least 2 characters long.")),
            ("John Doe 3rd", Err("Full name contains invalid characters.")),
            ("Jürgen", Err("Full name contains invalid characters.")),
            ("   ", Err("This field may not be blank.")),
        ] {
            let result = with("full_name", json!(name)).validate();
            match expected {
                Ok(expected) => assert_eq!(result.unwrap().full_name.as_str(), expected),
                Err(expected) => assert_eq!(
                    result.unwrap_err().get(ContactFormField::FullName),
                    [expected]
                ),
            }
        }
    }

    #[test]
    fn full_name_max_length() {
        let ok = "a".repeat(100);
        assert!(with("full_name", json!(ok)).validate().is_ok());

        let too_long = "a".repeat(101);
        assert_eq!(
            errors(with("full_name", json!(too_long))).get(ContactFormField::FullName),
            ["Ensure this field has no more than 100 characters."]
        );
    }

    #[test]
    fn email_is_lowercased() {
        let result = with("email", json!("JOHN@EXAMPLE.COM")).validate().unwrap();
        assert_eq!(result.email.as_str(), "john@example.com");
    }

    #[test]
    fn email_invalid() {
        for (email, expected) in [
            ("not-an-email", "Enter a valid email address."),
            ("john@", "Enter a valid email address."),
            ("john@example.c", "Email format is invalid."),
            ("john@example.c0m", "Email format is invalid."),
        ] {
            assert_eq!(
                errors(with("email", json!(email))).get(ContactFormField::Email),
                [expected],
                "{email}"
            );
        }
    }

    #[test]
    fn interests_invalid() {
        for (interests, expected) in [
            (json!([]), vec!["At least one interest must be selected."]),
            (
                json!(["Other", "Other", "Other", "Other", "Other", "Other"]),
                vec!["Maximum 5 interests can be selected."],
            ),
            (
                json!(["Other", "Plant Trees"]),
                vec!["'Plant Trees' is not a valid interest option."],
            ),
            (
                json!(["offset emissions", 42]),
                vec!["'offset emissions' is not a valid interest option."],
            ),
            (
                json!(["Other", 42]),
                vec!["'42' is not a valid interest option."],
            ),
            (json!("Other"), vec!["Interests must be a list."]),
            (json!(null), vec!["This field may not be null."]),
        ] {
            assert_eq!(
                errors(with("interests", interests.clone())).get(ContactFormField::Interests),
                expected,
                "{interests}"
            );
        }
    }

    #[test]
    fn interests_keep_order() {
        let result = with("interests", json!(["Other", "Support Farmers"]))
            .validate()
            .unwrap();
        assert_eq!(
            *result.interests,
            [ContactInterest::Other, ContactInterest::SupportFarmers]
        );
    }

    #[test]
    fn inquiry_message_length() {
        let ok = "x".repeat(2000);
        let result = with("inquiry_message", json!(ok)).validate().unwrap();
        assert_eq!(result.inquiry_message.len(), 2000);

        let padded = format!("  {}  ", "x".repeat(2000));
        assert!(with("inquiry_message", json!(padded)).validate().is_ok());

        let too_long = "x".repeat(2001);
        assert_eq!(
            errors(with("inquiry_message", json!(too_long))).get(ContactFormField::InquiryMessage),
            ["Inquiry message cannot exceed 2000 characters."]
        );
    }

    #[test]
    fn inquiry_message_optional() {
        let mut payload = valid();
        payload.as_object_mut().unwrap().remove("inquiry_message");
        let result = form(payload).validate().unwrap();
        assert_eq!(result.inquiry_message.as_str(), "");

        let result = with("inquiry_message", json!(null)).validate().unwrap();
        assert_eq!(result.inquiry_message.as_str(), "");

        let result = with("inquiry_message", json!("  hello  ")).validate().unwrap();
        assert_eq!(result.inquiry_message.as_str(), "hello");
    }

    #[test]
    fn numbers_are_text() {
        let result = with("inquiry_message", json!(42)).validate().unwrap();
        assert_eq!(result.inquiry_message.as_str(), "42");

        let result = with("inquiry_message", json!(2.5)).validate().unwrap();
        assert_eq!(result.inquiry_message.as_str(), "2.5");

        assert_eq!(
            errors(with("full_name", json!(42))).get(ContactFormField::FullName),
            ["Full name contains invalid characters."]
        );
        assert_eq!(
            errors(with("email", json!(42))).get(ContactFormField::Email),
            ["Enter a valid email address."]
        );
    }

    #[test]
    fn non_text_values() {
        for value in [json!(true), json!(["hello"]), json!({"text": "hello"})] {
            assert_eq!(
                errors(with("inquiry_message", value.clone())).get(ContactFormField::InquiryMessage),
                ["Not a valid string."],
                "{value}"
            );
            assert_eq!(
                errors(with("full_name", value.clone())).get(ContactFormField::FullName),
                ["Not a valid string."],
                "{value}"
            );
        }
    }

    #[test]
    fn all_errors_reported() {
        // Act
        let result = form(json!({
            "full_name": true,
            "interests": [],
            "inquiry_message": "x".repeat(2001),
        }))
        .validate();

        // Assert
        let errors = result.unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            [
                ContactFormField::FullName,
                ContactFormField::Email,
                ContactFormField::Interests,
                ContactFormField::InquiryMessage,
            ]
        );
        assert_eq!(errors.get(ContactFormField::FullName), ["Not a valid string."]);
        assert_eq!(errors.get(ContactFormField::Email), ["This field is required."]);
    }

    #[test]
    fn errors_serialize_by_field_name() {
        let errors = errors(with("interests", json!([])));
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"interests": ["At least one interest must be selected."]})
        );

        assert_eq!(
            serde_json::to_value(ContactFormErrors::non_field("Invalid data.")).unwrap(),
            json!({"non_field_errors": ["Invalid data."]})
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut payload = valid();
        payload["id"] = json!("c4dba95e-8498-40fb-8412-7faecaf94787");
        assert_matches!(form(payload).validate(), Ok(_));
    }
}
