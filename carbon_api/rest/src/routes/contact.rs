use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use carbon_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use carbon_models::contact::form::{ContactForm, ContactFormErrors};
use serde_json::Value;

use crate::{
    errors::{error, internal_server_error},
    models::contact::{ApiContactFilter, ApiContactSubmission, ApiContactSubmitted},
};

pub const SUBMITTED_MESSAGE: &str =
    "Your inquiry has been submitted successfully. We will get back to you soon!";
pub const INVALID_MESSAGE: &str = "Please correct the errors below.";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contacts/", routing::get(list))
        .route("/submit-contact/", routing::post(submit))
        .with_state(service)
}

async fn list(
    service: State<Arc<impl ContactFeatureService>>,
    Query(filter): Query<ApiContactFilter>,
) -> Response {
    match service.list(filter.into()).await {
        Ok(submissions) => Json(
            submissions
                .into_iter()
                .map(ApiContactSubmission::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn submit(service: State<Arc<impl ContactFeatureService>>, body: Bytes) -> Response {
    let form = match parse_form(&body) {
        Ok(form) => form,
        Err(errors) => return error(StatusCode::BAD_REQUEST, INVALID_MESSAGE, Some(errors)),
    };

    match service.submit(form).await {
        Ok(submission) => (
            StatusCode::CREATED,
            Json(ApiContactSubmitted {
                success: true,
                message: SUBMITTED_MESSAGE,
                data: submission.into(),
            }),
        )
            .into_response(),
        Err(ContactSubmitError::Invalid(errors)) => {
            error(StatusCode::BAD_REQUEST, INVALID_MESSAGE, Some(errors))
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

/// Parses the request body into a form. An empty body is an empty form.
fn parse_form(body: &[u8]) -> Result<ContactForm, ContactFormErrors> {
    if body.trim_ascii().is_empty() {
        return Ok(ContactForm::default());
    }

    match serde_json::from_slice(body) {
        Ok(Value::Object(object)) => Ok(ContactForm::from_json(object)),
        Ok(other) => Err(ContactFormErrors::non_field(format!(
            "Invalid data. Expected a dictionary, but got {}.",
            json_type_name(&other)
        ))),
        Err(err) => Err(ContactFormErrors::non_field(format!(
            "JSON parse error - {err}"
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(x) if x.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
