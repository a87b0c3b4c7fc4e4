use anyhow::Context;
use bb8_postgres::tokio_postgres::{self, types::ToSql, Row};
use carbon_di::Build;
use carbon_models::contact::{
    ContactFullName, ContactInquiryMessage, ContactInterest, ContactInterests, ContactSubmission,
    ContactSubmissionFilter,
};
use carbon_persistence_contracts::contact::{
    ContactSubmissionRepoError, ContactSubmissionRepository,
};
use carbon_utils::trace_instrument;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{arg_indices, columns, PostgresTransaction};

#[derive(Debug, Clone, Copy, Default, Build)]
pub struct PostgresContactSubmissionRepository;

columns!(submission as "c": "id", "full_name", "email", "interests", "inquiry_message", "created_at");

impl ContactSubmissionRepository<PostgresTransaction> for PostgresContactSubmissionRepository {
    #[trace_instrument(skip(self, txn))]
    async fn list(
        &self,
        txn: &mut PostgresTransaction,
        filter: &ContactSubmissionFilter,
    ) -> anyhow::Result<Vec<ContactSubmission>> {
        let mut query = format!("select {SUBMISSION_COLS} from contact_submissions c where true");
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

        let name = filter.name.as_ref().map(|x| x.as_str());
        let email = filter.email.as_ref().map(|x| x.as_str());

        if let Some(name) = &name {
            params.push(name);
            query.push_str(&format!(
                " and strpos(lower(c.full_name), lower(${})) > 0",
                params.len()
            ));
        }
        if let Some(email) = &email {
            params.push(email);
            query.push_str(&format!(
                " and strpos(lower(c.email), lower(${})) > 0",
                params.len()
            ));
        }

        query.push_str(" order by c.created_at desc, c.id");

        txn.txn()
            .query(&query, &params)
            .await
            .context("Failed to query contact submissions")?
            .iter()
            .map(decode_submission)
            .collect()
    }

    #[trace_instrument(skip(self, txn))]
    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        submission: &ContactSubmission,
    ) -> Result<(), ContactSubmissionRepoError> {
        let interests = submission
            .interests
            .iter()
            .map(|x| x.as_str())
            .collect::<Vec<_>>();

        txn.txn()
            .execute(
                &format!(
                    "insert into contact_submissions ({SUBMISSION_COL_NAMES}) values ({})",
                    arg_indices(1..=SUBMISSION_CNT)
                ),
                &[
                    &*submission.id,
                    &submission.full_name.as_str(),
                    &submission.email.as_str(),
                    &interests,
                    &submission.inquiry_message.as_str(),
                    &submission.created_at,
                ],
            )
            .await
            .map(|_| ())
            .map_err(map_submission_repo_error)
    }
}

fn decode_submission(row: &Row) -> anyhow::Result<ContactSubmission> {
    let interests = row
        .get::<_, Vec<String>>(3)
        .iter()
        .map(|x| x.parse::<ContactInterest>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ContactSubmission {
        id: row.get::<_, Uuid>(0).into(),
        full_name: ContactFullName::try_new(row.get::<_, String>(1))?,
        email: row.get::<_, String>(2).parse()?,
        interests: ContactInterests::try_new(interests)?,
        inquiry_message: ContactInquiryMessage::try_new(row.get::<_, String>(4))?,
        created_at: row.get::<_, DateTime<Utc>>(5),
    })
}

fn map_submission_repo_error(err: tokio_postgres::Error) -> ContactSubmissionRepoError {
    match err.as_db_error() {
        Some(db_err) if db_err.constraint() == Some("contact_submissions_pkey") => {
            ContactSubmissionRepoError::Conflict
        }
        _ => ContactSubmissionRepoError::Other(
            anyhow::Error::from(err).context("Failed to insert contact submission"),
        ),
    }
}
