use carbon_demo::{
    contact::{ALL_SUBMISSIONS, ANNE, BOB, HANNES, JANE},
    UUID1,
};
use carbon_models::{
    contact::{ContactInterest, ContactSubmission, ContactSubmissionFilter},
    SearchTerm,
};
use carbon_persistence_contracts::{
    contact::{ContactSubmissionRepoError, ContactSubmissionRepository},
    Database, Transaction,
};
use carbon_persistence_postgres::contact::PostgresContactSubmissionRepository;
use carbon_utils::assert_matches;
use chrono::DateTime;
use pretty_assertions::assert_eq;

use crate::common::setup;

const REPO: PostgresContactSubmissionRepository = PostgresContactSubmissionRepository;

fn term(s: &str) -> Option<SearchTerm> {
    Some(SearchTerm::try_new(s).unwrap())
}

fn owned(submissions: &[&ContactSubmission]) -> Vec<ContactSubmission> {
    submissions.iter().copied().cloned().collect()
}

#[tokio::test]
async fn list_newest_first() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO
        .list(&mut txn, &ContactSubmissionFilter::default())
        .await
        .unwrap();

    assert_eq!(result, owned(&ALL_SUBMISSIONS));
}

#[tokio::test]
async fn list_by_name_is_case_insensitive_substring() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let filter = ContactSubmissionFilter {
        name: term("anne"),
        email: None,
    };
    let result = REPO.list(&mut txn, &filter).await.unwrap();

    assert_eq!(result, owned(&[&ANNE, &HANNES]));
}

#[tokio::test]
async fn list_by_email() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let filter = ContactSubmissionFilter {
        name: None,
        email: term("EXAMPLE.ORG"),
    };
    let result = REPO.list(&mut txn, &filter).await.unwrap();

    assert_eq!(result, owned(&[&ANNE, &HANNES]));
}

#[tokio::test]
async fn list_by_name_and_email() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let filter = ContactSubmissionFilter {
        name: term("anne"),
        email: term("biochar"),
    };
    let result = REPO.list(&mut txn, &filter).await.unwrap();

    assert_eq!(result, owned(&[&HANNES]));
}

#[tokio::test]
async fn list_no_match() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let filter = ContactSubmissionFilter {
        name: term("zoe"),
        email: None,
    };
    let result = REPO.list(&mut txn, &filter).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn filter_is_not_a_pattern() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let filter = ContactSubmissionFilter {
        name: term("%"),
        email: None,
    };
    let result = REPO.list(&mut txn, &filter).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn create() {
    let db = setup().await;

    let submission = ContactSubmission {
        id: UUID1.into(),
        full_name: "Max Mustermann".to_owned().try_into().unwrap(),
        email: "max@example.de".parse().unwrap(),
        interests: vec![ContactInterest::Other, ContactInterest::SupportFarmers]
            .try_into()
            .unwrap(),
        inquiry_message: Default::default(),
        created_at: DateTime::from_timestamp(1730000000, 0).unwrap(),
    };

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.create(&mut txn, &submission).await.unwrap();
    txn.commit().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO
        .list(&mut txn, &ContactSubmissionFilter::default())
        .await
        .unwrap();

    let mut expected = owned(&ALL_SUBMISSIONS);
    expected.insert(0, submission);
    assert_eq!(result, expected);
}

#[tokio::test]
async fn create_conflict() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let submission = ContactSubmission {
        created_at: BOB.created_at + chrono::Duration::seconds(1),
        ..JANE.clone()
    };
    let result = REPO.create(&mut txn, &submission).await;

    assert_matches!(result, Err(ContactSubmissionRepoError::Conflict));
}

#[tokio::test]
async fn rollback_discards_submission() {
    let db = setup().await;

    let submission = ContactSubmission {
        id: UUID1.into(),
        ..JANE.clone()
    };

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.create(&mut txn, &submission).await.unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO
        .list(&mut txn, &ContactSubmissionFilter::default())
        .await
        .unwrap();
    assert_eq!(result, owned(&ALL_SUBMISSIONS));
}
