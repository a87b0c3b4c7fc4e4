use carbon_core_contact_contracts::ContactFeatureService;
use carbon_demo::contact::{ALL_SUBMISSIONS, ANNE, HANNES};
use carbon_models::{contact::ContactSubmissionFilter, SearchTerm};
use carbon_persistence_contracts::{contact::MockContactSubmissionRepository, MockDatabase};
use pretty_assertions::assert_eq;

use crate::{tests::Sut, ContactFeatureServiceImpl};

#[tokio::test]
async fn ok() {
    // Arrange
    let expected = ALL_SUBMISSIONS.iter().copied().cloned().collect::<Vec<_>>();

    let db = MockDatabase::build(false);
    let contact_submission_repo = MockContactSubmissionRepository::new()
        .with_list(ContactSubmissionFilter::default(), expected.clone());

    let sut = ContactFeatureServiceImpl {
        db,
        contact_submission_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.list(ContactSubmissionFilter::default()).await;

    // Assert
    assert_eq!(result.unwrap(), expected);
}

#[tokio::test]
async fn filtered() {
    // Arrange
    let filter = ContactSubmissionFilter {
        name: Some(SearchTerm::try_new("anne").unwrap()),
        email: None,
    };
    let expected = vec![ANNE.clone(), HANNES.clone()];

    let db = MockDatabase::build(false);
    let contact_submission_repo =
        MockContactSubmissionRepository::new().with_list(filter.clone(), expected.clone());

    let sut = ContactFeatureServiceImpl {
        db,
        contact_submission_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.list(filter).await;

    // Assert
    assert_eq!(result.unwrap(), expected);
}
