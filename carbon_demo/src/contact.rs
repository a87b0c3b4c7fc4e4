use std::sync::LazyLock;

use carbon_models::contact::{ContactInterest, ContactSubmission};
use carbon_persistence_contracts::contact::ContactSubmissionRepository;
use chrono::{DateTime, Utc};
use uuid::uuid;

/// All demo submissions, newest first.
pub static ALL_SUBMISSIONS: LazyLock<Vec<&ContactSubmission>> =
    LazyLock::new(|| vec![&ANNE, &HANNES, &BOB, &JANE]);

pub static JANE: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    id: uuid!("6f2b8f2e-0c55-4b8e-9a43-1f0f3d6a7c11").into(),
    full_name: "Jane Smith".to_owned().try_into().unwrap(),
    email: "jane.smith@example.com".parse().unwrap(),
    interests: vec![ContactInterest::OffsetEmissions].try_into().unwrap(),
    inquiry_message: Default::default(),
    created_at: timestamp(1714557600),
});

pub static BOB: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    id: uuid!("0b7de5a4-7e0f-4c38-8a6f-52f1b0e3d9a2").into(),
    full_name: "Bob Jones".to_owned().try_into().unwrap(),
    email: "bob@example.net".parse().unwrap(),
    interests: vec![ContactInterest::JoinAsVolunteer, ContactInterest::Other]
        .try_into()
        .unwrap(),
    inquiry_message: "Do you need helpers for the next harvest?"
        .to_owned()
        .try_into()
        .unwrap(),
    created_at: timestamp(1714644000),
});

pub static HANNES: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    id: uuid!("c4a1f7d3-3b2e-4f61-b0d5-8e9a7c6b5d40").into(),
    full_name: "Hannes Mueller".to_owned().try_into().unwrap(),
    email: "hannes@biochar.example.org".parse().unwrap(),
    interests: vec![ContactInterest::SupportFarmers].try_into().unwrap(),
    inquiry_message: "We run a cooperative of small farms.".to_owned().try_into().unwrap(),
    created_at: timestamp(1714730400),
});

pub static ANNE: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    id: uuid!("9d3e6b1a-5f4c-4a27-8c19-2e7b0a4f6d85").into(),
    full_name: "Anne-Marie O'Brien".to_owned().try_into().unwrap(),
    email: "anne.obrien@example.org".parse().unwrap(),
    interests: vec![
        ContactInterest::ExplorePartnership,
        ContactInterest::OffsetEmissions,
    ]
    .try_into()
    .unwrap(),
    inquiry_message: "Our company would like to offset its yearly emissions."
        .to_owned()
        .try_into()
        .unwrap(),
    created_at: timestamp(1714816800),
});

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    repo: impl ContactSubmissionRepository<Txn>,
) -> anyhow::Result<()> {
    for &submission in &*ALL_SUBMISSIONS {
        repo.create(txn, submission).await?;
    }
    Ok(())
}
