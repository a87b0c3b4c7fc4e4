//! Fixed demo records, used to seed development databases and as fixtures in
//! tests.

use carbon_persistence_contracts::contact::ContactSubmissionRepository;
use uuid::{uuid, Uuid};

pub mod contact;

/// An id which is not used by any demo record.
pub const UUID1: Uuid = uuid!("eb1cd87a-4475-4d68-a2c2-0216bdaac8f7");

pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    contact_submission: impl ContactSubmissionRepository<Txn>,
) -> anyhow::Result<()> {
    contact::create(txn, contact_submission).await
}
