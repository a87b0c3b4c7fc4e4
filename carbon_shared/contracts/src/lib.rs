//! Small infrastructure services which are injected instead of being called
//! directly, so that tests can pin generated ids and timestamps.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait IdService: Send + Sync + 'static {
    /// Returns a fresh random (version 4) id.
    fn generate<I: From<Uuid> + 'static>(&self) -> I;
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockIdService {
    pub fn with_generate<I: From<Uuid> + Send + 'static>(mut self, id: I) -> Self {
        self.expect_generate::<I>().once().return_once(move || id);
        self
    }
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(now);
        self
    }
}
