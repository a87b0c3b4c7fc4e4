use carbon_di::Build;
use carbon_shared_contracts::{IdService, TimeService};
use carbon_utils::trace_instrument;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Build)]
pub struct IdServiceImpl;

impl IdService for IdServiceImpl {
    fn generate<I: From<Uuid> + 'static>(&self) -> I {
        let id = Uuid::new_v4();
        tracing::trace!(%id, "generated id");
        id.into()
    }
}

#[derive(Debug, Clone, Copy, Default, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_random_v4() {
        // Arrange
        let sut = IdServiceImpl;

        // Act
        let first = sut.generate::<Uuid>();
        let second = sut.generate::<Uuid>();

        // Assert
        assert_ne!(first, second);
        assert_eq!(first.get_version_num(), 4);
        assert_eq!(second.get_version_num(), 4);
    }

    #[test]
    fn time_does_not_go_backwards() {
        // Arrange
        let sut = TimeServiceImpl;

        // Act
        let first = sut.now();
        let second = sut.now();

        // Assert
        assert!(first <= second);
    }
}
