use thiserror::Error;
use walkbook_core::{DayRange, FormatError, NewOrder, Order};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub trait OrderStore: Send + Sync {
    /// Assigns a fresh id and persists the candidate. No business rules are checked here.
    fn insert(&self, candidate: NewOrder) -> anyhow::Result<Order>;

    /// Orders with `range.start <= walk_time <= range.end`, sorted by `(walk_time, id)`.
    fn query_range(&self, range: &DayRange) -> anyhow::Result<Vec<Order>>;

    fn query_by_day(&self, day: &str) -> Result<Vec<Order>, QueryError> {
        let range = DayRange::parse(day)?;
        Ok(self.query_range(&range)?)
    }
}

/// Lets callers pick a backend at runtime (`Box<dyn OrderStore>`).
impl<S: OrderStore + ?Sized> OrderStore for Box<S> {
    fn insert(&self, candidate: NewOrder) -> anyhow::Result<Order> {
        (**self).insert(candidate)
    }

    fn query_range(&self, range: &DayRange) -> anyhow::Result<Vec<Order>> {
        (**self).query_range(range)
    }
}
