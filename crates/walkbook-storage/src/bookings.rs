//! Accept and list flow: validator in front of an [`OrderStore`].

use thiserror::Error;
use tracing::{error, info, warn};
use walkbook_core::{validate_walk_time, FormatError, NewOrder, Order, WalkTimeError};

use crate::traits::{OrderStore, QueryError};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] WalkTimeError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl BookingError {
    /// Stable tag for logs and API bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::Validation(_) => "validation",
            BookingError::Format(_) => "format",
            BookingError::Storage(_) => "storage",
        }
    }
}

impl From<QueryError> for BookingError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Format(e) => BookingError::Format(e),
            QueryError::Storage(e) => BookingError::Storage(e),
        }
    }
}

pub struct Bookings<S> {
    store: S,
}

impl<S: OrderStore> Bookings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates the walk time and persists the order. Rejected candidates are never stored.
    pub fn accept(&self, candidate: NewOrder) -> Result<Order, BookingError> {
        if let Err(e) = validate_walk_time(&candidate.walk_time) {
            warn!(walk_time = %candidate.walk_time, reason = %e, "order rejected");
            return Err(e.into());
        }

        let order = self.store.insert(candidate).map_err(|e| {
            error!(error = ?e, "order insert failed");
            BookingError::Storage(e)
        })?;
        info!(order_id = %order.id, walk_time = %order.walk_time, apartment = order.apartment_number, "order booked");
        Ok(order)
    }

    pub fn list_for_day(&self, day: &str) -> Result<Vec<Order>, BookingError> {
        match self.store.query_by_day(day) {
            Ok(orders) => {
                info!(day, count = orders.len(), "orders listed");
                Ok(orders)
            }
            Err(QueryError::Format(e)) => {
                warn!(day, reason = %e, "bad day");
                Err(e.into())
            }
            Err(QueryError::Storage(e)) => {
                error!(day, error = ?e, "order query failed");
                Err(BookingError::Storage(e))
            }
        }
    }
}
