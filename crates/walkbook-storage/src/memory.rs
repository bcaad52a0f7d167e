use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use walkbook_core::{DayRange, NewOrder, Order, OrderId};

use crate::traits::OrderStore;

/// In-memory storage for tests and throwaway daemons. Not durable.
#[derive(Default)]
pub struct InMemoryOrderStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    orders: BTreeMap<OrderId, Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("in-memory order store lock poisoned"))
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&self, candidate: NewOrder) -> anyhow::Result<Order> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let order = Order::from_new(OrderId(inner.last_id), candidate);
        inner.orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn query_range(&self, range: &DayRange) -> anyhow::Result<Vec<Order>> {
        let inner = self.lock()?;
        let mut out: Vec<Order> = inner
            .orders
            .values()
            .filter(|o| range.contains(&o.walk_time))
            .cloned()
            .collect();
        out.sort_by_key(|o| (o.walk_time, o.id));
        Ok(out)
    }
}
