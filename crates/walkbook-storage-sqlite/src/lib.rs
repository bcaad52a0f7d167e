//! SQLite-backed [`walkbook_storage::OrderStore`].

mod storage;

pub use storage::*;
