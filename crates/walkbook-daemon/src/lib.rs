#![forbid(unsafe_code)]

//! walkbook daemon: HTTP surface over the booking store.

pub mod config;
pub mod http;
