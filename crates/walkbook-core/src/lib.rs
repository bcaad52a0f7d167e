//! Shared models and booking rules for walkbook.

pub mod ids;
pub mod model;
pub mod time;
pub mod validate;

pub use ids::*;
pub use model::*;
pub use time::*;
pub use validate::*;
