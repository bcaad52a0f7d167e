pub mod bookings;
pub mod memory;
pub mod traits;

pub use bookings::*;
pub use memory::*;
pub use traits::*;
