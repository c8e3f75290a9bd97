pub mod allocation;
pub mod booking;
pub mod transitions;
pub mod counter;
pub mod store;
pub mod clinic;

pub use allocation::*;
pub use booking::*;
pub use transitions::*;
pub use counter::*;
pub use store::*;
pub use clinic::*;
