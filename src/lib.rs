//! Delivery Tracking Core Library.
//! Handles delivery progress projection and hub-assignment validation tasks.

#[macro_use]
extern crate log;

pub mod types {
    pub mod geo;
    pub mod order;
    pub mod progress;
}

pub mod utils {
    pub mod distance;
    pub mod estimate;
    pub mod haversine;
    pub mod projection;
    pub mod tracker_state;
}

pub use types::geo;
pub use types::order;
pub use types::progress;
pub use utils::distance;
pub use utils::estimate;
pub use utils::haversine;
pub use utils::projection;
pub use utils::tracker_state;
