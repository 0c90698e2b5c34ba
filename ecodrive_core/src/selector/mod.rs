pub mod grouping;
pub mod week;
mod trip_selector;

pub use trip_selector::*;
