pub mod fill;
pub mod market_data;
pub mod order;

pub use fill::Fill;
pub use market_data::{IntervalObservation, Venue, VenueQuote};
pub use order::OrderPlan;
