//! Domain layer - core planning logic and entities

pub mod price;
pub mod estimate;
pub mod itinerary;
pub mod alerts;
pub mod split;
pub mod budget;
