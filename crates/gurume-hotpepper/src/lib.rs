//! Client for the Hot Pepper gourmet search API.

pub mod client;
pub mod error;
pub mod normalize;
pub mod params;
pub mod types;

pub use client::HotpepperClient;
pub use error::HotpepperError;
pub use params::AmenityMapping;
