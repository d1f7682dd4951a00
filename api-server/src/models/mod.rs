//! Request / response models

pub mod baseline;
pub mod prediction;

pub use baseline::*;
pub use prediction::*;
