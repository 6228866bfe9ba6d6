//! Core data types: cities and tours.

pub mod point;
pub mod tour;

pub use point::Point;
pub use tour::Tour;
