//! Instance and solution text formats.
//!
//! - [`parse_instance`] / [`render_solution`] — contest format (city
//!   count header, `x y` lines; two-line solution rendering)
//! - [`tsplib`] — TSPLIB EUC_2D writer and reader

mod instance;
pub mod tsplib;

pub use instance::{parse_instance, render_solution};
