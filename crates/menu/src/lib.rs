//! Normalization pipeline for a school cafeteria's weekly menu feed.
//!
//! The upstream provider publishes one loosely structured JSON document per
//! school week. This crate fetches it, caches it, and turns it into an
//! ordered date-to-meal-buckets mapping, with closure detection and
//! business-day arithmetic for the offset views the web layer serves.

pub mod cache;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod model;
pub mod parse;
pub mod service;

pub use error::MenuError;
pub use fetch::MenuFetcher;
pub use model::{DayMenu, Meal, MealSet, WeekMenu, NO_DATA_TEXT};
pub use service::MenuService;
