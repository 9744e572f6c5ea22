//! Utility helpers.

pub mod paginator;

pub use paginator::{Paginator, paginate};
