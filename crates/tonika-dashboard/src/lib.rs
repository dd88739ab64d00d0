//! # Tonika Dashboard
//!
//! Client side of the sentiment service: an API client, the explicit
//! per-session dashboard state, and the data behind each chart
//! (distribution, monthly counts, top words) and the filtered table.

pub mod client;
pub mod error;
pub mod session;
pub mod views;

pub use client::{ApiClient, BatchResponse};
pub use error::{DashboardError, DashboardResult};
pub use session::{DashboardSession, Filters};
