//! Front-end facing API for outreach cadence tracking.

mod api;
mod due;
mod error;

pub use api::*;
pub use due::{classify_due, DueState};
pub use error::{ApiError, ApiResult};
