//! HTTP handlers, one module per resource.
//!
//! Handlers stay thin: they extract and validate the request, call a
//! repository or a [`workflow`](crate::workflow), and wrap the result.

pub mod auth;
pub mod council;
pub mod council_detail;
pub mod criteria;
pub mod department;
pub mod lecturer;
pub mod major;
pub mod ministry;
pub mod score;
pub mod student;
pub mod thesis;
pub mod user;

use thesis_core::error::CoreError;
use validator::Validate;

use crate::error::AppError;

/// Run `validator` derive rules on a request body.
pub(crate) fn validate_request<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}
