//! Utility module
//!
//! - [`AppError`] / [`AppResponse`] - error type and response envelope
//! - [`AjaxResponse`] - `{success, data, error}` envelope for the
//!   cart/wishlist/comment endpoints
//! - logger setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, AppResult};
pub use error::{ok, ok_with_message};

/// Ajax-style response structure
///
/// Cart, wishlist and comment endpoints keep the `{success, ...}` shape
/// their browser clients expect.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AjaxResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AjaxResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
