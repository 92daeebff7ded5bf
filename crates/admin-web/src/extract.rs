//! Request extractors that reject with [`AdminError`].
//!
//! axum's own extractors answer malformed input with plain-text 400/422
//! responses. These wrappers route every rejection through the JSON error
//! body with status 400.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AdminError;

/// JSON request body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AdminError))]
pub struct JsonBody<T>(pub T);

/// Query string parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AdminError))]
pub struct QueryParams<T>(pub T);

/// Path parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AdminError))]
pub struct PathParam<T>(pub T);

impl From<JsonRejection> for AdminError {
    fn from(rejection: JsonRejection) -> Self {
        AdminError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AdminError {
    fn from(rejection: QueryRejection) -> Self {
        AdminError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AdminError {
    fn from(rejection: PathRejection) -> Self {
        AdminError::BadRequest(rejection.body_text())
    }
}
