//! Extractors that reject with the standard error envelope.

use crate::responses::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor; malformed bodies become a 400 envelope.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor; undecodable parameters become a 400 envelope.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
