use axum::extract::FromRequest;

use crate::errors::AppError;

/// JSON body extractor that routes rejections through [`AppError`], so a
/// malformed or mistyped body gets the same error envelope as domain
/// validation instead of axum's plain-text response.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
