use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failure reported by an availability collaborator. The recommendation
/// engine never surfaces these; it scores the listing as having no open slots.
#[derive(Debug, Error)]
pub enum AvailabilityError {
    #[error("availability store error: {0}")]
    Store(#[from] mongodb::error::Error),
    #[error("availability lookup timed out after {0} ms")]
    Timeout(u64),
    #[error("availability unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing store error: {0}")]
    Store(#[from] mongodb::error::Error),
    #[error("listing store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Listing(#[from] ListingError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Listing(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ServiceError::BadRequest(msg) => msg.clone(),
            ServiceError::Listing(err) => {
                log::error!("Listing store failure: {}", err);
                "Listing store unavailable".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
