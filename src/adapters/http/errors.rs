use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::invoicing::InvoicingError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Requested resource does not exist (404 Not Found)
  NotFound(String),

  /// Uniqueness race that survived internal retries (409 Conflict)
  Conflict(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details to the client
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert InvoicingError to ApiError
impl From<InvoicingError> for ApiError {
  fn from(error: InvoicingError) -> Self {
    match error {
      InvoicingError::Validation(err) => ApiError::Validation(err.to_string()),
      InvoicingError::NoLineItems => {
        ApiError::Validation("At least one line item is required".to_string())
      }
      InvoicingError::InvoiceNotFound(id) => ApiError::NotFound(format!("Invoice {}", id)),
      InvoicingError::InvoiceNumberConflict(number) => {
        ApiError::Conflict(format!("Invoice number {} already exists", number))
      }
      InvoicingError::ResolveConflict(name) => {
        ApiError::Conflict(format!("Concurrent creation of '{}'", name))
      }
      InvoicingError::Database(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoicing::ValueObjectError;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("test".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Conflict("test".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[actix_web::test]
  async fn test_error_response_body_shape() {
    let response = ApiError::NotFound("Invoice 7".to_string()).error_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = actix_web::body::to_bytes(response.into_body())
      .await
      .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["message"], "Invoice 7");
  }

  #[actix_web::test]
  async fn test_internal_error_body_hides_details() {
    let response = ApiError::Internal("connection reset".to_string()).error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = actix_web::body::to_bytes(response.into_body())
      .await
      .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "internal_error");
    assert_eq!(json["message"], "An internal server error occurred");
  }

  #[test]
  fn test_invoicing_error_conversion() {
    let api_error: ApiError = InvoicingError::NoLineItems.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = InvoicingError::InvoiceNotFound(7).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError =
      InvoicingError::InvoiceNumberConflict("INV-0001".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = InvoicingError::Validation(ValueObjectError::InvalidClientName(
      "empty".to_string(),
    ))
    .into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }
}
