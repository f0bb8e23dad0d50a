use serde::Serialize;

/// Error payload returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
}
