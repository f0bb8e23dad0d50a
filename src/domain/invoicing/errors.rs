use super::value_objects::ValueObjectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoicingError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("No line items provided")]
  NoLineItems,

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(i64),

  #[error("Invoice number '{0}' already exists")]
  InvoiceNumberConflict(String),

  #[error("Name '{0}' lost a concurrent insert and could not be re-resolved")]
  ResolveConflict(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
