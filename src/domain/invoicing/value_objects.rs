use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid client name: {0}")]
  InvalidClientName(String),
  #[error("Invalid item name: {0}")]
  InvalidItemName(String),
  #[error("Invalid GST rate: {0}")]
  InvalidGstRate(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid invoice status: {0}")]
  InvalidInvoiceStatus(String),
}

// Client Name - natural key, matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientName(String);

impl ClientName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 200 {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot exceed 200 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  /// Comparison key used for case-insensitive uniqueness.
  pub fn comparison_key(&self) -> String {
    self.0.to_lowercase()
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for ClientName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Item Name - natural key, matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemName(String);

impl ItemName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 200 {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot exceed 200 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn comparison_key(&self) -> String {
    self.0.to_lowercase()
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for ItemName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// GST Rate - percentage between 0 and 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstRate(Decimal);

impl GstRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidGstRate(
        "GST rate cannot be negative".to_string(),
      ));
    }
    if value > Decimal::ONE_HUNDRED {
      return Err(ValueObjectError::InvalidGstRate(
        "GST rate cannot exceed 100".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Quantity - strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity must be positive".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Amount - non-negative monetary value (single-currency system)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
  /// Largest value the NUMERIC(14, 2) money columns can store. Keeping
  /// amounts inside this bound also keeps sums far from Decimal overflow.
  pub const MAX: Decimal = dec!(999_999_999_999.99);

  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot be negative".to_string(),
      ));
    }
    if value > Self::MAX {
      return Err(ValueObjectError::InvalidAmount(format!(
        "Amount cannot exceed {}",
        Self::MAX
      )));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn add(&self, other: &Amount) -> Amount {
    Amount(self.0 + other.0)
  }
}

// Invoice Number - generated from the storage-backed sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub const PREFIX: &'static str = "INV";

  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 50 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot exceed 50 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  /// Formats a sequence value as a zero-padded invoice number.
  ///
  /// Four digits minimum; the width grows naturally past 9999 so the
  /// number stays unique.
  pub fn from_sequence(sequence: i64) -> Self {
    Self(format!("{}-{:04}", Self::PREFIX, sequence))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Status
//
// Invoices are created as Pending and this core never transitions them.
// Paid exists so rows written by other tooling still round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Pending,
  Paid,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Pending => "pending",
      InvoiceStatus::Paid => "paid",
    }
  }
}

impl Default for InvoiceStatus {
  fn default() -> Self {
    InvoiceStatus::Pending
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pending" => Ok(InvoiceStatus::Pending),
      "paid" => Ok(InvoiceStatus::Paid),
      _ => Err(ValueObjectError::InvalidInvoiceStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}
