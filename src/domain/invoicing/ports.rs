use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::entities::{Client, Invoice, InvoiceLineItem, InvoiceTotals, Item};
use super::errors::InvoicingError;
use super::value_objects::{Amount, ClientName, GstRate, InvoiceNumber, ItemName, Quantity};

/// Line item ready for persistence, with its catalog item already resolved.
#[derive(Debug, Clone)]
pub struct NewLineItem {
  pub item_id: i64,
  pub quantity: Quantity,
  pub unit_price: Amount,
  pub gst_percentage: GstRate,
  pub item_total: Amount,
}

/// Header data for the atomic invoice write. The invoice number is
/// allocated by the repository inside the same transaction.
#[derive(Debug, Clone)]
pub struct NewInvoice {
  pub client_id: i64,
  pub invoice_date: NaiveDate,
  pub totals: InvoiceTotals,
  pub line_items: Vec<NewLineItem>,
}

/// What the writer returns to the caller; line items are not echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedInvoice {
  pub id: i64,
  pub invoice_number: InvoiceNumber,
  pub client_id: i64,
  pub subtotal: Amount,
  pub total_gst: Amount,
  pub grand_total: Amount,
}

/// One row of the recent-invoice listing. `items_total` is aggregated from
/// the line items at read time and is informational; it may drift from the
/// stored subtotal if the data is inconsistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceListEntry {
  pub invoice: Invoice,
  pub client_name: String,
  pub items_total: Decimal,
}

/// Line item as displayed on a fetched invoice. The stored line keeps the
/// rate supplied at invoice time; `current_gst_percentage` is the catalog
/// item's rate today, which may have drifted since.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemDetails {
  pub line: InvoiceLineItem,
  pub item_name: String,
  pub current_gst_percentage: GstRate,
}

/// Fully assembled invoice: header, client display name, nested lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetails {
  pub invoice: Invoice,
  pub client_name: String,
  pub line_items: Vec<LineItemDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
  pub total_invoices: i64,
  pub total_revenue: Decimal,
  pub pending_amount: Decimal,
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
  /// Resolves a client name to its id, creating the client on first sight.
  /// Matching is case-insensitive; a lost insert race re-resolves to the
  /// winning row.
  async fn resolve(&self, name: &ClientName) -> Result<i64, InvoicingError>;

  async fn list(&self) -> Result<Vec<Client>, InvoicingError>;
}

#[async_trait]
pub trait ItemRepository: Send + Sync {
  /// Resolves an item name to its id, creating the item on first sight.
  /// The supplied rate is stored only when the item is created; an
  /// existing item keeps its original rate.
  async fn resolve(&self, name: &ItemName, gst_percentage: GstRate) -> Result<i64, InvoicingError>;

  async fn list(&self) -> Result<Vec<Item>, InvoicingError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Persists the header and all line items as one atomic unit, allocating
  /// the next invoice number inside the same transaction.
  async fn create(&self, new_invoice: NewInvoice) -> Result<CreatedInvoice, InvoicingError>;

  /// Most recent invoices, newest first, at most `limit` rows.
  async fn list_recent(&self, limit: i64) -> Result<Vec<InvoiceListEntry>, InvoicingError>;

  /// Header plus nested line items, or None if no header row matches.
  async fn find_with_items(&self, id: i64) -> Result<Option<InvoiceDetails>, InvoicingError>;

  async fn dashboard_stats(&self) -> Result<DashboardStats, InvoicingError>;
}
