use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{
  Amount, ClientName, GstRate, InvoiceNumber, InvoiceStatus, ItemName, Quantity,
};

// Client - master record, created lazily on first invoice, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
  pub id: i64,
  pub name: ClientName,
  pub created_at: DateTime<Utc>,
}

// Item - catalog record; the GST rate is captured at first creation only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub id: i64,
  pub name: ItemName,
  pub gst_percentage: GstRate,
  pub created_at: DateTime<Utc>,
}

// Invoice header - immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: i64,
  pub invoice_number: InvoiceNumber,
  pub client_id: i64,
  pub invoice_date: NaiveDate,
  pub subtotal: Amount,
  pub total_gst: Amount,
  pub grand_total: Amount,
  pub status: InvoiceStatus,
  pub created_at: DateTime<Utc>,
}

// Invoice line item - stores the figures supplied at invoice time verbatim.
// gst_percentage here is historical and may drift from the catalog rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
  pub id: i64,
  pub invoice_id: i64,
  pub item_id: i64,
  pub quantity: Quantity,
  pub unit_price: Amount,
  pub gst_percentage: GstRate,
  pub item_total: Amount,
}

/// One line of an invoice-creation request, after validation.
///
/// `item_total` and `gst_amount` are caller-supplied and persisted as-is;
/// they are never recomputed from quantity and unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemInput {
  pub name: ItemName,
  pub quantity: Quantity,
  pub unit_price: Amount,
  pub gst_percentage: GstRate,
  pub item_total: Amount,
  pub gst_amount: Amount,
}

// Invoice Totals - computed once at creation and stored on the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
  pub subtotal: Amount,
  pub total_gst: Amount,
  pub grand_total: Amount,
}

impl InvoiceTotals {
  /// Sums the supplied per-line figures exactly.
  pub fn calculate(line_items: &[LineItemInput]) -> Self {
    let subtotal = line_items
      .iter()
      .fold(Amount::zero(), |acc, item| acc.add(&item.item_total));

    let total_gst = line_items
      .iter()
      .fold(Amount::zero(), |acc, item| acc.add(&item.gst_amount));

    let grand_total = subtotal.add(&total_gst);

    Self {
      subtotal,
      total_gst,
      grand_total,
    }
  }
}
