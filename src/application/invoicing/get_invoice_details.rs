use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::invoicing::{InvoicingError, InvoicingService};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceDetailsCommand {
  pub invoice_id: i64,
}

#[derive(Debug, Serialize)]
pub struct InvoiceLineItemDto {
  pub id: i64,
  pub item_id: i64,
  pub item_name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub gst_percentage: Decimal,
  pub current_gst_percentage: Decimal,
  pub item_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  pub id: i64,
  pub invoice_number: String,
  pub client_id: i64,
  pub client_name: String,
  pub invoice_date: NaiveDate,
  pub subtotal: Decimal,
  pub total_gst: Decimal,
  pub grand_total: Decimal,
  pub status: String,
  pub created_at: DateTime<Utc>,
  pub items: Vec<InvoiceLineItemDto>,
}

pub struct GetInvoiceDetailsUseCase {
  invoicing_service: Arc<InvoicingService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoicing_service: Arc<InvoicingService>) -> Self {
    Self { invoicing_service }
  }

  /// Returns None when no invoice matches the id.
  pub async fn execute(
    &self,
    command: GetInvoiceDetailsCommand,
  ) -> Result<Option<InvoiceDetailsResponse>, InvoicingError> {
    let Some(details) = self.invoicing_service.get_invoice(command.invoice_id).await? else {
      return Ok(None);
    };

    let items = details
      .line_items
      .into_iter()
      .map(|detail| InvoiceLineItemDto {
        id: detail.line.id,
        item_id: detail.line.item_id,
        item_name: detail.item_name,
        quantity: detail.line.quantity.value(),
        unit_price: detail.line.unit_price.value(),
        gst_percentage: detail.line.gst_percentage.value(),
        current_gst_percentage: detail.current_gst_percentage.value(),
        item_total: detail.line.item_total.value(),
      })
      .collect();

    let invoice = details.invoice;
    Ok(Some(InvoiceDetailsResponse {
      id: invoice.id,
      invoice_number: invoice.invoice_number.into_inner(),
      client_id: invoice.client_id,
      client_name: details.client_name,
      invoice_date: invoice.invoice_date,
      subtotal: invoice.subtotal.value(),
      total_gst: invoice.total_gst.value(),
      grand_total: invoice.grand_total.value(),
      status: invoice.status.as_str().to_string(),
      created_at: invoice.created_at,
      items,
    }))
  }
}
