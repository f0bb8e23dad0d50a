use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoicing::{InvoicingError, InvoicingService};

#[derive(Debug, Serialize)]
pub struct InvoiceListItemDto {
  pub id: i64,
  pub invoice_number: String,
  pub client_name: String,
  pub invoice_date: NaiveDate,
  pub subtotal: Decimal,
  pub total_gst: Decimal,
  pub grand_total: Decimal,
  pub status: String,
  pub items_total: Decimal,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  invoicing_service: Arc<InvoicingService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoicing_service: Arc<InvoicingService>) -> Self {
    Self { invoicing_service }
  }

  pub async fn execute(&self) -> Result<ListInvoicesResponse, InvoicingError> {
    let invoices = self.invoicing_service.list_invoices().await?;

    let invoice_dtos = invoices
      .into_iter()
      .map(|entry| InvoiceListItemDto {
        id: entry.invoice.id,
        invoice_number: entry.invoice.invoice_number.into_inner(),
        client_name: entry.client_name,
        invoice_date: entry.invoice.invoice_date,
        subtotal: entry.invoice.subtotal.value(),
        total_gst: entry.invoice.total_gst.value(),
        grand_total: entry.invoice.grand_total.value(),
        status: entry.invoice.status.as_str().to_string(),
        items_total: entry.items_total,
        created_at: entry.invoice.created_at,
      })
      .collect();

    Ok(ListInvoicesResponse {
      invoices: invoice_dtos,
    })
  }
}
