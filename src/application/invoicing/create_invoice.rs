use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::invoicing::{
  Amount, ClientName, GstRate, InvoicingError, InvoicingService, ItemName, LineItemInput, Quantity,
};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceLineItemDto {
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub gst_percentage: Decimal,
  pub item_total: Decimal,
  pub gst_amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub client_name: String,
  pub items: Vec<CreateInvoiceLineItemDto>,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub id: i64,
  pub invoice_number: String,
  pub client_id: i64,
  pub subtotal: Decimal,
  pub total_gst: Decimal,
  pub grand_total: Decimal,
}

pub struct CreateInvoiceUseCase {
  invoicing_service: Arc<InvoicingService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoicing_service: Arc<InvoicingService>) -> Self {
    Self { invoicing_service }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<CreateInvoiceResponse, InvoicingError> {
    let client_name = ClientName::new(command.client_name)?;

    let line_items: Vec<_> = command
      .items
      .into_iter()
      .map(|item| {
        let name = ItemName::new(item.name)?;
        let quantity = Quantity::new(item.quantity)?;
        let unit_price = Amount::new(item.unit_price)?;
        let gst_percentage = GstRate::new(item.gst_percentage)?;
        let item_total = Amount::new(item.item_total)?;
        let gst_amount = Amount::new(item.gst_amount)?;
        Ok(LineItemInput {
          name,
          quantity,
          unit_price,
          gst_percentage,
          item_total,
          gst_amount,
        })
      })
      .collect::<Result<Vec<_>, InvoicingError>>()?;

    let created = self
      .invoicing_service
      .create_invoice(client_name, line_items)
      .await?;

    Ok(CreateInvoiceResponse {
      id: created.id,
      invoice_number: created.invoice_number.into_inner(),
      client_id: created.client_id,
      subtotal: created.subtotal.value(),
      total_gst: created.total_gst.value(),
      grand_total: created.grand_total.value(),
    })
  }
}
