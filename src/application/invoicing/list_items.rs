use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoicing::{InvoicingError, InvoicingService};

#[derive(Debug, Serialize)]
pub struct ItemDto {
  pub id: i64,
  pub name: String,
  pub gst_percentage: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ListItemsResponse {
  pub items: Vec<ItemDto>,
}

pub struct ListItemsUseCase {
  invoicing_service: Arc<InvoicingService>,
}

impl ListItemsUseCase {
  pub fn new(invoicing_service: Arc<InvoicingService>) -> Self {
    Self { invoicing_service }
  }

  pub async fn execute(&self) -> Result<ListItemsResponse, InvoicingError> {
    let items = self.invoicing_service.list_items().await?;

    let item_dtos = items
      .into_iter()
      .map(|i| ItemDto {
        id: i.id,
        name: i.name.into_inner(),
        gst_percentage: i.gst_percentage.value(),
      })
      .collect();

    Ok(ListItemsResponse { items: item_dtos })
  }
}
