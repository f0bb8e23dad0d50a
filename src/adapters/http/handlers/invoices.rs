use actix_web::{HttpResponse, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::errors::ApiError,
  application::invoicing::{
    CreateInvoiceCommand, CreateInvoiceLineItemDto, CreateInvoiceUseCase,
    GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
  },
  domain::invoicing::InvoicingError,
};

// Serialize is load-bearing: the length check on `items` embeds the
// offending value in the validation error params.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateInvoiceItemRequest {
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub gst_percentage: Decimal,
  pub item_total: Decimal,
  pub gst_amount: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
  #[validate(length(min = 1, max = 200, message = "client_name must not be empty"))]
  pub client_name: String,
  #[validate(length(min = 1, message = "at least one item is required"))]
  pub items: Vec<CreateInvoiceItemRequest>,
}

/// Create invoice
/// POST /api/v1/invoices
pub async fn create_invoice_handler(
  request: web::Json<CreateInvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = CreateInvoiceCommand {
    client_name: request.client_name,
    items: request
      .items
      .into_iter()
      .map(|item| CreateInvoiceLineItemDto {
        name: item.name,
        quantity: item.quantity,
        unit_price: item.unit_price,
        gst_percentage: item.gst_percentage,
        item_total: item.item_total,
        gst_amount: item.gst_amount,
      })
      .collect(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(response))
}

/// List recent invoices
/// GET /api/v1/invoices
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Get one invoice with nested line items
/// GET /api/v1/invoices/{id}
pub async fn get_invoice_handler(
  invoice_id: web::Path<i64>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let id = invoice_id.into_inner();
  let command = GetInvoiceDetailsCommand { invoice_id: id };

  match use_case.execute(command).await? {
    Some(response) => Ok(HttpResponse::Ok().json(response)),
    None => Err(InvoicingError::InvoiceNotFound(id).into()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn widget_item() -> CreateInvoiceItemRequest {
    CreateInvoiceItemRequest {
      name: "Widget".to_string(),
      quantity: dec!(2),
      unit_price: dec!(10.0),
      gst_percentage: dec!(5),
      item_total: dec!(20.0),
      gst_amount: dec!(1.0),
    }
  }

  #[test]
  fn test_create_invoice_request_accepts_valid_input() {
    let request = CreateInvoiceRequest {
      client_name: "Globex".to_string(),
      items: vec![widget_item()],
    };
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_create_invoice_request_rejects_empty_items() {
    let request = CreateInvoiceRequest {
      client_name: "Globex".to_string(),
      items: vec![],
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_create_invoice_request_rejects_empty_client_name() {
    let request = CreateInvoiceRequest {
      client_name: String::new(),
      items: vec![widget_item()],
    };
    assert!(request.validate().is_err());
  }
}
