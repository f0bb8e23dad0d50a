use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::{
  adapters::http::errors::ApiError,
  application::invoicing::{ListClientsUseCase, ListItemsUseCase},
};

/// List clients ordered by name
/// GET /api/v1/clients
pub async fn list_clients_handler(
  use_case: web::Data<Arc<ListClientsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(response))
}

/// List catalog items ordered by name
/// GET /api/v1/items
pub async fn list_items_handler(
  use_case: web::Data<Arc<ListItemsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(response))
}
