use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoicing::{InvoicingError, InvoicingService};

#[derive(Debug, Serialize)]
pub struct ClientDto {
  pub id: i64,
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ListClientsResponse {
  pub clients: Vec<ClientDto>,
}

pub struct ListClientsUseCase {
  invoicing_service: Arc<InvoicingService>,
}

impl ListClientsUseCase {
  pub fn new(invoicing_service: Arc<InvoicingService>) -> Self {
    Self { invoicing_service }
  }

  pub async fn execute(&self) -> Result<ListClientsResponse, InvoicingError> {
    let clients = self.invoicing_service.list_clients().await?;

    let client_dtos = clients
      .into_iter()
      .map(|c| ClientDto {
        id: c.id,
        name: c.name.into_inner(),
      })
      .collect();

    Ok(ListClientsResponse {
      clients: client_dtos,
    })
  }
}
