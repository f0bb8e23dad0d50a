use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoicing::{InvoicingError, InvoicingService};

#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
  pub total_invoices: i64,
  pub total_revenue: Decimal,
  pub pending_amount: Decimal,
}

pub struct DashboardStatsUseCase {
  invoicing_service: Arc<InvoicingService>,
}

impl DashboardStatsUseCase {
  pub fn new(invoicing_service: Arc<InvoicingService>) -> Self {
    Self { invoicing_service }
  }

  pub async fn execute(&self) -> Result<DashboardStatsResponse, InvoicingError> {
    let stats = self.invoicing_service.dashboard_stats().await?;

    Ok(DashboardStatsResponse {
      total_invoices: stats.total_invoices,
      total_revenue: stats.total_revenue,
      pending_amount: stats.pending_amount,
    })
  }
}
