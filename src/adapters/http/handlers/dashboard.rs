use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::{adapters::http::errors::ApiError, application::invoicing::DashboardStatsUseCase};

/// Dashboard totals
/// GET /api/v1/dashboard/stats
pub async fn dashboard_stats_handler(
  use_case: web::Data<Arc<DashboardStatsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(response))
}
