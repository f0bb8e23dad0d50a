use actix_web::web;
use std::sync::Arc;

use crate::application::invoicing::{
  CreateInvoiceUseCase, DashboardStatsUseCase, GetInvoiceDetailsUseCase, ListClientsUseCase,
  ListInvoicesUseCase, ListItemsUseCase,
};

use super::handlers::{
  create_invoice_handler, dashboard_stats_handler, get_invoice_handler, list_clients_handler,
  list_invoices_handler, list_items_handler,
};

/// Configure invoicing routes
///
/// Mounts all invoicing endpoints under the provided scope
/// (e.g. /api/v1).
///
/// # Routes
///
/// - POST /invoices - Create an invoice
/// - GET /invoices - List the most recent invoices
/// - GET /invoices/{id} - Get one invoice with its line items
/// - GET /clients - List clients
/// - GET /items - List catalog items
/// - GET /dashboard/stats - Dashboard totals
pub fn configure_invoicing_routes(
  cfg: &mut web::ServiceConfig,
  create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  list_invoices_use_case: Arc<ListInvoicesUseCase>,
  get_invoice_details_use_case: Arc<GetInvoiceDetailsUseCase>,
  list_clients_use_case: Arc<ListClientsUseCase>,
  list_items_use_case: Arc<ListItemsUseCase>,
  dashboard_stats_use_case: Arc<DashboardStatsUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_invoice_use_case))
    .app_data(web::Data::new(list_invoices_use_case))
    .app_data(web::Data::new(get_invoice_details_use_case))
    .app_data(web::Data::new(list_clients_use_case))
    .app_data(web::Data::new(list_items_use_case))
    .app_data(web::Data::new(dashboard_stats_use_case))
    .route("/invoices", web::post().to(create_invoice_handler))
    .route("/invoices", web::get().to(list_invoices_handler))
    .route("/invoices/{id}", web::get().to(get_invoice_handler))
    .route("/clients", web::get().to(list_clients_handler))
    .route("/items", web::get().to(list_items_handler))
    .route("/dashboard/stats", web::get().to(dashboard_stats_handler));
}
