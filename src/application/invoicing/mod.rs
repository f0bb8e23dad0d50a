pub mod create_invoice;
pub mod dashboard_stats;
pub mod get_invoice_details;
pub mod list_clients;
pub mod list_invoices;
pub mod list_items;

pub use create_invoice::{
  CreateInvoiceCommand, CreateInvoiceLineItemDto, CreateInvoiceResponse, CreateInvoiceUseCase,
};
pub use dashboard_stats::{DashboardStatsResponse, DashboardStatsUseCase};
pub use get_invoice_details::{
  GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, InvoiceDetailsResponse, InvoiceLineItemDto,
};
pub use list_clients::{ClientDto, ListClientsResponse, ListClientsUseCase};
pub use list_invoices::{InvoiceListItemDto, ListInvoicesResponse, ListInvoicesUseCase};
pub use list_items::{ItemDto, ListItemsResponse, ListItemsUseCase};
