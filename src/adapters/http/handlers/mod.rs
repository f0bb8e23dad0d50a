pub mod catalog;
pub mod dashboard;
pub mod invoices;

pub use catalog::{list_clients_handler, list_items_handler};
pub use dashboard::dashboard_stats_handler;
pub use invoices::{create_invoice_handler, get_invoice_handler, list_invoices_handler};
