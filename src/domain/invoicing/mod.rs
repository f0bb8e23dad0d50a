pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Client, Invoice, InvoiceLineItem, InvoiceTotals, Item, LineItemInput};
pub use errors::InvoicingError;
pub use ports::{
  ClientRepository, CreatedInvoice, DashboardStats, InvoiceDetails, InvoiceListEntry,
  InvoiceRepository, ItemRepository, LineItemDetails, NewInvoice, NewLineItem,
};
pub use services::{InvoicingService, RECENT_INVOICE_LIMIT};
pub use value_objects::{
  Amount, ClientName, GstRate, InvoiceNumber, InvoiceStatus, ItemName, Quantity, ValueObjectError,
};
