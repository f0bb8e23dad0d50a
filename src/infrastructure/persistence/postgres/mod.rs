pub mod client_repository;
pub mod invoice_repository;
pub mod item_repository;

pub use client_repository::PostgresClientRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use item_repository::PostgresItemRepository;
