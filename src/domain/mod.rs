pub mod invoicing;
