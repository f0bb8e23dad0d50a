pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod routes;

pub use dtos::ErrorResponse;
pub use errors::ApiError;
pub use routes::configure_invoicing_routes;
