//! Browse and search operations over the deals collection

pub mod service;

pub use service::DealsService;
