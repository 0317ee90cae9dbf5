pub mod model;
pub mod services;
pub mod store;

pub use services::JournalError;
