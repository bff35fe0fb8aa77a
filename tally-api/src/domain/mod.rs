mod aggregation;
mod error;
pub mod models;
pub mod ports;
pub mod services;
mod validation;

pub use aggregation::*;
pub use error::*;
pub use validation::*;
