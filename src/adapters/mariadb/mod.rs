//! MariaDB / MySQL access for the exporter

pub mod client;
pub mod traits;

pub use client::MariaDbSource;
pub use traits::{DatabaseSource, QueryResult};
