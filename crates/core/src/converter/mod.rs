//! Output serialization.

pub mod csv;

pub use csv::{to_csv_string, write_csv};
