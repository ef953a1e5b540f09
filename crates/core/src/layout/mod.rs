//! Layout reconstruction: row clustering and column segmentation.

pub mod columns;
pub mod params;
pub mod rows;

pub use columns::ColumnTemplate;
pub use params::{ColumnParams, LayoutParams};
pub use rows::{cluster_rows, RowBand};
