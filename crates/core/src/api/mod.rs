//! Public API surface: high-level extraction plus the host fault barrier.

pub mod guard;
pub mod high_level;

pub use guard::guarded;
pub use high_level::{
    convert_to_csv, extract_table_from_binary, extract_table_from_path, headers, to_csv_string,
    ExtractOptions,
};
