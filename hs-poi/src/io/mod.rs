//! File input and output

pub mod csv_loader;
pub mod csv_writer;

pub use csv_loader::{load_records, read_records};
pub use csv_writer::{default_output_path, write_extended, write_json_report, write_output};
