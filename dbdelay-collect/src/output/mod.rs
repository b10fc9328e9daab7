mod csv_writer;
mod fs;

pub use csv_writer::write_csv;
pub use fs::create_dirs;
