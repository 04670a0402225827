mod readers;
mod util;
mod writers;

pub use readers::{is_empty_file, open_mlst_reader, tsv_reader};
pub use util::{handle_error_and_exit, percentage, Result};
pub use writers::{create_writer, write_row, TsvWriter};
