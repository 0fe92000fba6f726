pub mod reader;
pub mod writer;

pub use reader::read_ascii_file;
pub use writer::{output_path_for, write_products};
