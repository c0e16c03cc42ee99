pub mod fs;
pub mod image_io;
