pub mod cio;
#[macro_use]
pub mod vga_buffer;
pub mod logger;
