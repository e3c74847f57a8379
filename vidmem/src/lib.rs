//! Text-mode display driver for the memory mapped VGA character grid.
//!
//! `Console` renders characters, strings and integers into an 80x25 cell
//! buffer, keeps the CRTC hardware cursor as the only record of the write
//! position, and wraps and scrolls when output runs past the grid.

#![cfg_attr(not(test), no_std)]
#![warn(unused_import_braces,unused_qualifications,keyword_idents)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate static_assertions;
#[macro_use]
extern crate log;

#[macro_use]
pub mod bindriver;
#[cfg(test)]
mod test;

pub use crate::bindriver::cio::PortIo;
#[cfg(target_arch = "x86_64")]
pub use crate::bindriver::cio::CrtcPorts;
pub use crate::bindriver::logger::ConsoleLogger;
#[cfg(target_arch = "x86_64")]
pub use crate::bindriver::logger::init_logging;
pub use crate::bindriver::vga_buffer::buffer::{
  Buffer, ByteOffset, CellIndex, ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH, VGA_ADDRESS,
};
pub use crate::bindriver::vga_buffer::helper::{Color, ColorCode, DEFAULT_CLEAR_COLOR};
pub use crate::bindriver::vga_buffer::{Console, TAB_WIDTH};
