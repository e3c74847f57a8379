pub mod buffer;
pub mod cursor;
pub mod helper;

use self::buffer::{Buffer, CellIndex, ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH};
use self::helper::{ColorCode, DEFAULT_CLEAR_COLOR};
use crate::bindriver::cio::PortIo;
use core::fmt;

/// Spaces emitted for a `\t`, independent of the current column.
pub const TAB_WIDTH: usize = 4;

pub(crate) const LOG_TARGET: &str = module_path!();

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Whether a character write also replaces the attribute byte of its cell.
#[derive(Debug, Clone, Copy)]
enum Ink {
    Keep,
    Color(ColorCode),
}

/// Text console over one buffer and one CRTC cursor.
///
/// The cursor is never cached: every operation that depends on it reads it
/// back from the registers first. Nothing in here locks; sharing a console
/// between contexts needs an outer lock such as `WRITER`.
pub struct Console<'a, P: PortIo> {
    buffer: &'a mut Buffer,
    ports: P,
    background: ColorCode,
}

impl<'a, P: PortIo> Console<'a, P> {
    pub fn new(buffer: &'a mut Buffer, ports: P) -> Self {
        Console {
            buffer,
            ports,
            background: DEFAULT_CLEAR_COLOR,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &*self.buffer
    }

    pub fn ports(&mut self) -> &mut P {
        &mut self.ports
    }

    /// Attribute used for cells blanked by clearing or scrolling.
    pub fn background(&self) -> ColorCode {
        self.background
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        cursor::set_cursor(&mut self.ports, row, col)
    }

    pub fn cursor(&mut self) -> CellIndex {
        cursor::get_cursor(&mut self.ports)
    }

    pub fn cursor_row(&mut self) -> usize {
        self.cursor().row()
    }

    pub fn cursor_col(&mut self) -> usize {
        self.cursor().col()
    }

    /// Moves the content up by `count` rows. The top rows are lost, the
    /// bottom rows are blanked with the background color. The cursor stays
    /// where it is.
    pub fn scroll_down(&mut self, count: usize) {
        let blank = ScreenChar::blank(self.background);
        for _ in 0..count {
            for row in 1..BUFFER_HEIGHT {
                self.buffer.copy_row(row, row - 1);
            }
            self.buffer.clear_row(BUFFER_HEIGHT - 1, blank);
            trace!("scrolled one row");
        }
    }

    /// Steps the cursor forward `count` cells, one at a time, wrapping at the
    /// end of a line and scrolling past the last row.
    pub fn advance(&mut self, count: usize) {
        for _ in 0..count {
            let (mut row, mut col) = self.cursor().coords();
            col += 1;
            if col >= BUFFER_WIDTH {
                col = 0;
                row += 1;
            }
            let row = self.absorb_scroll(row);
            self.set_cursor(row, col);
        }
    }

    fn absorb_scroll(&mut self, mut row: usize) -> usize {
        while row >= BUFFER_HEIGHT {
            self.scroll_down(1);
            row -= 1;
        }
        row
    }

    fn new_line(&mut self) {
        let row = self.cursor_row() + 1;
        let row = self.absorb_scroll(row);
        self.set_cursor(row, 0);
    }

    pub fn clear_screen(&mut self) {
        self.buffer.fill(ScreenChar::blank(self.background));
        debug!("screen cleared with {:#04x}", self.background.raw());
    }

    /// Makes `color` the background for this and all later clears and scrolls.
    pub fn clear_screen_color(&mut self, color: ColorCode) {
        self.background = color;
        self.clear_screen();
    }

    /// Writes the character byte at the cursor, leaving the attribute byte alone.
    pub fn putchar(&mut self, byte: u8) {
        self.put(byte, Ink::Keep)
    }

    pub fn putchar_color(&mut self, byte: u8, color: ColorCode) {
        self.put(byte, Ink::Color(color))
    }

    fn put(&mut self, byte: u8, ink: Ink) {
        match byte {
            b'\n' => self.new_line(),
            // tabs are plain spaces, also for colored output
            b'\t' => {
                for _ in 0..TAB_WIDTH {
                    self.putchar(b' ');
                }
            }
            byte => {
                let index = self.cursor();
                match ink {
                    Ink::Keep => self.buffer.write_byte(index.to_byte_offset(), byte),
                    Ink::Color(color_code) => self.buffer.set_cell(
                        index,
                        ScreenChar {
                            ascii_character: byte,
                            color_code,
                        },
                    ),
                }
                self.advance(1);
            }
        }
    }

    /// Renders bytes up to the first NUL or the end of `bytes`.
    pub fn puts(&mut self, bytes: &[u8]) {
        self.put_all(bytes, Ink::Keep)
    }

    pub fn puts_color(&mut self, bytes: &[u8], color: ColorCode) {
        self.put_all(bytes, Ink::Color(color))
    }

    fn put_all(&mut self, bytes: &[u8], ink: Ink) {
        for &byte in bytes.iter().take_while(|&&b| b != 0) {
            self.put(byte, ink);
        }
    }

    /// Renders `value` in radix `|base|`. A negative `base` renders `value`
    /// as unsigned, a positive one as signed with a leading `-` when negative.
    /// Digits above 9 are lowercase.
    pub fn put_int(&mut self, value: i64, base: i8) {
        self.put_number(value, base, Ink::Keep)
    }

    pub fn put_int_color(&mut self, value: i64, base: i8, color: ColorCode) {
        self.put_number(value, base, Ink::Color(color))
    }

    fn put_number(&mut self, value: i64, base: i8, ink: Ink) {
        let radix = base.unsigned_abs() as u64;
        if radix < 2 || radix > DIGITS.len() as u64 {
            warn!("refusing to render {} in base {}", value, base);
            return;
        }

        let magnitude = if base < 0 {
            value as u64
        } else if value < 0 {
            self.put(b'-', ink);
            value.unsigned_abs()
        } else {
            value as u64
        };

        let mut digit_count = 0;
        let mut rest = magnitude;
        let mut mult: u64 = 1;
        loop {
            digit_count += 1;
            rest /= radix;
            if rest == 0 {
                break;
            }
            mult *= radix;
        }

        for _ in 0..digit_count {
            let digit = (magnitude / mult) % radix;
            mult /= radix;
            self.put(DIGITS[digit as usize], ink);
        }
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_str_ink(s, Ink::Keep)
    }

    fn write_str_ink(&mut self, s: &str, ink: Ink) {
        for byte in s.bytes() {
            match byte {
                // printable ASCII byte, newline or tab
                0x20..=0x7e | b'\n' | b'\t' => self.put(byte, ink),
                // not part of printable ASCII range
                _ => self.put(0xfe, ink),
            }
        }
    }

    /// Formatted output with every cell painted in `color`.
    pub fn write_fmt_color(&mut self, args: fmt::Arguments, color: ColorCode) {
        let mut tinted = Tinted {
            console: self,
            color,
        };
        fmt::write(&mut tinted, args).ok();
    }
}

impl<'a, P: PortIo> fmt::Write for Console<'a, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_string(s);
        Ok(())
    }
}

struct Tinted<'c, 'a, P: PortIo> {
    console: &'c mut Console<'a, P>,
    color: ColorCode,
}

impl<'c, 'a, P: PortIo> fmt::Write for Tinted<'c, 'a, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.console.write_str_ink(s, Ink::Color(self.color));
        Ok(())
    }
}

#[cfg(target_arch = "x86_64")]
pub use self::global::*;

#[cfg(target_arch = "x86_64")]
mod global {
    use super::buffer::{Buffer, VGA_ADDRESS};
    use super::helper::ColorCode;
    use super::Console;
    use crate::bindriver::cio::CrtcPorts;
    use core::fmt;
    use spin::Mutex;
    use x86_64::instructions::interrupts;

    lazy_static! {
        pub static ref WRITER: Mutex<Console<'static, CrtcPorts>> = Mutex::new(Console::new(
            unsafe { Buffer::at_address(VGA_ADDRESS) },
            unsafe { CrtcPorts::new() },
        ));
    }

    pub fn print(args: fmt::Arguments) {
        use core::fmt::Write;
        interrupts::without_interrupts(|| {
            WRITER.lock().write_fmt(args).ok();
        });
    }

    pub fn print_color(args: fmt::Arguments, color: ColorCode) {
        interrupts::without_interrupts(|| {
            WRITER.lock().write_fmt_color(args, color);
        });
    }
}

#[macro_export]
macro_rules! vga_print {
    ($($arg:tt)*) => {
      $crate::bindriver::vga_buffer::print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! vga_println {
    () => ($crate::vga_print!("\n"));
    ($fmt:expr) => ($crate::vga_print!(concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => ($crate::vga_print!(concat!($fmt, "\n"), $($arg)*));
}

#[macro_export]
macro_rules! vga_print_color {
    ($color:expr, $($arg:tt)*) => {
      $crate::bindriver::vga_buffer::print_color(format_args!($($arg)*), $color)
    };
}
