use super::cio::PortIo;
use super::vga_buffer::helper::{Color, ColorCode};
use super::vga_buffer::{Console, LOG_TARGET};
use log::{Level, LevelFilter, Metadata, Record};
use spin::Mutex;

/// `log` sink that renders records onto a console, one line each.
pub struct ConsoleLogger<P: PortIo + Send + 'static> {
    console: &'static Mutex<Console<'static, P>>,
    level: LevelFilter,
}

impl<P: PortIo + Send + 'static> ConsoleLogger<P> {
    pub const fn new(console: &'static Mutex<Console<'static, P>>, level: LevelFilter) -> Self {
        ConsoleLogger { console, level }
    }
}

fn level_color(level: Level) -> ColorCode {
    let fg = match level {
        Level::Error => Color::LightRed,
        Level::Warn => Color::Yellow,
        Level::Info => Color::LightGreen,
        Level::Debug => Color::LightCyan,
        Level::Trace => Color::DarkGray,
    };
    ColorCode::new(fg, Color::Black)
}

impl<P: PortIo + Send + 'static> ::log::Log for ConsoleLogger<P> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && !(false
            // the console's own records would write into the console being logged to
            || metadata.target().starts_with(LOG_TARGET)
        )
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // a record raised while the console is held is dropped, never waited on
        if let Some(mut console) = self.console.try_lock() {
            use core::fmt::Write;
            console.write_fmt_color(format_args!("{:5}", record.level()), level_color(record.level()));
            console
                .write_fmt(format_args!(" {} - {}\n", record.target(), record.args()))
                .ok();
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "x86_64")]
pub use self::global::init_logging;

#[cfg(target_arch = "x86_64")]
mod global {
    use super::ConsoleLogger;
    use crate::bindriver::cio::CrtcPorts;
    use crate::bindriver::vga_buffer::WRITER;
    use log::{LevelFilter, SetLoggerError};

    lazy_static! {
        static ref LOGGER: ConsoleLogger<CrtcPorts> = ConsoleLogger::new(&*WRITER, LevelFilter::Trace);
    }

    /// Routes `log` records to the screen, up to `level`.
    pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
        ::log::set_logger(&*LOGGER)?;
        ::log::set_max_level(level);
        Ok(())
    }
}
