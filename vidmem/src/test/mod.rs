//! Host-side doubles for the hardware the driver talks to.


use crate::bindriver::cio::{PortIo, CRTC_CONTROL, CRTC_DATA};
use crate::bindriver::vga_buffer::buffer::{Buffer, CellIndex};
use crate::bindriver::vga_buffer::helper::DEFAULT_CLEAR_COLOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOp {
    Out(u16, u8),
    In(u16, u8),
}

/// Behaves like the CRTC index/data pair: a write to the control port selects
/// a register, the data port then reads or writes that register.
pub struct MockPorts {
    pub registers: [u8; 256],
    pub selected: u8,
    pub journal: Vec<PortOp>,
}

impl MockPorts {
    pub fn new() -> Self {
        MockPorts {
            registers: [0; 256],
            selected: 0,
            journal: Vec::new(),
        }
    }

    pub fn cursor(&self) -> CellIndex {
        CellIndex::from_raw((self.registers[0x0e] as u16) << 8 | self.registers[0x0f] as u16)
    }

    pub fn count_out(&self) -> usize {
        self.journal.iter().filter(|op| matches!(op, PortOp::Out(..))).count()
    }
}

impl PortIo for MockPorts {
    fn write_u8(&mut self, port: u16, value: u8) {
        self.journal.push(PortOp::Out(port, value));
        match port {
            CRTC_CONTROL => self.selected = value,
            CRTC_DATA => self.registers[self.selected as usize] = value,
            _ => panic!("write to unexpected port {:#x}", port),
        }
    }

    fn read_u8(&mut self, port: u16) -> u8 {
        let value = match port {
            CRTC_CONTROL => self.selected,
            CRTC_DATA => self.registers[self.selected as usize],
            _ => panic!("read from unexpected port {:#x}", port),
        };
        self.journal.push(PortOp::In(port, value));
        value
    }
}

pub fn blank_buffer() -> Box<Buffer> {
    Box::new(Buffer::blank(DEFAULT_CLEAR_COLOR))
}

/// A buffer that lives for the rest of the test binary, for `'static` consoles.
pub fn leaked_buffer() -> &'static mut Buffer {
    Box::leak(blank_buffer())
}

/// Character bytes of one row, for comparing against literals.
pub fn row_text(buffer: &Buffer, row: usize) -> Vec<u8> {
    buffer.chars[row].iter().map(|c| c.read().ascii_character).collect()
}
