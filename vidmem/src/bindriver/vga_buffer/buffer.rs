
pub const BUFFER_HEIGHT: usize = 25;
pub const BUFFER_WIDTH: usize = 80;

/// Physical address of the colour text buffer.
pub const VGA_ADDRESS: usize = 0xb8000;

use super::helper::ColorCode;
use volatile::Volatile;

#[repr(transparent)]
pub struct Buffer {
    pub chars: [[Volatile<ScreenChar>; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii_character: u8,
    pub color_code: ColorCode,
}

assert_eq_size!(ScreenChar, u16);
assert_eq_size!(Buffer, [u16; BUFFER_WIDTH * BUFFER_HEIGHT]);

impl ScreenChar {
    pub const fn blank(color_code: ColorCode) -> Self {
        ScreenChar { ascii_character: 0x00, color_code }
    }
}

/// Position of a cell counted in cells, the unit the CRTC cursor registers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct CellIndex(u16);

/// Position counted in bytes from the start of the buffer. Even offsets address
/// the character byte of a cell, odd ones its attribute byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ByteOffset(u16);

impl CellIndex {
    /// No bounds checking, out of range coordinates give an index past the grid.
    pub const fn of(row: usize, col: usize) -> Self {
        CellIndex((row * BUFFER_WIDTH + col) as u16)
    }
    pub const fn from_raw(index: u16) -> Self {
        CellIndex(index)
    }
    pub const fn raw(self) -> u16 {
        self.0
    }
    pub const fn row(self) -> usize {
        self.0 as usize / BUFFER_WIDTH
    }
    pub const fn col(self) -> usize {
        self.0 as usize % BUFFER_WIDTH
    }
    pub const fn coords(self) -> (usize, usize) {
        (self.row(), self.col())
    }
    pub const fn to_byte_offset(self) -> ByteOffset {
        ByteOffset(self.0 << 1)
    }
}

impl ByteOffset {
    pub const fn of(row: usize, col: usize) -> Self {
        CellIndex::of(row, col).to_byte_offset()
    }
    pub const fn from_raw(offset: u16) -> Self {
        ByteOffset(offset)
    }
    pub const fn raw(self) -> u16 {
        self.0
    }
    /// Same offset, but pointing at the attribute byte of the cell.
    pub const fn attribute(self) -> Self {
        ByteOffset(self.0 | 1)
    }
    pub const fn is_attribute(self) -> bool {
        self.0 & 1 == 1
    }
    pub const fn to_cell_index(self) -> CellIndex {
        CellIndex(self.0 >> 1)
    }
    pub const fn coords(self) -> (usize, usize) {
        self.to_cell_index().coords()
    }
}

impl Buffer {
    /// Binds the device memory at `address`.
    ///
    /// # Safety
    /// `address` must point at a mapped text buffer of `BUFFER_HEIGHT` x
    /// `BUFFER_WIDTH` cells, and the returned reference must stay unique.
    pub unsafe fn at_address(address: usize) -> &'static mut Buffer {
        &mut *(address as *mut Buffer)
    }

    /// A buffer in ordinary memory, every cell blanked with `color_code`.
    pub fn blank(color_code: ColorCode) -> Buffer {
        let cell = ScreenChar::blank(color_code);
        Buffer {
            chars: core::array::from_fn(|_| core::array::from_fn(|_| Volatile::new(cell))),
        }
    }

    fn slot(&self, index: CellIndex) -> Option<&Volatile<ScreenChar>> {
        self.chars.get(index.row())?.get(index.col())
    }

    fn slot_mut(&mut self, index: CellIndex) -> Option<&mut Volatile<ScreenChar>> {
        self.chars.get_mut(index.row())?.get_mut(index.col())
    }

    pub fn cell(&self, index: CellIndex) -> Option<ScreenChar> {
        self.slot(index).map(|c| c.read())
    }

    /// Writes are dropped for indices outside the grid.
    pub fn set_cell(&mut self, index: CellIndex, value: ScreenChar) {
        if let Some(c) = self.slot_mut(index) {
            c.write(value);
        }
    }

    pub fn read_byte(&self, offset: ByteOffset) -> Option<u8> {
        let cell = self.cell(offset.to_cell_index())?;
        Some(if offset.is_attribute() {
            cell.color_code.raw()
        } else {
            cell.ascii_character
        })
    }

    /// Updates one byte of a cell, the other byte keeps its value.
    pub fn write_byte(&mut self, offset: ByteOffset, value: u8) {
        if let Some(c) = self.slot_mut(offset.to_cell_index()) {
            let mut cell = c.read();
            if offset.is_attribute() {
                cell.color_code = ColorCode::from_raw(value);
            } else {
                cell.ascii_character = value;
            }
            c.write(cell);
        }
    }

    pub fn copy_row(&mut self, from: usize, to: usize) {
        for col in 0..BUFFER_WIDTH {
            let character = self.chars[from][col].read();
            self.chars[to][col].write(character);
        }
    }

    pub fn clear_row(&mut self, row: usize, blank: ScreenChar) {
        for col in 0..BUFFER_WIDTH {
            self.chars[row][col].write(blank);
        }
    }

    pub fn fill(&mut self, blank: ScreenChar) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row, blank);
        }
    }
}
