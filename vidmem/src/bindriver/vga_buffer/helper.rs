
/// Attribute used for blanked cells until `clear_screen_color` says otherwise.
pub const DEFAULT_CLEAR_COLOR: ColorCode = ColorCode(0x0f);

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// Attribute byte of a cell: background in the high nibble, foreground in the low one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
    pub const fn from_raw(attribute: u8) -> ColorCode {
        ColorCode(attribute)
    }
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl From<u8> for ColorCode {
    fn from(attribute: u8) -> Self {
        ColorCode(attribute)
    }
}
