use super::buffer::{CellIndex, BUFFER_HEIGHT, BUFFER_WIDTH};
use crate::bindriver::cio::{PortIo, CRTC_CONTROL, CRTC_DATA};
use core::cmp::min;

/// CRTC register holding the high byte of the cursor location.
pub const CURSOR_LOCATION_HIGH: u8 = 0x0e;
/// CRTC register holding the low byte of the cursor location.
pub const CURSOR_LOCATION_LOW: u8 = 0x0f;

/// Reads the hardware cursor. High byte first, then low byte.
///
/// Two select/read transactions back to back; a concurrent writer in between
/// tears the value.
pub fn get_cursor<P: PortIo>(ports: &mut P) -> CellIndex {
    ports.write_u8(CRTC_CONTROL, CURSOR_LOCATION_HIGH);
    let high = ports.read_u8(CRTC_DATA) as u16;
    ports.write_u8(CRTC_CONTROL, CURSOR_LOCATION_LOW);
    let low = ports.read_u8(CRTC_DATA) as u16;
    CellIndex::from_raw(high << 8 | low)
}

/// Moves the hardware cursor, saturating `row` and `col` at the last row and column.
/// Low byte goes out first, then the high byte.
pub fn set_cursor<P: PortIo>(ports: &mut P, row: usize, col: usize) {
    let clamped_row = min(row, BUFFER_HEIGHT - 1);
    let clamped_col = min(col, BUFFER_WIDTH - 1);
    if clamped_row != row || clamped_col != col {
        debug!("cursor ({}, {}) clamped to ({}, {})", row, col, clamped_row, clamped_col);
    }
    write_cursor(ports, CellIndex::of(clamped_row, clamped_col));
}

fn write_cursor<P: PortIo>(ports: &mut P, index: CellIndex) {
    let index = index.raw();
    ports.write_u8(CRTC_CONTROL, CURSOR_LOCATION_LOW);
    ports.write_u8(CRTC_DATA, index as u8);
    ports.write_u8(CRTC_CONTROL, CURSOR_LOCATION_HIGH);
    ports.write_u8(CRTC_DATA, (index >> 8) as u8);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{MockPorts, PortOp};

    #[test]
    fn set_then_get() {
        let mut ports = MockPorts::new();
        set_cursor(&mut ports, 12, 34);
        assert_eq!(get_cursor(&mut ports).coords(), (12, 34));
        assert_eq!(ports.cursor(), CellIndex::of(12, 34));
    }

    #[test]
    fn clamps_instead_of_wrapping() {
        let mut ports = MockPorts::new();
        set_cursor(&mut ports, 30, 5);
        assert_eq!(get_cursor(&mut ports).coords(), (BUFFER_HEIGHT - 1, 5));
        set_cursor(&mut ports, 3, 200);
        assert_eq!(get_cursor(&mut ports).coords(), (3, BUFFER_WIDTH - 1));
        set_cursor(&mut ports, usize::max_value(), usize::max_value());
        assert_eq!(get_cursor(&mut ports).coords(), (BUFFER_HEIGHT - 1, BUFFER_WIDTH - 1));
    }

    #[test]
    fn register_order() {
        let mut ports = MockPorts::new();
        // 24 * 80 + 79 = 1999 = 0x07cf
        set_cursor(&mut ports, 24, 79);
        assert_eq!(
            ports.journal,
            vec![
                PortOp::Out(CRTC_CONTROL, 0x0f),
                PortOp::Out(CRTC_DATA, 0xcf),
                PortOp::Out(CRTC_CONTROL, 0x0e),
                PortOp::Out(CRTC_DATA, 0x07),
            ],
            "low byte must be written before high byte"
        );
        ports.journal.clear();
        get_cursor(&mut ports);
        assert_eq!(
            ports.journal,
            vec![
                PortOp::Out(CRTC_CONTROL, 0x0e),
                PortOp::In(CRTC_DATA, 0x07),
                PortOp::Out(CRTC_CONTROL, 0x0f),
                PortOp::In(CRTC_DATA, 0xcf),
            ],
            "high byte must be read before low byte"
        );
    }
}
