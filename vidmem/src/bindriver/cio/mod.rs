//! Byte-wide port I/O used by the cursor registers.
//!
//! The driver never issues `in`/`out` itself; it goes through `PortIo` so the
//! CRTC pair can be swapped for a recording double on the host.

/// CRTC index (control) register.
pub const CRTC_CONTROL: u16 = 0x3d4;
/// CRTC data register, reads and writes the register selected via `CRTC_CONTROL`.
pub const CRTC_DATA: u16 = 0x3d5;

pub trait PortIo {
    /// `port_byte_out`: one synchronous byte write.
    fn write_u8(&mut self, port: u16, value: u8);
    /// `port_byte_in`: one synchronous byte read.
    fn read_u8(&mut self, port: u16) -> u8;
}

#[cfg(target_arch = "x86_64")]
pub use self::hw::CrtcPorts;

#[cfg(target_arch = "x86_64")]
mod hw {
    use super::{PortIo, CRTC_CONTROL, CRTC_DATA};
    use x86_64::instructions::port::Port;

    /// The real CRTC control/data pair.
    pub struct CrtcPorts {
        control: Port<u8>,
        data: Port<u8>,
    }

    impl CrtcPorts {
        /// # Safety
        /// Only one `CrtcPorts` may be live, and the machine must actually
        /// expose a VGA compatible CRTC at `0x3d4`/`0x3d5`.
        pub const unsafe fn new() -> Self {
            Self {
                control: Port::new(CRTC_CONTROL),
                data: Port::new(CRTC_DATA),
            }
        }

        fn port(&mut self, port: u16) -> &mut Port<u8> {
            match port {
                CRTC_DATA => &mut self.data,
                _ => &mut self.control,
            }
        }
    }

    impl PortIo for CrtcPorts {
        fn write_u8(&mut self, port: u16, value: u8) {
            debug_assert!(port == CRTC_CONTROL || port == CRTC_DATA);
            unsafe { self.port(port).write(value) }
        }
        fn read_u8(&mut self, port: u16) -> u8 {
            debug_assert!(port == CRTC_CONTROL || port == CRTC_DATA);
            unsafe { self.port(port).read() }
        }
    }
}
