//! Per-variant register layout, address tables and init sequences.
//!
//! The driver itself is generic over [`ChipProfile`]; everything that
//! differs between the IS31FL3731 and the IS31FL3733 lives here.

mod is31fl3731;
mod is31fl3733;

pub use is31fl3731::Is31fl3731;
pub use is31fl3733::{AddrPin, Is31fl3733};

use crate::mapping::{PwmRegisters, Submatrix, CONTROL_INDEX_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    Is31fl3731,
    Is31fl3733,
}

/// Write-once unlock that must precede every page select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageUnlock {
    pub register: u8,
    pub key: u8,
}

/// One step of a chip's power-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Select a register page through the command register.
    SelectPage(u8),
    /// Write a single register on the selected page.
    Write { register: u8, value: u8 },
    /// Zero every register in `first..=last` on the selected page.
    Clear { first: u8, last: u8 },
    /// Wait for the configured shutdown settle time.
    Settle,
    /// Write the configured global current to `register`.
    GlobalCurrent { register: u8 },
}

/// Register-level description of one chip variant.
pub trait ChipProfile {
    const NAME: &'static str;

    /// Register selecting the active page.
    const COMMAND_REGISTER: u8 = 0xfd;
    const PAGE_UNLOCK: Option<PageUnlock>;

    /// Page holding the LED on/off control registers.
    const CONTROL_PAGE: u8;
    /// First LED control register on [`Self::CONTROL_PAGE`].
    const CONTROL_BASE: u8 = 0x00;
    /// Page holding the PWM registers; left selected after init.
    const PWM_PAGE: u8;
    /// First PWM register covered by the shadow buffer.
    const PWM_BASE: u8;

    /// PWM registers of submatrix A cells, `[red, green, blue]`.
    const PWM_MAP: [[u8; 3]; CONTROL_INDEX_COUNT];
    /// Distance from a submatrix A PWM register to its submatrix B twin.
    const SUBMATRIX_B_OFFSET: u8;

    /// Select a page and force software shutdown.
    const INIT_SHUTDOWN: &'static [InitStep];
    /// Pick PWM/picture mode with audio and breathing inputs off.
    const INIT_CONFIGURE: &'static [InitStep];
    /// Zero every control, blink/ABM and PWM register.
    const INIT_CLEAR: &'static [InitStep];
    /// Leave software shutdown.
    const INIT_ENABLE: &'static [InitStep];

    fn pwm_registers(
        submatrix: Submatrix,
        control_index: u8,
    ) -> Option<PwmRegisters> {
        let row = *Self::PWM_MAP.get(control_index as usize)?;
        let registers = PwmRegisters::from_row(row);

        Some(match submatrix {
            Submatrix::A => registers,
            Submatrix::B => registers.offset(Self::SUBMATRIX_B_OFFSET),
        })
    }
}
