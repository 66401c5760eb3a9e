use super::{ChipProfile, InitStep, PageUnlock};
use crate::mapping::CONTROL_INDEX_COUNT;

const COMMAND_WRITE_LOCK_REGISTER: u8 = 0xfe;
const COMMAND_WRITE_UNLOCK: u8 = 0xc5;

const PAGE_LED_CONTROL: u8 = 0x00;
const PAGE_PWM: u8 = 0x01;
const PAGE_AUTO_BREATH_MODE: u8 = 0x02;
const PAGE_FUNCTION: u8 = 0x03;

const CONFIGURATION_REGISTER: u8 = 0x00;
const GCC_REGISTER: u8 = 0x01;

const CONFIGURATION_SOFTWARE_SHUTDOWN: u8 = 0b0000_0000;
// PWM mode (auto breath off), normal operation
const CONFIGURATION_NORMAL_OPERATION: u8 = 0b0000_0001;

const LED_CONTROL_LAST: u8 = 0x17;
const PWM_LAST: u8 = 0xbf;
const AUTO_BREATH_MODE_LAST: u8 = 0xbf;

/// Encoding of an ADDR pin strap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddrPin {
    Gnd = 0b00,
    Scl = 0b01,
    Sda = 0b10,
    Vcc = 0b11,
}

/// IS31FL3733: 12 x 16 matrix behind four write-locked pages.
///
/// The driver addresses SW1-SW9, which gives the same 144 PWM register and
/// 18 control byte layout as the IS31FL3731: submatrix A sits on CS1-CS8,
/// submatrix B on CS9-CS16.
pub struct Is31fl3733;

impl Is31fl3733 {
    /// Device address for the given ADDR2/ADDR1 pin straps.
    pub const fn address(addr2: AddrPin, addr1: AddrPin) -> u8 {
        0b101_0000 | (addr2 as u8) << 2 | addr1 as u8
    }
}

impl ChipProfile for Is31fl3733 {
    const NAME: &'static str = "IS31FL3733";

    const PAGE_UNLOCK: Option<PageUnlock> = Some(PageUnlock {
        register: COMMAND_WRITE_LOCK_REGISTER,
        key: COMMAND_WRITE_UNLOCK,
    });

    const CONTROL_PAGE: u8 = PAGE_LED_CONTROL;
    const PWM_PAGE: u8 = PAGE_PWM;
    const PWM_BASE: u8 = 0x00;

    #[rustfmt::skip]
    const PWM_MAP: [[u8; 3]; CONTROL_INDEX_COUNT] = [
        [0x10, 0x20, 0x30],
        [0x00, 0x21, 0x31],
        [0x01, 0x11, 0x32],
        [0x02, 0x12, 0x22],
        [0x03, 0x13, 0x23],
        [0x04, 0x14, 0x24],
        [0x05, 0x15, 0x25],
        [0x06, 0x16, 0x26],
        [0x07, 0x17, 0x27],

        [0x80, 0x70, 0x60],
        [0x81, 0x71, 0x61],
        [0x82, 0x72, 0x62],
        [0x83, 0x73, 0x63],
        [0x84, 0x74, 0x64],
        [0x85, 0x75, 0x65],
        [0x86, 0x76, 0x55],
        [0x87, 0x66, 0x56],
        [0x77, 0x67, 0x57],
    ];
    const SUBMATRIX_B_OFFSET: u8 = 8;

    const INIT_SHUTDOWN: &'static [InitStep] = &[
        InitStep::SelectPage(PAGE_FUNCTION),
        InitStep::Write {
            register: CONFIGURATION_REGISTER,
            value: CONFIGURATION_SOFTWARE_SHUTDOWN,
        },
        InitStep::Settle,
    ];

    const INIT_CONFIGURE: &'static [InitStep] = &[InitStep::GlobalCurrent {
        register: GCC_REGISTER,
    }];

    const INIT_CLEAR: &'static [InitStep] = &[
        InitStep::SelectPage(PAGE_LED_CONTROL),
        InitStep::Clear {
            first: 0x00,
            last: LED_CONTROL_LAST,
        },
        InitStep::SelectPage(PAGE_PWM),
        InitStep::Clear {
            first: 0x00,
            last: PWM_LAST,
        },
        InitStep::SelectPage(PAGE_AUTO_BREATH_MODE),
        InitStep::Clear {
            first: 0x00,
            last: AUTO_BREATH_MODE_LAST,
        },
    ];

    const INIT_ENABLE: &'static [InitStep] = &[
        InitStep::SelectPage(PAGE_FUNCTION),
        InitStep::Write {
            register: CONFIGURATION_REGISTER,
            value: CONFIGURATION_NORMAL_OPERATION,
        },
    ];
}
