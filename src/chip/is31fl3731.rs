use super::{ChipProfile, InitStep, PageUnlock};
use crate::mapping::CONTROL_INDEX_COUNT;

const BANK_FRAME_0: u8 = 0x00;
const BANK_FUNCTION: u8 = 0x0b;

const CONFIG_REGISTER: u8 = 0x00;
const CONFIG_PICTURE_MODE: u8 = 0x00;
const PICTURE_FRAME_REGISTER: u8 = 0x01;
const AUDIO_SYNC_REGISTER: u8 = 0x06;
const SHUTDOWN_REGISTER: u8 = 0x0a;
const SHUTDOWN_ENABLE: u8 = 0x00;
const SHUTDOWN_DISABLE: u8 = 0x01;

const CONTROL_FIRST: u8 = 0x00;
const CONTROL_LAST: u8 = 0x11;
const BLINK_FIRST: u8 = 0x12;
const BLINK_LAST: u8 = 0x23;
const PWM_FIRST: u8 = 0x24;
const PWM_LAST: u8 = 0xb3;

/// IS31FL3731: 144 LED matrix, eight frames plus a function bank.
///
/// All runtime traffic goes to frame 0, which holds the control, blink and
/// PWM registers, so no page switching happens after init.
pub struct Is31fl3731;

impl Is31fl3731 {
    /// Device address with AD tied to GND.
    pub const ADDRESS_GND: u8 = 0b111_0100;
    /// Device address with AD tied to SCL.
    pub const ADDRESS_SCL: u8 = 0b111_0101;
    /// Device address with AD tied to SDA.
    pub const ADDRESS_SDA: u8 = 0b111_0110;
    /// Device address with AD tied to VCC.
    pub const ADDRESS_VCC: u8 = 0b111_0111;
}

impl ChipProfile for Is31fl3731 {
    const NAME: &'static str = "IS31FL3731";

    const PAGE_UNLOCK: Option<PageUnlock> = None;

    const CONTROL_PAGE: u8 = BANK_FRAME_0;
    const PWM_PAGE: u8 = BANK_FRAME_0;
    const PWM_BASE: u8 = PWM_FIRST;

    #[rustfmt::skip]
    const PWM_MAP: [[u8; 3]; CONTROL_INDEX_COUNT] = [
        [0x34, 0x44, 0x54],
        [0x24, 0x45, 0x55],
        [0x25, 0x35, 0x56],
        [0x26, 0x36, 0x46],
        [0x27, 0x37, 0x47],
        [0x28, 0x38, 0x48],
        [0x29, 0x39, 0x49],
        [0x2a, 0x3a, 0x4a],
        [0x2b, 0x3b, 0x4b],

        [0xa4, 0x94, 0x84],
        [0xa5, 0x95, 0x85],
        [0xa6, 0x96, 0x86],
        [0xa7, 0x97, 0x87],
        [0xa8, 0x98, 0x88],
        [0xa9, 0x99, 0x89],
        [0xaa, 0x9a, 0x79],
        [0xab, 0x8a, 0x7a],
        [0x9b, 0x8b, 0x7b],
    ];
    const SUBMATRIX_B_OFFSET: u8 = 8;

    const INIT_SHUTDOWN: &'static [InitStep] = &[
        InitStep::SelectPage(BANK_FUNCTION),
        InitStep::Write {
            register: SHUTDOWN_REGISTER,
            value: SHUTDOWN_ENABLE,
        },
        InitStep::Settle,
    ];

    const INIT_CONFIGURE: &'static [InitStep] = &[
        InitStep::Write {
            register: CONFIG_REGISTER,
            value: CONFIG_PICTURE_MODE,
        },
        InitStep::Write {
            register: PICTURE_FRAME_REGISTER,
            value: BANK_FRAME_0,
        },
        InitStep::Write {
            register: AUDIO_SYNC_REGISTER,
            value: 0x00,
        },
    ];

    const INIT_CLEAR: &'static [InitStep] = &[
        InitStep::SelectPage(BANK_FRAME_0),
        InitStep::Clear {
            first: CONTROL_FIRST,
            last: CONTROL_LAST,
        },
        InitStep::Clear {
            first: BLINK_FIRST,
            last: BLINK_LAST,
        },
        InitStep::Clear {
            first: PWM_FIRST,
            last: PWM_LAST,
        },
    ];

    const INIT_ENABLE: &'static [InitStep] = &[
        InitStep::SelectPage(BANK_FUNCTION),
        InitStep::Write {
            register: SHUTDOWN_REGISTER,
            value: SHUTDOWN_DISABLE,
        },
    ];
}
