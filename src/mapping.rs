//! Static lookups from an LED cell to the registers that drive it.
//!
//! Each chip multiplexes two interleaved submatrices of 18 RGB cells. A cell
//! is addressed by its submatrix and a control index in `0..18`; from that we
//! derive the three PWM registers (chip specific) and the three on/off bits in
//! the 18 byte LED control block (shared by both chips).

use crate::chip::{ChipProfile, Variant};
use crate::chip::{Is31fl3731, Is31fl3733};

/// Number of LED cells per submatrix.
pub const CONTROL_INDEX_COUNT: usize = 18;

/// One of the two interleaved LED groups on a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Submatrix {
    A,
    B,
}

impl Submatrix {
    /// Register offset from submatrix A: B's control byte is the one after A's.
    pub const fn index(self) -> u8 {
        match self {
            Submatrix::A => 0,
            Submatrix::B => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

/// PWM register addresses of one RGB cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmRegisters {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PwmRegisters {
    pub const fn get(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub(crate) const fn from_row(row: [u8; 3]) -> Self {
        Self {
            red: row[0],
            green: row[1],
            blue: row[2],
        }
    }

    pub(crate) const fn offset(self, by: u8) -> Self {
        Self {
            red: self.red + by,
            green: self.green + by,
            blue: self.blue + by,
        }
    }
}

/// Location of one on/off bit, relative to the submatrix A register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlBit {
    pub register: u8,
    pub bit: u8,
}

impl ControlBit {
    const fn new(register: u8, bit: u8) -> Self {
        Self { register, bit }
    }

    /// Byte offset into the control block for `submatrix`.
    pub const fn offset(self, submatrix: Submatrix) -> usize {
        (self.register + submatrix.index()) as usize
    }

    pub const fn mask(self) -> u8 {
        1 << self.bit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlBits {
    pub red: ControlBit,
    pub green: ControlBit,
    pub blue: ControlBit,
}

impl ControlBits {
    const fn new(red: (u8, u8), green: (u8, u8), blue: (u8, u8)) -> Self {
        Self {
            red: ControlBit::new(red.0, red.1),
            green: ControlBit::new(green.0, green.1),
            blue: ControlBit::new(blue.0, blue.1),
        }
    }

    pub const fn get(&self, channel: Channel) -> ControlBit {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }
}

// Bit layout of the submatrix A control registers (B is the next byte):
//
//  reg -  b7  b6  b5  b4  b3  b2  b1  b0
// 0x00 - R08,R07,R06,R05,R04,R03,R02,R01
// 0x02 - G08,G07,G06,G05,G04,G03,G02,R00
// 0x04 - B08,B07,B06,B05,B04,B03,G01,G00
// 0x06 -  - , - , - , - , - ,B02,B01,B00
// 0x08 -  - , - , - , - , - , - , - , -
// 0x0A - B17,B16,B15, - , - , - , - , -
// 0x0C - G17,G16,B14,B13,B12,B11,B10,B09
// 0x0E - R17,G15,G14,G13,G12,G11,G10,G09
// 0x10 - R16,R15,R14,R13,R12,R11,R10,R09
#[rustfmt::skip]
static CONTROL_BITS: [ControlBits; CONTROL_INDEX_COUNT] = [
    ControlBits::new((0x02, 0), (0x04, 0), (0x06, 0)),
    ControlBits::new((0x00, 0), (0x04, 1), (0x06, 1)),
    ControlBits::new((0x00, 1), (0x02, 1), (0x06, 2)),
    ControlBits::new((0x00, 2), (0x02, 2), (0x04, 2)),
    ControlBits::new((0x00, 3), (0x02, 3), (0x04, 3)),
    ControlBits::new((0x00, 4), (0x02, 4), (0x04, 4)),
    ControlBits::new((0x00, 5), (0x02, 5), (0x04, 5)),
    ControlBits::new((0x00, 6), (0x02, 6), (0x04, 6)),
    ControlBits::new((0x00, 7), (0x02, 7), (0x04, 7)),

    ControlBits::new((0x10, 0), (0x0e, 0), (0x0c, 0)),
    ControlBits::new((0x10, 1), (0x0e, 1), (0x0c, 1)),
    ControlBits::new((0x10, 2), (0x0e, 2), (0x0c, 2)),
    ControlBits::new((0x10, 3), (0x0e, 3), (0x0c, 3)),
    ControlBits::new((0x10, 4), (0x0e, 4), (0x0c, 4)),
    ControlBits::new((0x10, 5), (0x0e, 5), (0x0c, 5)),
    ControlBits::new((0x10, 6), (0x0e, 6), (0x0a, 5)),
    ControlBits::new((0x10, 7), (0x0c, 6), (0x0a, 6)),
    ControlBits::new((0x0e, 7), (0x0c, 7), (0x0a, 7)),
];

/// On/off bit locations for `control_index`, or `None` outside `0..18`.
pub fn control_bits(control_index: u8) -> Option<ControlBits> {
    CONTROL_BITS.get(control_index as usize).copied()
}

/// PWM registers of a cell on a given chip variant, or `None` outside
/// `0..18`.
pub fn pwm_registers(
    variant: Variant,
    submatrix: Submatrix,
    control_index: u8,
) -> Option<PwmRegisters> {
    match variant {
        Variant::Is31fl3731 => {
            Is31fl3731::pwm_registers(submatrix, control_index)
        }
        Variant::Is31fl3733 => {
            Is31fl3733::pwm_registers(submatrix, control_index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CONTROL_REGISTER_COUNT, PWM_REGISTER_COUNT};

    const VARIANTS: [(Variant, u8); 2] = [
        (Variant::Is31fl3731, Is31fl3731::PWM_BASE),
        (Variant::Is31fl3733, Is31fl3733::PWM_BASE),
    ];
    const SUBMATRICES: [Submatrix; 2] = [Submatrix::A, Submatrix::B];

    #[test]
    fn pwm_registers_cover_the_whole_domain() {
        for (variant, base) in VARIANTS {
            for submatrix in SUBMATRICES {
                for control_index in 0..CONTROL_INDEX_COUNT as u8 {
                    let registers =
                        pwm_registers(variant, submatrix, control_index)
                            .unwrap();
                    for channel in Channel::ALL {
                        let register = registers.get(channel);
                        assert!(register >= base);
                        let offset = (register - base) as usize;
                        assert!(offset < PWM_REGISTER_COUNT);
                    }
                }
            }
        }
    }

    #[test]
    fn control_bits_cover_the_whole_domain() {
        for control_index in 0..CONTROL_INDEX_COUNT as u8 {
            let bits = control_bits(control_index).unwrap();
            for submatrix in SUBMATRICES {
                for channel in Channel::ALL {
                    let bit = bits.get(channel);
                    assert!(bit.offset(submatrix) < CONTROL_REGISTER_COUNT);
                    assert!(bit.bit < 8);
                }
            }
        }
    }

    #[test]
    fn out_of_range_lookups_are_rejected() {
        assert_eq!(control_bits(18), None);
        assert_eq!(control_bits(u8::MAX), None);
        for (variant, _) in VARIANTS {
            assert_eq!(pwm_registers(variant, Submatrix::A, 18), None);
            assert_eq!(pwm_registers(variant, Submatrix::B, 200), None);
        }
    }

    #[test]
    fn control_bits_are_unique() {
        let mut seen = [0u8; CONTROL_REGISTER_COUNT];

        for submatrix in SUBMATRICES {
            for control_index in 0..CONTROL_INDEX_COUNT as u8 {
                let bits = control_bits(control_index).unwrap();
                for channel in Channel::ALL {
                    let bit = bits.get(channel);
                    let byte = &mut seen[bit.offset(submatrix)];
                    assert_eq!(*byte & bit.mask(), 0, "bit claimed twice");
                    *byte |= bit.mask();
                }
            }
        }
    }

    #[test]
    fn pwm_registers_follow_control_bit_layout() {
        // Both chips number PWM registers eight per control byte, so the
        // PWM register of a channel is base + 8 * control byte + bit.
        for (variant, base) in VARIANTS {
            for submatrix in SUBMATRICES {
                for control_index in 0..CONTROL_INDEX_COUNT as u8 {
                    let registers =
                        pwm_registers(variant, submatrix, control_index)
                            .unwrap();
                    let bits = control_bits(control_index).unwrap();
                    for channel in Channel::ALL {
                        let bit = bits.get(channel);
                        let expected = base as usize
                            + bit.offset(submatrix) * 8
                            + bit.bit as usize;
                        assert_eq!(registers.get(channel) as usize, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn submatrix_b_is_offset_from_a() {
        for (variant, _) in VARIANTS {
            for control_index in 0..CONTROL_INDEX_COUNT as u8 {
                let a = pwm_registers(variant, Submatrix::A, control_index);
                let b = pwm_registers(variant, Submatrix::B, control_index);
                let (a, b) = (a.unwrap(), b.unwrap());
                assert_eq!(b, a.offset(8));
            }
        }
    }

    #[test]
    fn known_cells() {
        assert_eq!(
            pwm_registers(Variant::Is31fl3731, Submatrix::A, 0),
            Some(PwmRegisters { red: 0x34, green: 0x44, blue: 0x54 })
        );
        assert_eq!(
            pwm_registers(Variant::Is31fl3731, Submatrix::B, 17),
            Some(PwmRegisters { red: 0xa3, green: 0x93, blue: 0x83 })
        );
        assert_eq!(
            pwm_registers(Variant::Is31fl3733, Submatrix::A, 1),
            Some(PwmRegisters { red: 0x00, green: 0x21, blue: 0x31 })
        );
        assert_eq!(
            control_bits(15).unwrap().blue,
            ControlBit { register: 0x0a, bit: 5 }
        );
    }
}
