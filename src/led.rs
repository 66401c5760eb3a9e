//! Board-level description of each logical LED.

use crate::mapping::Submatrix;

/// Visual position of an LED, used by effects code, not by the register math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

/// Key-matrix position of an LED (4 bits each when packed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixPosition {
    pub row: u8,
    pub col: u8,
}

/// Where one logical LED lives in hardware.
///
/// Packed, the fields fit in three bytes: `driver` (2 bits), `submatrix`
/// (1 bit), `modifier` (1 bit), `control_index` (8 bits), matrix row and
/// column (4 bits each), plus the point.
///
/// # Example
///
/// ```
/// use is31fl37xx::{LedDescriptor, Submatrix};
///
/// static LEDS: [LedDescriptor; 2] = [
///     LedDescriptor::new(0, Submatrix::A, 0).at(0, 0).matrix(0, 0),
///     LedDescriptor::new(0, Submatrix::B, 3)
///         .at(16, 0)
///         .matrix(0, 1)
///         .modifier(),
/// ];
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedDescriptor {
    /// Index of the chip in the board's address list.
    pub driver: u8,
    pub submatrix: Submatrix,
    /// Marks LEDs under modifier keys.
    pub modifier: bool,
    /// Cell within the submatrix, `0..18`.
    pub control_index: u8,
    pub matrix: MatrixPosition,
    pub point: Point,
}

impl LedDescriptor {
    pub const fn new(
        driver: u8,
        submatrix: Submatrix,
        control_index: u8,
    ) -> Self {
        Self {
            driver,
            submatrix,
            modifier: false,
            control_index,
            matrix: MatrixPosition { row: 0, col: 0 },
            point: Point { x: 0, y: 0 },
        }
    }

    pub const fn at(mut self, x: u8, y: u8) -> Self {
        self.point = Point { x, y };
        self
    }

    pub const fn matrix(mut self, row: u8, col: u8) -> Self {
        self.matrix = MatrixPosition { row, col };
        self
    }

    pub const fn modifier(mut self) -> Self {
        self.modifier = true;
        self
    }
}
