//! Shadow-buffered driver for ISSI IS31FL3731 and IS31FL3733 LED matrix
//! controllers driving RGB LEDs, as found on keyboard backlight boards.
//!
//! A board is described by a [`BoardConfig`]: the 7-bit address of each chip
//! and a static table of [`LedDescriptor`]s that say which chip, submatrix
//! and cell drive each logical LED. [`LedMatrix`] keeps a shadow copy of
//! every chip's PWM and LED control registers. Color changes only touch the
//! shadows and mark the chip dirty; `update_pwm_buffers` and
//! `update_led_control_registers` send what changed.
//!
//! ```ignore
//! let addresses = [Is31fl3731::ADDRESS_GND, Is31fl3731::ADDRESS_SDA];
//! let matrix = LedMatrix::<_, Is31fl3731, _, _, 2>::new_with_i2c_bus(
//!     i2c,
//!     delay,
//!     BoardConfig::new(addresses, &LEDS),
//!     DriverConfig::default(),
//! )?;
//! let mut matrix = matrix.init().map_err(|(_, error)| error)?;
//!
//! matrix.set_led_control_register_all(true, true, true);
//! matrix.set_color(0, 255, 0, 0);
//! matrix.flush()?;
//! ```
//!
//! # Features
//! * `log`: route driver logs through the `log` crate
//! * `defmt`: route driver logs through `defmt` and derive `defmt::Format`
//!   on public types

#![no_std]

mod macros;

pub mod chip;
mod config;
mod device;
mod driver;
mod error;
mod i2c;
mod init;
mod led;
pub mod mapping;
mod protocol;
mod state;

#[cfg(test)]
mod test_utils;

pub use chip::{
    AddrPin, ChipProfile, InitStep, Is31fl3731, Is31fl3733, PageUnlock, Variant,
};
pub use config::{BoardConfig, ControlRefresh, DriverConfig, RetryPolicy};
pub use device::Transport;
pub use driver::{InitState, LedMatrix, Operational, Uninitialized};
pub use error::DriverError;
pub use i2c::I2cTransport;
pub use init::InitPhase;
pub use led::{LedDescriptor, MatrixPosition, Point};
pub use mapping::{
    control_bits, pwm_registers, Channel, ControlBit, ControlBits, PwmRegisters,
    Submatrix, CONTROL_INDEX_COUNT,
};
pub use protocol::{CHUNK_COUNT, CHUNK_LEN};
pub use state::{CONTROL_REGISTER_COUNT, PWM_REGISTER_COUNT};
