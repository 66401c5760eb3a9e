//! Error types for the LED matrix driver.

use core::fmt;

use embedded_hal::i2c::{Error, ErrorKind};

/// Errors reported by [`LedMatrix`](crate::LedMatrix).
///
/// `E` is the error type of the underlying [`Transport`](crate::Transport).
#[derive(Debug)]
pub enum DriverError<E> {
    /// A frame could not be delivered within the configured
    /// [`RetryPolicy`](crate::RetryPolicy).
    Bus {
        /// 7-bit address of the chip that was being written.
        address: u8,
        /// First register of the failed frame.
        register: u8,
        /// Number of attempts made before giving up.
        attempts: u8,
        /// Error returned by the last attempt.
        error: E,
    },

    /// A configured device address does not fit in 7 bits.
    InvalidAddress(u8),

    /// The LED descriptor at `index` names a chip the board doesn't have,
    /// or a control index outside `0..18`.
    InvalidDescriptor { index: usize },

    /// A chip index outside the board's address list.
    InvalidChip(usize),
}

impl<E> DriverError<E> {
    /// Returns `true` if the error came from the bus rather than from
    /// board configuration.
    pub fn is_bus_error(&self) -> bool {
        matches!(self, DriverError::Bus { .. })
    }
}

impl<E: Error> Error for DriverError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            DriverError::Bus { error, .. } => error.kind(),
            _ => ErrorKind::Other,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for DriverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DriverError::Bus {
                address,
                register,
                attempts,
                error,
            } => write!(
                f,
                "bus error writing register {:#04x} on chip {:#04x} \
                 after {} attempt(s): {:?}",
                register, address, attempts, error
            ),
            DriverError::InvalidAddress(address) => {
                write!(f, "invalid 7-bit device address {:#04x}", address)
            }
            DriverError::InvalidDescriptor { index } => {
                write!(f, "invalid LED descriptor at index {}", index)
            }
            DriverError::InvalidChip(chip) => {
                write!(f, "no chip at index {}", chip)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for DriverError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DriverError::Bus {
                address,
                register,
                attempts,
                error,
            } => defmt::write!(
                f,
                "bus error writing register {=u8:#x} on chip {=u8:#x} \
                 after {=u8} attempt(s): {}",
                register,
                address,
                attempts,
                error
            ),
            DriverError::InvalidAddress(address) => {
                defmt::write!(
                    f,
                    "invalid 7-bit device address {=u8:#x}",
                    address
                )
            }
            DriverError::InvalidDescriptor { index } => {
                defmt::write!(
                    f,
                    "invalid LED descriptor at index {=usize}",
                    index
                )
            }
            DriverError::InvalidChip(chip) => {
                defmt::write!(f, "no chip at index {=usize}", chip)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeI2cError;
    use embedded_hal::i2c::NoAcknowledgeSource;

    #[test]
    fn bus_error_kind_is_forwarded() {
        let error = DriverError::Bus {
            address: 0x74,
            register: 0x24,
            attempts: 3,
            error: FakeI2cError::Nack,
        };

        assert!(error.is_bus_error());
        assert_eq!(
            error.kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        );
    }

    fn hal_kind<E: Error>(error: &E) -> ErrorKind {
        error.kind()
    }

    #[test]
    fn usable_as_a_hal_error() {
        let error: DriverError<FakeI2cError> = DriverError::Bus {
            address: 0x50,
            register: 0xfd,
            attempts: 1,
            error: FakeI2cError::Nack,
        };

        assert_eq!(
            hal_kind(&error),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        );
        let error: DriverError<FakeI2cError> = DriverError::InvalidChip(3);
        assert_eq!(hal_kind(&error), ErrorKind::Other);
    }

    #[test]
    fn configuration_errors_map_to_other() {
        let error: DriverError<FakeI2cError> =
            DriverError::InvalidAddress(0x80);

        assert!(!error.is_bus_error());
        assert_eq!(error.kind(), ErrorKind::Other);
    }
}
