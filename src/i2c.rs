use crate::chip::ChipProfile;
use crate::config::{BoardConfig, DriverConfig};
use crate::device::Transport;
use crate::driver::{LedMatrix, Uninitialized};
use crate::error::DriverError;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// [`Transport`] over any blocking `embedded-hal` I2C bus.
///
/// Every frame goes out as one write transaction, which is what lets the
/// chips auto-increment through a bulk PWM chunk.
pub struct I2cTransport<BUS: I2c> {
    i2c: BUS,
}

impl<BUS: I2c> I2cTransport<BUS> {
    pub fn new(i2c: BUS) -> Self {
        Self { i2c }
    }

    pub fn inner(&self) -> &BUS {
        &self.i2c
    }

    pub fn inner_mut(&mut self) -> &mut BUS {
        &mut self.i2c
    }

    pub fn into_inner(self) -> BUS {
        self.i2c
    }
}

impl<BUS: I2c> Transport for I2cTransport<BUS> {
    type Error = BUS::Error;

    fn transmit(
        &mut self,
        address: u8,
        frame: &[u8],
    ) -> Result<(), BUS::Error> {
        self.i2c.write(address, frame)
    }
}

impl<BUS: I2c, P: ChipProfile, D: DelayNs, const N: usize>
    LedMatrix<I2cTransport<BUS>, P, D, Uninitialized, N>
{
    pub fn new_with_i2c_bus(
        i2c: BUS,
        delay: D,
        board: BoardConfig<N>,
        config: DriverConfig,
    ) -> Result<Self, DriverError<BUS::Error>> {
        Self::new(I2cTransport::new(i2c), delay, board, config)
    }
}
