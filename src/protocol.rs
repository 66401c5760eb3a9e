//! Register write and bulk PWM transfer, both with bounded retry.

use embedded_hal::delay::DelayNs;

use crate::config::RetryPolicy;
use crate::device::Transport;
use crate::error::DriverError;
use crate::macros::{error, warning};
use crate::state::PWM_REGISTER_COUNT;

/// Bytes per bulk chunk; the chip auto-increments the register address
/// after each data byte.
pub const CHUNK_LEN: usize = 16;
pub const CHUNK_COUNT: usize = PWM_REGISTER_COUNT / CHUNK_LEN;

/// Transport plus the delay source and retry policy used on it.
pub(crate) struct RegisterBus<T, D> {
    transport: T,
    delay: D,
    retry: RetryPolicy,
}

impl<T, D> RegisterBus<T, D> {
    pub fn new(transport: T, delay: D, retry: RetryPolicy) -> Self {
        Self {
            transport,
            delay,
            retry,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}

impl<T: Transport, D: DelayNs> RegisterBus<T, D> {
    /// Writes one register: `[register, data]` after the address byte.
    pub fn write_register(
        &mut self,
        address: u8,
        register: u8,
        data: u8,
    ) -> Result<(), DriverError<T::Error>> {
        self.transmit(address, &[register, data])
    }

    /// Writes a whole PWM shadow buffer in nine 16 byte chunks, chunk `n`
    /// starting at `base + 16 * n`. Stops at the first chunk that fails.
    pub fn write_pwm_buffer(
        &mut self,
        address: u8,
        base: u8,
        buffer: &[u8; PWM_REGISTER_COUNT],
    ) -> Result<(), DriverError<T::Error>> {
        let mut frame = [0u8; CHUNK_LEN + 1];

        for (index, chunk) in buffer.chunks_exact(CHUNK_LEN).enumerate() {
            frame[0] = base + (index * CHUNK_LEN) as u8;
            frame[1..].copy_from_slice(chunk);
            self.transmit(address, &frame)?;
        }

        Ok(())
    }

    pub fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn transmit(
        &mut self,
        address: u8,
        frame: &[u8],
    ) -> Result<(), DriverError<T::Error>> {
        let register = frame.first().copied().unwrap_or_default();
        let max_attempts = self.retry.attempts();
        let mut attempt = 1;

        loop {
            match self.transport.transmit(address, frame) {
                Ok(()) => return Ok(()),
                Err(error) if attempt >= max_attempts => {
                    error!(
                        "chip {:#x}: giving up on register {:#x} \
                         after {} attempts",
                        address,
                        register,
                        attempt
                    );
                    return Err(DriverError::Bus {
                        address,
                        register,
                        attempts: attempt,
                        error,
                    });
                }
                Err(_) => {
                    warning!(
                        "chip {:#x}: write to register {:#x} failed \
                         (attempt {}/{})",
                        address,
                        register,
                        attempt,
                        max_attempts
                    );
                    if self.retry.backoff_us > 0 {
                        self.delay.delay_us(self.retry.backoff_us);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
