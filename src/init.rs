//! Power-up sequencing.
//!
//! Each chip is walked through the same phases in order: forced software
//! shutdown, mode configuration, register clear, then normal operation. The
//! register writes for each phase come from the chip's [`ChipProfile`].

use embedded_hal::delay::DelayNs;

use crate::chip::{ChipProfile, InitStep};
use crate::device::Transport;
use crate::driver::{InitState, LedMatrix, Operational, Uninitialized};
use crate::error::DriverError;
use crate::macros::{debug, error, info};

/// How far a chip got through power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitPhase {
    /// Nothing written yet, or the last attempt failed before shutdown was
    /// forced.
    Unpowered,
    ShutdownForced,
    Configured,
    /// All control, blink and PWM registers are zero.
    Cleared,
    Operational,
}

impl<T: Transport, P: ChipProfile, D: DelayNs, const N: usize>
    LedMatrix<T, P, D, Uninitialized, N>
{
    /// Bring up every chip on the board, in address-table order.
    ///
    /// Leaves every chip in normal operation with all LEDs off and the PWM
    /// page selected. On failure the handle is given back together with the
    /// error so init can be retried; [`init_phase`](Self::init_phase) tells
    /// how far each chip got.
    #[allow(clippy::type_complexity)]
    pub fn init(
        mut self,
    ) -> Result<
        LedMatrix<T, P, D, Operational, N>,
        (Self, DriverError<T::Error>),
    > {
        for chip in 0..N {
            if let Err(e) = self.init_chip(chip) {
                error!(
                    "{} at {:#x}: init failed in phase {:?}",
                    P::NAME,
                    self.board.addresses[chip],
                    self.chips[chip].phase
                );
                return Err((self, e));
            }
        }

        Ok(self.into_state())
    }
}

impl<T: Transport, P: ChipProfile, D: DelayNs, S: InitState, const N: usize>
    LedMatrix<T, P, D, S, N>
{
    /// Run the power-up sequence on a single chip.
    ///
    /// Also usable on an operational matrix to recover a chip that lost
    /// power: its shadow buffers are zeroed to match the cleared device.
    /// Until a later call succeeds, flushes skip the chip.
    ///
    /// # Errors
    /// * [`DriverError::InvalidChip`] if `chip` is not on the board
    /// * [`DriverError::Bus`] if a register write failed; see
    ///   [`init_phase`](Self::init_phase) for how far the chip got
    pub fn init_chip(
        &mut self,
        chip: usize,
    ) -> Result<(), DriverError<T::Error>> {
        let Some(&address) = self.board.addresses.get(chip) else {
            return Err(DriverError::InvalidChip(chip));
        };
        // Whatever was pending was meant for the chip before it lost state
        self.chips[chip].reset_shadow();
        self.chips[chip].phase = InitPhase::Unpowered;
        self.chips[chip].page = None;

        self.run_steps(chip, P::INIT_SHUTDOWN)?;
        self.enter_phase(chip, InitPhase::ShutdownForced);

        self.run_steps(chip, P::INIT_CONFIGURE)?;
        self.enter_phase(chip, InitPhase::Configured);

        self.run_steps(chip, P::INIT_CLEAR)?;
        self.chips[chip].reset_shadow();
        self.enter_phase(chip, InitPhase::Cleared);

        self.run_steps(chip, P::INIT_ENABLE)?;
        self.select_page(chip, P::PWM_PAGE)?;
        self.enter_phase(chip, InitPhase::Operational);

        info!("{} at {:#x} ready", P::NAME, address);
        Ok(())
    }

    fn enter_phase(&mut self, chip: usize, phase: InitPhase) {
        debug!("chip {:#x}: {:?}", self.board.addresses[chip], phase);
        self.chips[chip].phase = phase;
    }

    fn run_steps(
        &mut self,
        chip: usize,
        steps: &[InitStep],
    ) -> Result<(), DriverError<T::Error>> {
        let address = self.board.addresses[chip];

        for step in steps {
            match *step {
                InitStep::SelectPage(page) => self.select_page(chip, page)?,
                InitStep::Write { register, value } => {
                    self.bus.write_register(address, register, value)?
                }
                InitStep::Clear { first, last } => {
                    for register in first..=last {
                        self.bus.write_register(address, register, 0x00)?;
                    }
                }
                InitStep::Settle => {
                    self.bus.settle(self.config.shutdown_settle_ms)
                }
                InitStep::GlobalCurrent { register } => {
                    let current = self.config.global_current;
                    self.bus.write_register(address, register, current)?
                }
            }
        }

        Ok(())
    }
}
