use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;

use crate::chip::ChipProfile;
use crate::config::{BoardConfig, ControlRefresh, DriverConfig};
use crate::device::Transport;
use crate::error::DriverError;
use crate::init::InitPhase;
use crate::led::LedDescriptor;
use crate::macros::{debug, trace};
use crate::mapping::{control_bits, Channel, CONTROL_INDEX_COUNT};
use crate::protocol::RegisterBus;
use crate::state::{ChipState, CONTROL_REGISTER_COUNT, PWM_REGISTER_COUNT};

pub trait InitState {}

/// Constructed, chips not yet brought up. Only init is available.
#[derive(Debug)]
pub struct Uninitialized;
/// Every chip finished its power-up sequence; color and flush calls are
/// available.
#[derive(Debug)]
pub struct Operational;

impl InitState for Uninitialized {}
impl InitState for Operational {}

/// One board's worth of LED driver chips of the same variant `P`, sharing
/// the transport `T`.
///
/// Color and control calls only touch in-memory shadow buffers; nothing is
/// sent until [`update_pwm_buffers`](Self::update_pwm_buffers) or
/// [`update_led_control_registers`](Self::update_led_control_registers) is
/// called, and then only for chips with pending changes. Any number of
/// `set_color` calls between two flushes cost one bulk transfer per chip.
///
/// # Example
///
/// ```ignore
/// use is31fl37xx::{BoardConfig, DriverConfig, Is31fl3731, LedMatrix};
///
/// let addresses = [Is31fl3731::ADDRESS_GND, Is31fl3731::ADDRESS_SDA];
/// let board = BoardConfig::new(addresses, &LEDS);
/// let matrix = LedMatrix::<_, Is31fl3731, _, _, 2>::new_with_i2c_bus(
///     i2c,
///     delay,
///     board,
///     DriverConfig::default(),
/// )?;
/// let mut matrix = matrix.init().map_err(|(_, error)| error)?;
///
/// loop {
///     matrix.set_color(0, 255, 0, 0);
///     matrix.update_pwm_buffers()?;
/// }
/// ```
pub struct LedMatrix<T, P, D, S, const N: usize> {
    pub(crate) bus: RegisterBus<T, D>,
    pub(crate) board: BoardConfig<N>,
    pub(crate) config: DriverConfig,
    pub(crate) chips: [ChipState; N],
    _phantom: PhantomData<(P, S)>,
}

// General implementation
impl<T, P, D, S: InitState, const N: usize> LedMatrix<T, P, D, S, N> {
    pub fn board(&self) -> &BoardConfig<N> {
        &self.board
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        self.bus.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.bus.transport_mut()
    }

    /// Give back the transport and delay.
    pub fn release(self) -> (T, D) {
        self.bus.release()
    }

    /// Shadow PWM registers of `chip`, as they will be sent on the next
    /// flush.
    pub fn pwm_buffer(&self, chip: usize) -> Option<&[u8; PWM_REGISTER_COUNT]> {
        self.chips.get(chip).map(|state| &state.pwm)
    }

    /// Shadow LED control registers of `chip`.
    pub fn control_registers(
        &self,
        chip: usize,
    ) -> Option<&[u8; CONTROL_REGISTER_COUNT]> {
        self.chips.get(chip).map(|state| &state.control)
    }

    pub fn is_pwm_dirty(&self, chip: usize) -> bool {
        self.chips.get(chip).is_some_and(|state| state.pwm_dirty)
    }

    pub fn is_control_dirty(&self, chip: usize) -> bool {
        self.chips.get(chip).is_some_and(|state| state.control_dirty)
    }

    pub fn init_phase(&self, chip: usize) -> Option<InitPhase> {
        self.chips.get(chip).map(|state| state.phase)
    }

    pub(crate) fn into_state<S2: InitState>(self) -> LedMatrix<T, P, D, S2, N> {
        LedMatrix {
            bus: self.bus,
            board: self.board,
            config: self.config,
            chips: self.chips,
            _phantom: PhantomData,
        }
    }

    fn led<I: TryInto<usize>>(&self, index: I) -> Option<LedDescriptor> {
        let index = index.try_into().ok()?;
        self.board.leds.get(index).copied()
    }
}

impl<T: Transport, P: ChipProfile, D: DelayNs, S: InitState, const N: usize>
    LedMatrix<T, P, D, S, N>
{
    /// Select `page` on `chip`, unless it already is. The tracked page is
    /// forgotten if the select doesn't go through.
    pub(crate) fn select_page(
        &mut self,
        chip: usize,
        page: u8,
    ) -> Result<(), DriverError<T::Error>> {
        if self.chips[chip].page == Some(page) {
            return Ok(());
        }

        let address = self.board.addresses[chip];
        self.chips[chip].page = None;

        if let Some(unlock) = P::PAGE_UNLOCK {
            self.bus.write_register(address, unlock.register, unlock.key)?;
        }
        self.bus.write_register(address, P::COMMAND_REGISTER, page)?;

        self.chips[chip].page = Some(page);
        Ok(())
    }
}

impl<T: Transport, P: ChipProfile, D: DelayNs, const N: usize>
    LedMatrix<T, P, D, Uninitialized, N>
{
    /// Create a driver for a board. No bus traffic happens until
    /// [`init`](Self::init).
    ///
    /// # Errors
    /// * [`DriverError::InvalidAddress`] if an address doesn't fit in 7 bits
    /// * [`DriverError::InvalidDescriptor`] if an LED names a chip the board
    ///   doesn't have or a control index outside `0..18`
    pub fn new(
        transport: T,
        delay: D,
        board: BoardConfig<N>,
        config: DriverConfig,
    ) -> Result<Self, DriverError<T::Error>> {
        if let Some(&address) = board.addresses.iter().find(|&&a| a > 0x7f) {
            return Err(DriverError::InvalidAddress(address));
        }

        if let Some(index) = board.leds.iter().position(|led| {
            led.driver as usize >= N
                || led.control_index as usize >= CONTROL_INDEX_COUNT
        }) {
            return Err(DriverError::InvalidDescriptor { index });
        }

        debug!(
            "{} matrix: {} chips, {} LEDs",
            P::NAME,
            N,
            board.led_count()
        );

        Ok(Self {
            bus: RegisterBus::new(transport, delay, config.retry),
            board,
            config,
            chips: core::array::from_fn(|_| ChipState::default()),
            _phantom: PhantomData,
        })
    }
}

impl<T: Transport, P: ChipProfile, D: DelayNs, const N: usize>
    LedMatrix<T, P, D, Operational, N>
{
    /// Set the color of one LED in the shadow buffer.
    ///
    /// Indices outside the board (including negative ones) are ignored, so
    /// effects code can compute indices without bounds checks.
    pub fn set_color<I: TryInto<usize>>(
        &mut self,
        index: I,
        red: u8,
        green: u8,
        blue: u8,
    ) {
        let Some(led) = self.led(index) else {
            return;
        };
        let Some(registers) =
            P::pwm_registers(led.submatrix, led.control_index)
        else {
            return;
        };

        let state = &mut self.chips[led.driver as usize];
        let values = [red, green, blue];
        for (channel, value) in Channel::ALL.into_iter().zip(values) {
            let register = registers.get(channel);
            let offset = register.wrapping_sub(P::PWM_BASE) as usize;
            if let Some(slot) = state.pwm.get_mut(offset) {
                *slot = value;
            }
        }
        state.pwm_dirty = true;
    }

    pub fn set_color_all(&mut self, red: u8, green: u8, blue: u8) {
        for index in 0..self.board.led_count() {
            self.set_color(index, red, green, blue);
        }
    }

    /// Set the on/off bits of one LED's channels in the shadow control
    /// registers. Out-of-range indices are ignored.
    pub fn set_led_control_register<I: TryInto<usize>>(
        &mut self,
        index: I,
        red: bool,
        green: bool,
        blue: bool,
    ) {
        let Some(led) = self.led(index) else {
            return;
        };
        let Some(bits) = control_bits(led.control_index) else {
            return;
        };

        let state = &mut self.chips[led.driver as usize];
        for (channel, on) in Channel::ALL.into_iter().zip([red, green, blue]) {
            let bit = bits.get(channel);
            let offset = bit.offset(led.submatrix);
            if let Some(byte) = state.control.get_mut(offset) {
                if on {
                    *byte |= bit.mask();
                } else {
                    *byte &= !bit.mask();
                }
            }
        }
        state.control_dirty = true;
    }

    pub fn set_led_control_register_all(
        &mut self,
        red: bool,
        green: bool,
        blue: bool,
    ) {
        for index in 0..self.board.led_count() {
            self.set_led_control_register(index, red, green, blue);
        }
    }

    /// Send the PWM shadow buffer of every chip with pending changes.
    ///
    /// A chip that fails keeps its pending flag and is retried on the next
    /// call; the remaining chips are still flushed. Chips that are not
    /// [`InitPhase::Operational`], after a failed
    /// [`init_chip`](Self::init_chip), are skipped and keep their flag.
    ///
    /// # Errors
    /// The first [`DriverError::Bus`] encountered.
    pub fn update_pwm_buffers(&mut self) -> Result<(), DriverError<T::Error>> {
        let mut result = Ok(());

        for chip in 0..N {
            let state = &self.chips[chip];
            if !state.pwm_dirty || !state.is_operational() {
                continue;
            }

            match self.write_pwm_buffer(chip) {
                Ok(()) => self.chips[chip].pwm_dirty = false,
                Err(error) => {
                    if result.is_ok() {
                        result = Err(error);
                    }
                }
            }
        }

        result
    }

    /// Send the LED control registers, one register write each.
    ///
    /// With [`ControlRefresh::WhenDirty`] only chips with pending changes
    /// are written; with [`ControlRefresh::EveryFlush`] every chip is.
    /// Failures and non-operational chips are handled as in
    /// [`update_pwm_buffers`](Self::update_pwm_buffers).
    pub fn update_led_control_registers(
        &mut self,
    ) -> Result<(), DriverError<T::Error>> {
        let mut result = Ok(());
        let every_flush =
            self.config.control_refresh == ControlRefresh::EveryFlush;

        for chip in 0..N {
            let state = &self.chips[chip];
            if !(state.control_dirty || every_flush)
                || !state.is_operational()
            {
                continue;
            }

            match self.write_control_registers(chip) {
                Ok(()) => self.chips[chip].control_dirty = false,
                Err(error) => {
                    if result.is_ok() {
                        result = Err(error);
                    }
                }
            }
        }

        result
    }

    /// PWM buffers, then control registers.
    pub fn flush(&mut self) -> Result<(), DriverError<T::Error>> {
        let pwm = self.update_pwm_buffers();
        let control = self.update_led_control_registers();
        pwm.and(control)
    }

    fn write_pwm_buffer(
        &mut self,
        chip: usize,
    ) -> Result<(), DriverError<T::Error>> {
        self.select_page(chip, P::PWM_PAGE)?;

        let address = self.board.addresses[chip];
        trace!("chip {:#x}: PWM buffer", address);
        self.bus
            .write_pwm_buffer(address, P::PWM_BASE, &self.chips[chip].pwm)
    }

    fn write_control_registers(
        &mut self,
        chip: usize,
    ) -> Result<(), DriverError<T::Error>> {
        // Not a bulk write: auto-increment isn't guaranteed across the
        // control block.
        self.select_page(chip, P::CONTROL_PAGE)?;

        let address = self.board.addresses[chip];
        trace!("chip {:#x}: LED control registers", address);
        for (offset, value) in self.chips[chip].control.iter().enumerate() {
            let register = P::CONTROL_BASE + offset as u8;
            self.bus.write_register(address, register, *value)?;
        }

        Ok(())
    }
}
