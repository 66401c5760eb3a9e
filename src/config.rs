use crate::led::LedDescriptor;

/// How often a failed bus frame is retried before surfacing an error.
///
/// Applies to single register writes and bulk PWM chunks alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Total attempts per frame, including the first. Zero counts as one.
    pub max_attempts: u8,
    /// Pause between attempts, in microseconds.
    pub backoff_us: u32,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u8, backoff_us: u32) -> Self {
        Self {
            max_attempts,
            backoff_us,
        }
    }

    pub const fn single_shot() -> Self {
        Self::new(1, 0)
    }

    pub(crate) fn attempts(&self) -> u8 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 100)
    }
}

/// When `update_led_control_registers` touches the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlRefresh {
    /// Only after a control bit changed; the flag is cleared on success.
    #[default]
    WhenDirty,
    /// On every call, restoring control state after a chip glitch or reset.
    EveryFlush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    pub retry: RetryPolicy,
    pub control_refresh: ControlRefresh,
    /// Pause after forcing software shutdown during init.
    pub shutdown_settle_ms: u32,
    /// Global current control value, for chips that have one.
    pub global_current: u8,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            control_refresh: ControlRefresh::default(),
            shutdown_settle_ms: 10,
            global_current: 0xff,
        }
    }
}

/// Wiring of one board: chip addresses and the LED descriptor table.
#[derive(Debug, Clone, Copy)]
pub struct BoardConfig<const N: usize> {
    /// 7-bit address of each chip; a descriptor's `driver` indexes this.
    pub addresses: [u8; N],
    pub leds: &'static [LedDescriptor],
}

impl<const N: usize> BoardConfig<N> {
    pub const fn new(
        addresses: [u8; N],
        leds: &'static [LedDescriptor],
    ) -> Self {
        Self { addresses, leds }
    }

    pub fn led_count(&self) -> usize {
        self.leds.len()
    }

    pub fn leds_on_chip(&self, chip: usize) -> usize {
        self.leds
            .iter()
            .filter(|led| led.driver as usize == chip)
            .count()
    }

    /// Index of the LED at a key-matrix position.
    pub fn led_at(&self, row: u8, col: u8) -> Option<usize> {
        self.leds
            .iter()
            .position(|led| led.matrix.row == row && led.matrix.col == col)
    }
}
