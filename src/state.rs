use crate::init::InitPhase;

/// PWM registers mirrored per chip: nine rows of sixteen, including the
/// slots no LED uses, so a row maps straight onto one bulk chunk.
pub const PWM_REGISTER_COUNT: usize = 144;
/// LED on/off control bytes mirrored per chip.
pub const CONTROL_REGISTER_COUNT: usize = 18;

/// Shadow of one chip's registers plus what we know about its bus state.
pub struct ChipState {
    /// Currently selected page, `None` when unknown.
    pub page: Option<u8>,
    pub phase: InitPhase,
    /// Indexed by `register - PWM_BASE`.
    pub pwm: [u8; PWM_REGISTER_COUNT],
    pub pwm_dirty: bool,
    pub control: [u8; CONTROL_REGISTER_COUNT],
    pub control_dirty: bool,
}

impl Default for ChipState {
    // Power-on: page unknown, everything off
    fn default() -> Self {
        Self {
            page: None,
            phase: InitPhase::Unpowered,
            pwm: [0; PWM_REGISTER_COUNT],
            pwm_dirty: false,
            control: [0; CONTROL_REGISTER_COUNT],
            control_dirty: false,
        }
    }
}

impl ChipState {
    pub fn is_operational(&self) -> bool {
        self.phase == InitPhase::Operational
    }

    /// Matches what init leaves on the device: all registers zero.
    pub fn reset_shadow(&mut self) {
        self.pwm = [0; PWM_REGISTER_COUNT];
        self.pwm_dirty = false;
        self.control = [0; CONTROL_REGISTER_COUNT];
        self.control_dirty = false;
    }
}
