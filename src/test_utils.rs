use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{
    Error, ErrorKind, ErrorType, NoAcknowledgeSource, Operation,
    SevenBitAddress,
};

/// Longest frame the drivers ever send: register byte plus a 16 byte chunk.
pub const MAX_FRAME: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeI2cError {
    Nack,
}

impl Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

pub struct Frame {
    pub address: u8,
    pub bytes: heapless::Vec<u8, MAX_FRAME>,
}

/// Records every successful write transaction, one [`Frame`] each.
pub struct FakeI2cBus<const N: usize> {
    pub frames: heapless::Vec<Frame, N>,
    pub attempts: usize,
    fail_next: usize,
    fail_after: Option<usize>,
    fail_address: Option<u8>,
}

impl<const N: usize> ErrorType for FakeI2cBus<N> {
    type Error = FakeI2cError;
}

impl<const N: usize> FakeI2cBus<N> {
    pub fn new() -> Self {
        Self {
            frames: heapless::Vec::new(),
            attempts: 0,
            fail_next: 0,
            fail_after: None,
            fail_address: None,
        }
    }

    /// Reject the next `count` transactions, whatever their address.
    pub fn fail_next(&mut self, count: usize) {
        self.fail_next = count;
    }

    /// Let `count` transactions through, then reject one.
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(count);
    }

    /// Reject every transaction to `address` until cleared.
    pub fn fail_address(&mut self, address: Option<u8>) {
        self.fail_address = address;
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.attempts = 0;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> (u8, &[u8]) {
        let frame = &self.frames[index];
        (frame.address, frame.bytes.as_slice())
    }

    /// Frames sent to one device, in order.
    pub fn frames_to(&self, address: u8) -> impl Iterator<Item = &[u8]> + '_ {
        self.frames
            .iter()
            .filter(move |frame| frame.address == address)
            .map(|frame| frame.bytes.as_slice())
    }

    /// Data bytes of every bulk chunk sent to `address`, concatenated in
    /// order. Single register writes are skipped.
    pub fn chunk_payload(&self, address: u8) -> heapless::Vec<u8, 512> {
        let mut payload = heapless::Vec::new();
        for bytes in self.frames_to(address).filter(|bytes| bytes.len() > 2) {
            payload.extend_from_slice(&bytes[1..]).unwrap();
        }
        payload
    }
}

impl<const N: usize> embedded_hal::i2c::I2c for FakeI2cBus<N> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation],
    ) -> Result<(), Self::Error> {
        self.attempts += 1;

        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(FakeI2cError::Nack);
        }
        match self.fail_after {
            Some(0) => {
                self.fail_after = None;
                return Err(FakeI2cError::Nack);
            }
            Some(count) => self.fail_after = Some(count - 1),
            None => {}
        }
        if self.fail_address == Some(address) {
            return Err(FakeI2cError::Nack);
        }

        let mut bytes = heapless::Vec::new();
        for operation in operations {
            match operation {
                Operation::Write(write) => {
                    bytes.extend_from_slice(write).unwrap();
                }
                Operation::Read(read) => {
                    read.fill(0);
                }
            }
        }

        self.frames
            .push(Frame { address, bytes })
            .map_err(|_| ())
            .expect("fake bus frame log is full");

        Ok(())
    }
}

/// Accumulates requested delays instead of sleeping.
#[derive(Default)]
pub struct FakeDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}
