/// A single write transaction to one device on a shared bus.
///
/// `address` is the 7-bit device address; the bus implementation produces
/// the `address << 1 | 0` write byte on the wire. `frame` is the payload
/// that follows it, register address first.
pub trait Transport {
    type Error;

    fn transmit(
        &mut self,
        address: u8,
        frame: &[u8],
    ) -> Result<(), Self::Error>;
}

impl<T> Transport for &mut T
where
    T: Transport,
{
    type Error = T::Error;

    fn transmit(
        &mut self,
        address: u8,
        frame: &[u8],
    ) -> Result<(), Self::Error> {
        T::transmit(self, address, frame)
    }
}
