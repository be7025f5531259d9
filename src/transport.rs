/// Trait for CLRC663 communication backends.
/// Implement this trait for different transports (I2C, SPI, etc.)
///
/// Register addressing convention: the first byte of every `write` is the
/// register address, any following bytes are payload. A `read` returns bytes
/// from the register selected by the most recent write, so a register read is
/// always a one-byte write followed by a read.
pub trait NfcTransport {
    /// Error type for transport operations
    type Error: std::fmt::Debug;

    /// Write data to the chip; `data[0]` is the register address
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes from the currently selected register
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Reset the chip, via reset pin if one is wired up or the SOFTRESET
    /// command otherwise. Returns after the chip has had time to settle.
    fn reset_device(&mut self) -> Result<(), Self::Error>;
}
