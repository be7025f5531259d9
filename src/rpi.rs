//! SPI transport for Raspberry Pi using the rppal crate

use crate::register::{CMD_SOFTRESET, REG_COMMAND, SPI_READ_FLAG};
use crate::transport::NfcTransport;
use rppal::gpio::OutputPin;
use rppal::spi::Spi;
use std::time::Duration;

/// Framed SPI transport over `/dev/spidev*`, same wire framing as the ESP32
/// SPI backend: writes lead with the register address, reads lead with
/// `0x80 | register` for the register remembered from the last write.
pub struct PiSpiTransport {
    spi: Spi,
    last_register: u8,
    reset_pin: Option<OutputPin>,
}

impl PiSpiTransport {
    /// Wrap a configured SPI bus (mode 0, 1 MHz works well for the CLRC663)
    pub fn new(spi: Spi) -> Self {
        Self {
            spi,
            last_register: 0,
            reset_pin: None,
        }
    }

    /// Bind a hardware reset pin. Without one, reset falls back to the
    /// SOFTRESET command.
    pub fn with_reset_pin(mut self, pin: OutputPin) -> Self {
        self.reset_pin = Some(pin);
        self
    }
}

impl NfcTransport for PiSpiTransport {
    type Error = rppal::spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if let Some(&register) = data.first() {
            self.last_register = register;
        }
        self.spi.write(data)?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        let mut tx = vec![0u8; buf.len() + 1];
        tx[0] = SPI_READ_FLAG | self.last_register;
        let mut rx = vec![0u8; buf.len() + 1];
        self.spi.transfer(&mut rx, &tx)?;
        buf.copy_from_slice(&rx[1..]);
        Ok(())
    }

    fn reset_device(&mut self) -> Result<(), Self::Error> {
        match self.reset_pin.as_mut() {
            Some(pin) => {
                pin.set_low();
                std::thread::sleep(Duration::from_millis(10));
                pin.set_high();
                std::thread::sleep(Duration::from_millis(50));
            }
            None => {
                self.write(&[REG_COMMAND, CMD_SOFTRESET])?;
                std::thread::sleep(Duration::from_millis(50));
            }
        }

        Ok(())
    }
}
