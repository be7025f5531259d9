//! SPI transport for ESP32 using esp-idf-svc

use crate::register::{CMD_SOFTRESET, REG_COMMAND, SPI_READ_FLAG};
use crate::transport::NfcTransport;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, Input, InputPin, Output, OutputPin, PinDriver};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::spi::{self, SpiAnyPins, SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_svc::hal::units::FromValueType;
use std::time::Duration;

/// Framed SPI transport. Writes send the register address followed by the
/// payload; reads send `0x80 | register` and clock the data bytes out, with
/// chip select handled per transaction by the SPI driver.
///
/// The chip has no register pointer on SPI, so the adapter remembers the
/// register selected by the most recent write and frames reads with it.
pub struct SpiTransport<'a> {
    spi: SpiDeviceDriver<'a, SpiDriver<'a>>,
    last_register: u8,
    reset_pin: Option<PinDriver<'a, AnyOutputPin, Output>>,
    irq_pin: Option<PinDriver<'a, AnyIOPin, Input>>,
}

impl<'a> SpiTransport<'a> {
    pub fn new(
        spi: impl Peripheral<P = impl SpiAnyPins> + 'a,
        sclk: impl Peripheral<P = impl OutputPin> + 'a,
        sdo: impl Peripheral<P = impl OutputPin> + 'a,
        sdi: impl Peripheral<P = impl InputPin> + 'a,
        cs: impl Peripheral<P = impl OutputPin> + 'a,
    ) -> Result<Self, esp_idf_svc::sys::EspError> {
        let driver = SpiDriver::new(spi, sclk, sdo, Some(sdi), &SpiDriverConfig::new())?;
        // SPI mode 0 (the driver default), 1 MHz
        let config = spi::config::Config::new().baudrate(1.MHz().into());
        let spi = SpiDeviceDriver::new(driver, Some(cs), &config)?;

        Ok(Self {
            spi,
            last_register: 0,
            reset_pin: None,
            irq_pin: None,
        })
    }

    /// Bind a hardware reset pin. Without one, reset falls back to the
    /// SOFTRESET command.
    pub fn with_reset_pin(mut self, pin: PinDriver<'a, AnyOutputPin, Output>) -> Self {
        self.reset_pin = Some(pin);
        self
    }

    /// Bind the chip's IRQ line
    pub fn with_irq_pin(mut self, pin: PinDriver<'a, AnyIOPin, Input>) -> Self {
        self.irq_pin = Some(pin);
        self
    }

    /// Level of the IRQ line (active low); false when no IRQ pin is bound
    pub fn irq_asserted(&self) -> bool {
        self.irq_pin.as_ref().is_some_and(|pin| pin.is_low())
    }
}

impl NfcTransport for SpiTransport<'_> {
    type Error = esp_idf_svc::sys::EspError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if let Some(&register) = data.first() {
            self.last_register = register;
        }
        self.spi.write(data)
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
                pin.set_low()?;
                std::thread::sleep(Duration::from_millis(10));
                pin.set_high()?;
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
