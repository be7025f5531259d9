//! I2C transport for ESP32 using esp-idf-svc

use crate::register::{CMD_SOFTRESET, REG_COMMAND};
use crate::transport::NfcTransport;
use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, Input, InputPin, Output, OutputPin, PinDriver};
use esp_idf_svc::hal::i2c::{self, I2cDriver};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::units::FromValueType;
use std::time::Duration;

/// Default CLRC663 I2C address
pub const DEFAULT_I2C_ADDRESS: u8 = 0x28;

/// Addressed I2C transport. Register selection rides on the bus transaction
/// ordering: a write leaves the chip's register pointer on the written
/// register, and the following read continues from there.
pub struct I2cTransport<'a> {
    i2c: I2cDriver<'a>,
    address: u8,
    reset_pin: Option<PinDriver<'a, AnyOutputPin, Output>>,
    irq_pin: Option<PinDriver<'a, AnyIOPin, Input>>,
}

impl<'a> I2cTransport<'a> {
    pub fn new(
        i2c: impl Peripheral<P = impl i2c::I2c> + 'a,
        sda: impl Peripheral<P = impl InputPin + OutputPin> + 'a,
        scl: impl Peripheral<P = impl InputPin + OutputPin> + 'a,
        address: u8,
    ) -> Result<Self, esp_idf_svc::sys::EspError> {
        let config = i2c::config::Config::new().baudrate(400.kHz().into());
        let i2c = I2cDriver::new(i2c, sda, scl, &config)?;

        Ok(Self {
            i2c,
            address,
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

impl NfcTransport for I2cTransport<'_> {
    type Error = esp_idf_svc::sys::EspError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, data, BLOCK)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(self.address, buf, BLOCK)
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
                self.i2c
                    .write(self.address, &[REG_COMMAND, CMD_SOFTRESET], BLOCK)?;
                std::thread::sleep(Duration::from_millis(50));
            }
        }

        Ok(())
    }
}
