use embedded_hal::{
    delay::DelayNs,
    i2c::{Error as I2cError, ErrorKind, I2c},
};

use crate::error::Sht20Error;
use crate::register::{
    self, DEFAULT_ADDRESS, READ_USER_REG, Resolution, SOFT_RESET, StatusFlags,
    TRIGGER_HUMD_MEASURE_HOLD, TRIGGER_HUMD_MEASURE_NOHOLD, TRIGGER_TEMP_MEASURE_HOLD,
    TRIGGER_TEMP_MEASURE_NOHOLD, WRITE_USER_REG,
};

/// Number of read attempts before a no-hold measurement gives up.
const MAX_POLL_ATTEMPTS: u8 = 10;

/// Wait between two no-hold read attempts, in milliseconds.
const POLL_INTERVAL_MS: u32 = 10;

/// Time the sensor needs to come back up after a soft reset, in milliseconds.
const SOFT_RESET_MS: u32 = 15;

/// The two least significant bits of a measurement carry status, not data.
const STATUS_BITS_MASK: u16 = 0xFFFC;

/// Driver for the SHT20 temperature and humidity sensor.
pub struct Sht20<I2C> {
    i2c: I2C,
    address: u8,
}

/// Converts a raw humidity value into percent relative humidity.
///
/// No clamping is done: values slightly outside `0..=100` are passed through.
pub fn humidity_from_raw(raw: u16) -> f32 {
    raw as f32 * (125.0 / 65536.0) - 6.0
}

/// Converts a raw temperature value into degrees Celsius.
pub fn temperature_from_raw(raw: u16) -> f32 {
    raw as f32 * (175.72 / 65536.0) - 46.85
}

impl<I2C, E> Sht20<I2C>
where
    I2C: I2c<Error = E>,
    E: I2cError,
{
    /// Creates a new driver for a sensor at the default address `0x40`.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates a new driver for a sensor at `address`.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C bus the sensor is connected to.
    /// * `address` - 7-bit device address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Sht20 { i2c, address }
    }

    /// Device address this driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Destroys the driver and returns the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Reads the relative humidity in percent.
    ///
    /// Issues a single hold-master measurement. The CRC byte is not read,
    /// see [`Sht20::read_humidity_checked`] for a validated variant.
    pub fn read_humidity(&mut self) -> Result<f32, Sht20Error<E>> {
        let raw = self.read_raw(TRIGGER_HUMD_MEASURE_HOLD)?;
        Ok(humidity_from_raw(raw))
    }

    /// Reads the temperature in degrees Celsius.
    ///
    /// Issues a single hold-master measurement without CRC validation.
    pub fn read_temperature(&mut self) -> Result<f32, Sht20Error<E>> {
        let raw = self.read_raw(TRIGGER_TEMP_MEASURE_HOLD)?;
        Ok(temperature_from_raw(raw))
    }

    /// Reads the user register and decodes its status flags.
    pub fn read_status(&mut self) -> Result<StatusFlags, Sht20Error<E>> {
        let bits = self.read_user_register()?;
        Ok(StatusFlags::from_bits(bits))
    }

    /// Reads the relative humidity and validates the CRC sent by the sensor.
    ///
    /// # Errors
    ///
    /// Returns `Sht20Error::ChecksumMismatch` if the CRC does not match.
    pub fn read_humidity_checked(&mut self) -> Result<f32, Sht20Error<E>> {
        let raw = self.read_raw_checked(TRIGGER_HUMD_MEASURE_HOLD)?;
        Ok(humidity_from_raw(raw))
    }

    /// Reads the temperature and validates the CRC sent by the sensor.
    ///
    /// # Errors
    ///
    /// Returns `Sht20Error::ChecksumMismatch` if the CRC does not match.
    pub fn read_temperature_checked(&mut self) -> Result<f32, Sht20Error<E>> {
        let raw = self.read_raw_checked(TRIGGER_TEMP_MEASURE_HOLD)?;
        Ok(temperature_from_raw(raw))
    }

    /// Measures relative humidity in no-hold mode, leaving the bus free
    /// while the sensor converts.
    ///
    /// # Errors
    ///
    /// * `Sht20Error::Timeout` if the sensor is still busy after 100 ms.
    /// * `Sht20Error::ChecksumMismatch` if the CRC does not match.
    pub fn measure_humidity_no_hold<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<f32, Sht20Error<E>> {
        let raw = self.measure_no_hold(TRIGGER_HUMD_MEASURE_NOHOLD, delay)?;
        Ok(humidity_from_raw(raw))
    }

    /// Measures temperature in no-hold mode.
    ///
    /// Fails the same way as [`Sht20::measure_humidity_no_hold`].
    pub fn measure_temperature_no_hold<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<f32, Sht20Error<E>> {
        let raw = self.measure_no_hold(TRIGGER_TEMP_MEASURE_NOHOLD, delay)?;
        Ok(temperature_from_raw(raw))
    }

    /// Reads the raw user register byte.
    pub fn read_user_register(&mut self) -> Result<u8, Sht20Error<E>> {
        let mut buf = [0; 1];
        self.read_register(READ_USER_REG, &mut buf)?;
        Ok(buf[0])
    }

    /// Overwrites the user register.
    ///
    /// Reserved bits must be written back with the value read from the
    /// device; prefer [`Sht20::set_resolution`] for changing the resolution.
    pub fn write_user_register(&mut self, value: u8) -> Result<(), Sht20Error<E>> {
        self.i2c.write(self.address, &[WRITE_USER_REG, value])?;
        Ok(())
    }

    /// Changes the measurement resolution, keeping every other bit of the
    /// user register as it is.
    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Sht20Error<E>> {
        let current = self.read_user_register()?;
        self.write_user_register(resolution.apply(current))
    }

    /// Reboots the sensor and waits until it is ready again.
    ///
    /// All user register settings except the heater bit return to their
    /// defaults.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Sht20Error<E>> {
        self.i2c.write(self.address, &[SOFT_RESET])?;
        delay.delay_ms(SOFT_RESET_MS);
        Ok(())
    }

    /// Reads a 16-bit measurement, MSB first.
    fn read_raw(&mut self, command: u8) -> Result<u16, Sht20Error<E>> {
        let mut buf = [0; 2];
        self.read_register(command, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Reads a 16-bit measurement followed by its CRC byte.
    fn read_raw_checked(&mut self, command: u8) -> Result<u16, Sht20Error<E>> {
        let mut buf = [0; 3];
        self.read_register(command, &mut buf)?;
        Self::validate(buf)
    }

    /// Triggers a no-hold measurement and polls until the sensor answers.
    ///
    /// The sensor NACKs reads while it is converting, so only
    /// `NoAcknowledge` errors are retried.
    fn measure_no_hold<D: DelayNs>(
        &mut self,
        command: u8,
        delay: &mut D,
    ) -> Result<u16, Sht20Error<E>> {
        self.i2c.write(self.address, &[command])?;

        let mut buf = [0; 3];
        for _ in 0..MAX_POLL_ATTEMPTS {
            delay.delay_ms(POLL_INTERVAL_MS);
            match self.i2c.read(self.address, &mut buf) {
                Ok(()) => return Self::validate(buf),
                Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => continue,
                Err(e) => return Err(Sht20Error::I2c(e)),
            }
        }
        Err(Sht20Error::Timeout)
    }

    /// Checks the CRC of `[msb, lsb, crc]` and strips the status bits.
    fn validate(buf: [u8; 3]) -> Result<u16, Sht20Error<E>> {
        let [msb, lsb, crc] = buf;
        if register::crc8(&[msb, lsb]) != crc {
            return Err(Sht20Error::ChecksumMismatch);
        }
        Ok(u16::from_be_bytes([msb, lsb]) & STATUS_BITS_MASK)
    }

    /// Sends `command` and reads `buf.len()` bytes back in one transaction.
    fn read_register(&mut self, command: u8, buf: &mut [u8]) -> Result<(), Sht20Error<E>> {
        self.i2c.write_read(self.address, &[command], buf)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("sht20 {=u8:#x} -> {=[u8]:#x}", command, &*buf);
        Ok(())
    }
}
