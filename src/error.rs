use core::fmt;

/// Possible errors from the SHT20 driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Sht20Error<E> {
    /// The sensor did not finish a no-hold measurement within the polling budget.
    Timeout,
    /// The CRC byte sent by the sensor does not match the received data.
    ChecksumMismatch,
    /// Error from the underlying I2C bus.
    I2c(E),
}

impl<E> From<E> for Sht20Error<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}

impl<E: fmt::Debug> fmt::Display for Sht20Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out waiting for measurement"),
            Self::ChecksumMismatch => f.write_str("checksum mismatch"),
            Self::I2c(e) => write!(f, "i2c error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Sht20Error<E> {}
