//! Command codes and user-register layout of the SHT20.
//!
//! Values are taken from the Sensirion SHT20 datasheet.

/// Default 7-bit I2C address of the SHT20.
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Trigger a temperature measurement, holding the bus until it completes.
pub const TRIGGER_TEMP_MEASURE_HOLD: u8 = 0xE3;
/// Trigger a humidity measurement, holding the bus until it completes.
pub const TRIGGER_HUMD_MEASURE_HOLD: u8 = 0xE5;
/// Trigger a temperature measurement without holding the bus.
pub const TRIGGER_TEMP_MEASURE_NOHOLD: u8 = 0xF3;
/// Trigger a humidity measurement without holding the bus.
pub const TRIGGER_HUMD_MEASURE_NOHOLD: u8 = 0xF5;
pub const WRITE_USER_REG: u8 = 0xE6;
pub const READ_USER_REG: u8 = 0xE7;
pub const SOFT_RESET: u8 = 0xFE;

/// Bits 7 and 0 of the user register select the measurement resolution.
pub const USER_REGISTER_RESOLUTION_MASK: u8 = 0x81;
pub const USER_REGISTER_END_OF_BATTERY: u8 = 0x40;
pub const USER_REGISTER_HEATER_ENABLED: u8 = 0x04;
pub const USER_REGISTER_DISABLE_OTP_RELOAD: u8 = 0x02;

/// CRC-8 generator polynomial `x^8 + x^5 + x^4 + 1` (0x131) without the implicit top bit.
const CRC_POLYNOMIAL: u8 = 0x31;

/// Flags decoded from the user register.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// Supply voltage dropped below 2.25 V.
    pub end_of_battery: bool,
    /// The on-chip heater is switched on.
    pub heater_enabled: bool,
    /// Calibration data is not reloaded from OTP before each measurement.
    pub otp_reload_disabled: bool,
}

impl StatusFlags {
    /// Decodes the flags from a raw user-register byte.
    pub fn from_bits(bits: u8) -> Self {
        StatusFlags {
            end_of_battery: bits & USER_REGISTER_END_OF_BATTERY != 0,
            heater_enabled: bits & USER_REGISTER_HEATER_ENABLED != 0,
            otp_reload_disabled: bits & USER_REGISTER_DISABLE_OTP_RELOAD != 0,
        }
    }
}

/// Measurement resolution, as `RH bits / temperature bits`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Resolution {
    /// 12 bit humidity, 14 bit temperature. Power-on default.
    #[default]
    Rh12Temp14 = 0x00,
    Rh8Temp12 = 0x01,
    Rh10Temp13 = 0x80,
    Rh11Temp11 = 0x81,
}

impl Resolution {
    /// Bit pattern of this resolution inside the user register.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Returns `register` with its resolution bits replaced by this setting.
    ///
    /// Reserved bits must keep their value, so everything outside
    /// [`USER_REGISTER_RESOLUTION_MASK`] is carried over unchanged.
    pub fn apply(self, register: u8) -> u8 {
        (register & !USER_REGISTER_RESOLUTION_MASK) | self.bits()
    }
}

/// Computes the SHT2x CRC-8 (init 0x00, no reflection, no final XOR).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flags_from_bits() {
        // 0b0100_0110: bits 6, 2 and 1
        let flags = StatusFlags::from_bits(0x46);
        assert_eq!(
            flags,
            StatusFlags {
                end_of_battery: true,
                heater_enabled: true,
                otp_reload_disabled: true,
            }
        );

        // 0b0100_0100: bit 1 clear
        assert_eq!(
            StatusFlags::from_bits(0x44),
            StatusFlags {
                end_of_battery: true,
                heater_enabled: true,
                otp_reload_disabled: false,
            }
        );

        assert_eq!(StatusFlags::from_bits(0x00), StatusFlags::default());
        assert!(StatusFlags::from_bits(0x02).otp_reload_disabled);
    }

    #[test]
    fn test_status_flags_ignore_other_bits() {
        // Resolution and reserved bits only
        assert_eq!(StatusFlags::from_bits(0xB9), StatusFlags::default());
    }

    #[test]
    fn test_resolution_apply_keeps_reserved_bits() {
        // Factory default register: resolution 12/14, reserved bits 3..5 set, OTP reload disabled
        let register = 0x3A;

        assert_eq!(Resolution::Rh8Temp12.apply(register), 0x3B);
        assert_eq!(Resolution::Rh10Temp13.apply(register), 0xBA);
        assert_eq!(Resolution::Rh11Temp11.apply(register), 0xBB);
        assert_eq!(Resolution::Rh12Temp14.apply(0xBB), 0x3A);
    }

    #[test]
    fn test_crc8_datasheet_vectors() {
        assert_eq!(crc8(&[0xDC]), 0x79);
        assert_eq!(crc8(&[0x68, 0x3A]), 0x7C);
        assert_eq!(crc8(&[0x4E, 0x85]), 0x6B);
        assert_eq!(crc8(&[]), 0x00);
    }
}
