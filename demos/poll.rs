//! Prints the SHT20 status once, then humidity and temperature every second.
//!
//! Needs a Linux host with i2c-dev, e.g. a Raspberry Pi.
//!
//! ```
//! $ cargo run --example poll
//! End of battery: no
//! Heater enabled: no
//! Disable OTP reload: yes
//! Humidity : 42.8 %
//! Temperature : 23.4 C
//! ```

#[cfg(target_os = "linux")]
fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use linux_embedded_hal::I2cdev;
    use sht20_sensor::Sht20;
    use std::thread;
    use std::time::Duration;

    let i2c_bus = I2cdev::new("/dev/i2c-1")?;
    let mut sht20 = Sht20::new(i2c_bus);

    let status = sht20.read_status()?;
    println!("End of battery: {}", yes_no(status.end_of_battery));
    println!("Heater enabled: {}", yes_no(status.heater_enabled));
    println!("Disable OTP reload: {}", yes_no(status.otp_reload_disabled));

    loop {
        // A failed read only skips this cycle
        match sht20.read_humidity() {
            Ok(humidity) => println!("Humidity : {humidity:.1} %"),
            Err(e) => eprintln!("humidity read failed: {e}"),
        }
        match sht20.read_temperature() {
            Ok(temperature) => println!("Temperature : {temperature:.1} C"),
            Err(e) => eprintln!("temperature read failed: {e}"),
        }
        println!();
        thread::sleep(Duration::from_secs(1));
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("the poll demo needs Linux i2c-dev");
}
