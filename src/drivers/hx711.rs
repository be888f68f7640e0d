use embassy_time::Timer;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, Output};

/// Holding SCK high for longer than 60us drops the chip into low power
const POWER_DOWN_HOLD_US: u32 = 70;

/// HX711 24-bit load-cell ADC, bit-banged over two GPIOs: a serial clock
/// out and a data line in. Readings are channel A at gain 128, MSB first.
pub struct Hx711<'d> {
    dout: Input<'d>,
    sck: Output<'d>,
    delay: Delay,
}

impl<'d> Hx711<'d> {
    pub fn new(dout: Input<'d>, sck: Output<'d>) -> Self {
        Hx711 {
            dout,
            sck,
            delay: Delay::new(),
        }
    }

    /// Wait for a conversion (DOUT falling), then clock out the 24-bit
    /// two's complement reading. The clock burst runs inside a critical
    /// section: an interrupt stretching a high pulse past 60us would power
    /// the chip down mid-read.
    pub async fn read(&mut self) -> i32 {
        self.dout.wait_for_low().await;
        let raw = critical_section::with(|_| {
            let mut value: u32 = 0;
            for _ in 0..24 {
                self.pulse();
                value = (value << 1) | self.dout.is_high() as u32;
            }
            // A 25th pulse keeps the next conversion at channel A, gain 128
            self.pulse();
            value
        });
        // Sign-extend the 24-bit reading
        ((raw << 8) as i32) >> 8
    }

    /// Mean of `samples` consecutive readings
    pub async fn read_average(&mut self, samples: u32) -> i32 {
        let mut sum: i64 = 0;
        for _ in 0..samples {
            sum += self.read().await as i64;
        }
        (sum / samples as i64) as i32
    }

    /// Put the chip into low power between polls
    pub fn power_down(&mut self) {
        self.sck.set_high();
        self.delay.delay_micros(POWER_DOWN_HOLD_US);
    }

    /// Resume conversions; the next `read` waits out the wake-up on DOUT
    pub fn power_up(&mut self) {
        self.sck.set_low();
    }

    /// Power-cycle the chip, which also resets it to channel A, gain 128
    pub async fn reset(&mut self) {
        self.power_down();
        self.power_up();
        Timer::after_micros(100).await;
    }

    fn pulse(&mut self) {
        self.sck.set_high();
        self.delay.delay_micros(1);
        self.sck.set_low();
        self.delay.delay_micros(1);
    }
}
