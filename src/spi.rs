// Serial-bus transport for the DDS driver. The chip speaks SPI mode 0 with
// one address byte followed by a register-width payload, always MSB first
// regardless of the chip's own CSR bit-order setting for the host. The driver
// brackets every register access between begin_transaction/end_transaction
// with chip enable held low, so implementations only have to move bits.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};

// Trait because the bus can be bit-banged or backed by a hardware SPI peripheral.
pub trait DdsSpi {
    /// Claim the bus and drive SCK to its idle level.
    fn begin_transaction(&mut self);
    fn end_transaction(&mut self);
    /// Shift out the low `len` bits of `data`, most significant bit first.
    fn send(&mut self, len: u8, data: u32);
    /// Shift in `len` bits, accumulated big-endian.
    fn receive(&mut self, len: u8) -> u32;
    fn send_and_receive(&mut self, len: u8, data: u32) -> u32;
    /// One bare clock pulse outside any framing. Right after a hardware reset
    /// the chip interprets a lone clock edge as entry into serial-loading
    /// mode; nothing else needs this.
    fn pulse_sck(&mut self);
}

/// Mode-0 bit-banged bus over plain GPIO: SCK idles low, MOSI is driven while
/// SCK is low and sampled by the chip on the rising edge.
pub struct BitBangSpi<MOSI, MISO, SCK, DELAY> {
    mosi: MOSI,
    miso: MISO,
    sck: SCK,
    delay: DELAY,
    half_period_us: u16,
}

impl<MOSI, MISO, SCK, DELAY> BitBangSpi<MOSI, MISO, SCK, DELAY>
where
    MOSI: OutputPin,
    MISO: InputPin,
    SCK: OutputPin,
    DELAY: DelayUs<u16>,
{
    /// `sck_frequency` is a ceiling, not a promise: the half period rounds
    /// down to zero above 500 kHz and pin-toggling overhead sets the pace
    /// from there.
    pub fn new(mosi: MOSI, miso: MISO, sck: SCK, delay: DELAY, sck_frequency: u32) -> Self {
        let half_period_us = (500_000 / sck_frequency.max(1)) as u16;
        let mut bus = BitBangSpi {
            mosi,
            miso,
            sck,
            delay,
            half_period_us,
        };
        bus.sck.set_low().ok();
        bus.mosi.set_low().ok();
        bus
    }

    pub fn return_pins(self) -> (MOSI, MISO, SCK) {
        (self.mosi, self.miso, self.sck)
    }

    fn half_period(&mut self) {
        if self.half_period_us > 0 {
            self.delay.delay_us(self.half_period_us);
        }
    }
}

impl<MOSI, MISO, SCK, DELAY> DdsSpi for BitBangSpi<MOSI, MISO, SCK, DELAY>
where
    MOSI: OutputPin,
    MISO: InputPin,
    SCK: OutputPin,
    DELAY: DelayUs<u16>,
{
    fn begin_transaction(&mut self) {
        self.sck.set_low().ok();
    }

    fn end_transaction(&mut self) {
        self.mosi.set_low().ok();
    }

    fn send(&mut self, len: u8, data: u32) {
        for bit in (0..len).rev() {
            if data & (1_u32 << bit) != 0 {
                self.mosi.set_high().ok();
            } else {
                self.mosi.set_low().ok();
            }
            self.half_period();
            self.sck.set_high().ok();
            self.half_period();
            self.sck.set_low().ok();
        }
    }

    fn receive(&mut self, len: u8) -> u32 {
        let mut result: u32 = 0;
        for _ in 0..len {
            self.half_period();
            self.sck.set_high().ok();
            result = (result << 1) | (self.miso.is_high().unwrap_or(false) as u32);
            self.half_period();
            self.sck.set_low().ok();
        }
        result
    }

    fn send_and_receive(&mut self, len: u8, data: u32) -> u32 {
        let mut result: u32 = 0;
        for bit in (0..len).rev() {
            if data & (1_u32 << bit) != 0 {
                self.mosi.set_high().ok();
            } else {
                self.mosi.set_low().ok();
            }
            self.half_period();
            self.sck.set_high().ok();
            result = (result << 1) | (self.miso.is_high().unwrap_or(false) as u32);
            self.half_period();
            self.sck.set_low().ok();
        }
        result
    }

    fn pulse_sck(&mut self) {
        self.sck.set_high().ok();
        self.half_period();
        self.sck.set_low().ok();
    }
}
