// This file implements the AD9959 driver proper: the clock model that turns
// output frequencies into 32-bit tuning words, and the stateful layer that
// selects channels and composes register writes for set/sweep operations.
//
// Every setter only stages a value inside the chip; the staged state reaches
// the outputs when `update` pulses the I/O update strobe. Batch related
// writes, then commit them in one strobe.

use embedded_hal::digital::v2::OutputPin;

use crate::registers::{acr, cfr, csr, fr1, register_length, Channels, Register, READ};
use crate::spi::DdsSpi;

pub const DEFAULT_MULTIPLIER: u8 = 20;
/// Nominal calibration constant: a perfectly accurate 10 MHz-referenced part.
pub const DEFAULT_CALIBRATION: u32 = 10_000_000;

// The core clock is kept in calibration-scaled units, which are plain Hz
// whenever the calibration constant equals the 10 MHz default.
const CORE_CLOCK_SCALE: u64 = 10_000_000;
// Core clocks above this need the VCO gain bit set in FR1.
const VCO_GAIN_THRESHOLD: u64 = 200_000_000;

// Low nibble set: never a valid CSR channel mask, so the next channel select
// is guaranteed to hit the wire.
const CHANNELS_UNKNOWN: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A frequency conversion was requested before `set_clock` (or `reset`)
    /// configured the core clock.
    ClockNotConfigured,
}

/// The three discrete control lines, grouped so they travel together.
pub struct ControlPins<RESET, CE, UPDATE> {
    pub reset: RESET,
    pub chip_enable: CE,
    pub io_update: UPDATE,
}

impl<RESET, CE, UPDATE> ControlPins<RESET, CE, UPDATE>
where
    RESET: OutputPin,
    CE: OutputPin,
    UPDATE: OutputPin,
{
    /// Parks every line deasserted (chip enable is active low).
    pub fn new(mut reset: RESET, mut chip_enable: CE, mut io_update: UPDATE) -> Self {
        reset.set_low().ok();
        chip_enable.set_high().ok();
        io_update.set_low().ok();
        ControlPins {
            reset,
            chip_enable,
            io_update,
        }
    }
}

/// Driver for one AD9959. The chip has a single internal address-pointer
/// state machine, so one instance must be the sole owner of its bus traffic;
/// wrap the whole driver in external mutual exclusion if several threads of
/// control exist.
pub struct Ad9959<RESET, CE, UPDATE> {
    pins: ControlPins<RESET, CE, UPDATE>,
    reference_frequency: u32,
    core_clock: u64,
    last_channels: u8,
}

fn pulse(pin: &mut impl OutputPin) {
    pin.set_high().ok();
    pin.set_low().ok();
}

impl<RESET, CE, UPDATE> Ad9959<RESET, CE, UPDATE>
where
    RESET: OutputPin,
    CE: OutputPin,
    UPDATE: OutputPin,
{
    /// Creates the driver unconfigured. Call [`reset`](Self::reset) before
    /// programming channels; frequency conversions fail with
    /// [`Error::ClockNotConfigured`] until the clock has been set up.
    ///
    /// `reference_frequency` is the external crystal in Hz.
    pub fn new(pins: ControlPins<RESET, CE, UPDATE>, reference_frequency: u32) -> Self {
        Ad9959 {
            pins,
            reference_frequency,
            core_clock: 0,
            last_channels: CHANNELS_UNKNOWN,
        }
    }

    /// Hardware reset followed by the power-up register configuration:
    /// serial-loading mode forced, all channels deselected in 3-wire MSB
    /// mode, clock configured with the defaults (x20 PLL, 10 MHz
    /// calibration).
    ///
    /// The chip wants the reset pulse held for at least 5 cycles of its
    /// internal 30 MHz sync clock; two GPIO writes through embedded-hal are
    /// comfortably slower than that on any realistic host.
    pub fn reset(&mut self, spi_bus: &mut impl DdsSpi) {
        pulse(&mut self.pins.reset);
        // A lone clock pulse plus an update strobe put the freshly reset
        // serial port into byte-loading mode.
        spi_bus.pulse_sck();
        pulse(&mut self.pins.io_update);
        // Poison the cache so the deselect below actually hits the wire.
        self.last_channels = CHANNELS_UNKNOWN;
        self.set_channels(spi_bus, Channels::NONE);
        self.update();
        self.set_clock(spi_bus, DEFAULT_MULTIPLIER, DEFAULT_CALIBRATION);
    }

    /// Programs FR1 and recomputes the core clock.
    ///
    /// A `multiplier` outside 4..=20 disables the PLL (treated as 1). A
    /// `calibration` of 0 falls back to [`DEFAULT_CALIBRATION`]; otherwise
    /// pass the frequency you measured while configured for a nominal
    /// 10 MHz.
    ///
    /// The PLL needs real time to lock after this write (about a
    /// millisecond). The driver does not block for it; delay before relying
    /// on the outputs.
    pub fn set_clock(&mut self, spi_bus: &mut impl DdsSpi, multiplier: u8, calibration: u32) {
        let multiplier: u32 = if (4..=20).contains(&multiplier) {
            multiplier as u32
        } else {
            1
        };
        let calibration = if calibration == 0 {
            DEFAULT_CALIBRATION
        } else {
            calibration
        };
        self.core_clock =
            self.reference_frequency as u64 * multiplier as u64 * CORE_CLOCK_SCALE
                / calibration as u64;

        let vco_gain = if self.core_clock > VCO_GAIN_THRESHOLD {
            fr1::VCO_GAIN
        } else {
            0
        };
        self.write_register(
            spi_bus,
            Register::FR1,
            vco_gain
                | multiplier * fr1::PLL_DIVIDER
                | fr1::CHARGE_PUMP_3
                | fr1::MOD_LEVELS_2
                | fr1::RAMP_UP_DOWN_OFF
                | fr1::PROFILE_0
                | fr1::SYNC_CLK_DISABLE,
        );
        self.update();
    }

    /// Effective internal clock in calibration-scaled units (plain Hz at the
    /// default calibration). Zero until the clock has been configured.
    pub fn core_clock(&self) -> u64 {
        self.core_clock
    }

    /// `floor(frequency * 2^32 / core_clock)`: the tuning word that comes
    /// closest to `frequency` from below.
    ///
    /// Pure integer arithmetic; the result can sit one LSB under the
    /// round-to-nearest ideal word. Convert manually if that last LSB
    /// matters.
    pub fn frequency_to_divider(&self, frequency: u32) -> Result<u32, Error> {
        if self.core_clock == 0 {
            return Err(Error::ClockNotConfigured);
        }
        Ok((((frequency as u64) << 32) / self.core_clock) as u32)
    }

    /// Routes subsequent per-channel register writes to `channels`. Skips
    /// the CSR write when the selection is unchanged; channel selects
    /// precede every per-channel operation, so the cache saves the most
    /// frequent write on the bus.
    pub fn set_channels(&mut self, spi_bus: &mut impl DdsSpi, channels: Channels) {
        if channels.mask() != self.last_channels {
            self.write_register(
                spi_bus,
                Register::CSR,
                (channels.mask() | csr::MSB_FIRST | csr::IO_3WIRE) as u32,
            );
        }
        self.last_channels = channels.mask();
    }

    /// Stages an output frequency on the addressed channels.
    pub fn set_frequency(
        &mut self,
        spi_bus: &mut impl DdsSpi,
        channels: Channels,
        frequency: u32,
    ) -> Result<(), Error> {
        let divider = self.frequency_to_divider(frequency)?;
        self.set_divider(spi_bus, channels, divider);
        Ok(())
    }

    /// Stages a raw tuning word, bypassing the clock model.
    pub fn set_divider(&mut self, spi_bus: &mut impl DdsSpi, channels: Channels, divider: u32) {
        self.set_channels(spi_bus, channels);
        self.write_register(spi_bus, Register::CFTW, divider);
    }

    /// Stages a phase offset in 14-bit units (16384 per full turn). Wraps
    /// silently; phase is periodic.
    pub fn set_phase(&mut self, spi_bus: &mut impl DdsSpi, channels: Channels, phase: u16) {
        self.set_channels(spi_bus, channels);
        self.write_register(spi_bus, Register::CPOW, (phase & 0x3FFF) as u32);
    }

    /// Stages an amplitude in 10-bit units of full scale. Wraps silently at
    /// 1024.
    pub fn set_amplitude(&mut self, spi_bus: &mut impl DdsSpi, channels: Channels, amplitude: u16) {
        self.set_channels(spi_bus, channels);
        self.write_register(
            spi_bus,
            Register::ACR,
            acr::MULTIPLIER_ENABLE | (amplitude & 0x3FF) as u32,
        );
    }

    // Common sweep setup: modulation mode, sweep enabled, full DAC scale,
    // pipe delays matched. `follow` false sets no-dwell, so the output snaps
    // back instead of holding the destination.
    fn set_sweep_mode(
        &mut self,
        spi_bus: &mut impl DdsSpi,
        channels: Channels,
        modulation: u32,
        follow: bool,
    ) {
        self.set_channels(spi_bus, channels);
        let no_dwell = if follow { 0 } else { cfr::SWEEP_NO_DWELL };
        self.write_register(
            spi_bus,
            Register::CFR,
            modulation | cfr::SWEEP_ENABLE | cfr::DAC_FULL_SCALE | cfr::MATCH_PIPE_DELAY | no_dwell,
        );
    }

    /// Configures a linear frequency sweep towards `frequency`. Rates and
    /// step sizes come from [`sweep_rates`](Self::sweep_rates).
    pub fn sweep_frequency(
        &mut self,
        spi_bus: &mut impl DdsSpi,
        channels: Channels,
        frequency: u32,
        follow: bool,
    ) -> Result<(), Error> {
        let divider = self.frequency_to_divider(frequency)?;
        self.set_sweep_mode(spi_bus, channels, cfr::FREQUENCY_MODULATION, follow);
        self.write_register(spi_bus, Register::CW1, divider);
        Ok(())
    }

    /// Configures a linear amplitude sweep towards a 10-bit target.
    pub fn sweep_amplitude(
        &mut self,
        spi_bus: &mut impl DdsSpi,
        channels: Channels,
        amplitude: u16,
        follow: bool,
    ) {
        self.set_sweep_mode(spi_bus, channels, cfr::AMPLITUDE_MODULATION, follow);
        self.write_register(spi_bus, Register::CW1, ((amplitude & 0x3FF) as u32) << 22);
    }

    /// Configures a linear phase sweep towards a 14-bit target.
    pub fn sweep_phase(
        &mut self,
        spi_bus: &mut impl DdsSpi,
        channels: Channels,
        phase: u16,
        follow: bool,
    ) {
        self.set_sweep_mode(spi_bus, channels, cfr::PHASE_MODULATION, follow);
        self.write_register(spi_bus, Register::CW1, ((phase & 0x3FFF) as u32) << 18);
    }

    /// Programs sweep slope: step sizes in tuning-word units and per-step
    /// rate bytes in sync-clock cycles, separately for the rising and
    /// falling directions.
    pub fn sweep_rates(
        &mut self,
        spi_bus: &mut impl DdsSpi,
        channels: Channels,
        rising_step: u32,
        rising_rate: u8,
        falling_step: u32,
        falling_rate: u8,
    ) {
        self.set_channels(spi_bus, channels);
        self.write_register(spi_bus, Register::RDW, rising_step);
        self.write_register(spi_bus, Register::FDW, falling_step);
        self.write_register(
            spi_bus,
            Register::LSRR,
            ((falling_rate as u32) << 8) | rising_rate as u32,
        );
    }

    /// Pulses the update strobe: every staged register write takes effect on
    /// the outputs at once.
    pub fn update(&mut self) {
        pulse(&mut self.pins.io_update);
    }

    /// Writes a register: address byte, then the register's width of `value`
    /// MSB first. Bytes of `value` above the register width are dropped.
    pub fn write_register(&mut self, spi_bus: &mut impl DdsSpi, register: Register, value: u32) {
        let length = register_length(register as u8);
        spi_bus.begin_transaction();
        self.pins.chip_enable.set_low().ok();
        spi_bus.send(8, register as u32);
        spi_bus.send(8 * length, value);
        self.pins.chip_enable.set_high().ok();
        spi_bus.end_transaction();
    }

    /// Reads back a staged register value, accumulated big-endian.
    ///
    /// Exactly one channel must currently be selected: with zero or several
    /// channels addressed the chip has no single register set to present and
    /// the returned bits are meaningless, not merely wrong. The driver
    /// cannot detect this at run time; a debug assertion catches it in
    /// development builds.
    pub fn read_register(&mut self, spi_bus: &mut impl DdsSpi, register: Register) -> u32 {
        debug_assert!(
            (self.last_channels & 0xF0).count_ones() == 1,
            "register reads need exactly one channel selected"
        );
        let length = register_length(register as u8);
        spi_bus.begin_transaction();
        self.pins.chip_enable.set_low().ok();
        spi_bus.send(8, (READ | register as u8) as u32);
        let value = spi_bus.receive(8 * length);
        self.pins.chip_enable.set_high().ok();
        spi_bus.end_transaction();
        value
    }

    /// Gives the control pins back, consuming the driver.
    pub fn release(self) -> ControlPins<RESET, CE, UPDATE> {
        self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct MockPin {
        state: bool,
        rising_edges: u32,
    }
    impl OutputPin for MockPin {
        type Error = Infallible;
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.state = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            if !self.state {
                self.rising_edges += 1;
            }
            self.state = true;
            Ok(())
        }
    }

    // Records every register access as one frame of bytes, exactly as they
    // would appear on the wire after the chip-enable assertion.
    #[derive(Default)]
    struct MockBus {
        frames: Vec<Vec<u8>>,
        read_data: Vec<u32>,
        in_transaction: bool,
        sck_pulses: u32,
    }
    impl DdsSpi for MockBus {
        fn begin_transaction(&mut self) {
            assert!(!self.in_transaction, "nested bus transaction");
            self.frames.push(Vec::new());
            self.in_transaction = true;
        }
        fn end_transaction(&mut self) {
            self.in_transaction = false;
        }
        fn send(&mut self, len: u8, data: u32) {
            assert!(self.in_transaction, "send outside a transaction");
            assert_eq!(len % 8, 0);
            let frame = self.frames.last_mut().unwrap();
            for byte in (0..len / 8).rev() {
                frame.push((data >> (8 * byte)) as u8);
            }
        }
        fn receive(&mut self, _len: u8) -> u32 {
            assert!(self.in_transaction, "receive outside a transaction");
            self.read_data.remove(0)
        }
        fn send_and_receive(&mut self, len: u8, data: u32) -> u32 {
            self.send(len, data);
            self.receive(len)
        }
        fn pulse_sck(&mut self) {
            self.sck_pulses += 1;
        }
    }

    fn fresh_driver() -> (Ad9959<MockPin, MockPin, MockPin>, MockBus) {
        let pins = ControlPins::new(MockPin::default(), MockPin::default(), MockPin::default());
        (Ad9959::new(pins, 25_000_000), MockBus::default())
    }

    // Driver with the default 500 MHz core clock and an empty frame log.
    fn configured_driver() -> (Ad9959<MockPin, MockPin, MockPin>, MockBus) {
        let (mut dds, mut bus) = fresh_driver();
        dds.set_clock(&mut bus, DEFAULT_MULTIPLIER, DEFAULT_CALIBRATION);
        bus.frames.clear();
        (dds, bus)
    }

    #[test]
    fn channel_select_is_memoized() {
        let (mut dds, mut bus) = fresh_driver();
        dds.set_channels(&mut bus, Channels::CH0);
        dds.set_channels(&mut bus, Channels::CH0);
        assert_eq!(bus.frames.len(), 1);
        assert_eq!(bus.frames[0], vec![0x00, 0x12]); // CH0, MSB first, 3-wire

        dds.set_channels(&mut bus, Channels::CH1);
        assert_eq!(bus.frames.len(), 2);
        assert_eq!(bus.frames[1], vec![0x00, 0x22]);
    }

    #[test]
    fn frequency_conversion_requires_a_configured_clock() {
        let (dds, _bus) = fresh_driver();
        assert_eq!(
            dds.frequency_to_divider(1_000_000),
            Err(Error::ClockNotConfigured)
        );

        let (mut dds, mut bus) = fresh_driver();
        assert_eq!(
            dds.set_frequency(&mut bus, Channels::CH0, 1_000_000),
            Err(Error::ClockNotConfigured)
        );
        // The failed call must not have touched the bus.
        assert!(bus.frames.is_empty());
    }

    #[test]
    fn divider_round_trips_within_one_lsb() {
        let (dds, _bus) = configured_driver();
        let core = dds.core_clock();
        assert_eq!(core, 500_000_000);
        for frequency in [1u32, 10, 455_000, 1_234_100, 10_700_000, 100_000_000, 249_999_999] {
            let divider = dds.frequency_to_divider(frequency).unwrap() as u64;
            let scaled = (frequency as u64) << 32;
            // floor division: 0 <= freq*2^32 - divider*core < core
            assert!(divider * core <= scaled);
            assert!(scaled - divider * core < core);
        }
    }

    #[test]
    fn divider_is_monotonic() {
        let (dds, _bus) = configured_driver();
        let mut last = 0;
        let mut frequency = 1u32;
        while frequency < 250_000_000 {
            let divider = dds.frequency_to_divider(frequency).unwrap();
            assert!(divider >= last, "divider decreased at {} Hz", frequency);
            last = divider;
            frequency = frequency.saturating_mul(2) + 12_345;
        }
    }

    #[test]
    fn exact_divisions_produce_exact_dividers() {
        let (dds, _bus) = configured_driver();
        // 250 MHz is half the 500 MHz core clock: exactly 2^31.
        assert_eq!(
            dds.frequency_to_divider(250_000_000).unwrap(),
            0x8000_0000
        );
        assert_eq!(dds.frequency_to_divider(125_000_000).unwrap(), 0x4000_0000);
        assert_eq!(dds.frequency_to_divider(0).unwrap(), 0);
    }

    #[test]
    fn phase_wraps_at_fourteen_bits() {
        let (mut dds, mut bus) = configured_driver();
        dds.set_phase(&mut bus, Channels::CH0, 0);
        dds.set_phase(&mut bus, Channels::CH0, 16384);
        // First call selects CH0; the second select is memoized away.
        assert_eq!(bus.frames.len(), 3);
        assert_eq!(bus.frames[1], vec![0x05, 0x00, 0x00]);
        assert_eq!(bus.frames[2], bus.frames[1]);

        dds.set_phase(&mut bus, Channels::CH0, 8192);
        assert_eq!(bus.frames[3], vec![0x05, 0x20, 0x00]);
    }

    #[test]
    fn amplitude_wraps_at_ten_bits() {
        let (mut dds, mut bus) = configured_driver();
        dds.set_amplitude(&mut bus, Channels::CH1, 0);
        dds.set_amplitude(&mut bus, Channels::CH1, 1024);
        assert_eq!(bus.frames.len(), 3);
        // Rate byte zero, multiplier enable, 10-bit amplitude of zero.
        assert_eq!(bus.frames[1], vec![0x06, 0x00, 0x10, 0x00]);
        assert_eq!(bus.frames[2], bus.frames[1]);

        dds.set_amplitude(&mut bus, Channels::CH1, 0x3FF);
        assert_eq!(bus.frames[3], vec![0x06, 0x00, 0x13, 0xFF]);
    }

    #[test]
    fn register_framing_is_msb_first_and_width_limited() {
        let (mut dds, mut bus) = fresh_driver();
        dds.write_register(&mut bus, Register::CFTW, 0x12345678);
        assert_eq!(bus.frames[0], vec![0x04, 0x12, 0x34, 0x56, 0x78]);

        dds.write_register(&mut bus, Register::CPOW, 0x1234);
        assert_eq!(bus.frames[1], vec![0x05, 0x12, 0x34]);

        // Bytes beyond the register width are dropped, not an error.
        dds.write_register(&mut bus, Register::CPOW, 0xABCD_1234);
        assert_eq!(bus.frames[2], vec![0x05, 0x12, 0x34]);

        dds.write_register(&mut bus, Register::CSR, 0x12);
        assert_eq!(bus.frames[3], vec![0x00, 0x12]);

        dds.write_register(&mut bus, Register::FR2, 0xA5C3);
        assert_eq!(bus.frames[4], vec![0x02, 0xA5, 0xC3]);
    }

    #[test]
    fn reset_deselects_channels_and_configures_the_default_clock() {
        let (mut dds, mut bus) = fresh_driver();
        dds.reset(&mut bus);

        assert_eq!(bus.sck_pulses, 1);
        assert_eq!(bus.frames.len(), 2);
        // All channels off, MSB first, 3-wire.
        assert_eq!(bus.frames[0], vec![0x00, 0x02]);
        // FR1: VCO gain (500 MHz core), x20 PLL, charge pump 3, sync clock off.
        assert_eq!(bus.frames[1], vec![0x01, 0xD3, 0x00, 0x20]);
        assert_eq!(dds.core_clock(), 500_000_000);

        // The cache now holds "none": deselecting again is free.
        dds.set_channels(&mut bus, Channels::NONE);
        assert_eq!(bus.frames.len(), 2);

        let pins = dds.release();
        assert_eq!(pins.reset.rising_edges, 1);
        // Forced serial-load strobe, CSR commit, set_clock commit.
        assert_eq!(pins.io_update.rising_edges, 3);
        // Chip enable rose once at construction and once per register write.
        assert_eq!(pins.chip_enable.rising_edges, 3);
    }

    #[test]
    fn pll_bypass_for_out_of_range_multipliers() {
        let (mut dds, mut bus) = fresh_driver();
        dds.set_clock(&mut bus, 3, DEFAULT_CALIBRATION);
        // Multiplier 1, no VCO gain at 25 MHz, charge pump 3.
        assert_eq!(bus.frames[0], vec![0x01, 0x07, 0x00, 0x20]);
        assert_eq!(dds.core_clock(), 25_000_000);

        dds.set_clock(&mut bus, 21, DEFAULT_CALIBRATION);
        assert_eq!(bus.frames[1], vec![0x01, 0x07, 0x00, 0x20]);
    }

    #[test]
    fn calibration_rescales_the_core_clock() {
        let (mut dds, mut bus) = fresh_driver();
        // Part measured 1% fast at nominal 10 MHz.
        dds.set_clock(&mut bus, DEFAULT_MULTIPLIER, 10_100_000);
        assert_eq!(dds.core_clock(), 25_000_000u64 * 20 * 10_000_000 / 10_100_000);

        // Calibration zero falls back to the default instead of dividing by it.
        dds.set_clock(&mut bus, DEFAULT_MULTIPLIER, 0);
        assert_eq!(dds.core_clock(), 500_000_000);
    }

    #[test]
    fn sweep_destinations_are_msb_aligned() {
        let (mut dds, mut bus) = configured_driver();

        dds.sweep_phase(&mut bus, Channels::CH0, 8192, true);
        assert_eq!(bus.frames.len(), 3); // select, CFR, CW1
        assert_eq!(bus.frames[1], vec![0x03, 0xC0, 0x43, 0x20]);
        assert_eq!(bus.frames[2], vec![0x0A, 0x80, 0x00, 0x00, 0x00]); // 8192 << 18

        bus.frames.clear();
        dds.sweep_amplitude(&mut bus, Channels::CH0, 512, true);
        // CH0 already selected: no CSR frame.
        assert_eq!(bus.frames.len(), 2);
        assert_eq!(bus.frames[0], vec![0x03, 0x40, 0x43, 0x20]);
        assert_eq!(bus.frames[1], vec![0x0A, 0x80, 0x00, 0x00, 0x00]); // 512 << 22

        bus.frames.clear();
        dds.sweep_frequency(&mut bus, Channels::CH1, 125_000_000, false)
            .unwrap();
        assert_eq!(bus.frames.len(), 3);
        assert_eq!(bus.frames[0], vec![0x00, 0x22]);
        // No-dwell set when the sweep should not follow.
        assert_eq!(bus.frames[1], vec![0x03, 0x80, 0xC3, 0x20]);
        assert_eq!(bus.frames[2], vec![0x0A, 0x40, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn sweep_rates_program_both_deltas_and_the_rate_register() {
        let (mut dds, mut bus) = configured_driver();
        dds.sweep_rates(&mut bus, Channels::ALL, 0x01020304, 0x05, 0x0A0B0C0D, 0x0E);
        assert_eq!(bus.frames.len(), 4);
        assert_eq!(bus.frames[0], vec![0x00, 0xF2]);
        assert_eq!(bus.frames[1], vec![0x08, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(bus.frames[2], vec![0x09, 0x0A, 0x0B, 0x0C, 0x0D]);
        // Falling rate in the high byte, rising rate in the low byte.
        assert_eq!(bus.frames[3], vec![0x07, 0x0E, 0x05]);
    }

    #[test]
    fn read_register_sets_the_read_flag_and_returns_the_value() {
        let (mut dds, mut bus) = configured_driver();
        dds.set_channels(&mut bus, Channels::CH2);
        bus.read_data.push(0x123456);
        let value = dds.read_register(&mut bus, Register::CFR);
        assert_eq!(value, 0x123456);
        assert_eq!(bus.frames.last().unwrap(), &vec![0x83]);
    }

    #[test]
    #[should_panic(expected = "exactly one channel")]
    #[cfg(debug_assertions)]
    fn read_register_asserts_on_ambiguous_selection() {
        let (mut dds, mut bus) = configured_driver();
        dds.set_channels(&mut bus, Channels::CH0 | Channels::CH3);
        bus.read_data.push(0);
        dds.read_register(&mut bus, Register::CFR);
    }

    #[test]
    fn set_frequency_writes_the_tuning_word() {
        let (mut dds, mut bus) = configured_driver();
        dds.set_frequency(&mut bus, Channels::CH3, 250_000_000).unwrap();
        assert_eq!(bus.frames.len(), 2);
        assert_eq!(bus.frames[0], vec![0x00, 0x82]);
        assert_eq!(bus.frames[1], vec![0x04, 0x80, 0x00, 0x00, 0x00]);

        // Raw tuning words skip the clock model entirely.
        dds.set_divider(&mut bus, Channels::CH3, 0x0000_CAFE);
        assert_eq!(bus.frames[2], vec![0x04, 0x00, 0x00, 0xCA, 0xFE]);
    }
}
