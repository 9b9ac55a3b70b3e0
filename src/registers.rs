// This file describes the AD9959's register map: addresses, byte widths and
// the bit layouts needed to compose register values. Everything here is fixed
// by the datasheet; nothing is constructed at runtime beyond lookups.

/// Addressable registers. CSR, FR1 and FR2 are chip-wide; the rest exist once
/// per channel and are routed by the channel bits staged in the CSR.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Register {
    CSR = 0x00,
    FR1 = 0x01,
    FR2 = 0x02,
    CFR = 0x03,
    CFTW = 0x04,
    CPOW = 0x05,
    ACR = 0x06,
    LSRR = 0x07,
    RDW = 0x08,
    FDW = 0x09,
    CW1 = 0x0A,
    CW2 = 0x0B,
    CW3 = 0x0C,
    CW4 = 0x0D,
    CW5 = 0x0E,
    CW6 = 0x0F,
    CW7 = 0x10,
    CW8 = 0x11,
    CW9 = 0x12,
    CW10 = 0x13,
    CW11 = 0x14,
    CW12 = 0x15,
    CW13 = 0x16,
    CW14 = 0x17,
    CW15 = 0x18,
}

/// OR into the address byte to read a register instead of writing it.
pub const READ: u8 = 0x80;

// Byte widths of the well-known registers, indexed by address.
const REGISTER_LENGTHS: [u8; 10] = [1, 3, 2, 3, 4, 2, 3, 2, 4, 4];

/// Payload width in bytes for a register address. Addresses past the table
/// (CW1..CW15 and the unused modulation-table slots above them) all share the
/// 4-byte tuning-word width.
pub fn register_length(address: u8) -> u8 {
    match REGISTER_LENGTHS.get((address & !READ) as usize) {
        Some(&length) => length,
        None => 4,
    }
}

/// Channel-select mask occupying bits 4..7 of the CSR. Compose with `|`:
/// `Channels::CH0 | Channels::CH2` addresses two channels at once.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Channels(u8);

impl Channels {
    pub const NONE: Channels = Channels(0x00);
    pub const CH0: Channels = Channels(0x10);
    pub const CH1: Channels = Channels(0x20);
    pub const CH2: Channels = Channels(0x40);
    pub const CH3: Channels = Channels(0x80);
    pub const ALL: Channels = Channels(0xF0);

    pub const fn mask(self) -> u8 {
        self.0
    }
}

impl core::ops::BitOr for Channels {
    type Output = Channels;
    fn bitor(self, rhs: Channels) -> Channels {
        Channels(self.0 | rhs.0)
    }
}

/// Channel Select Register, low nibble: serial I/O configuration.
pub mod csr {
    // Bit order on the wire (chip default MSB first).
    pub const MSB_FIRST: u8 = 0x00;
    pub const LSB_FIRST: u8 = 0x01;
    // Serial I/O mode (chip default 2-wire).
    pub const IO_2WIRE: u8 = 0x00;
    pub const IO_3WIRE: u8 = 0x02;
    pub const IO_2BIT: u8 = 0x04;
    pub const IO_4BIT: u8 = 0x06;
}

/// Function Register 1 bit positions within its 24-bit value.
pub mod fr1 {
    // Most significant byte. Higher charge pump levels shorten PLL lock time
    // and raise phase noise.
    pub const CHARGE_PUMP_0: u32 = 0x00_0000;
    pub const CHARGE_PUMP_1: u32 = 0x01_0000;
    pub const CHARGE_PUMP_2: u32 = 0x02_0000;
    pub const CHARGE_PUMP_3: u32 = 0x03_0000;
    /// LSB of the PLL multiplier field; multiply by the 4..=20 ratio.
    pub const PLL_DIVIDER: u32 = 0x04_0000;
    /// Must be set when the core clock runs in the upper VCO range.
    pub const VCO_GAIN: u32 = 0x80_0000;

    // Middle byte: modulation levels, ramp-up/down pin routing, profile pins.
    pub const MOD_LEVELS_2: u32 = 0x00_0000;
    pub const MOD_LEVELS_4: u32 = 0x00_0100;
    pub const MOD_LEVELS_8: u32 = 0x00_0200;
    pub const MOD_LEVELS_16: u32 = 0x00_0300;
    pub const RAMP_UP_DOWN_OFF: u32 = 0x00_0000;
    pub const RAMP_UP_DOWN_P2P3: u32 = 0x00_0400;
    pub const RAMP_UP_DOWN_P3: u32 = 0x00_0800;
    pub const RAMP_UP_DOWN_SDIO123: u32 = 0x00_0C00;
    pub const PROFILE_0: u32 = 0x00_0000;
    pub const PROFILE_7: u32 = 0x00_0700;

    // Least significant byte: synchronisation and power-down controls.
    pub const SYNC_AUTO: u32 = 0x00_0000;
    pub const SYNC_SOFT: u32 = 0x00_0001;
    pub const SYNC_HARD: u32 = 0x00_0002;
    pub const DAC_REF_POWER_DOWN: u32 = 0x00_0010;
    pub const SYNC_CLK_DISABLE: u32 = 0x00_0020;
    pub const EXT_FULL_POWER_DOWN: u32 = 0x00_0040;
    pub const REF_CLK_IN_POWER_DOWN: u32 = 0x00_0080;
}

/// Channel Function Register bit positions within its 24-bit value.
pub mod cfr {
    /// Modulation mode field, bits 23:22.
    pub const MODULATION_MASK: u32 = 0xC0_0000;
    pub const AMPLITUDE_MODULATION: u32 = 0x40_0000;
    pub const FREQUENCY_MODULATION: u32 = 0x80_0000;
    pub const PHASE_MODULATION: u32 = 0xC0_0000;
    /// Sweep snaps back to the start value instead of dwelling at the end.
    pub const SWEEP_NO_DWELL: u32 = 0x00_8000;
    pub const SWEEP_ENABLE: u32 = 0x00_4000;
    pub const SWEEP_STEP_TIMER_EXT: u32 = 0x00_2000;
    pub const DAC_FULL_SCALE: u32 = 0x00_0300;
    pub const DIGITAL_POWER_DOWN: u32 = 0x00_0080;
    pub const DAC_POWER_DOWN: u32 = 0x00_0040;
    pub const MATCH_PIPE_DELAY: u32 = 0x00_0020;
    pub const AUTOCLEAR_SWEEP: u32 = 0x00_0010;
    pub const CLEAR_SWEEP: u32 = 0x00_0008;
    pub const AUTOCLEAR_PHASE: u32 = 0x00_0004;
    pub const CLEAR_PHASE: u32 = 0x00_0002;
    /// Power-up default is cosine.
    pub const OUTPUT_SINE_WAVE: u32 = 0x00_0001;
}

/// Amplitude Control Register bit positions within its 24-bit value.
pub mod acr {
    /// Amplitude ramp rate byte; zero for manual amplitude control.
    pub const RAMP_RATE_MASK: u32 = 0xFF_0000;
    pub const INCREMENT_MASK: u32 = 0x00_C000;
    pub const RAMP_ENABLE: u32 = 0x00_0800;
    pub const LOAD_ARR_AT_UPDATE: u32 = 0x00_0400;
    pub const MULTIPLIER_ENABLE: u32 = 0x00_1000;
    pub const AMPLITUDE_MASK: u32 = 0x00_03FF;
}
