#![cfg_attr(not(test), no_std)]
#![allow(clippy::upper_case_acronyms)]

//! Driver for the AD9959 four-channel direct digital synthesis chip.
//!
//! The chip is controlled over an SPI-like serial bus (mode 0, MSB first)
//! plus three discrete lines: reset, chip enable (active low) and the
//! I/O update strobe that commits staged register writes. This crate is
//! platform-agnostic: wire it up with any `embedded-hal` pins, either
//! through the provided [`BitBangSpi`] transport or your own [`DdsSpi`]
//! implementation on top of a hardware SPI peripheral.
//!
//! All setters only *stage* values in the chip's registers; nothing reaches
//! the outputs until [`Ad9959::update`] pulses the update strobe, so related
//! writes can be batched and committed atomically.
//!
//! To calibrate, configure the clock with the default calibration constant
//! (10 MHz), measure the generated frequency with a frequency counter, and
//! pass the measured value as the calibration constant instead.

pub mod driver;
pub mod registers;
pub mod spi;

pub use driver::{Ad9959, ControlPins, Error, DEFAULT_CALIBRATION, DEFAULT_MULTIPLIER};
pub use registers::{Channels, Register};
pub use spi::{BitBangSpi, DdsSpi};
