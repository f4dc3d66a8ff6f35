//! Multiplexed driver for 4-digit, 7-segment LED displays.
//!
//! Only one digit's select line is active at any instant. Each call to
//! [`Scanner::refresh`] lights the next digit, so calling it at a steady rate
//! (a timer interrupt, an async ticker, a polling loop) makes all four digits
//! appear lit at once. The caller owns that cadence; this crate owns no timer.
//!
//! Pins are reached through the small [`Gpio`] trait and a [`PinMap`] that says
//! which pin plays which role, so the same scanning logic runs on any board
//! wiring. [`OutputArray`] adapts any `embedded-hal` output pins.
//!
//! ```
//! use seg7_mux::{PinMap, Scanner, ScanPhase, VirtualPorts};
//!
//! let mut scanner = Scanner::new(VirtualPorts::new(), PinMap::AVR_PARALLEL);
//! scanner.init()?;
//! scanner.refresh(1234);
//! assert_eq!(scanner.phase(), ScanPhase::Digit1);
//! # Ok::<(), seg7_mux::Error>(())
//! ```
#![no_std]

mod digits;
mod error;
mod gpio;
mod output_array;
mod pins;
mod scanner;
mod segments;
mod virtual_ports;

/// The number of cells (digits) in the display.
pub const CELL_COUNT: usize = 4;

/// The number of segment lines (A through G) per digit, not counting the decimal point.
pub const SEGMENT_COUNT: usize = 7;

pub use digits::DigitBuffer;
pub use error::{Error, Result};
pub use gpio::Gpio;
pub use output_array::OutputArray;
pub use pins::{ActiveLevel, PinId, PinMap, Polarity, Port};
pub use scanner::{ScanPhase, Scanner};
pub use segments::{SYMBOL_TABLE, Segment, SegmentPattern};
pub use virtual_ports::VirtualPorts;
