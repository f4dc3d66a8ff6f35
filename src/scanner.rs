//! A device abstraction for a multiplexed 4-digit 7-segment LED display.
//!
//! See [`Scanner`] for usage.

#[cfg(feature = "display-trace")]
use defmt::info;
use embedded_hal::digital::PinState;

use crate::digits::DigitBuffer;
use crate::error::Error::PinConfig;
use crate::gpio::Gpio;
use crate::pins::{ActiveLevel, PinMap};
use crate::segments::{Segment, SegmentPattern};
use crate::{CELL_COUNT, Result};

/// Which digit the next [`Scanner::refresh`] lights.
///
/// Every refresh moves to the next phase, wrapping from `Digit3` to `Digit0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanPhase {
    #[default]
    Digit0,
    Digit1,
    Digit2,
    Digit3,
}

impl ScanPhase {
    /// The phases in scan order.
    pub const ALL: [Self; CELL_COUNT] = [Self::Digit0, Self::Digit1, Self::Digit2, Self::Digit3];

    /// The digit-select line this phase activates.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Digit0 => Self::Digit1,
            Self::Digit1 => Self::Digit2,
            Self::Digit2 => Self::Digit3,
            Self::Digit3 => Self::Digit0,
        }
    }
}

/// Drives a 4-digit, 7-segment display one digit per call.
///
/// The scanner owns its GPIO backend, the digit buffer and the scan phase. It owns
/// no timer: call [`refresh`](Self::refresh) at a steady rate, at least 400 times
/// a second (100 Hz per digit) to avoid visible flicker.
///
/// `refresh` takes `&mut self`, so it cannot overlap with itself or with
/// [`init`](Self::init). A scanner shared between an interrupt handler and the main
/// loop must sit behind a critical-section mutex.
///
/// # Example
///
/// ```
/// use seg7_mux::{PinMap, Scanner, VirtualPorts};
///
/// let pin_map = PinMap::AVR_PARALLEL;
/// let mut scanner = Scanner::new(VirtualPorts::new(), pin_map);
/// scanner.init()?;
///
/// // A timer would normally drive this.
/// for _ in 0..4 {
///     scanner.refresh(2024);
///     let lit = scanner.gpio().active_digits(&pin_map);
///     assert_eq!(lit.iter().filter(|&&active| active).count(), 1);
/// }
/// # Ok::<(), seg7_mux::Error>(())
/// ```
pub struct Scanner<G> {
    gpio: G,
    pin_map: PinMap,
    digits: DigitBuffer,
    phase: ScanPhase,
}

impl<G: Gpio> Scanner<G> {
    /// Creates a scanner in phase [`ScanPhase::Digit0`]. No pins are touched until
    /// [`init`](Self::init).
    #[must_use]
    pub const fn new(gpio: G, pin_map: PinMap) -> Self {
        Self {
            gpio,
            pin_map,
            digits: DigitBuffer::from_value(0),
            phase: ScanPhase::Digit0,
        }
    }

    /// Makes every mapped pin an output and turns the display dark.
    ///
    /// Safe to call again; it only re-asserts directions and levels, and restarts
    /// the scan at [`ScanPhase::Digit0`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::PinConfig`](crate::Error::PinConfig) naming the first pin the
    /// backend could not configure. The display cannot work without it.
    pub fn init(&mut self) -> Result<()> {
        for pin in self.pin_map.outputs() {
            self.gpio
                .configure_as_output(pin)
                .map_err(|_| PinConfig { pin })?;
        }
        self.drive_segments(SegmentPattern::BLANK);
        self.blank();
        self.phase = ScanPhase::Digit0;
        #[cfg(feature = "display-trace")]
        info!("scanner ready: {:?}", self.pin_map);
        Ok(())
    }

    /// Shows the next digit of `value` and advances the phase.
    ///
    /// Values of 10000 or more show their low four decimal digits. The work per call
    /// is a fixed number of pin writes, so this is fine to call from an interrupt.
    pub fn refresh(&mut self, value: u16) {
        self.digits = DigitBuffer::from_value(value);
        let pattern = SegmentPattern::for_symbol(self.digits.at(self.phase));
        #[cfg(feature = "display-trace")]
        info!("refresh {}: {:?} -> {:?}", value, self.phase, pattern);
        self.drive_segments(pattern);
        self.select(self.phase);
        self.phase = self.phase.next();
    }

    /// Deasserts every digit-select line without moving the phase.
    ///
    /// Call this before stopping the refresh cadence, or the last digit stays lit.
    pub fn blank(&mut self) {
        let inactive = self.pin_map.polarity.digits.state(false);
        for pin in self.pin_map.digits {
            self.gpio.set_level(pin, inactive);
        }
    }

    /// The phase the next refresh will show.
    #[must_use]
    pub const fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// The digits decomposed by the latest refresh.
    #[must_use]
    pub const fn digits(&self) -> DigitBuffer {
        self.digits
    }

    #[must_use]
    pub const fn pin_map(&self) -> &PinMap {
        &self.pin_map
    }

    #[must_use]
    pub const fn gpio(&self) -> &G {
        &self.gpio
    }

    /// Gives the GPIO backend back.
    #[must_use]
    pub fn release(self) -> G {
        self.gpio
    }

    fn drive_segments(&mut self, pattern: SegmentPattern) {
        let level = self.pin_map.polarity.segments;
        for (&segment, pin) in Segment::LINES.iter().zip(self.pin_map.segments) {
            self.gpio.set_level(pin, segment_state(level, pattern, segment));
        }
        if let Some(pin) = self.pin_map.decimal_point {
            self.gpio
                .set_level(pin, segment_state(level, pattern, Segment::DecimalPoint));
        }
    }

    fn select(&mut self, phase: ScanPhase) {
        let level = self.pin_map.polarity.digits;
        for (candidate, pin) in ScanPhase::ALL.into_iter().zip(self.pin_map.digits) {
            self.gpio.set_level(pin, level.state(candidate == phase));
        }
    }
}

#[inline]
const fn segment_state(level: ActiveLevel, pattern: SegmentPattern, segment: Segment) -> PinState {
    level.state(pattern.is_lit(segment))
}
