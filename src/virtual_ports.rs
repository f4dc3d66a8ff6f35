//! An in-memory model of 8-bit GPIO ports, for running the scanner off-target.
//!
//! Each [`Port`] has a direction register (bit set = output) and an output
//! register (bit set = driven high), like the `DDRx`/`PORTx` pair on an AVR.

use embedded_hal::digital::PinState;

use crate::error::Error::PinNotInBank;
use crate::gpio::Gpio;
use crate::pins::{PinId, PinMap, Port};
use crate::segments::{Segment, SegmentPattern};
use crate::{CELL_COUNT, Error, Result};

/// Simulated port registers implementing [`Gpio`].
///
/// Reading the registers back through a [`PinMap`] shows what a display wired that
/// way would be showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualPorts {
    direction: [u8; Port::COUNT],
    output: [u8; Port::COUNT],
}

impl VirtualPorts {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            direction: [0; Port::COUNT],
            output: [0; Port::COUNT],
        }
    }

    /// The direction register of `port`.
    #[must_use]
    pub fn direction(&self, port: Port) -> u8 {
        self.direction.get(port.index()).copied().unwrap_or_default()
    }

    /// The output register of `port`.
    #[must_use]
    pub fn output(&self, port: Port) -> u8 {
        self.output.get(port.index()).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_output(&self, pin: PinId) -> bool {
        mask(pin).is_some_and(|bit| (self.direction(pin.port) & bit) != 0)
    }

    /// The level latched for `pin`. Pins never driven read low.
    #[must_use]
    pub fn level(&self, pin: PinId) -> PinState {
        PinState::from(mask(pin).is_some_and(|bit| (self.output(pin.port) & bit) != 0))
    }

    /// Which digit-select lines are active under `pin_map`'s polarity.
    #[must_use]
    pub fn active_digits(&self, pin_map: &PinMap) -> [bool; CELL_COUNT] {
        let active = pin_map.polarity.digits.state(true);
        pin_map.digits.map(|pin| self.level(pin) == active)
    }

    /// The segment pattern currently driven under `pin_map`'s polarity.
    #[must_use]
    pub fn segment_pattern(&self, pin_map: &PinMap) -> SegmentPattern {
        let lit = pin_map.polarity.segments.state(true);
        let mut bits = 0;
        for (segment, pin) in Segment::LINES.iter().zip(pin_map.segments) {
            if self.level(pin) == lit {
                bits |= segment.bit();
            }
        }
        if let Some(pin) = pin_map.decimal_point
            && self.level(pin) == lit
        {
            bits |= Segment::DecimalPoint.bit();
        }
        SegmentPattern::from_bits(bits)
    }
}

/// The bit for `pin` within its port register, if the port has such a pin.
fn mask(pin: PinId) -> Option<u8> {
    1_u8.checked_shl(u32::from(pin.pin))
}

impl Gpio for VirtualPorts {
    type Error = Error;

    fn configure_as_output(&mut self, pin: PinId) -> Result<()> {
        let bit = mask(pin).ok_or(PinNotInBank { pin })?;
        let direction = self
            .direction
            .get_mut(pin.port.index())
            .ok_or(PinNotInBank { pin })?;
        *direction |= bit;
        Ok(())
    }

    fn set_level(&mut self, pin: PinId, state: PinState) {
        let (Some(bit), Some(output)) = (mask(pin), self.output.get_mut(pin.port.index())) else {
            return;
        };
        match state {
            PinState::High => *output |= bit,
            PinState::Low => *output &= !bit,
        }
    }
}
