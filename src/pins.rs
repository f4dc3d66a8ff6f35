//! Board wiring: which pin drives which segment or digit, and at what level.

use derive_more::derive::Display;
use embedded_hal::digital::PinState;

use crate::{CELL_COUNT, SEGMENT_COUNT};

/// A GPIO port group, as named on 8-bit parts (`PORTB`, `PORTC`, ...).
///
/// Boards with a single bank use [`Port::A`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Port {
    /// Number of port groups.
    pub const COUNT: usize = 8;

    /// Zero-based position of the port.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One physical pin: a port group and a pin index within it.
///
/// Displays as `PB0`, `PD7`, ...
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[display("P{port}{pin}")]
pub struct PinId {
    pub port: Port,
    pub pin: u8,
}

impl PinId {
    #[must_use]
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }
}

/// The electrical level that turns a line "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    #[default]
    High,
    Low,
}

impl ActiveLevel {
    /// The pin state that makes a line active (`true`) or inactive (`false`).
    #[must_use]
    pub const fn state(self, active: bool) -> PinState {
        match (self, active) {
            (Self::High, true) | (Self::Low, false) => PinState::High,
            (Self::High, false) | (Self::Low, true) => PinState::Low,
        }
    }
}

/// Active levels for the segment lines and the digit-select lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Polarity {
    pub segments: ActiveLevel,
    pub digits: ActiveLevel,
}

impl Polarity {
    /// Segments and digit selects both active high, e.g. digits switched through NPN transistors.
    pub const ACTIVE_HIGH: Self = Self {
        segments: ActiveLevel::High,
        digits: ActiveLevel::High,
    };

    /// Common-cathode display wired directly: a digit lights when its cathode is pulled low.
    pub const COMMON_CATHODE: Self = Self {
        segments: ActiveLevel::High,
        digits: ActiveLevel::Low,
    };

    /// Common-anode display wired directly: segments sink current, anodes are driven high.
    pub const COMMON_ANODE: Self = Self {
        segments: ActiveLevel::Low,
        digits: ActiveLevel::High,
    };
}

/// Assignment of physical pins to display roles.
///
/// `segments[0]` drives segment A through `segments[6]` for segment G.
/// `digits[0]` selects the leftmost digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    pub segments: [PinId; SEGMENT_COUNT],
    pub decimal_point: Option<PinId>,
    pub digits: [PinId; CELL_COUNT],
    pub polarity: Polarity,
}

impl PinMap {
    /// Parallel wiring on an 8-bit AVR board.
    ///
    /// Segments A-D on `PC0`-`PC3`, E and F on `PD0`/`PD1`, G on `PD4`, the decimal
    /// point on `PD7`, digits 1-4 on `PB0`, `PB1`, `PB2` and `PB4`. All lines active high.
    pub const AVR_PARALLEL: Self = Self {
        segments: [
            PinId::new(Port::C, 0),
            PinId::new(Port::C, 1),
            PinId::new(Port::C, 2),
            PinId::new(Port::C, 3),
            PinId::new(Port::D, 0),
            PinId::new(Port::D, 1),
            PinId::new(Port::D, 4),
        ],
        decimal_point: Some(PinId::new(Port::D, 7)),
        digits: [
            PinId::new(Port::B, 0),
            PinId::new(Port::B, 1),
            PinId::new(Port::B, 2),
            PinId::new(Port::B, 4),
        ],
        polarity: Polarity::ACTIVE_HIGH,
    };

    /// Twelve consecutive pins of one port: segments A-G on 0-6, decimal point on 7,
    /// digits on 8-11.
    ///
    /// This is the layout of a 12-pin [`OutputArray`](crate::OutputArray) listed in that order.
    #[must_use]
    pub const fn sequential(port: Port) -> Self {
        Self {
            segments: [
                PinId::new(port, 0),
                PinId::new(port, 1),
                PinId::new(port, 2),
                PinId::new(port, 3),
                PinId::new(port, 4),
                PinId::new(port, 5),
                PinId::new(port, 6),
            ],
            decimal_point: Some(PinId::new(port, 7)),
            digits: [
                PinId::new(port, 8),
                PinId::new(port, 9),
                PinId::new(port, 10),
                PinId::new(port, 11),
            ],
            polarity: Polarity::ACTIVE_HIGH,
        }
    }

    #[must_use]
    pub const fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    #[must_use]
    pub const fn without_decimal_point(mut self) -> Self {
        self.decimal_point = None;
        self
    }

    /// Every mapped pin: segments, then the decimal point, then the digit selects.
    pub fn outputs(&self) -> impl Iterator<Item = PinId> + '_ {
        self.segments
            .iter()
            .copied()
            .chain(self.decimal_point)
            .chain(self.digits.iter().copied())
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn active_level_inverts_for_active_low() {
        assert_eq!(ActiveLevel::High.state(true), PinState::High);
        assert_eq!(ActiveLevel::High.state(false), PinState::Low);
        assert_eq!(ActiveLevel::Low.state(true), PinState::Low);
        assert_eq!(ActiveLevel::Low.state(false), PinState::High);
    }

    #[test]
    fn outputs_lists_segments_then_decimal_point_then_digits() {
        let map = PinMap::AVR_PARALLEL;
        let mut outputs = map.outputs();
        assert_eq!(outputs.next(), Some(PinId::new(Port::C, 0)));
        assert_eq!(outputs.nth(5), Some(PinId::new(Port::D, 4)));
        assert_eq!(outputs.next(), Some(PinId::new(Port::D, 7)));
        assert_eq!(outputs.next(), Some(PinId::new(Port::B, 0)));
        assert_eq!(outputs.last(), Some(PinId::new(Port::B, 4)));
        assert_eq!(map.outputs().count(), 12);
    }

    #[test]
    fn outputs_skips_unmapped_decimal_point() {
        let map = PinMap::sequential(Port::A).without_decimal_point();
        assert_eq!(map.outputs().count(), 11);
        assert!(map.outputs().all(|pin| pin.pin != 7));
    }

    #[test]
    fn with_polarity_only_changes_polarity() {
        let map = PinMap::sequential(Port::B).with_polarity(Polarity::COMMON_CATHODE);
        assert_eq!(map.polarity, Polarity::COMMON_CATHODE);
        assert_eq!(map.segments, PinMap::sequential(Port::B).segments);
        assert_eq!(map.digits[3], PinId::new(Port::B, 11));
    }
}
