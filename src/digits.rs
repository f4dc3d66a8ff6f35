//! Decimal decomposition of the value being displayed.

use crate::CELL_COUNT;
use crate::scanner::ScanPhase;

/// The four decimal digits of a value, leftmost (thousands) first.
///
/// Position `n` is what digit-select line `n` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitBuffer([u8; CELL_COUNT]);

impl DigitBuffer {
    /// Splits `value` into thousands, hundreds, tens and ones.
    ///
    /// Values of 10000 or more keep only their low four decimal digits.
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::cast_possible_truncation,
        reason = "Modulo is required for digit extraction and each remainder is below 10"
    )]
    #[must_use]
    pub const fn from_value(value: u16) -> Self {
        let mut rest = value;
        let ones = (rest % 10) as u8;
        rest /= 10;
        let tens = (rest % 10) as u8;
        rest /= 10;
        let hundreds = (rest % 10) as u8;
        rest /= 10;
        let thousands = (rest % 10) as u8;
        Self([thousands, hundreds, tens, ones])
    }

    #[must_use]
    pub const fn thousands(self) -> u8 {
        self.0[0]
    }

    #[must_use]
    pub const fn hundreds(self) -> u8 {
        self.0[1]
    }

    #[must_use]
    pub const fn tens(self) -> u8 {
        self.0[2]
    }

    #[must_use]
    pub const fn ones(self) -> u8 {
        self.0[3]
    }

    /// The digit shown while the scanner is in `phase`.
    #[must_use]
    pub const fn at(self, phase: ScanPhase) -> u8 {
        match phase {
            ScanPhase::Digit0 => self.thousands(),
            ScanPhase::Digit1 => self.hundreds(),
            ScanPhase::Digit2 => self.tens(),
            ScanPhase::Digit3 => self.ones(),
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> &[u8; CELL_COUNT] {
        &self.0
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn splits_thousands_first() {
        let digits = DigitBuffer::from_value(1234);
        assert_eq!(digits.as_array(), &[1, 2, 3, 4]);
        assert_eq!(digits.ones(), 4);
        assert_eq!(digits.tens(), 3);
        assert_eq!(digits.hundreds(), 2);
        assert_eq!(digits.thousands(), 1);
    }

    #[test]
    fn small_values_pad_with_zeros() {
        assert_eq!(DigitBuffer::from_value(9).as_array(), &[0, 0, 0, 9]);
        assert_eq!(DigitBuffer::from_value(0).as_array(), &[0, 0, 0, 0]);
    }

    #[test]
    fn large_values_keep_low_four_digits() {
        assert_eq!(DigitBuffer::from_value(12345).as_array(), &[2, 3, 4, 5]);
        assert_eq!(DigitBuffer::from_value(u16::MAX).as_array(), &[5, 5, 3, 5]);
        assert_eq!(DigitBuffer::from_value(10000), DigitBuffer::from_value(0));
    }

    #[test]
    fn at_follows_phase_order() {
        let digits = DigitBuffer::from_value(5678);
        let shown = ScanPhase::ALL.map(|phase| digits.at(phase));
        assert_eq!(shown, [5, 6, 7, 8]);
    }
}
