//! Host-level tests for the multiplexing scanner.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use seg7_mux::{
    DigitBuffer, OutputArray, PinMap, Polarity, Port, SYMBOL_TABLE, ScanPhase, Scanner, Segment,
    SegmentPattern, VirtualPorts,
};

fn ready() -> Scanner<VirtualPorts> {
    let mut scanner = Scanner::new(VirtualPorts::new(), PinMap::AVR_PARALLEL);
    scanner.init().expect("AVR pins fit in 8-bit ports");
    scanner
}

fn lit_digit(scanner: &Scanner<VirtualPorts>) -> Option<usize> {
    let active = scanner.gpio().active_digits(scanner.pin_map());
    assert_eq!(
        active.iter().filter(|&&on| on).count(),
        1,
        "exactly one digit must be selected: {active:?}"
    );
    active.iter().position(|&on| on)
}

fn shown(scanner: &Scanner<VirtualPorts>) -> SegmentPattern {
    scanner.gpio().segment_pattern(scanner.pin_map())
}

const REPEATED_DIGITS: [u16; 10] = [0, 1111, 2222, 3333, 4444, 5555, 6666, 7777, 8888, 9999];

#[test]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "Digits below 10 rebuild a value below 10000"
)]
fn decomposition_reconstructs_every_four_digit_value() {
    for value in 0..=9999_u16 {
        let digits = DigitBuffer::from_value(value);
        let rebuilt = u16::from(digits.thousands()) * 1000
            + u16::from(digits.hundreds()) * 100
            + u16::from(digits.tens()) * 10
            + u16::from(digits.ones());
        assert_eq!(rebuilt, value);
        assert!(digits.as_array().iter().all(|&digit| digit < 10));
    }
}

#[test]
#[expect(
    clippy::integer_division_remainder_used,
    reason = "The expected digits are those of the value modulo 10000"
)]
fn values_past_9999_truncate_to_low_four_digits() {
    for value in 10_000..=u16::MAX {
        assert_eq!(
            DigitBuffer::from_value(value),
            DigitBuffer::from_value(value % 10_000),
            "value {value}"
        );
    }
}

#[test]
fn phase_cycles_with_period_four_from_digit0() {
    let mut scanner = ready();
    assert_eq!(scanner.phase(), ScanPhase::Digit0);
    for expected in ScanPhase::ALL.into_iter().cycle().take(40) {
        assert_eq!(scanner.phase(), expected);
        scanner.refresh(8080);
        assert_eq!(lit_digit(&scanner), Some(expected.index()));
    }
}

#[test]
fn exactly_one_digit_is_selected_after_every_refresh() {
    let mut scanner = ready();
    for value in (0..=u16::MAX).step_by(97) {
        scanner.refresh(value);
        lit_digit(&scanner);
    }
}

#[test]
fn repeated_digit_shows_same_pattern_at_every_position() {
    for (value, pattern) in REPEATED_DIGITS.into_iter().zip(SYMBOL_TABLE) {
        let mut scanner = ready();
        for _ in 0..4 {
            scanner.refresh(value);
            assert_eq!(shown(&scanner), pattern);
        }
    }
}

#[test]
fn refreshing_1234_walks_the_digits_left_to_right() {
    let mut scanner = ready();

    scanner.refresh(1234);
    assert_eq!(scanner.digits().as_array(), &[1, 2, 3, 4]);
    assert_eq!(lit_digit(&scanner), Some(0));
    assert_eq!(shown(&scanner), SYMBOL_TABLE[1]);
    assert_eq!(scanner.phase(), ScanPhase::Digit1);

    for (line, symbol) in [(1, 2), (2, 3), (3, 4)] {
        scanner.refresh(1234);
        assert_eq!(lit_digit(&scanner), Some(line));
        assert_eq!(shown(&scanner), SegmentPattern::for_symbol(symbol));
    }
    assert_eq!(scanner.phase(), ScanPhase::Digit0);
}

#[test]
fn refreshing_9_shows_leading_zeros() {
    let mut scanner = ready();
    let mut patterns = [SegmentPattern::BLANK; 4];
    for pattern in &mut patterns {
        scanner.refresh(9);
        *pattern = shown(&scanner);
    }
    assert_eq!(scanner.digits().as_array(), &[0, 0, 0, 9]);
    assert_eq!(patterns.map(SegmentPattern::bits), [0x3F, 0x3F, 0x3F, 0x6F]);
}

#[test]
fn new_value_takes_effect_on_the_next_refresh() {
    let mut scanner = ready();
    scanner.refresh(1111);
    scanner.refresh(2222);
    assert_eq!(lit_digit(&scanner), Some(1));
    assert_eq!(shown(&scanner), SYMBOL_TABLE[2]);
    assert_eq!(scanner.digits(), DigitBuffer::from_value(2222));
}

#[test]
fn common_cathode_selects_by_pulling_low() {
    let pin_map = PinMap::AVR_PARALLEL.with_polarity(Polarity::COMMON_CATHODE);
    let mut scanner = Scanner::new(VirtualPorts::new(), pin_map);
    scanner.init().expect("AVR pins fit in 8-bit ports");
    scanner.refresh(3);
    scanner.refresh(3);
    let levels = pin_map.digits.map(|pin| scanner.gpio().level(pin));
    assert_eq!(
        levels,
        [PinState::High, PinState::Low, PinState::High, PinState::High]
    );
}

#[test]
fn release_returns_the_backend() {
    let mut scanner = ready();
    scanner.refresh(1);
    let ports = scanner.release();
    assert_eq!(ports.active_digits(&PinMap::AVR_PARALLEL), [true, false, false, false]);
}

struct RecordingPin<'a>(&'a Cell<bool>);

impl ErrorType for RecordingPin<'_> {
    type Error = Infallible;
}

impl OutputPin for RecordingPin<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

#[test]
fn output_array_backend_drives_hal_pins() {
    let levels: [Cell<bool>; 12] = Default::default();
    let outputs = OutputArray::new(Port::A, levels.each_ref().map(RecordingPin));
    let pin_map = PinMap::sequential(Port::A).with_polarity(Polarity::COMMON_CATHODE);
    let mut scanner = Scanner::new(outputs, pin_map);
    scanner.init().expect("all twelve pins are in the array");

    let (segment_levels, cathode_levels) = levels.split_at(8);

    // Dark: segments low, cathodes high.
    assert!(segment_levels.iter().all(|level| !level.get()));
    assert!(cathode_levels.iter().all(Cell::get));

    scanner.refresh(4000);
    let segments = Segment::LINES
        .into_iter()
        .chain([Segment::DecimalPoint])
        .zip(segment_levels)
        .filter(|(_, level)| level.get())
        .fold(0, |bits, (segment, _)| bits | segment.bit());
    assert_eq!(segments, SYMBOL_TABLE[4].bits());
    let cathodes: Vec<bool> = cathode_levels.iter().map(Cell::get).collect();
    assert_eq!(cathodes, [false, true, true, true]);
}
