//! Segment patterns and the hexadecimal symbol table.
//!
//! Segment layout:
//! ```text
//!    AAAA
//!   F    B
//!   F    B
//!    GGGG
//!   E    C
//!   E    C
//!    DDDD  DP
//! ```

use crate::SEGMENT_COUNT;

/// One segment of a 7-segment digit, plus the decimal point.
///
/// The discriminant is the segment's bit position in a [`SegmentPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    DecimalPoint = 7,
}

impl Segment {
    /// The seven segment lines, in pin-map order.
    pub const LINES: [Self; SEGMENT_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// The mask for this segment within a pattern byte.
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Which segments of one digit are lit. Bit 0 is segment A, bit 6 segment G,
/// bit 7 the decimal point. A set bit means the segment is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// Every segment off.
    pub const BLANK: Self = Self(0);

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The table entry for a symbol 0-15. Only the low nibble of `symbol` is used.
    #[expect(
        clippy::indexing_slicing,
        reason = "The index is masked to the table's 16 entries"
    )]
    #[must_use]
    pub const fn for_symbol(symbol: u8) -> Self {
        SYMBOL_TABLE[(symbol & 0x0F) as usize]
    }

    #[must_use]
    pub const fn is_lit(self, segment: Segment) -> bool {
        (self.0 & segment.bit()) != 0
    }

    #[must_use]
    pub const fn with_decimal_point(self) -> Self {
        Self(self.0 | Segment::DecimalPoint.bit())
    }
}

const SEG_A: u8 = Segment::A.bit();
const SEG_B: u8 = Segment::B.bit();
const SEG_C: u8 = Segment::C.bit();
const SEG_D: u8 = Segment::D.bit();
const SEG_E: u8 = Segment::E.bit();
const SEG_F: u8 = Segment::F.bit();
const SEG_G: u8 = Segment::G.bit();

/// Patterns for the hexadecimal symbols `0`-`9`, `A`, `b`, `C`, `d`, `E`, `F`.
pub const SYMBOL_TABLE: [SegmentPattern; 16] = [
    SegmentPattern(SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F), // 0
    SegmentPattern(SEG_B | SEG_C),                                 // 1
    SegmentPattern(SEG_A | SEG_B | SEG_D | SEG_E | SEG_G),         // 2
    SegmentPattern(SEG_A | SEG_B | SEG_C | SEG_D | SEG_G),         // 3
    SegmentPattern(SEG_B | SEG_C | SEG_F | SEG_G),                 // 4
    SegmentPattern(SEG_A | SEG_C | SEG_D | SEG_F | SEG_G),         // 5
    SegmentPattern(SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G), // 6
    SegmentPattern(SEG_A | SEG_B | SEG_C),                         // 7
    SegmentPattern(SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G), // 8
    SegmentPattern(SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G), // 9
    SegmentPattern(SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G), // A
    SegmentPattern(SEG_C | SEG_D | SEG_E | SEG_F | SEG_G),         // b
    SegmentPattern(SEG_A | SEG_D | SEG_E | SEG_F),                 // C
    SegmentPattern(SEG_B | SEG_C | SEG_D | SEG_E | SEG_G),         // d
    SegmentPattern(SEG_A | SEG_D | SEG_E | SEG_F | SEG_G),         // E
    SegmentPattern(SEG_A | SEG_E | SEG_F | SEG_G),                 // F
];
