use derive_more::derive::{Display, Error};

use crate::pins::PinId;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// Only pin setup can fail. Once [`Scanner::init`](crate::Scanner::init) succeeds,
/// refreshing the display has no error path.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The GPIO backend refused to make this pin a driven output.
    #[display("Cannot configure {pin} as an output")]
    PinConfig { pin: PinId },

    /// The pin is not one of the outputs a pin bank owns.
    #[display("{pin} is not part of this output bank")]
    PinNotInBank { pin: PinId },
}
