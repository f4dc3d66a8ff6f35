use embedded_hal::digital::PinState;

use crate::pins::PinId;

/// The pin capability the [`Scanner`](crate::Scanner) consumes from its platform.
///
/// Implementations map a [`PinId`] to whatever the hardware calls it: a bit in an
/// 8-bit port register, an entry in an array of HAL pins, a line on a simulator.
pub trait Gpio {
    /// Why a pin could not be made an output.
    type Error;

    /// Makes `pin` a driven output. Called once per mapped pin during
    /// [`Scanner::init`](crate::Scanner::init); calling it again must be harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot drive `pin`.
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Drives `pin` high or low. Runs on every refresh, so it must not block.
    fn set_level(&mut self, pin: PinId, state: PinState);
}

impl<G: Gpio + ?Sized> Gpio for &mut G {
    type Error = G::Error;

    #[inline]
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        (**self).configure_as_output(pin)
    }

    #[inline]
    fn set_level(&mut self, pin: PinId, state: PinState) {
        (**self).set_level(pin, state);
    }
}
