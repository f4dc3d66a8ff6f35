use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::Error::PinNotInBank;
use crate::gpio::Gpio;
use crate::pins::{PinId, Port};
use crate::{Error, Result};

/// Array of GPIO output pins acting as one port of the display.
///
/// Pin `n` of `port` is `outputs[n]`. The pins are already outputs by type, so
/// configuring them only checks that the pin belongs to this array.
///
/// ```
/// use core::convert::Infallible;
/// use embedded_hal::digital::{ErrorType, OutputPin};
/// use seg7_mux::{OutputArray, PinMap, Port, Scanner};
///
/// struct Led;
/// impl ErrorType for Led {
///     type Error = Infallible;
/// }
/// impl OutputPin for Led {
///     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
///     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// }
///
/// let outputs = OutputArray::new(Port::A, [
///     Led, Led, Led, Led, Led, Led, Led, Led, // segments A-G, decimal point
///     Led, Led, Led, Led,                     // digits
/// ]);
/// let mut scanner = Scanner::new(outputs, PinMap::sequential(Port::A));
/// scanner.init()?;
/// scanner.refresh(42);
/// # Ok::<(), seg7_mux::Error>(())
/// ```
pub struct OutputArray<P, const N: usize> {
    port: Port,
    outputs: [P; N],
}

impl<P, const N: usize> OutputArray<P, N>
where
    P: OutputPin<Error = Infallible>,
{
    #[must_use]
    pub const fn new(port: Port, outputs: [P; N]) -> Self {
        Self { port, outputs }
    }

    /// Gives the pins back.
    #[must_use]
    pub fn release(self) -> [P; N] {
        self.outputs
    }

    #[inline]
    fn get_mut(&mut self, pin: PinId) -> Option<&mut P> {
        if pin.port == self.port {
            self.outputs.get_mut(usize::from(pin.pin))
        } else {
            None
        }
    }
}

impl<P, const N: usize> Gpio for OutputArray<P, N>
where
    P: OutputPin<Error = Infallible>,
{
    type Error = Error;

    fn configure_as_output(&mut self, pin: PinId) -> Result<()> {
        self.get_mut(pin).map(|_| ()).ok_or(PinNotInBank { pin })
    }

    #[inline]
    fn set_level(&mut self, pin: PinId, state: PinState) {
        // Pins outside the array were rejected by `configure_as_output`.
        if let Some(output) = self.get_mut(pin) {
            let Ok(()) = output.set_state(state);
        }
    }
}
