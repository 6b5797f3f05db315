use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::error::Error;
use crate::port::{Direction, PortId, PortWord, RegisterPort};
use crate::{BM_CLR, BM_FLIP, BM_SET};

/// One bit of one register port.
///
/// A pin is only a handle: it borrows its port and owns nothing. Any number
/// of pins, in any number of lists, may point at the same physical bit;
/// nothing detects that and the results of such aliasing are up to the
/// caller.
///
/// Every operation is a read-modify-write of a single register that leaves
/// all other bits of that register as they were.
#[derive(Clone, Copy)]
pub struct Pin<'a, W: PortWord> {
    port: &'a dyn RegisterPort<Word = W>,
    bit: u8,
}

impl<'a, W: PortWord> Pin<'a, W> {
    /// Binds `bit` of `port`.
    ///
    /// Fails with [`Error::BitOutOfRange`] when the port register has no
    /// such bit.
    pub fn new(port: &'a dyn RegisterPort<Word = W>, bit: u8) -> Result<Self, Error> {
        if bit >= W::BITS {
            return Err(Error::BitOutOfRange {
                port: port.id(),
                bit,
                width: W::BITS,
            });
        }

        Ok(Self { port, bit })
    }

    pub fn port(&self) -> &'a dyn RegisterPort<Word = W> {
        self.port
    }

    pub fn port_id(&self) -> PortId {
        self.port.id()
    }

    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// Single-bit mask of this pin within its port register.
    #[inline(always)]
    pub fn mask(&self) -> W {
        W::one() << self.bit as usize
    }

    #[inline]
    pub fn set(&self) {
        let mut value = self.port.read();
        BM_SET!(value, self.mask());
        self.port.write(value);
    }

    #[inline]
    pub fn clear(&self) {
        let mut value = self.port.read();
        BM_CLR!(value, self.mask());
        self.port.write(value);
    }

    #[inline]
    pub fn toggle(&self) {
        let mut value = self.port.read();
        BM_FLIP!(value, self.mask());
        self.port.write(value);
    }

    /// Drives the pin high when `high`, low otherwise.
    #[inline]
    pub fn set_value(&self, high: bool) {
        if high {
            self.set()
        } else {
            self.clear()
        }
    }

    /// [`set_value`](Self::set_value) with the level fixed at compile time,
    /// so the branch disappears.
    #[inline(always)]
    pub fn set_value_const<const HIGH: bool>(&self) {
        if HIGH {
            self.set()
        } else {
            self.clear()
        }
    }

    /// Level of the pin as seen by the input register.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.port.read_input() & self.mask() != W::zero()
    }

    /// Level the pin is being driven to, from the output register.
    #[inline]
    pub fn is_output_set(&self) -> bool {
        self.port.read() & self.mask() != W::zero()
    }

    #[inline]
    pub fn set_direction_read(&self) {
        self.set_direction(Direction::In)
    }

    #[inline]
    pub fn set_direction_write(&self) {
        self.set_direction(Direction::Out)
    }

    #[inline]
    pub fn set_direction(&self, direction: Direction) {
        self.port.set_direction(self.mask(), direction)
    }

    #[inline(always)]
    pub fn set_direction_const<const OUTPUT: bool>(&self) {
        if OUTPUT {
            self.set_direction_write()
        } else {
            self.set_direction_read()
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from(self.port.read_direction() & self.mask() != W::zero())
    }
}

impl<W: PortWord> PartialEq for Pin<'_, W> {
    fn eq(&self, other: &Self) -> bool {
        self.port_id() == other.port_id() && self.bit == other.bit
    }
}

impl<W: PortWord> Eq for Pin<'_, W> {}

impl<W: PortWord> fmt::Debug for Pin<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port_id(), self.bit)
    }
}

impl<W: PortWord> ErrorType for Pin<'_, W> {
    type Error = Infallible;
}

impl<W: PortWord> OutputPin for Pin<'_, W> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.clear();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set();
        Ok(())
    }
}

impl<W: PortWord> StatefulOutputPin for Pin<'_, W> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_output_set())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_output_set())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self);
        Ok(())
    }
}

impl<W: PortWord> InputPin for Pin<'_, W> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_set())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_set())
    }
}
