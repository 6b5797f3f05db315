use core::fmt;

use num_traits::{PrimInt, Unsigned};

/// Identifies a register port, conventionally by its letter (`'A'`, `'B'`, ...).
///
/// Pin lists group pins by this id, so two distinct ports must never share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId(pub char);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pin direction. In direction registers a set bit means output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl From<bool> for Direction {
    fn from(output: bool) -> Self {
        if output {
            Direction::Out
        } else {
            Direction::In
        }
    }
}

/// Unsigned register word a port is built from.
///
/// Logical bus values are carried as `u32`, so every word converts to and
/// from `u32`. Narrowing drops the high bits, the same way a narrow
/// register ignores them.
pub trait PortWord: PrimInt + Unsigned + fmt::Debug + 'static {
    const BITS: u8;

    fn truncate(bits: u32) -> Self;

    fn widen(self) -> u32;
}

macro_rules! port_word {
    ( $t:ty ) => {
        impl PortWord for $t {
            const BITS: u8 = <$t>::BITS as u8;

            #[inline(always)]
            fn truncate(bits: u32) -> Self {
                bits as $t
            }

            #[inline(always)]
            fn widen(self) -> u32 {
                self as u32
            }
        }
    };
}

port_word!(u8);
port_word!(u16);
port_word!(u32);

/// A GPIO bank with output, direction and input registers.
///
/// Every method works on the whole register; bit-level masking is done by
/// [`Pin`](crate::pin::Pin) and [`PinList`](crate::pin_list::PinList).
/// Methods take `&self` because a port is shared hardware: any number of
/// pins and lists may alias it at once.
///
/// Nothing here is atomic. A read-modify-write that races an interrupt
/// handler touching the same port can lose the handler's update. Callers
/// that share a port with an ISR mask interrupts themselves, see
/// [`crate::sync`].
pub trait RegisterPort {
    type Word: PortWord;

    fn id(&self) -> PortId;

    /// Replaces the output register.
    fn write(&self, value: Self::Word);

    /// Current output register, not the electrical pin level.
    fn read(&self) -> Self::Word;

    fn read_input(&self) -> Self::Word;

    fn read_direction(&self) -> Self::Word;

    /// Replaces the direction register.
    fn write_direction(&self, value: Self::Word);

    /// Switches every pin in `mask` to `direction`, leaving the rest alone.
    fn set_direction(&self, mask: Self::Word, direction: Direction) {
        let current = self.read_direction();
        let value = match direction {
            Direction::Out => current | mask,
            Direction::In => current & !mask,
        };
        self.write_direction(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_port::TestPort;

    #[test]
    fn test_port_word_conversions() {
        assert_eq!(<u8 as PortWord>::BITS, 8);
        assert_eq!(<u16 as PortWord>::BITS, 16);
        assert_eq!(<u32 as PortWord>::BITS, 32);

        assert_eq!(u8::truncate(0x1ff), 0xff);
        assert_eq!(u16::truncate(0x1_2345), 0x2345);
        assert_eq!(0xabu8.widen(), 0xab);
    }

    #[test]
    fn test_set_direction_keeps_other_bits() {
        let port = TestPort::<u8>::new('A');
        port.set_dir_reg(0b1000_0001);

        port.set_direction(0b0000_0110, Direction::Out);
        assert_eq!(port.dir_reg(), 0b1000_0111);

        port.set_direction(0b1000_0010, Direction::In);
        assert_eq!(port.dir_reg(), 0b0000_0101);
    }

    #[test]
    fn test_direction_from_bool() {
        assert_eq!(Direction::from(true), Direction::Out);
        assert_eq!(Direction::from(false), Direction::In);
    }

    #[test]
    fn test_port_id_display() {
        assert_eq!(format!("{}", PortId('C')), "C");
    }
}
