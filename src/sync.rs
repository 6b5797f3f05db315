//! Interrupt-safe access to a pin list.
//!
//! Pin list operations are read-modify-writes and are not atomic. When an
//! interrupt handler drives pins on a port that the main loop also drives,
//! wrap the main loop's accesses so the handler cannot run between the read
//! and the write.

use crate::pin_list::PinList;
use crate::port::{Direction, PortWord};

/// Borrowed view of a [`PinList`] whose operations each run inside one
/// critical section.
pub struct InterruptFree<'l, 'a, W: PortWord> {
    list: &'l PinList<'a, W>,
}

impl<'a, W: PortWord> PinList<'a, W> {
    pub fn interrupt_free(&self) -> InterruptFree<'_, 'a, W> {
        InterruptFree { list: self }
    }
}

impl<W: PortWord> InterruptFree<'_, '_, W> {
    pub fn write(&self, value: u32) {
        critical_section::with(|_| self.list.write(value))
    }

    pub fn read(&self) -> u32 {
        critical_section::with(|_| self.list.read())
    }

    pub fn pin_read(&self) -> u32 {
        critical_section::with(|_| self.list.pin_read())
    }

    pub fn set(&self, select: u32) {
        critical_section::with(|_| self.list.set(select))
    }

    pub fn clear(&self, select: u32) {
        critical_section::with(|_| self.list.clear(select))
    }

    pub fn set_configuration(&self, direction: Direction, mask: u32) {
        critical_section::with(|_| self.list.set_configuration(direction, mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::Pin;
    use crate::test_port::TestPort;

    #[test]
    fn test_interrupt_free_matches_plain_list() {
        let port = TestPort::<u16>::new('A');
        let list = PinList::new(&[
            Pin::new(&port, 9).unwrap(),
            Pin::new(&port, 3).unwrap(),
            Pin::new(&port, 4).unwrap(),
        ])
        .unwrap();
        let guarded = list.interrupt_free();

        port.set_out_reg(0x8001);
        guarded.write(0b101);
        assert_eq!(port.out_reg(), 0x8211);
        assert_eq!(guarded.read(), 0b101);

        guarded.clear(0b001);
        assert_eq!(port.out_reg(), 0x8011);
        guarded.set(0b010);
        assert_eq!(port.out_reg(), 0x8019);

        guarded.set_configuration(Direction::Out, 0b110);
        assert_eq!(port.dir_reg(), 0x0018);

        port.set_in_reg(0x0200);
        assert_eq!(guarded.pin_read(), 0b001);
    }
}
