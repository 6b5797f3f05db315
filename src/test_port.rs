//! In-memory register port for exercising pins and lists without hardware.

use core::cell::Cell;

use crate::port::{PortId, PortWord, RegisterPort};

/// Software stand-in for a GPIO bank.
///
/// The three registers are plain cells that tests set and inspect directly.
/// Output register accesses made through [`RegisterPort`] are counted, which
/// lets tests check how many transactions an operation issued.
#[derive(Debug)]
pub struct TestPort<W: PortWord> {
    id: PortId,
    out: Cell<W>,
    dir: Cell<W>,
    input: Cell<W>,
    output_loads: Cell<usize>,
    output_stores: Cell<usize>,
}

impl<W: PortWord> TestPort<W> {
    pub fn new(id: char) -> Self {
        Self {
            id: PortId(id),
            out: Cell::new(W::zero()),
            dir: Cell::new(W::zero()),
            input: Cell::new(W::zero()),
            output_loads: Cell::new(0),
            output_stores: Cell::new(0),
        }
    }

    pub fn out_reg(&self) -> W {
        self.out.get()
    }

    pub fn dir_reg(&self) -> W {
        self.dir.get()
    }

    pub fn in_reg(&self) -> W {
        self.input.get()
    }

    // Direct setters bypass the access counters.
    pub fn set_out_reg(&self, value: W) {
        self.out.set(value);
    }

    pub fn set_dir_reg(&self, value: W) {
        self.dir.set(value);
    }

    pub fn set_in_reg(&self, value: W) {
        self.input.set(value);
    }

    pub fn output_loads(&self) -> usize {
        self.output_loads.get()
    }

    pub fn output_stores(&self) -> usize {
        self.output_stores.get()
    }

    pub fn reset_counters(&self) {
        self.output_loads.set(0);
        self.output_stores.set(0);
    }
}

impl<W: PortWord> RegisterPort for TestPort<W> {
    type Word = W;

    fn id(&self) -> PortId {
        self.id
    }

    fn write(&self, value: W) {
        self.output_stores.set(self.output_stores.get() + 1);
        self.out.set(value);
    }

    fn read(&self) -> W {
        self.output_loads.set(self.output_loads.get() + 1);
        self.out.get()
    }

    fn read_input(&self) -> W {
        self.input.get()
    }

    fn read_direction(&self) -> W {
        self.dir.get()
    }

    fn write_direction(&self, value: W) {
        self.dir.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_are_independent() {
        let port = TestPort::<u16>::new('B');

        port.write(0x1234);
        port.write_direction(0x00ff);
        port.set_in_reg(0xbeef);

        assert_eq!(port.read(), 0x1234);
        assert_eq!(port.read_direction(), 0x00ff);
        assert_eq!(port.read_input(), 0xbeef);
        assert_eq!(port.id(), PortId('B'));
    }

    #[test]
    fn test_counts_output_accesses() {
        let port = TestPort::<u8>::new('A');

        port.write(1);
        port.write(2);
        let _ = port.read();
        port.set_out_reg(3);

        assert_eq!(port.output_stores(), 2);
        assert_eq!(port.output_loads(), 1);
        assert_eq!(port.out_reg(), 3);

        port.reset_counters();
        assert_eq!(port.output_stores(), 0);
        assert_eq!(port.output_loads(), 0);
    }
}
