//! Byte-at-a-time output over a pin list, for parallel buses such as
//! HD44780 character displays.

use crate::pin::Pin;
use crate::pin_list::PinList;
use crate::port::PortWord;

/// Something bytes can be pushed into one at a time.
pub trait ByteSink {
    fn put(&mut self, byte: u8);

    /// Pushes `bytes` in order, one [`put`](Self::put) each.
    fn write_block(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put(byte);
        }
    }
}

/// A data bus made of a pin list, latched by an optional strobe pin.
///
/// Each byte is written to the data pins as a list value, then the strobe
/// is pulsed high and low. Data lists shorter than 8 pins drop the high
/// bits of every byte. Setup and hold timing is left to the caller.
pub struct ParallelBus<'a, W: PortWord> {
    data: PinList<'a, W>,
    strobe: Option<Pin<'a, W>>,
}

impl<'a, W: PortWord> ParallelBus<'a, W> {
    pub fn new(data: PinList<'a, W>, strobe: Option<Pin<'a, W>>) -> Self {
        Self { data, strobe }
    }

    pub fn data(&self) -> &PinList<'a, W> {
        &self.data
    }
}

impl<W: PortWord> ByteSink for ParallelBus<'_, W> {
    fn put(&mut self, byte: u8) {
        self.data.write(byte as u32);
        if let Some(strobe) = &self.strobe {
            strobe.set();
            strobe.clear();
        }
    }
}
