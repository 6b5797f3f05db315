//! Precomputed port writes for values known ahead of time.
//!
//! A [`Frame`] is the scatter step of a [`PinList`] done once: for every port
//! the list spans it holds the list's mask and the port bits the value maps
//! to. Applying a frame is then a plain store, or one load and one store,
//! per port with no bit shuffling left. Build frames for constant patterns
//! (LCD commands, idle bus states) at start-up and replay them.
//!
//! Register end states are exactly those of the matching [`PinList`]
//! operation with the same value.

use heapless::Vec;

use crate::config::MAX_PORTS;
use crate::pin_list::PinList;
use crate::port::{Direction, PortId, PortWord, RegisterPort};

#[derive(Clone)]
struct FrameEntry<'a, W: PortWord> {
    port: &'a dyn RegisterPort<Word = W>,
    mask: W,
    value: W,
    owns_port: bool,
}

/// One value scattered over the ports of a pin list.
#[derive(Clone)]
pub struct Frame<'a, W: PortWord> {
    entries: Vec<FrameEntry<'a, W>, MAX_PORTS>,
}

impl<'a, W: PortWord> Frame<'a, W> {
    pub(crate) fn new(list: &PinList<'a, W>, value: u32) -> Self {
        // A list never spans more than MAX_PORTS ports.
        let entries = list
            .groups()
            .iter()
            .map(|group| FrameEntry {
                port: group.port,
                mask: W::truncate(group.mask),
                value: list.scatter(group, value),
                owns_port: group.owns_port(),
            })
            .collect();

        Self { entries }
    }

    /// Same register effect as [`PinList::write`].
    #[inline]
    pub fn write(&self) {
        for entry in self.entries.iter() {
            if entry.owns_port {
                entry.port.write(entry.value);
            } else {
                let current = entry.port.read();
                entry.port.write((current & !entry.mask) | entry.value);
            }
        }
    }

    /// Same register effect as [`PinList::set`].
    #[inline]
    pub fn set(&self) {
        for entry in self.entries.iter() {
            let current = entry.port.read();
            entry.port.write(current | entry.value);
        }
    }

    /// Same register effect as [`PinList::clear`].
    #[inline]
    pub fn clear(&self) {
        for entry in self.entries.iter() {
            let current = entry.port.read();
            entry.port.write(current & !entry.value);
        }
    }

    /// Same register effect as [`PinList::set_configuration`], using the
    /// frame's value as the mask.
    #[inline]
    pub fn set_configuration(&self, direction: Direction) {
        for entry in self.entries.iter() {
            entry.port.set_direction(entry.value, direction);
        }
    }

    /// `(port, list mask, value bits)` for every port, in list order.
    pub fn iter(&self) -> impl Iterator<Item = (PortId, W, W)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.port.id(), entry.mask, entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::Pin;
    use crate::test_port::TestPort;

    fn list<'a>(a: &'a TestPort<u16>, b: &'a TestPort<u16>) -> PinList<'a, u16> {
        PinList::new(&[
            Pin::new(a, 2).unwrap(),
            Pin::new(a, 1).unwrap(),
            Pin::new(a, 3).unwrap(),
            Pin::new(b, 4).unwrap(),
            Pin::new(b, 6).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_frame_contents() {
        let a = TestPort::<u16>::new('A');
        let b = TestPort::<u16>::new('B');
        let frame = list(&a, &b).frame(0x1f);

        let entries: std::vec::Vec<(PortId, u16, u16)> = frame.iter().collect();
        assert_eq!(
            entries,
            [(PortId('A'), 0x0e, 0x0e), (PortId('B'), 0x50, 0x50)]
        );
    }

    #[test]
    fn test_frame_matches_runtime_path() {
        let a1 = TestPort::<u16>::new('A');
        let b1 = TestPort::<u16>::new('B');
        let a2 = TestPort::<u16>::new('A');
        let b2 = TestPort::<u16>::new('B');
        let runtime = list(&a1, &b1);
        let constant = list(&a2, &b2);

        for value in 0..32u32 {
            for port in [&a1, &b1, &a2, &b2] {
                port.set_out_reg(0xa5a5);
                port.set_dir_reg(0x0f0f);
            }

            runtime.write(value);
            constant.frame(value).write();
            assert_eq!(a1.out_reg(), a2.out_reg());
            assert_eq!(b1.out_reg(), b2.out_reg());

            runtime.set(value);
            constant.frame(value).set();
            assert_eq!(a1.out_reg(), a2.out_reg());
            assert_eq!(b1.out_reg(), b2.out_reg());

            runtime.clear(value);
            constant.frame(value).clear();
            assert_eq!(a1.out_reg(), a2.out_reg());
            assert_eq!(b1.out_reg(), b2.out_reg());

            runtime.set_configuration(Direction::Out, value);
            constant.frame(value).set_configuration(Direction::Out);
            assert_eq!(a1.dir_reg(), a2.dir_reg());
            assert_eq!(b1.dir_reg(), b2.dir_reg());
        }
    }

    #[test]
    fn test_const_generic_operations() {
        let a = TestPort::<u16>::new('A');
        let b = TestPort::<u16>::new('B');
        let pins = list(&a, &b);

        pins.write_const::<0x1f>();
        assert_eq!(a.out_reg(), 0x0e);
        assert_eq!(b.out_reg(), 0x50);
        assert_eq!(pins.read(), 0x1f);

        pins.clear_const::<0x1f>();
        assert_eq!(a.out_reg(), 0);
        assert_eq!(b.out_reg(), 0);

        pins.set_const::<0b01001>();
        assert_eq!(a.out_reg(), 0x04);
        assert_eq!(b.out_reg(), 0x10);

        pins.set_configuration_const::<true, 0x1f>();
        assert_eq!(a.dir_reg(), 0x0e);
        assert_eq!(b.dir_reg(), 0x50);
        pins.set_configuration_const::<false, 0xff>();
        assert_eq!(a.dir_reg(), 0);
        assert_eq!(b.dir_reg(), 0);
    }

    #[test]
    fn test_owned_port_write_is_a_single_store() {
        let port = TestPort::<u8>::new('A');
        let pins: std::vec::Vec<Pin<u8>> =
            (0..8).map(|b| Pin::new(&port, b).unwrap()).collect();
        let frame = PinList::new(&pins).unwrap().frame(0x3c);

        port.set_out_reg(0xff);
        frame.write();
        assert_eq!(port.out_reg(), 0x3c);
        assert_eq!(port.output_loads(), 0);
        assert_eq!(port.output_stores(), 1);
    }
}
