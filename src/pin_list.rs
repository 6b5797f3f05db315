//! Virtual ports: an ordered list of pins driven as one integer.
//!
//! Logical bit `i` of a value belongs to the `i`-th pin of the list. Pins may
//! live on any bit of any port and in any order, so writing a value means
//! scattering its bits over the physical registers, and reading means
//! gathering them back.
//!
//! The scatter/gather work is planned once, when the list is built. Pins are
//! partitioned by port, and within a port, pins whose physical bit sits the
//! same distance from their logical index form a run that moves with a
//! single mask-and-shift. A list wired in order (`PA2, PA3, PA4, PA5`) is one
//! run; a fully scrambled one degenerates to one run per pin. Either way each
//! operation touches each port exactly once.

use core::fmt;
use core::ops::Range;

use heapless::Vec;

use crate::config::{MAX_PINS, MAX_PORTS};
use crate::error::Error;
use crate::frame::Frame;
use crate::pin::Pin;
use crate::port::{Direction, PortId, PortWord, RegisterPort};
use crate::sdk::common::bit::{low_mask, shift_signed};
use crate::BIT;

/// Pins of one port whose physical bit is `shift` places from their
/// logical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShiftRun {
    logical: u32,
    physical: u32,
    shift: i8,
}

impl ShiftRun {
    fn new(index: usize, bit: u8) -> Self {
        Self {
            logical: BIT!(index as u32),
            physical: BIT!(bit as u32),
            shift: bit as i8 - index as i8,
        }
    }

    fn add(&mut self, index: usize, bit: u8) {
        self.logical |= BIT!(index as u32);
        self.physical |= BIT!(bit as u32);
    }

    #[inline(always)]
    fn scatter(&self, value: u32) -> u32 {
        shift_signed(value & self.logical, self.shift)
    }

    #[inline(always)]
    fn gather(&self, port_bits: u32) -> u32 {
        shift_signed(port_bits & self.physical, -self.shift)
    }
}

/// Every pin a list has on one port.
#[derive(Clone)]
pub(crate) struct PortGroup<'a, W: PortWord> {
    pub(crate) port: &'a dyn RegisterPort<Word = W>,
    // Physical bits the list owns on this port.
    pub(crate) mask: u32,
    runs: Range<u8>,
}

impl<W: PortWord> PortGroup<'_, W> {
    /// The list owns the whole register, so a write needs no read first.
    pub(crate) fn owns_port(&self) -> bool {
        self.mask == W::max_value().widen()
    }
}

/// An ordered set of pins addressed as a single integer.
///
/// Built once from its pins, after which the pin order and the per-port
/// plan never change. Cloning a list copies the pin handles and the plan,
/// never register contents; dropping one touches no hardware.
///
/// Values are `u32` and only the low [`len`](Self::len) bits mean anything.
/// Higher bits are ignored.
///
/// Operations on different ports are issued in no particular order. Two
/// lists sharing a physical pin, or a list holding the same pin twice, give
/// undefined results; nothing checks for it.
#[derive(Clone)]
pub struct PinList<'a, W: PortWord> {
    pins: Vec<Pin<'a, W>, MAX_PINS>,
    groups: Vec<PortGroup<'a, W>, MAX_PORTS>,
    runs: Vec<ShiftRun, MAX_PINS>,
}

impl<'a, W: PortWord> PinList<'a, W> {
    /// Builds a list whose logical bit `i` is `pins[i]`.
    ///
    /// # Algorithm
    ///
    /// 1. Collect the distinct ports in order of first appearance
    /// 2. For each port, walk the pins it holds and bucket them by
    ///    `physical bit - logical index`
    /// 3. Store each bucket as a run, runs of one port kept contiguous
    ///
    /// # Errors
    ///
    /// * [`Error::TooManyPins`] for more than [`MAX_PINS`] pins
    /// * [`Error::TooManyPorts`] when the pins span more than [`MAX_PORTS`] ports
    pub fn new(pins: &[Pin<'a, W>]) -> Result<Self, Error> {
        let pins: Vec<Pin<'a, W>, MAX_PINS> =
            Vec::from_slice(pins).map_err(|_| Error::TooManyPins {
                len: pins.len(),
                max: MAX_PINS,
            })?;

        let mut groups: Vec<PortGroup<'a, W>, MAX_PORTS> = Vec::new();
        for pin in pins.iter() {
            if groups.iter().any(|g| g.port.id() == pin.port_id()) {
                continue;
            }
            groups
                .push(PortGroup {
                    port: pin.port(),
                    mask: 0,
                    runs: 0..0,
                })
                .map_err(|_| Error::TooManyPorts { max: MAX_PORTS })?;
        }

        // One run per pin at worst, so runs can never outgrow MAX_PINS.
        let mut runs: Vec<ShiftRun, MAX_PINS> = Vec::new();
        for group in groups.iter_mut() {
            let id = group.port.id();
            let start = runs.len();

            for (index, pin) in pins.iter().enumerate() {
                if pin.port_id() != id {
                    continue;
                }
                group.mask |= BIT!(pin.bit() as u32);

                let shift = pin.bit() as i8 - index as i8;
                match runs[start..].iter_mut().find(|r| r.shift == shift) {
                    Some(run) => run.add(index, pin.bit()),
                    None => {
                        let _ = runs.push(ShiftRun::new(index, pin.bit()));
                    }
                }
            }

            group.runs = start as u8..runs.len() as u8;
        }

        log::trace!(
            "pin list: {} pins over {} ports in {} runs",
            pins.len(),
            groups.len(),
            runs.len()
        );

        Ok(Self { pins, groups, runs })
    }

    /// Sub-list of `count` pins starting at logical index `start`.
    ///
    /// The result is an ordinary list over the same pins, so it drives the
    /// same hardware and its own bit 0 is the parent's bit `start`. Slicing
    /// a slice just narrows the range again, there is no chain of parents.
    pub fn slice(&self, start: usize, count: usize) -> Result<PinList<'a, W>, Error> {
        let end = start.checked_add(count).filter(|&end| end <= self.len());
        match end {
            Some(end) => PinList::new(&self.pins[start..end]),
            None => {
                log::debug!(
                    "rejecting slice {}+{} of a {} pin list",
                    start,
                    count,
                    self.len()
                );
                Err(Error::SliceOutOfRange {
                    start,
                    count,
                    len: self.len(),
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn pin(&self, index: usize) -> Option<Pin<'a, W>> {
        self.pins.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pin<'a, W>> + '_ {
        self.pins.iter().copied()
    }

    pub fn port_count(&self) -> usize {
        self.groups.len()
    }

    pub fn port_ids(&self) -> impl Iterator<Item = PortId> + '_ {
        self.groups.iter().map(|g| g.port.id())
    }

    /// Bits of a logical value that map to a pin.
    pub fn value_mask(&self) -> u32 {
        low_mask(self.len())
    }

    /// Width of the smallest unsigned integer that holds a value of this list.
    pub fn data_bits(&self) -> u8 {
        match self.len() {
            0..=8 => 8,
            9..=16 => 16,
            _ => 32,
        }
    }

    pub(crate) fn groups(&self) -> &[PortGroup<'a, W>] {
        &self.groups
    }

    /// Port register bits that `value` maps to on `group`'s port.
    #[inline]
    pub(crate) fn scatter(&self, group: &PortGroup<'a, W>, value: u32) -> W {
        let bits = self.runs_of(group)
            .iter()
            .fold(0, |acc, run| acc | run.scatter(value));
        W::truncate(bits)
    }

    #[inline]
    fn gather(&self, group: &PortGroup<'a, W>, port_bits: W) -> u32 {
        let port_bits = port_bits.widen();
        self.runs_of(group)
            .iter()
            .fold(0, |acc, run| acc | run.gather(port_bits))
    }

    fn runs_of(&self, group: &PortGroup<'a, W>) -> &[ShiftRun] {
        &self.runs[group.runs.start as usize..group.runs.end as usize]
    }

    /// Drives the list to `value`.
    ///
    /// Ports the list owns completely get a plain store. On ports shared
    /// with other pins the list's bits are replaced with a read-modify-write
    /// and the foreign bits are written back untouched.
    pub fn write(&self, value: u32) {
        for group in self.groups.iter() {
            let bits = self.scatter(group, value);
            if group.owns_port() {
                group.port.write(bits);
            } else {
                let mask = W::truncate(group.mask);
                let current = group.port.read();
                group.port.write((current & !mask) | bits);
            }
        }
    }

    /// Output register contents, gathered into logical order.
    pub fn read(&self) -> u32 {
        self.groups
            .iter()
            .fold(0, |acc, group| acc | self.gather(group, group.port.read()))
    }

    /// Input register contents, gathered into logical order.
    pub fn pin_read(&self) -> u32 {
        self.groups
            .iter()
            .fold(0, |acc, group| acc | self.gather(group, group.port.read_input()))
    }

    /// Drives high the pins whose logical bit is set in `select`.
    pub fn set(&self, select: u32) {
        for group in self.groups.iter() {
            let bits = self.scatter(group, select);
            let current = group.port.read();
            group.port.write(current | bits);
        }
    }

    /// Drives low the pins whose logical bit is set in `select`.
    pub fn clear(&self, select: u32) {
        for group in self.groups.iter() {
            let bits = self.scatter(group, select);
            let current = group.port.read();
            group.port.write(current & !bits);
        }
    }

    /// Switches the pins selected by `mask` to `direction`.
    pub fn set_configuration(&self, direction: Direction, mask: u32) {
        for group in self.groups.iter() {
            group.port.set_direction(self.scatter(group, mask), direction);
        }
    }

    /// Per-port masks and values for `value`, computed once for reuse.
    ///
    /// See [`Frame`] for applying it.
    pub fn frame(&self, value: u32) -> Frame<'a, W> {
        Frame::new(self, value)
    }

    #[inline(always)]
    pub fn write_const<const VALUE: u32>(&self) {
        self.frame(VALUE).write()
    }

    #[inline(always)]
    pub fn set_const<const SELECT: u32>(&self) {
        self.frame(SELECT).set()
    }

    #[inline(always)]
    pub fn clear_const<const SELECT: u32>(&self) {
        self.frame(SELECT).clear()
    }

    #[inline(always)]
    pub fn set_configuration_const<const OUTPUT: bool, const MASK: u32>(&self) {
        self.frame(MASK).set_configuration(Direction::from(OUTPUT))
    }
}

impl<W: PortWord> PartialEq for PinList<'_, W> {
    fn eq(&self, other: &Self) -> bool {
        self.pins[..] == other.pins[..]
    }
}

impl<W: PortWord> fmt::Debug for PinList<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pins.iter()).finish()
    }
}
