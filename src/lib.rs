//! Virtual GPIO ports.
//!
//! Pins scattered over any bits of any register ports are collected into a
//! [`PinList`] and driven as one integer: logical bit `i` is the list's
//! `i`-th pin. Writes, reads, set/clear and direction changes cost one
//! register transaction per port the list spans, whatever the wiring.
//!
//! Ports are anything implementing [`RegisterPort`]. The TLSR8266 GPIO banks
//! are provided in [`sdk::mcu::gpio`], and [`TestPort`] keeps registers in
//! memory for host-side testing.
#![cfg_attr(not(test), no_std)]

mod config;
mod error;
mod frame;
mod pin;
mod pin_list;
mod port;
mod sink;
mod sync;
mod test_port;

pub mod sdk;

pub use config::{MAX_PINS, MAX_PORTS};
pub use error::Error;
pub use frame::Frame;
pub use pin::Pin;
pub use pin_list::PinList;
pub use port::{Direction, PortId, PortWord, RegisterPort};
pub use sink::{ByteSink, ParallelBus};
pub use sync::InterruptFree;
pub use test_port::TestPort;
