use crate::port::PortId;

/// Construction errors for pins, pin lists and slices.
///
/// Codec operations themselves never fail: values wider than a list are
/// truncated, the same way hardware ignores unaddressed bits. Only the
/// structure of a pin or list can be wrong, and that is caught when it is
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("bit {bit} does not exist on {width}-bit port {port}")]
    BitOutOfRange { port: PortId, bit: u8, width: u8 },

    #[error("pin list of {len} pins exceeds the {max} pin limit")]
    TooManyPins { len: usize, max: usize },

    #[error("pin list spans more than {max} ports")]
    TooManyPorts { max: usize },

    #[error("slice of {count} pins at {start} does not fit a list of {len} pins")]
    SliceOutOfRange { start: usize, count: usize, len: usize },
}
