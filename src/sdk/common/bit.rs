#[macro_export]
macro_rules! BIT {
    ( $x:expr ) => {
        1 << $x
    };
}

// Low `$x` bits set. `$x` must be below the width of the target type.
#[macro_export]
macro_rules! BIT_MASK_LEN {
    ( $x:expr ) => {
        $crate::BIT!($x) - 1
    };
}

#[macro_export]
macro_rules! BM_SET {
    ( $x:expr, $m:expr ) => {
        $x = $x | ($m)
    };
}

#[macro_export]
macro_rules! BM_CLR {
    ( $x:expr, $m:expr ) => {
        $x = $x & !($m)
    };
}

#[macro_export]
macro_rules! BM_FLIP {
    ( $x:expr, $m:expr ) => {
        $x = $x ^ ($m)
    };
}

/// Moves `value` left by `by` bits, or right when `by` is negative.
///
/// Scatter/gather keeps one signed shift per run of pins, this applies it.
#[inline(always)]
pub const fn shift_signed(value: u32, by: i8) -> u32 {
    if by >= 0 {
        value << by
    } else {
        value >> -by
    }
}

/// Mask covering the low `len` bits of a u32, saturating at 32.
#[inline(always)]
pub const fn low_mask(len: usize) -> u32 {
    if len >= 32 {
        u32::MAX
    } else {
        BIT_MASK_LEN!(len as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_macros() {
        let mut reg: u32 = 0b1010;

        BM_SET!(reg, BIT!(0));
        assert_eq!(reg, 0b1011);

        BM_CLR!(reg, BIT!(3));
        assert_eq!(reg, 0b0011);

        BM_FLIP!(reg, 0b0110);
        assert_eq!(reg, 0b0101);

        let mask: u32 = BIT_MASK_LEN!(4);
        assert_eq!(mask, 0x0f);
    }

    #[test]
    fn test_shift_signed() {
        assert_eq!(shift_signed(0b11, 2), 0b1100);
        assert_eq!(shift_signed(0b1100, -2), 0b11);
        assert_eq!(shift_signed(0x8000_0000, -31), 1);
        assert_eq!(shift_signed(1, 0), 1);
    }

    #[test]
    fn test_low_mask() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(5), 0x1f);
        assert_eq!(low_mask(31), 0x7fff_ffff);
        assert_eq!(low_mask(32), u32::MAX);
        assert_eq!(low_mask(40), u32::MAX);
    }
}
