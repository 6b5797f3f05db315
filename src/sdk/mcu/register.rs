extern crate paste;

pub static REG_BASE_ADDR: u32 = 0x800000;

/// Reads one byte of the peripheral register space.
///
/// `addr` is an offset from [`REG_BASE_ADDR`]. Every generated register
/// accessor funnels through here, which gives tests a single seam to mock.
#[cfg_attr(test, mry::mry)]
pub fn read_reg8(addr: u32) -> u8 {
    unsafe { core::ptr::read_volatile((REG_BASE_ADDR + addr) as *const u8) }
}

/// Writes one byte of the peripheral register space.
#[cfg_attr(test, mry::mry)]
pub fn write_reg8(addr: u32, value: u8) {
    unsafe { core::ptr::write_volatile((REG_BASE_ADDR + addr) as *mut u8, value) }
}

// Generates `read_<name>(i)` / `write_<name>(value, i)` for a register that
// repeats every few bytes, `i` being the byte offset of the instance.
#[macro_export]
macro_rules! regrw_idx {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            pub fn [<read_ $x>](i: u32) -> u8 {
                read_reg8($a + i)
            }

            pub fn [<write_ $x>](value: u8, i: u32) {
                write_reg8($a + i, value)
            }
        }
    };
}

/****************************************************
 gpio regs struct: begin  0x580, one bank per 8 bytes
 *****************************************************/
regrw_idx!(reg_gpio_in, 0x580);
regrw_idx!(reg_gpio_oen, 0x582);
regrw_idx!(reg_gpio_out, 0x583);
