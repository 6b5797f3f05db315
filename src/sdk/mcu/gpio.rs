use crate::port::{PortId, RegisterPort};
use crate::sdk::mcu::register::{
    read_reg_gpio_in, read_reg_gpio_oen, read_reg_gpio_out, write_reg_gpio_oen,
    write_reg_gpio_out,
};

// Register banks repeat every 8 bytes, port A first.
const GPIO_BANK_STRIDE: u32 = 8;

/// One 8-bit GPIO bank of the TLSR8266.
///
/// The hardware output-enable register is active low: a cleared bit drives
/// the pin. Direction reads and writes are inverted here so that, like every
/// other port, a set direction bit means output.
#[derive(Debug)]
pub struct GpioPort {
    id: char,
    offset: u32,
}

impl GpioPort {
    /// Bank `index` (0 for port A) named `id`.
    pub const fn new(id: char, index: u32) -> Self {
        Self {
            id,
            offset: index * GPIO_BANK_STRIDE,
        }
    }
}

pub static GPIO_PA: GpioPort = GpioPort::new('A', 0);
pub static GPIO_PB: GpioPort = GpioPort::new('B', 1);
pub static GPIO_PC: GpioPort = GpioPort::new('C', 2);
pub static GPIO_PD: GpioPort = GpioPort::new('D', 3);
pub static GPIO_PE: GpioPort = GpioPort::new('E', 4);
pub static GPIO_PF: GpioPort = GpioPort::new('F', 5);

impl RegisterPort for GpioPort {
    type Word = u8;

    fn id(&self) -> PortId {
        PortId(self.id)
    }

    #[inline]
    fn write(&self, value: u8) {
        write_reg_gpio_out(value, self.offset)
    }

    #[inline]
    fn read(&self) -> u8 {
        read_reg_gpio_out(self.offset)
    }

    #[inline]
    fn read_input(&self) -> u8 {
        read_reg_gpio_in(self.offset)
    }

    fn read_direction(&self) -> u8 {
        !read_reg_gpio_oen(self.offset)
    }

    fn write_direction(&self, value: u8) {
        write_reg_gpio_oen(!value, self.offset)
    }
}
