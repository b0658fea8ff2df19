//! LCD controller driver.
//!
//! The board carries a 240x320 ILI9341 panel behind a custom controller.
//! Two controller generations exist across the lab bitstreams:
//!
//! - the plain slave: `command`/`data`/`control` registers, every pixel
//!   pushed by the CPU ([`Lcd`]);
//! - the DMA-capable variant: same front end plus image registers and a
//!   start bit, so the controller fetches whole frames by itself
//!   ([`LcdDma`], obtained via [`Lcd::into_dma`]).
//!
//! Panel bring-up is the vendor's fixed command playbook; there is nothing
//! to configure and nothing to get back, so the sequence is spelled out
//! linearly below exactly once and shared by both drivers.

use crate::device::{self, lcd_ctrl, LcdRegs};
use crate::rv32;

pub const PANEL_WIDTH: usize = 240;
pub const PANEL_HEIGHT: usize = 320;
pub const PANEL_PIXELS: usize = PANEL_WIDTH * PANEL_HEIGHT;

/// The panel needs a breather after every command or data word; 10us is
/// the lab-proven figure.
const WRITE_SETTLE_US: u32 = 10;

/// How the DMA engine should interpret source pixels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DmaFormat {
    /// RGB565 pushed to the panel as-is.
    Color,
    /// RGB565 converted to grayscale by the controller on the fly.
    Grayscale,
}

fn push_command(regs: &LcdRegs, command: u16) {
    regs.command.write(command.into());
    rv32::delay_us(WRITE_SETTLE_US);
}

fn push_data(regs: &LcdRegs, data: u16) {
    regs.data.write(data.into());
    rv32::delay_us(WRITE_SETTLE_US);
}

/// The ILI9341 bring-up playbook, through gamma and addressing but not
/// display-on. Values are the module vendor's, verbatim.
fn panel_bringup(regs: &LcdRegs) {
    push_command(regs, 0x0028); // display OFF
    push_command(regs, 0x0011); // exit SLEEP mode
    push_data(regs, 0x0000);

    push_command(regs, 0x00CB); // power control A
    push_data(regs, 0x0039); // always 0x39
    push_data(regs, 0x002C); // always 0x2C
    push_data(regs, 0x0000); // always 0x00
    push_data(regs, 0x0034); // Vcore = 1.6V
    push_data(regs, 0x0002); // DDVDH = 5.6V

    push_command(regs, 0x00CF); // power control B
    push_data(regs, 0x0000); // always 0x00
    push_data(regs, 0x0081); // PCEQ off
    push_data(regs, 0x0030); // ESD protection

    push_command(regs, 0x00E8); // driver timing control A
    push_data(regs, 0x0085); // non-overlap
    push_data(regs, 0x0001); // EQ timing
    push_data(regs, 0x0079); // pre-charge timing

    push_command(regs, 0x00EA); // driver timing control B
    push_data(regs, 0x0000); // gate driver timing
    push_data(regs, 0x0000); // always 0x00
    push_data(regs, 0x0064); // soft start
    push_data(regs, 0x0003); // power on sequence
    push_data(regs, 0x0012); // power on sequence
    push_data(regs, 0x0081); // DDVDH enhance on

    push_command(regs, 0x00F7); // pump ratio control
    push_data(regs, 0x0020); // DDVDH = 2xVCI

    push_command(regs, 0x00C0); // power control 1
    push_data(regs, 0x0026);
    push_data(regs, 0x0004); // second parameter for ILI9340 (ignored by ILI9341)

    push_command(regs, 0x00C1); // power control 2
    push_data(regs, 0x0011);

    push_command(regs, 0x00C5); // VCOM control 1
    push_data(regs, 0x0035);
    push_data(regs, 0x003E);

    push_command(regs, 0x00C7); // VCOM control 2
    push_data(regs, 0x00BE);

    push_command(regs, 0x00B1); // frame rate control
    push_data(regs, 0x0000);
    push_data(regs, 0x0010);

    push_command(regs, 0x003A); // pixel format = 16 bit per pixel
    push_data(regs, 0x0055);

    push_command(regs, 0x00B6); // display function control
    push_data(regs, 0x000A);
    push_data(regs, 0x00A2);

    push_command(regs, 0x00F2); // 3G gamma control
    push_data(regs, 0x0002); // off

    push_command(regs, 0x0026); // gamma curve 3
    push_data(regs, 0x0001);

    push_command(regs, 0x0036); // memory access control = BGR
    push_data(regs, 0x0000);

    push_command(regs, 0x002A); // column address set
    push_data(regs, 0x0000);
    push_data(regs, 0x0000); // start 0x0000
    push_data(regs, 0x0000);
    push_data(regs, 0x00EF); // end 0x00EF

    push_command(regs, 0x002B); // page address set
    push_data(regs, 0x0000);
    push_data(regs, 0x0000); // start 0x0000
    push_data(regs, 0x0001);
    push_data(regs, 0x003F); // end 0x013F
}

/// Driver for the plain slave controller.
pub struct Lcd {
    _priv: (),
}

impl Lcd {
    pub(crate) fn new() -> Self {
        Lcd { _priv: () }
    }

    fn regs(&self) -> &'static LcdRegs {
        // Safety: construction is gated through take_board.
        unsafe { device::lcd() }
    }

    /// Resets the panel and walks the bring-up playbook. The panel shows
    /// garbage until the first [`transfer`](Lcd::transfer).
    pub fn init(&mut self) {
        let regs = self.regs();
        // Reset pulse; the 16-bit bus is the controller's reset default.
        regs.control.write(lcd_ctrl::RESET);
        rv32::delay_us(130);
        regs.control.write(0);

        panel_bringup(regs);
        push_command(regs, 0x0029); // display ON
    }

    pub fn write_command(&mut self, command: u16) {
        push_command(self.regs(), command);
    }

    pub fn write_data(&mut self, data: u16) {
        push_data(self.regs(), data);
    }

    /// Pushes a full RGB565 frame, one data write per pixel. At 10us per
    /// write this takes most of a second for the full panel, which is the
    /// point the byte-banging lab makes.
    pub fn transfer(&mut self, frame: &[u16]) {
        let regs = self.regs();
        push_command(regs, 0x002C); // begin frame memory write
        for &px in frame {
            push_data(regs, px);
        }
    }

    /// Re-views the controller as the DMA-capable generation. Only valid
    /// on bitstreams that carry it; on the plain slave the extra registers
    /// read as zero and the start bit does nothing.
    pub fn into_dma(self) -> LcdDma {
        LcdDma { listening: false }
    }
}

/// Driver for the DMA-capable controller generation.
pub struct LcdDma {
    listening: bool,
}

impl LcdDma {
    fn regs(&self) -> &'static LcdRegs {
        // Safety: obtained by consuming the take_board-gated Lcd.
        unsafe { device::lcd() }
    }

    /// Mode bits every control-word write must carry on this generation.
    const MODE: u32 = lcd_ctrl::RGB565;

    /// Resets the panel, walks the bring-up playbook, and programs the
    /// DMA address generator's line length.
    pub fn init(&mut self) {
        let regs = self.regs();
        regs.control.write(Self::MODE | lcd_ctrl::RESET);
        rv32::delay_us(130);
        regs.control.write(Self::MODE);

        panel_bringup(regs);
        regs.pix_per_line.write(PANEL_WIDTH as u32);
        push_command(regs, 0x0029); // display ON
    }

    /// Makes subsequent transfers raise the completion interrupt. Pair
    /// with an [`crate::irq::register`]ed handler that calls
    /// [`acknowledge_irq`].
    pub fn listen(&mut self) {
        self.listening = true;
    }

    /// Hands a frame to the controller and starts the transfer. Returns
    /// immediately; completion is observed through the interrupt (after
    /// [`listen`](LcdDma::listen)) or simply by pacing transfers slower
    /// than the panel.
    ///
    /// The frame must be `'static` because the controller keeps fetching
    /// from it after this call returns.
    ///
    /// Width and height are clamped to the panel dimensions; the
    /// controller wedges on out-of-range sizes.
    pub fn start_transfer(
        &mut self,
        frame: &'static [u16],
        width: u16,
        height: u16,
        format: DmaFormat,
    ) {
        let width = width.min(PANEL_WIDTH as u16);
        let height = height.min(PANEL_HEIGHT as u16);
        let pixels = u32::from(width) * u32::from(height);
        debug_assert!(pixels as usize <= frame.len());

        let regs = self.regs();
        regs.img_width.write(width.into());
        regs.img_addr.write(frame.as_ptr() as u32);
        regs.img_size.write(pixels);

        let mut ctrl = Self::MODE | lcd_ctrl::START_DMA;
        if self.listening {
            ctrl |= lcd_ctrl::IRQ_ENABLE;
        }
        if format == DmaFormat::Grayscale {
            ctrl |= lcd_ctrl::GRAYSCALE_SRC;
        }
        regs.control.write(ctrl);
    }
}

/// Acknowledges the transfer-complete interrupt.
///
/// Free function for the same reason as [`crate::timer::acknowledge`]:
/// the handler does not hold the driver value.
pub fn acknowledge_irq() {
    // Safety: the ack bit is self-clearing and touches no other mode
    // state; keeping IRQ_ENABLE set leaves the next transfer listening.
    unsafe { device::lcd() }
        .control
        .write(LcdDma::MODE | lcd_ctrl::IRQ_ENABLE | lcd_ctrl::IRQ_ACK);
}
