#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod color;
pub mod console;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod glyph;

pub use console::{Console, PRINTK_BUF_SIZE, TAB_WIDTH};
pub use error::ConsoleError;
pub use font::{FONT8X8, GlyphTable};
pub use framebuffer::Framebuffer;
pub use glyph::render_glyph;
pub use printf::Arg;

#[cfg(feature = "global-console")]
pub use console::{init_console, init_printk, printk_color, set_printk_pos, with_console};

/*
 * cells - Number of whole character cells along one axis
 * @len: screen width or height in pixels
 * @size: cell width or height in pixels
 */
pub const fn cells(len: usize, size: usize) -> usize {
	len / size
}
