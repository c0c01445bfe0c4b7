use core::fmt;
use core::fmt::Write;

use printf::Arg;
#[cfg(feature = "global-console")]
use spin::Mutex;

use crate::color::{BLACK, WHITE, pack_bytes};
use crate::error::ConsoleError;
use crate::font::{FONT8X8, GlyphTable};
use crate::framebuffer::Framebuffer;
use crate::glyph::render_glyph;

//Formatted text is staged here before it is drawn
pub const PRINTK_BUF_SIZE: usize = 4096;
pub const TAB_WIDTH: usize = 8;

const BACKSPACE: u8 = 0x08;

#[cfg(feature = "global-console")]
static GLOBAL_CONSOLE: Mutex<Option<Console<'static>>> = Mutex::new(None);

/*
 * struct Console - Text console drawn straight into a framebuffer
 * @framebuffer: borrowed pixel memory
 * @font: glyph bitmaps
 * @char_w, @char_h: cell size in pixels
 * @max_col, @max_row: width / char_w and height / char_h
 * @cursor_x, @cursor_y: current cell
 *
 * Whenever control returns to the caller the cursor lies in
 * [0, max_col] x [0, max_row]. Column max_col and row max_row may be
 * partly or wholly off-screen; whatever falls outside is clipped.
 */
pub struct Console<'a> {
	framebuffer: Framebuffer<'a>,
	font: &'a GlyphTable<'a>,
	char_w: usize,
	char_h: usize,
	max_col: usize,
	max_row: usize,
	cursor_x: usize,
	cursor_y: usize,
}

impl<'a> Console<'a> {
	pub fn new(
		framebuffer: Framebuffer<'a>,
		font: &'a GlyphTable<'a>,
		char_w: usize,
		char_h: usize,
	) -> Result<Self, ConsoleError> {
		if !(1..=8).contains(&char_w) {
			return Err(ConsoleError::InvalidGeometry("cell width must be 1..=8 pixels"));
		}
		if char_h == 0 {
			return Err(ConsoleError::InvalidGeometry("cell height must be non-zero"));
		}
		let max_col = crate::cells(framebuffer.width(), char_w);
		let max_row = crate::cells(framebuffer.height(), char_h);
		log::debug!(
			"console: {}x{} px, {}x{} cells, grid 0..={} x 0..={}",
			framebuffer.width(),
			framebuffer.height(),
			char_w,
			char_h,
			max_col,
			max_row
		);
		Ok(Self {
			framebuffer,
			font,
			char_w,
			char_h,
			max_col,
			max_row,
			cursor_x: 0,
			cursor_y: 0,
		})
	}

	/*
	 * init - Console over a packed framebuffer using the built-in font
	 * @width, @height: resolution in pixels; rows are @width pixels apart
	 * @pixels: framebuffer memory
	 * @char_w, @char_h: cell size in pixels
	 */
	pub fn init(
		width: usize,
		height: usize,
		pixels: &'a mut [u32],
		char_w: usize,
		char_h: usize,
	) -> Result<Self, ConsoleError> {
		let framebuffer = Framebuffer::new(pixels, width, height, width)?;
		Self::new(framebuffer, &FONT8X8, char_w, char_h)
	}

	pub fn width(&self) -> usize {
		self.framebuffer.width()
	}

	pub fn height(&self) -> usize {
		self.framebuffer.height()
	}

	pub fn cell_size(&self) -> (usize, usize) {
		(self.char_w, self.char_h)
	}

	pub fn max_col(&self) -> usize {
		self.max_col
	}

	pub fn max_row(&self) -> usize {
		self.max_row
	}

	pub fn cursor(&self) -> (usize, usize) {
		(self.cursor_x, self.cursor_y)
	}

	pub fn framebuffer(&self) -> &Framebuffer<'a> {
		&self.framebuffer
	}

	pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<'a> {
		&mut self.framebuffer
	}

	/* Move the cursor; both coordinates change or neither does */
	pub fn set_cursor(&mut self, x: usize, y: usize) -> Result<(), ConsoleError> {
		if x > self.max_col || y > self.max_row {
			return Err(ConsoleError::PositionOverflow {
				x,
				y,
				max_col: self.max_col,
				max_row: self.max_row,
			});
		}
		self.cursor_x = x;
		self.cursor_y = y;
		Ok(())
	}

	/*
	 * auto_wrap - Pull the cursor back onto the grid
	 *
	 * Past the last column: start of the next row. Past the last row: back
	 * to the top, overwriting what is there. There is no scrollback.
	 */
	pub fn auto_wrap(&mut self) {
		if self.cursor_x > self.max_col {
			self.cursor_x = 0;
			self.cursor_y += 1;
		}
		if self.cursor_y > self.max_row {
			self.cursor_y = 0;
		}
	}

	/* Paint the whole surface and home the cursor */
	pub fn clear(&mut self, color: u32) {
		self.framebuffer.fill(color);
		self.cursor_x = 0;
		self.cursor_y = 0;
	}

	fn draw_cell(&mut self, code: u8, fg: u32, bg: u32) {
		//a newline on the last row leaves the cursor below the grid
		self.auto_wrap();
		let rows = self.font.glyph(code);
		render_glyph(
			&mut self.framebuffer,
			self.cursor_x * self.char_w,
			self.cursor_y * self.char_h,
			(self.char_w, self.char_h),
			fg,
			bg,
			rows,
		);
	}

	fn advance(&mut self) {
		self.cursor_x += 1;
		self.auto_wrap();
	}

	/* One cell back; the previous row's last column, never before (0, 0) */
	fn step_back(&mut self) {
		if self.cursor_x > 0 {
			self.cursor_x -= 1;
		} else if self.cursor_y <= 1 {
			self.cursor_x = 0;
			self.cursor_y = 0;
		} else {
			self.cursor_y -= 1;
			self.cursor_x = self.max_col;
		}
	}

	/*
	 * write_bytes - Stream already-formatted bytes onto the screen
	 *
	 * '\n' goes to column 0 of the next row, '\t' blanks up to the next
	 * multiple of TAB_WIDTH, '\b' blanks the previous cell. Every other
	 * byte is drawn as a glyph. Returns the number of bytes processed.
	 */
	pub fn write_bytes(&mut self, fg: u32, bg: u32, bytes: &[u8]) -> usize {
		for &byte in bytes {
			match byte {
				b'\n' => {
					self.cursor_x = 0;
					self.cursor_y += 1;
				}
				b'\t' => {
					let spaces = TAB_WIDTH - self.cursor_x % TAB_WIDTH;
					for _ in 0..spaces {
						self.draw_cell(b' ', bg, bg);
						self.advance();
					}
				}
				BACKSPACE => {
					self.step_back();
					self.draw_cell(b' ', fg, bg);
					self.advance();
				}
				_ => {
					self.draw_cell(byte, fg, bg);
					self.advance();
				}
			}
		}
		self.auto_wrap();
		bytes.len()
	}

	/*
	 * print_color - Format and draw
	 * @fg: text colour
	 * @bg: cell background colour
	 * @fmt: printk format string
	 * @args: arguments for @fmt
	 *
	 * Nothing is drawn if formatting fails. Returns the number of bytes
	 * processed.
	 */
	pub fn print_color(
		&mut self,
		fg: u32,
		bg: u32,
		fmt: &str,
		args: &[Arg<'_>],
	) -> Result<usize, ConsoleError> {
		let mut buf = [0u8; PRINTK_BUF_SIZE];
		let len = printf::format(&mut buf, fmt, args)
			.inspect_err(|err| log::warn!("printk: dropped {:?}: {}", fmt, err))?;
		Ok(self.write_bytes(fg, bg, &buf[..len]))
	}

	pub fn print(&mut self, fmt: &str, args: &[Arg<'_>]) -> Result<usize, ConsoleError> {
		self.print_color(WHITE, BLACK, fmt, args)
	}

	/*
	 * show_color_band - Paint the first @width * @height pixels
	 *
	 * Each pixel gets the bytes d, c, b, a in memory order. Memory is
	 * walked linearly from the framebuffer base. The cursor is untouched.
	 */
	pub fn show_color_band(&mut self, width: usize, height: usize, a: u8, b: u8, c: u8, d: u8) {
		let count = width.saturating_mul(height);
		self.framebuffer.fill_linear(count, pack_bytes(a, b, c, d));
	}
}

impl Write for Console<'_> {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.write_bytes(WHITE, BLACK, s.as_bytes());
		Ok(())
	}
}

/*
 * init_console - Install @console as the process-wide console
 *
 * Replaces any console installed earlier.
 */
#[cfg(feature = "global-console")]
pub fn init_console(console: Console<'static>) {
	*GLOBAL_CONSOLE.lock() = Some(console);
}

/*
 * init_printk - Build and install the global console
 * @width, @height: resolution in pixels
 * @pixels: framebuffer memory, rows @width pixels apart
 * @char_w, @char_h: cell size
 */
#[cfg(feature = "global-console")]
pub fn init_printk(
	width: usize,
	height: usize,
	pixels: &'static mut [u32],
	char_w: usize,
	char_h: usize,
) -> Result<(), ConsoleError> {
	init_console(Console::init(width, height, pixels, char_w, char_h)?);
	Ok(())
}

/* Run @f against the global console, None if it was never installed */
#[cfg(feature = "global-console")]
pub fn with_console<R>(f: impl FnOnce(&mut Console<'static>) -> R) -> Option<R> {
	GLOBAL_CONSOLE.lock().as_mut().map(f)
}

#[cfg(feature = "global-console")]
pub fn set_printk_pos(x: usize, y: usize) -> Result<(), ConsoleError> {
	with_console(|console| console.set_cursor(x, y)).unwrap_or(Err(ConsoleError::NotInitialized))
}

#[cfg(feature = "global-console")]
pub fn printk_color(fg: u32, bg: u32, fmt: &str, args: &[Arg<'_>]) -> Result<usize, ConsoleError> {
	with_console(|console| console.print_color(fg, bg, fmt, args))
		.unwrap_or(Err(ConsoleError::NotInitialized))
}

/*
 * printk_color! - Print to the global console in the given colours
 *
 * Arguments go through printf::Arg::from. Evaluates to the number of
 * bytes drawn, 0 if nothing was.
 */
#[cfg(feature = "global-console")]
#[macro_export]
macro_rules! printk_color {
	($fg:expr, $bg:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
		$crate::console::printk_color($fg, $bg, $fmt, &[$($crate::Arg::from($arg)),*]).unwrap_or(0)
	};
}

#[cfg(feature = "global-console")]
#[macro_export]
macro_rules! printk {
	($fmt:expr $(, $arg:expr)* $(,)?) => {
		$crate::printk_color!($crate::color::WHITE, $crate::color::BLACK, $fmt $(, $arg)*)
	};
}
