/*
 * Framebuffer view
 *
 * A bounds-checked window onto externally owned 32-bit pixel memory. The
 * console never allocates or frees it; it only writes pixels that lie
 * inside the visible width x height area.
 */

use core::slice;

use crate::error::ConsoleError;

/*
 * struct Framebuffer - Borrowed pixel memory
 * @pixels: backing memory, at least stride * (height - 1) + width pixels
 * @width: visible width in pixels
 * @height: visible height in pixels
 * @stride: pixels from the start of one row to the next
 */
pub struct Framebuffer<'a> {
	pixels: &'a mut [u32],
	width: usize,
	height: usize,
	stride: usize,
}

impl<'a> Framebuffer<'a> {
	pub fn new(
		pixels: &'a mut [u32],
		width: usize,
		height: usize,
		stride: usize,
	) -> Result<Self, ConsoleError> {
		if width == 0 || height == 0 {
			return Err(ConsoleError::InvalidGeometry("empty framebuffer"));
		}
		if stride < width {
			return Err(ConsoleError::InvalidGeometry("stride narrower than width"));
		}
		let needed = stride
			.checked_mul(height - 1)
			.and_then(|n| n.checked_add(width))
			.ok_or(ConsoleError::InvalidGeometry("framebuffer size overflows"))?;
		if pixels.len() < needed {
			return Err(ConsoleError::InvalidGeometry("framebuffer shorter than its geometry"));
		}
		Ok(Self {
			pixels,
			width,
			height,
			stride,
		})
	}

	/*
	 * from_raw - Wrap a raw framebuffer address
	 *
	 * # Safety
	 * @base must point to @len writable u32 pixels that stay mapped and
	 * are not accessed through any other path for the lifetime 'a.
	 */
	pub unsafe fn from_raw(
		base: *mut u32,
		len: usize,
		width: usize,
		height: usize,
		stride: usize,
	) -> Result<Self, ConsoleError> {
		if base.is_null() {
			return Err(ConsoleError::InvalidGeometry("null framebuffer"));
		}
		let pixels = unsafe { slice::from_raw_parts_mut(base, len) };
		Self::new(pixels, width, height, stride)
	}

	/*
	 * from_limine - Wrap the framebuffer handed over by Limine
	 *
	 * Only 32 bits-per-pixel modes are supported.
	 *
	 * # Safety
	 * The framebuffer must be identity-usable at fb.addr() and must not be
	 * written through any other path while the returned view is alive.
	 */
	pub unsafe fn from_limine(
		fb: &limine::framebuffer::Framebuffer<'_>,
	) -> Result<Framebuffer<'static>, ConsoleError> {
		if fb.bpp() != 32 {
			return Err(ConsoleError::InvalidGeometry("framebuffer is not 32 bpp"));
		}
		let width = fb.width() as usize;
		let height = fb.height() as usize;
		let stride = fb.pitch() as usize / 4;
		unsafe { Framebuffer::from_raw(fb.addr() as *mut u32, stride * height, width, height, stride) }
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn height(&self) -> usize {
		self.height
	}

	pub fn stride(&self) -> usize {
		self.stride
	}

	/* Visible part of row @y, or None below the last row */
	pub fn row_mut(&mut self, y: usize) -> Option<&mut [u32]> {
		if y >= self.height {
			return None;
		}
		let start = y * self.stride;
		Some(&mut self.pixels[start..start + self.width])
	}

	pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
		if x >= self.width || y >= self.height {
			return None;
		}
		Some(self.pixels[y * self.stride + x])
	}

	/* Out-of-bounds writes are dropped */
	pub fn put_pixel(&mut self, x: usize, y: usize, color: u32) {
		if let Some(row) = self.row_mut(y) {
			if let Some(pixel) = row.get_mut(x) {
				*pixel = color;
			}
		}
	}

	pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
		let x_end = x.saturating_add(w).min(self.width);
		for py in y..y.saturating_add(h).min(self.height) {
			if let Some(row) = self.row_mut(py) {
				if x < x_end {
					row[x..x_end].fill(color);
				}
			}
		}
	}

	pub fn fill(&mut self, color: u32) {
		self.fill_rect(0, 0, self.width, self.height, color);
	}

	/*
	 * fill_linear - Write @color to the first @count pixels of memory
	 *
	 * Walks the backing memory linearly, ignoring stride, and stops at its
	 * end. Returns the number of pixels written.
	 */
	pub fn fill_linear(&mut self, count: usize, color: u32) -> usize {
		let count = count.min(self.pixels.len());
		self.pixels[..count].fill(color);
		count
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::vec;

	#[test]
	fn rejects_short_or_degenerate_memory() {
		let mut small = vec![0u32; 10];
		assert!(Framebuffer::new(&mut small, 4, 4, 4).is_err());
		assert!(Framebuffer::new(&mut small, 0, 2, 4).is_err());
		assert!(Framebuffer::new(&mut small, 4, 2, 3).is_err());
		/* last row needs only `width` pixels, not a full stride */
		let mut exact = vec![0u32; 4 * 2 + 3];
		assert!(Framebuffer::new(&mut exact, 3, 3, 4).is_ok());
	}

	#[test]
	fn writes_outside_the_surface_are_clipped() {
		let mut memory = vec![0u32; 6 * 3];
		let mut fb = Framebuffer::new(&mut memory, 4, 3, 6).unwrap();
		fb.put_pixel(3, 2, 7);
		fb.put_pixel(4, 0, 9);
		fb.put_pixel(0, 3, 9);
		fb.fill_rect(2, 1, 10, 10, 5);
		assert_eq!(fb.pixel(3, 2), Some(5));
		assert_eq!(fb.pixel(4, 0), None);
		drop(fb);
		/* padding columns 4 and 5 are never touched */
		assert!(memory.chunks(6).all(|row| row[4] == 0 && row[5] == 0));
		assert_eq!(memory[6 + 2], 5);
		assert_eq!(memory[2 * 6 + 3], 5);
	}

	#[test]
	fn raw_null_is_rejected() {
		let result = unsafe { Framebuffer::from_raw(core::ptr::null_mut(), 16, 4, 4, 4) };
		assert!(result.is_err());
	}

	#[test]
	fn linear_fill_stops_at_the_end_of_memory() {
		let mut memory = vec![0u32; 8];
		let mut fb = Framebuffer::new(&mut memory, 4, 2, 4).unwrap();
		assert_eq!(fb.fill_linear(100, 3), 8);
		drop(fb);
		assert!(memory.iter().all(|&p| p == 3));
	}
}
