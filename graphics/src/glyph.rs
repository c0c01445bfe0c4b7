/*
 * Glyph Renderer
 */

use crate::framebuffer::Framebuffer;

/*
 * render_glyph - Rasterize one glyph cell
 * @fb: target framebuffer
 * @pixel_x: left edge of the cell in pixels
 * @pixel_y: top edge of the cell in pixels
 * @cell: (char_w, char_h) in pixels, char_w at most 8
 * @fg: colour for set bits
 * @bg: colour for clear bits
 * @rows: glyph bitmap, one byte per pixel row
 *
 * Row r starts at stride * (pixel_y + r); bits are tested from
 * bit (char_w - 1) down to bit 0. Rows missing from @rows draw as @bg.
 * Pixels beyond the visible surface are clipped.
 */
pub fn render_glyph(
	fb: &mut Framebuffer<'_>,
	pixel_x: usize,
	pixel_y: usize,
	cell: (usize, usize),
	fg: u32,
	bg: u32,
	rows: &[u8],
) {
	let (char_w, char_h) = cell;
	let char_w = char_w.min(8);
	for row in 0..char_h {
		let Some(line) = fb.row_mut(pixel_y + row) else {
			break;
		};
		let bits = rows.get(row).copied().unwrap_or(0) as u16;
		let mut testbit: u16 = 1 << char_w;
		for col in 0..char_w {
			testbit >>= 1;
			if let Some(pixel) = line.get_mut(pixel_x + col) {
				*pixel = if bits & testbit != 0 { fg } else { bg };
			}
		}
	}
}
