/*
 * Glyph tables
 *
 * A glyph is `glyph_height` row bytes. Within a row, bit (char_w - 1) is
 * the leftmost pixel and bit 0 the rightmost, so an 8-pixel-wide font
 * reads MSB first.
 */

use font8x8::legacy::BASIC_LEGACY;

/*
 * struct GlyphTable - Immutable code -> bitmap lookup
 * @data: glyphs back to back, glyph_height bytes each, starting at code 0
 * @glyph_height: rows per glyph
 */
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable<'a> {
	data: &'a [u8],
	glyph_height: usize,
}

impl<'a> GlyphTable<'a> {
	pub const fn new(data: &'a [u8], glyph_height: usize) -> Self {
		Self { data, glyph_height }
	}

	pub fn glyph_height(&self) -> usize {
		self.glyph_height
	}

	/* Number of codes the table covers */
	pub fn len(&self) -> usize {
		self.data.len().checked_div(self.glyph_height).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, code: u8) -> Option<&'a [u8]> {
		let start = code as usize * self.glyph_height;
		self.data.get(start..start + self.glyph_height)
	}

	/*
	 * glyph - Bitmap for @code
	 *
	 * Codes the table does not cover are drawn as '?'; if '?' is missing
	 * too, an empty slice is returned and the cell renders as background.
	 */
	pub fn glyph(&self, code: u8) -> &'a [u8] {
		self.get(code).or_else(|| self.get(b'?')).unwrap_or(&[])
	}
}

/* font8x8 stores the leftmost pixel in bit 0; flip every row to MSB-left */
const fn msb_left(src: &[[u8; 8]; 128]) -> [u8; 128 * 8] {
	let mut out = [0u8; 128 * 8];
	let mut code = 0;
	while code < 128 {
		let mut row = 0;
		while row < 8 {
			out[code * 8 + row] = src[code][row].reverse_bits();
			row += 1;
		}
		code += 1;
	}
	out
}

static FONT8X8_DATA: [u8; 128 * 8] = msb_left(&BASIC_LEGACY);

/* Built-in 8x8 ASCII font (codes 0..128) */
pub static FONT8X8: GlyphTable<'static> = GlyphTable::new(&FONT8X8_DATA, 8);
