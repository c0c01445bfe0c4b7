/*
 * Format directive state
 *
 * One FormatSpec is built per `%...` directive and thrown away once the
 * conversion has been written.
 */

use bitflags::bitflags;

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct FormatFlags: u8 {
		/* pad on the right instead of the left */
		const LEFT = 1 << 0;
		/* always print a sign for signed values */
		const PLUS = 1 << 1;
		/* print a space where a plus sign would go */
		const SPACE = 1 << 2;
		/* alternate form: 0x / 0X for hex, o / O for octal */
		const SPECIAL = 1 << 3;
		/* pad with '0' between sign and digits */
		const ZEROPAD = 1 << 4;
		/* value is a signed number */
		const SIGN = 1 << 5;
		/* lowercase digit alphabet */
		const SMALL = 1 << 6;
	}
}

/*
 * enum Length - Length qualifier of a directive
 *
 * Only decides whether an integer conversion reads 32 or 64 bits.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Length {
	#[default]
	Default,
	/* h */
	Short,
	/* l */
	Long,
	/* ll */
	LongLong,
	/* L */
	LongDouble,
	/* Z */
	Size,
}

impl Length {
	pub fn is_wide(self) -> bool {
		!matches!(self, Length::Default | Length::Short)
	}
}

/*
 * struct FormatSpec - Parsed directive
 * @flags: flag set
 * @width: minimum field width, -1 when unspecified
 * @precision: digits / max chars / fraction digits, -1 when unspecified
 * @length: length qualifier
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
	pub flags: FormatFlags,
	pub width: i32,
	pub precision: i32,
	pub length: Length,
}

impl FormatSpec {
	pub const fn new() -> Self {
		Self {
			flags: FormatFlags::empty(),
			width: -1,
			precision: -1,
			length: Length::Default,
		}
	}
}

impl Default for FormatSpec {
	fn default() -> Self {
		Self::new()
	}
}
