/*
 * Integer Converter
 *
 * Writes an integer in any base from 2 to 36 with sign, alternate-form
 * prefix, precision zeros and field-width padding.
 */

use crate::buffer::OutBuf;
use crate::error::FormatError;
use crate::flags::FormatFlags;

const UPPER_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/* u64::MAX in base 2 */
pub(crate) const MAX_DIGITS: usize = 64;

pub(crate) fn digit_set(flags: FormatFlags) -> &'static [u8; 36] {
	if flags.contains(FormatFlags::SMALL) {
		LOWER_DIGITS
	} else {
		UPPER_DIGITS
	}
}

/*
 * sign_byte - Sign character for a value
 *
 * '-' for negatives, else '+' under PLUS, else ' ' under SPACE.
 */
pub(crate) fn sign_byte(negative: bool, flags: FormatFlags) -> Option<u8> {
	if negative {
		Some(b'-')
	} else if flags.contains(FormatFlags::PLUS) {
		Some(b'+')
	} else if flags.contains(FormatFlags::SPACE) {
		Some(b' ')
	} else {
		None
	}
}

/*
 * reversed_digits - Digits of @value, least significant first
 *
 * Zero yields a single '0'. Returns the digit count.
 */
pub(crate) fn reversed_digits(
	mut value: u64,
	base: u64,
	digits: &[u8; 36],
	scratch: &mut [u8; MAX_DIGITS],
) -> usize {
	if value == 0 {
		scratch[0] = b'0';
		return 1;
	}
	let mut count = 0;
	while value > 0 {
		scratch[count] = digits[(value % base) as usize];
		count += 1;
		value /= base;
	}
	count
}

/*
 * convert_integer - Format a signed integer
 * @out: destination
 * @value: value to print
 * @base: 2..=36
 * @width: minimum field width, -1 for none
 * @precision: minimum digit count, -1 for none
 * @flags: formatting flags
 *
 * The magnitude of @value is always printed; a '-' appears only when SIGN
 * is set. On error nothing is left in @out.
 */
pub fn convert_integer(
	out: &mut OutBuf<'_>,
	value: i64,
	base: u32,
	width: i32,
	precision: i32,
	flags: FormatFlags,
) -> Result<(), FormatError> {
	let negative = flags.contains(FormatFlags::SIGN) && value < 0;
	write_num(out, negative, value.unsigned_abs(), base, width, precision, flags)
}

pub(crate) fn write_num(
	out: &mut OutBuf<'_>,
	negative: bool,
	magnitude: u64,
	base: u32,
	mut width: i32,
	mut precision: i32,
	mut flags: FormatFlags,
) -> Result<(), FormatError> {
	if !(2..=36).contains(&base) {
		return Err(FormatError::UnsupportedBase { base });
	}
	let digits = digit_set(flags);

	if flags.contains(FormatFlags::LEFT) {
		flags.remove(FormatFlags::ZEROPAD);
	}
	let pad = if flags.contains(FormatFlags::ZEROPAD) {
		b'0'
	} else {
		b' '
	};

	let sign = sign_byte(negative, flags);
	if sign.is_some() {
		width = width.saturating_sub(1);
	}

	/* the octal marker is the letter o, not the digit 0 */
	let mut prefix = [0u8; 2];
	let prefix_len = match (flags.contains(FormatFlags::SPECIAL), base) {
		(true, 16) => {
			prefix = [b'0', digits[33]];
			2
		}
		(true, 8) => {
			prefix[0] = digits[24];
			1
		}
		_ => 0,
	};
	width = width.saturating_sub(prefix_len as i32);

	let mut scratch = [0u8; MAX_DIGITS];
	let count = reversed_digits(magnitude, base as u64, digits, &mut scratch);
	if count as i32 > precision {
		precision = count as i32;
	}
	width = width.saturating_sub(precision);

	let fill = width.max(0) as usize;
	let zeros = precision as usize - count;
	let left = flags.contains(FormatFlags::LEFT);
	let zero_pad = flags.contains(FormatFlags::ZEROPAD);

	let start = out.len();
	let result = (|| -> Result<(), FormatError> {
		if !left && !zero_pad {
			out.push_n(b' ', fill)?;
		}
		if let Some(sign) = sign {
			out.push(sign)?;
		}
		out.extend(&prefix[..prefix_len])?;
		if zero_pad {
			out.push_n(pad, fill)?;
		}
		out.push_n(b'0', zeros)?;
		for &digit in scratch[..count].iter().rev() {
			out.push(digit)?;
		}
		if left {
			out.push_n(b' ', fill)?;
		}
		Ok(())
	})();
	if result.is_err() {
		out.truncate(start);
	}
	result
}
