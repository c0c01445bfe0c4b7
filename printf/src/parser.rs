/*
 * Format Parser & Dispatcher
 *
 * Single pass over the format string:
 *   literal -> '%' -> flags -> width -> precision -> length -> conversion
 * Every conversion is written straight into the bounded output buffer.
 */

use crate::args::{Arg, Args};
use crate::buffer::OutBuf;
use crate::error::FormatError;
use crate::flags::{FormatFlags, FormatSpec, Length};
use crate::float::{DEFAULT_FLOAT_PRECISION, convert_float};
use crate::number::{convert_integer, write_num};

/*
 * format - Expand @fmt with @args into @buf
 * @buf: output; one byte beyond the result is used for a NUL terminator
 * @fmt: format string
 * @args: arguments in the order the directives consume them
 *
 * Returns the number of bytes produced, terminator excluded. Extra
 * arguments are ignored.
 */
pub fn format(buf: &mut [u8], fmt: &str, args: &[Arg<'_>]) -> Result<usize, FormatError> {
	let mut out = OutBuf::new(buf);
	let mut args = Args::new(args);
	let fmt = fmt.as_bytes();
	let mut pos = 0;

	while pos < fmt.len() {
		if fmt[pos] != b'%' {
			out.push(fmt[pos])?;
			pos += 1;
			continue;
		}
		pos += 1;

		let mut spec = FormatSpec::new();

		while let Some(&c) = fmt.get(pos) {
			let flag = match c {
				b'-' => FormatFlags::LEFT,
				b'+' => FormatFlags::PLUS,
				b' ' => FormatFlags::SPACE,
				b'#' => FormatFlags::SPECIAL,
				b'0' => FormatFlags::ZEROPAD,
				_ => break,
			};
			spec.flags |= flag;
			pos += 1;
		}
		/* a dangling '%' ends the string quietly */
		if pos >= fmt.len() {
			break;
		}

		match fmt[pos] {
			b'*' => {
				pos += 1;
				let width = args.next_int()?;
				if width < 0 {
					spec.flags |= FormatFlags::LEFT;
				}
				spec.width = width.saturating_abs();
			}
			c if c.is_ascii_digit() => spec.width = parse_decimal(fmt, &mut pos),
			_ => {}
		}

		if fmt.get(pos) == Some(&b'.') {
			pos += 1;
			match fmt.get(pos) {
				Some(b'*') => {
					pos += 1;
					spec.precision = args.next_int()?.max(0);
				}
				Some(c) if c.is_ascii_digit() => spec.precision = parse_decimal(fmt, &mut pos),
				_ => {}
			}
		}

		spec.length = match fmt.get(pos) {
			Some(b'h') => Length::Short,
			Some(b'l') => Length::Long,
			Some(b'L') => Length::LongDouble,
			Some(b'Z') => Length::Size,
			_ => Length::Default,
		};
		if spec.length != Length::Default {
			pos += 1;
		}
		//a second 'l' is taken before any conversion, not only 'd'
		if spec.length == Length::Long && fmt.get(pos) == Some(&b'l') {
			spec.length = Length::LongLong;
			pos += 1;
		}

		match fmt.get(pos) {
			Some(&conv) => {
				convert(&mut out, &mut args, conv, spec)?;
				pos += 1;
			}
			None => {
				out.push(b'%')?;
				break;
			}
		}
	}

	out.terminate()
}

/* Decimal digit run starting at @pos; saturates instead of overflowing */
fn parse_decimal(fmt: &[u8], pos: &mut usize) -> i32 {
	let mut value: i32 = 0;
	while let Some(&c) = fmt.get(*pos) {
		if !c.is_ascii_digit() {
			break;
		}
		value = value.saturating_mul(10).saturating_add((c - b'0') as i32);
		*pos += 1;
	}
	value
}

fn convert(
	out: &mut OutBuf<'_>,
	args: &mut Args<'_, '_>,
	conv: u8,
	mut spec: FormatSpec,
) -> Result<(), FormatError> {
	let wide = spec.length.is_wide();
	match conv {
		b'%' => out.push(b'%'),
		b'c' => {
			let c = args.next_char()?;
			write_padded(out, &[c], spec)
		}
		b's' => {
			let s = args.next_str()?.unwrap_or("").as_bytes();
			let len = match usize::try_from(spec.precision) {
				Ok(max) => s.len().min(max),
				Err(_) => s.len(),
			};
			write_padded(out, &s[..len], spec)
		}
		b'o' | b'O' => {
			/* %o is %O with a lowercase marker */
			if conv == b'o' {
				spec.flags |= FormatFlags::SMALL;
			}
			spec.flags |= FormatFlags::SPECIAL;
			let value = args.next_unsigned(wide)?;
			write_num(out, false, value, 8, spec.width, spec.precision, spec.flags)
		}
		b'p' => {
			if spec.width < 0 {
				spec.width = 2 * core::mem::size_of::<usize>() as i32;
				spec.flags |= FormatFlags::ZEROPAD;
			}
			let value = args.next_ptr()?;
			write_num(out, false, value as u64, 16, spec.width, spec.precision, spec.flags)
		}
		b'x' | b'X' => {
			if conv == b'x' {
				spec.flags |= FormatFlags::SMALL;
			}
			let value = args.next_unsigned(wide)?;
			write_num(out, false, value, 16, spec.width, spec.precision, spec.flags)
		}
		b'i' | b'd' => {
			spec.flags |= FormatFlags::SIGN;
			let value = args.next_signed(wide)?;
			convert_integer(out, value, 10, spec.width, spec.precision, spec.flags)
		}
		b'u' => {
			let value = args.next_unsigned(wide)?;
			write_num(out, false, value, 10, spec.width, spec.precision, spec.flags)
		}
		b'n' => {
			args.next_count()?.set(out.len());
			Ok(())
		}
		b'f' => {
			if spec.precision < 0 {
				spec.precision = DEFAULT_FLOAT_PRECISION;
			}
			let value = args.next_float()?;
			convert_float(out, value, spec.width, spec.precision, spec.flags)
		}
		other => {
			out.push(b'%')?;
			out.push(other)
		}
	}
}

/* %c and %s: space padding only, left or right */
fn write_padded(out: &mut OutBuf<'_>, bytes: &[u8], spec: FormatSpec) -> Result<(), FormatError> {
	let fill = (spec.width.max(0) as usize).saturating_sub(bytes.len());
	let left = spec.flags.contains(FormatFlags::LEFT);
	if !left {
		out.push_n(b' ', fill)?;
	}
	out.extend(bytes)?;
	if left {
		out.push_n(b' ', fill)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use core::cell::Cell;
	use std::string::String;

	fn sprintf(fmt: &str, args: &[Arg<'_>]) -> String {
		let mut storage = [0u8; 256];
		let len = format(&mut storage, fmt, args).unwrap();
		assert_eq!(storage[len], 0, "missing terminator");
		String::from_utf8(storage[..len].to_vec()).unwrap()
	}

	#[test]
	fn literals_pass_through() {
		assert_eq!(sprintf("plain text\n", &[]), "plain text\n");
		assert_eq!(sprintf("", &[]), "");
		assert_eq!(sprintf("100%%", &[]), "100%");
	}

	#[test]
	fn signed_and_unsigned_decimal() {
		assert_eq!(sprintf("%d|%i", &[Arg::Int(-42), Arg::Int(7)]), "-42|7");
		assert_eq!(sprintf("%5d|%-5d|%05d", &[Arg::Int(-5), Arg::Int(-5), Arg::Int(-5)]), "   -5|-5   |-0005");
		assert_eq!(sprintf("%+d % d", &[Arg::Int(3), Arg::Int(3)]), "+3  3");
		assert_eq!(sprintf("%u", &[Arg::Int(-1)]), "4294967295");
		assert_eq!(sprintf("%.4u", &[Arg::UInt(12)]), "0012");
	}

	#[test]
	fn length_qualifiers_select_64_bits() {
		let big = Arg::Long(-9_000_000_000);
		assert_eq!(sprintf("%ld", &[big]), "-9000000000");
		assert_eq!(sprintf("%lld", &[big]), "-9000000000");
		assert_eq!(sprintf("%Zu", &[Arg::ULong(u64::MAX)]), "18446744073709551615");
		assert_eq!(sprintf("%llx", &[Arg::ULong(0xDEAD_BEEF_CAFE)]), "deadbeefcafe");
		/* without a qualifier only the low 32 bits are read */
		assert_eq!(sprintf("%d", &[big]), "-410065408");
		assert_eq!(sprintf("%hd", &[Arg::Int(-3)]), "-3");
	}

	#[test]
	fn hex_and_octal() {
		assert_eq!(sprintf("%x %X", &[255u32.into(), 255u32.into()]), "ff FF");
		assert_eq!(sprintf("%#x %#X", &[255u32.into(), 255u32.into()]), "0xff 0XFF");
		assert_eq!(sprintf("%#08x", &[255u32.into()]), "0x0000ff");
		assert_eq!(sprintf("%x", &[Arg::Int(-1)]), "ffffffff");
		assert_eq!(sprintf("%o %O", &[8u32.into(), 8u32.into()]), "o10 O10");
		assert_eq!(sprintf("%5o", &[8u32.into()]), "  o10");
	}

	#[test]
	fn pointer_defaults_to_full_width_zero_padded() {
		let digits = 2 * core::mem::size_of::<usize>();
		let expected = padded_hex(0x1000, digits);
		assert_eq!(sprintf("%p", &[Arg::Ptr(0x1000)]), expected);
		assert_eq!(sprintf("%6p", &[Arg::Ptr(0x1000)]), "  1000");
		let ptr = 0xB800 as *const u16;
		assert_eq!(sprintf("%4p", &[ptr.into()]), "B800");
	}

	fn padded_hex(value: usize, digits: usize) -> String {
		let raw = std::format!("{value:X}");
		let mut text = "0".repeat(digits - raw.len());
		text.push_str(&raw);
		text
	}

	#[test]
	fn chars_are_padded_with_spaces() {
		assert_eq!(sprintf("%c", &['A'.into()]), "A");
		assert_eq!(sprintf("[%3c]", &['A'.into()]), "[  A]");
		assert_eq!(sprintf("[%-3c]", &['A'.into()]), "[A  ]");
		assert_eq!(sprintf("%c", &[Arg::Int(0x42)]), "B");
	}

	#[test]
	fn strings_respect_precision_and_width() {
		assert_eq!(sprintf("%s", &["hello".into()]), "hello");
		assert_eq!(sprintf("[%.3s]", &["hello".into()]), "[hel]");
		assert_eq!(sprintf("[%7s]", &["hello".into()]), "[  hello]");
		assert_eq!(sprintf("[%-7.2s]", &["hello".into()]), "[he     ]");
		assert_eq!(sprintf("[%s]", &[Arg::Str(None)]), "[]");
		assert_eq!(sprintf("[%3s]", &[Arg::Str(None)]), "[   ]");
	}

	#[test]
	fn star_width_and_precision() {
		assert_eq!(sprintf("[%*d]", &[Arg::Int(4), Arg::Int(7)]), "[   7]");
		assert_eq!(sprintf("[%*d]", &[Arg::Int(-4), Arg::Int(7)]), "[7   ]");
		assert_eq!(sprintf("[%.*s]", &[Arg::Int(2), "hello".into()]), "[he]");
		/* a negative * precision counts as zero */
		assert_eq!(sprintf("[%.*s]", &[Arg::Int(-2), "hello".into()]), "[]");
		assert_eq!(sprintf("[%*.*d]", &[Arg::Int(6), Arg::Int(3), Arg::Int(5)]), "[   005]");
	}

	#[test]
	fn floats_default_to_three_places() {
		assert_eq!(sprintf("%f", &[Arg::Float(3.14159)]), "3.000");
		assert_eq!(sprintf("%.1f", &[Arg::Float(0.9)]), "0.1");
		assert_eq!(sprintf("[%8.2f]", &[Arg::Float(-2.0)]), "[   -2.00]");
		assert_eq!(sprintf("%f", &[2.5f32.into()]), "2.200");
	}

	#[test]
	fn count_records_bytes_so_far() {
		let count = Cell::new(usize::MAX);
		assert_eq!(sprintf("abc%n-def", &[(&count).into()]), "abc-def");
		assert_eq!(count.get(), 3);
		let wide = Cell::new(0usize);
		assert_eq!(sprintf("%5d%ln", &[Arg::Int(1), (&wide).into()]), "    1");
		assert_eq!(wide.get(), 5);
	}

	#[test]
	fn unknown_conversions_are_echoed() {
		assert_eq!(sprintf("%q", &[]), "%q");
		assert_eq!(sprintf("%-5k!", &[]), "%k!");
		assert_eq!(sprintf("50%", &[]), "50");
		assert_eq!(sprintf("50%-", &[]), "50");
		assert_eq!(sprintf("%5", &[]), "%");
		assert_eq!(sprintf("%l", &[]), "%");
	}

	#[test]
	fn flags_do_not_leak_between_directives() {
		assert_eq!(sprintf("%-4d|%d|%lx|%x", &[Arg::Int(1), Arg::Int(2), Arg::ULong(1 << 40), Arg::ULong(1 << 40)]), "1   |2|10000000000|0");
	}

	#[test]
	fn capacity_is_checked() {
		let mut storage = [0u8; 5];
		assert_eq!(format(&mut storage, "abcd", &[]), Ok(4));
		assert_eq!(
			format(&mut storage, "abcde", &[]),
			Err(FormatError::BufferCapacityExceeded { capacity: 5 })
		);
		assert_eq!(
			format(&mut storage, "%10d", &[Arg::Int(1)]),
			Err(FormatError::BufferCapacityExceeded { capacity: 5 })
		);
		let mut empty = [0u8; 0];
		assert!(format(&mut empty, "", &[]).is_err());
	}

	#[test]
	fn saturated_precision_is_a_capacity_error() {
		let mut storage = [0u8; 64];
		let full = Err(FormatError::BufferCapacityExceeded { capacity: 64 });
		assert_eq!(format(&mut storage, "%+.99999999999d", &[Arg::Int(1)]), full);
		assert_eq!(format(&mut storage, "%#.99999999999x", &[Arg::Int(1)]), full);
		assert_eq!(
			format(&mut storage, "%.*d", &[Arg::Int(i32::MAX), Arg::Int(-1)]),
			full
		);
		assert_eq!(format(&mut storage, "%.2147483647f", &[Arg::Float(1.5)]), full);
		assert_eq!(
			format(&mut storage, "%+.*f", &[Arg::Int(i32::MAX), Arg::Float(-1.5)]),
			full
		);
	}

	#[test]
	fn double_l_applies_to_every_conversion() {
		assert_eq!(sprintf("%llx", &[Arg::ULong(1 << 40)]), "10000000000");
		assert_eq!(sprintf("%llu", &[Arg::ULong(u64::MAX)]), "18446744073709551615");
	}

	#[test]
	fn argument_errors() {
		let mut storage = [0u8; 32];
		assert_eq!(
			format(&mut storage, "%d %d", &[Arg::Int(1)]),
			Err(FormatError::MissingArgument { index: 1 })
		);
		assert!(matches!(
			format(&mut storage, "%s", &[Arg::Int(1)]),
			Err(FormatError::ArgumentMismatch { index: 0, .. })
		));
		assert!(matches!(
			format(&mut storage, "%f", &[Arg::Int(1)]),
			Err(FormatError::ArgumentMismatch { index: 0, .. })
		));
		assert!(matches!(
			format(&mut storage, "%n", &[Arg::Int(1)]),
			Err(FormatError::ArgumentMismatch { index: 0, .. })
		));
	}

	#[test]
	fn nan_is_rejected() {
		let mut storage = [0u8; 32];
		assert_eq!(
			format(&mut storage, "%f", &[f64::NAN.into()]),
			Err(FormatError::FloatNotRepresentable)
		);
	}
}
