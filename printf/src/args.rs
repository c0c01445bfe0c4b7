/*
 * Typed argument list
 *
 * Callers build the argument list up front as a slice of Arg values; the
 * parser pulls them in order through Args, which reports a missing or
 * wrongly-typed argument instead of reading garbage.
 */

use core::cell::Cell;

use crate::error::FormatError;

#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
	Int(i32),
	UInt(u32),
	Long(i64),
	ULong(u64),
	Char(u8),
	/* None prints as the empty string */
	Str(Option<&'a str>),
	Ptr(usize),
	Float(f64),
	/* target of %n */
	Count(&'a Cell<usize>),
}

impl Arg<'_> {
	/* Raw 64-bit pattern of an integer-like argument */
	fn bits(&self) -> Option<u64> {
		match *self {
			Arg::Int(v) => Some(v as i64 as u64),
			Arg::UInt(v) => Some(v as u64),
			Arg::Long(v) => Some(v as u64),
			Arg::ULong(v) => Some(v),
			Arg::Char(v) => Some(v as u64),
			Arg::Ptr(v) => Some(v as u64),
			_ => None,
		}
	}
}

macro_rules! arg_from {
	($variant:ident, $target:ty, $($source:ty),+) => {
		$(
			impl From<$source> for Arg<'_> {
				fn from(value: $source) -> Self {
					Arg::$variant(value as $target)
				}
			}
		)+
	};
}

arg_from!(Int, i32, i8, i16, i32);
arg_from!(UInt, u32, u16, u32);
arg_from!(Long, i64, i64, isize);
arg_from!(ULong, u64, u64, usize);
arg_from!(Float, f64, f32, f64);

impl From<u8> for Arg<'_> {
	fn from(value: u8) -> Self {
		Arg::Char(value)
	}
}

impl From<char> for Arg<'_> {
	fn from(value: char) -> Self {
		if value.is_ascii() {
			Arg::Char(value as u8)
		} else {
			Arg::Char(b'?')
		}
	}
}

impl<'a> From<&'a str> for Arg<'a> {
	fn from(value: &'a str) -> Self {
		Arg::Str(Some(value))
	}
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
	fn from(value: Option<&'a str>) -> Self {
		Arg::Str(value)
	}
}

impl<'a> From<&'a Cell<usize>> for Arg<'a> {
	fn from(value: &'a Cell<usize>) -> Self {
		Arg::Count(value)
	}
}

impl<T> From<*const T> for Arg<'_> {
	fn from(value: *const T) -> Self {
		Arg::Ptr(value as usize)
	}
}

impl<T> From<*mut T> for Arg<'_> {
	fn from(value: *mut T) -> Self {
		Arg::Ptr(value as usize)
	}
}

/*
 * struct Args - Cursor over an argument slice
 * @list: arguments in call order
 * @next: index of the next unread argument
 */
pub struct Args<'a, 'b> {
	list: &'b [Arg<'a>],
	next: usize,
}

impl<'a, 'b> Args<'a, 'b> {
	pub fn new(list: &'b [Arg<'a>]) -> Self {
		Self { list, next: 0 }
	}

	/* Number of arguments consumed so far */
	pub fn consumed(&self) -> usize {
		self.next
	}

	fn take(&mut self) -> Result<(usize, Arg<'a>), FormatError> {
		let index = self.next;
		let arg = *self
			.list
			.get(index)
			.ok_or(FormatError::MissingArgument { index })?;
		self.next += 1;
		Ok((index, arg))
	}

	fn take_bits(&mut self) -> Result<u64, FormatError> {
		let (index, arg) = self.take()?;
		arg.bits().ok_or(FormatError::ArgumentMismatch {
			index,
			expected: "an integer",
		})
	}

	/* `*` width or precision: read as a C int */
	pub fn next_int(&mut self) -> Result<i32, FormatError> {
		Ok(self.take_bits()? as u32 as i32)
	}

	/*
	 * next_signed - Read a signed integer
	 * @wide: read 64 bits; otherwise the low 32 bits, sign-extended
	 */
	pub fn next_signed(&mut self, wide: bool) -> Result<i64, FormatError> {
		let bits = self.take_bits()?;
		Ok(if wide { bits as i64 } else { bits as u32 as i32 as i64 })
	}

	/*
	 * next_unsigned - Read an unsigned integer
	 * @wide: read 64 bits; otherwise the low 32 bits, zero-extended
	 */
	pub fn next_unsigned(&mut self, wide: bool) -> Result<u64, FormatError> {
		let bits = self.take_bits()?;
		Ok(if wide { bits } else { bits as u32 as u64 })
	}

	pub fn next_ptr(&mut self) -> Result<usize, FormatError> {
		Ok(self.take_bits()? as usize)
	}

	pub fn next_char(&mut self) -> Result<u8, FormatError> {
		Ok(self.take_bits()? as u8)
	}

	pub fn next_str(&mut self) -> Result<Option<&'a str>, FormatError> {
		match self.take()? {
			(_, Arg::Str(s)) => Ok(s),
			(index, _) => Err(FormatError::ArgumentMismatch {
				index,
				expected: "a string",
			}),
		}
	}

	pub fn next_float(&mut self) -> Result<f64, FormatError> {
		match self.take()? {
			(_, Arg::Float(v)) => Ok(v),
			(index, _) => Err(FormatError::ArgumentMismatch {
				index,
				expected: "a float",
			}),
		}
	}

	pub fn next_count(&mut self) -> Result<&'a Cell<usize>, FormatError> {
		match self.take()? {
			(_, Arg::Count(cell)) => Ok(cell),
			(index, _) => Err(FormatError::ArgumentMismatch {
				index,
				expected: "a count cell",
			}),
		}
	}
}
