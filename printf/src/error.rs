use thiserror::Error;

/*
 * enum FormatError - Reasons a conversion or a whole format run is rejected
 *
 * None of these are fatal; the caller decides whether to retry with a
 * larger buffer or different arguments.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
	#[error("unsupported base {base} (expected 2..=36)")]
	UnsupportedBase { base: u32 },

	#[error("output buffer full ({capacity} bytes)")]
	BufferCapacityExceeded { capacity: usize },

	#[error("missing argument #{index}")]
	MissingArgument { index: usize },

	#[error("argument #{index} is not {expected}")]
	ArgumentMismatch { index: usize, expected: &'static str },

	#[error("float is NaN, infinite or too large for fixed-point output")]
	FloatNotRepresentable,
}
