/*
 * printf - printk-style format engine
 *
 * Turns a format string and an explicit list of typed arguments into bytes
 * inside a caller-supplied buffer. Integer, pointer and fixed-point float
 * conversions are done from scratch; nothing here allocates.
 *
 * Grammar: % [flags]* [width|*] [. (precision|*)] [length] conv
 *   flags  - + space # 0
 *   length h l ll L Z
 *   conv   % c s o O p x X i d u n f
 */

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod args;
pub mod buffer;
pub mod error;
pub mod flags;
pub mod float;
pub mod number;
pub mod parser;

pub use args::{Arg, Args};
pub use buffer::OutBuf;
pub use error::FormatError;
pub use flags::{FormatFlags, FormatSpec, Length};
pub use float::{DEFAULT_FLOAT_PRECISION, convert_float};
pub use number::convert_integer;
pub use parser::format;
