/*
 * Bounded output buffer
 *
 * Every write checks the remaining capacity; running out is reported as
 * FormatError::BufferCapacityExceeded instead of writing past the end.
 */

use crate::error::FormatError;

pub struct OutBuf<'a> {
	buf: &'a mut [u8],
	len: usize,
}

impl<'a> OutBuf<'a> {
	pub fn new(buf: &'a mut [u8]) -> Self {
		Self { buf, len: 0 }
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn capacity(&self) -> usize {
		self.buf.len()
	}

	pub fn remaining(&self) -> usize {
		self.buf.len() - self.len
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.buf[..self.len]
	}

	fn overflow(&self) -> FormatError {
		FormatError::BufferCapacityExceeded {
			capacity: self.buf.len(),
		}
	}

	pub fn push(&mut self, byte: u8) -> Result<(), FormatError> {
		if self.remaining() == 0 {
			return Err(self.overflow());
		}
		self.buf[self.len] = byte;
		self.len += 1;
		Ok(())
	}

	/*
	 * push_n - Append @count copies of @byte
	 *
	 * All or nothing: if the run does not fit, nothing is written.
	 */
	pub fn push_n(&mut self, byte: u8, count: usize) -> Result<(), FormatError> {
		if count > self.remaining() {
			return Err(self.overflow());
		}
		self.buf[self.len..self.len + count].fill(byte);
		self.len += count;
		Ok(())
	}

	pub fn extend(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
		if bytes.len() > self.remaining() {
			return Err(self.overflow());
		}
		self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
		self.len += bytes.len();
		Ok(())
	}

	/* Drop everything written after @len; used to roll back a failed conversion */
	pub fn truncate(&mut self, len: usize) {
		if len < self.len {
			self.len = len;
		}
	}

	/*
	 * terminate - Write the NUL terminator after the produced bytes
	 *
	 * The terminator is not counted. Returns the produced length.
	 */
	pub fn terminate(&mut self) -> Result<usize, FormatError> {
		if self.remaining() == 0 {
			return Err(self.overflow());
		}
		self.buf[self.len] = 0;
		Ok(self.len)
	}
}
