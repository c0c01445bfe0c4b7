use printf::FormatError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConsoleError {
	/* requested cursor lies outside [0, max_col] x [0, max_row] */
	#[error("cursor ({x}, {y}) outside 0..={max_col} x 0..={max_row}")]
	PositionOverflow {
		x: usize,
		y: usize,
		max_col: usize,
		max_row: usize,
	},

	#[error("invalid console geometry: {0}")]
	InvalidGeometry(&'static str),

	#[error("console not initialised")]
	NotInitialized,

	#[error(transparent)]
	Format(#[from] FormatError),
}
