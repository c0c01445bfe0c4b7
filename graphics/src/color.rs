/*
 * Packed 0x00RRGGBB colours, one u32 per pixel.
 */

pub const WHITE: u32 = 0x00ff_ffff;
pub const BLACK: u32 = 0x0000_0000;
pub const RED: u32 = 0x00ff_0000;
pub const ORANGE: u32 = 0x00ff_8000;
pub const YELLOW: u32 = 0x00ff_ff00;
pub const GREEN: u32 = 0x0000_ff00;
pub const BLUE: u32 = 0x0000_00ff;
pub const INDIGO: u32 = 0x0000_ffff;
pub const PURPLE: u32 = 0x0080_00ff;

/* Pixel whose bytes in memory are d, c, b, a */
pub const fn pack_bytes(a: u8, b: u8, c: u8, d: u8) -> u32 {
	u32::from_le_bytes([d, c, b, a])
}
