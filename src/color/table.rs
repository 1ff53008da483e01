//! Fixed color table
//!
//! Values are pre-dimmed; the output stage applies global brightness on top.

use super::{Rgb, rgb_from_u32};

pub const BLANK: Rgb = rgb_from_u32(0x00_00_00);
pub const RED: Rgb = rgb_from_u32(0x20_00_00);
pub const GREEN: Rgb = rgb_from_u32(0x00_20_00);
pub const BLUE: Rgb = rgb_from_u32(0x00_00_20);
pub const ORANGE: Rgb = rgb_from_u32(0x6F_20_00);
pub const WHITE: Rgb = rgb_from_u32(0x20_20_20);
pub const CYAN: Rgb = rgb_from_u32(0x00_19_2B);
pub const PURPLE: Rgb = rgb_from_u32(0x20_00_20);
pub const YELLOW: Rgb = rgb_from_u32(0x20_20_00);
pub const SOFT: Rgb = rgb_from_u32(0x08_08_08);

// Brighter variants
pub const RED1: Rgb = rgb_from_u32(0x40_00_00);
pub const GREEN1: Rgb = rgb_from_u32(0x00_40_00);
pub const BLUE1: Rgb = rgb_from_u32(0x00_18_56);
pub const ORANGE1: Rgb = rgb_from_u32(0x6F_20_00);
