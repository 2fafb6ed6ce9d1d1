#![no_std]

mod error;
mod pool;
mod position;
mod tick;

pub use error::*;
pub use pool::*;
pub use position::*;
pub use tick::*;

/// Q96 constant (2^96) for fixed-point math
pub const Q96: u128 = 1 << 96;

/// Minimum tick index
/// Limited by u128 representation of the sqrt price
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
pub const MAX_TICK: i32 = 443636;

/// Minimum sqrt price, equal to get_sqrt_ratio_at_tick(MIN_TICK)
pub const MIN_SQRT_RATIO: u128 = 18447090764788882727;

/// Maximum sqrt price, equal to get_sqrt_ratio_at_tick(MAX_TICK).
/// Valid pool prices lie in [MIN_SQRT_RATIO, MAX_SQRT_RATIO).
pub const MAX_SQRT_RATIO: u128 = 340275971719517849884101479065584693833;

/// Number of tick slots in one TickArray page
pub const TICKS_PER_ARRAY: i32 = 30;

/// Largest tick spacing a pool may be created with
pub const MAX_TICK_SPACING: i32 = 16384;

/// Swap fee in hundredths of a basis point (1000 = 0.1%)
pub const FEE_PIPS: u32 = 1_000;

/// Denominator for fee arithmetic (1e6 = 100%)
pub const FEE_DENOMINATOR: u32 = 1_000_000;

/// True if `tick_spacing` is a spacing a pool can be created with
pub fn is_valid_tick_spacing(tick_spacing: i32) -> bool {
    tick_spacing > 0 && tick_spacing <= MAX_TICK_SPACING
}

/// Start tick of the TickArray page that holds `tick`.
///
/// `floor(floor(tick / spacing) / 30) * 30 * spacing`, floored toward
/// negative infinity so negative ticks land on the page below zero.
pub fn tick_array_start_index(tick: i32, tick_spacing: i32) -> i32 {
    let compressed = tick.div_euclid(tick_spacing);
    compressed.div_euclid(TICKS_PER_ARRAY) * TICKS_PER_ARRAY * tick_spacing
}

/// Number of ticks covered by one page
pub fn tick_array_span(tick_spacing: i32) -> i32 {
    TICKS_PER_ARRAY * tick_spacing
}

/// True if `start` is a page boundary for this spacing
pub fn is_valid_tick_array_start(start: i32, tick_spacing: i32) -> bool {
    start.rem_euclid(tick_array_span(tick_spacing)) == 0
}

/// Calculate maximum liquidity per tick for a given tick spacing
pub fn max_liquidity_per_tick(tick_spacing: i32) -> u128 {
    let min_tick = (MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u128 + 1;
    u128::MAX / num_ticks
}
