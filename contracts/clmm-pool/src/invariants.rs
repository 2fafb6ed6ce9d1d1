// ============================================================================
// INVARIANTS
// ============================================================================
//
// Predicates over pool, tick and position data. The engines use them as
// guards; the test suite asserts them after every operation sequence.
//
// 1. PRICE
//    - sqrt price lies in [MIN_SQRT_RATIO, MAX_SQRT_RATIO)
//    - current tick agrees with the sqrt price
//
// 2. RANGE
//    - a range contributes to in-range liquidity iff lower <= tick < upper
//    - bounds are on spacing and inside [MIN_TICK, MAX_TICK]
//
// 3. TICK
//    - per role, net liquidity equals gross liquidity
//    - initialized iff some position references the tick
//
// 4. SWAP
//    - the tick only moves in the trade direction
//    - a step never pays out more than its price move implies
//
// ============================================================================

use clmm_math::{get_amount0_delta, get_amount1_delta};
use clmm_types::{TickInfo, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use soroban_sdk::Env;

// ============================================================================
// PRICE INVARIANTS
// ============================================================================

/// Property:
///   MIN_SQRT_RATIO <= sqrt_price_x96 < MAX_SQRT_RATIO
pub fn price_in_bounds(sqrt_price_x96: u128) -> bool {
    (MIN_SQRT_RATIO..MAX_SQRT_RATIO).contains(&sqrt_price_x96)
}

/// Property:
///   MIN_TICK <= tick <= MAX_TICK
pub fn tick_in_bounds(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Property:
///   tick == computed || tick == computed - 1
///
/// After crossing tick T downward the price sits exactly on sqrt(T) while
/// the current tick is T - 1.
pub fn tick_consistent_with_price(tick: i32, computed_tick_from_price: i32) -> bool {
    tick == computed_tick_from_price || tick == computed_tick_from_price - 1
}

// ============================================================================
// RANGE INVARIANTS
// ============================================================================

/// Property:
///   tick_lower <= tick < tick_upper
pub fn range_contains_tick(tick: i32, tick_lower: i32, tick_upper: i32) -> bool {
    tick_lower <= tick && tick < tick_upper
}

/// Property:
///   tick % tick_spacing == 0
pub fn tick_on_spacing(tick: i32, tick_spacing: i32) -> bool {
    tick.rem_euclid(tick_spacing) == 0
}

/// Property:
///   MIN_TICK <= lower < upper <= MAX_TICK, both on spacing
pub fn range_valid(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> bool {
    tick_lower < tick_upper
        && tick_in_bounds(tick_lower)
        && tick_in_bounds(tick_upper)
        && tick_on_spacing(tick_lower, tick_spacing)
        && tick_on_spacing(tick_upper, tick_spacing)
}

/// Property:
///   if delta < 0 then liquidity >= |delta|
pub fn liquidity_delta_valid(liquidity: u128, delta: i128) -> bool {
    if delta < 0 {
        liquidity >= delta.unsigned_abs()
    } else {
        liquidity.checked_add(delta as u128).is_some()
    }
}

// ============================================================================
// TICK INVARIANTS
// ============================================================================

/// Property:
///   net_lower == gross_lower && net_upper == gross_upper
///   initialized <=> gross_lower + gross_upper > 0
pub fn tick_fields_consistent(info: &TickInfo) -> bool {
    info.liquidity_net_lower == info.liquidity_gross_lower
        && info.liquidity_net_upper == info.liquidity_gross_upper
        && info.initialized == (info.liquidity_gross_lower != 0 || info.liquidity_gross_upper != 0)
}

// ============================================================================
// SWAP INVARIANTS
// ============================================================================

/// Property:
///   zero_for_one => tick_after <= tick_before
///   one_for_zero => tick_after >= tick_before
pub fn tick_moved_in_direction(tick_before: i32, tick_after: i32, zero_for_one: bool) -> bool {
    if zero_for_one {
        tick_after <= tick_before
    } else {
        tick_after >= tick_before
    }
}

/// Property:
///   amount_out <= ceil(amount of the output token between sqrt_from and
///   sqrt_to at `liquidity`)
pub fn step_output_bounded(
    env: &Env,
    sqrt_from_x96: u128,
    sqrt_to_x96: u128,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> bool {
    let implied = if zero_for_one {
        get_amount1_delta(env, sqrt_from_x96, sqrt_to_x96, liquidity, true)
    } else {
        get_amount0_delta(env, sqrt_from_x96, sqrt_to_x96, liquidity, true)
    };
    matches!(implied, Ok(max_out) if amount_out <= max_out)
}
