use crate::sqrt_price_math::{get_amount0_delta, get_amount1_delta, get_next_sqrt_price_from_input};
use clmm_types::{ClmmError, FEE_DENOMINATOR};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::Env;

/// Result of a single swap step computation
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapStepResult {
    /// The sqrt price after this step
    pub sqrt_ratio_next_x96: u128,
    /// Amount of input token consumed by price movement
    pub amount_in: u128,
    /// Amount of output token produced
    pub amount_out: u128,
    /// Fee amount taken from input
    pub fee_amount: u128,
}

/// Compute an exact-input swap within a single liquidity range
///
/// # Arguments
/// * `sqrt_ratio_current_x96` - Current sqrt price
/// * `sqrt_ratio_target_x96` - Next tick boundary; its side of the current price sets the direction
/// * `liquidity` - Liquidity active in this range
/// * `amount_remaining` - Input still to be swapped, fee included
/// * `fee_pips` - Fee in hundredths of a bip (1000 = 0.1%)
///
/// `amount_in + fee_amount` never exceeds `amount_remaining`. When the
/// target is not reached the whole remainder is consumed.
pub fn compute_swap_step(
    env: &Env,
    sqrt_ratio_current_x96: u128,
    sqrt_ratio_target_x96: u128,
    liquidity: u128,
    amount_remaining: u128,
    fee_pips: u32,
) -> Result<SwapStepResult, ClmmError> {
    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;

    let amount_remaining_less_fee =
        apply_fee(amount_remaining, FEE_DENOMINATOR - fee_pips, FEE_DENOMINATOR, false)?;

    // Input needed to reach the target
    let amount_to_target = if zero_for_one {
        get_amount0_delta(env, sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, true)?
    } else {
        get_amount1_delta(env, sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, true)?
    };

    let reached = amount_remaining_less_fee >= amount_to_target;
    let sqrt_ratio_next_x96 = if reached {
        sqrt_ratio_target_x96
    } else {
        get_next_sqrt_price_from_input(
            env,
            sqrt_ratio_current_x96,
            liquidity,
            amount_remaining_less_fee,
            zero_for_one,
        )?
    };

    let (amount_in, amount_out) = if zero_for_one {
        let amount_in = if reached {
            amount_to_target
        } else {
            get_amount0_delta(env, sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, true)?
        };
        let amount_out =
            get_amount1_delta(env, sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, false)?;
        (amount_in, amount_out)
    } else {
        let amount_in = if reached {
            amount_to_target
        } else {
            get_amount1_delta(env, sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, true)?
        };
        let amount_out =
            get_amount0_delta(env, sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, false)?;
        (amount_in, amount_out)
    };

    let fee_amount = if reached {
        apply_fee(amount_in, fee_pips, FEE_DENOMINATOR - fee_pips, true)?
    } else {
        // Didn't reach target - the remainder is the fee
        amount_remaining
            .checked_sub(amount_in)
            .ok_or(ClmmError::ArithmeticOverflow)?
    };

    Ok(SwapStepResult {
        sqrt_ratio_next_x96,
        amount_in,
        amount_out,
        fee_amount,
    })
}

/// amount * numerator / denominator for token amounts
fn apply_fee(
    amount: u128,
    numerator: u32,
    denominator: u32,
    round_up: bool,
) -> Result<u128, ClmmError> {
    let amount = i128::try_from(amount).map_err(|_| ClmmError::ArithmeticOverflow)?;
    let (numerator, denominator) = (i128::from(numerator), i128::from(denominator));
    let scaled = if round_up {
        amount.fixed_mul_ceil(numerator, denominator)
    } else {
        amount.fixed_mul_floor(numerator, denominator)
    };
    scaled
        .map(|value| value as u128)
        .ok_or(ClmmError::ArithmeticOverflow)
}
