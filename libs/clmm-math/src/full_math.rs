use clmm_types::ClmmError;
use soroban_sdk::{Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Result<u128, ClmmError> {
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let result = div_u256(env, &product, denominator, false)?;
    to_u128(&result)
}

/// Multiply and divide with 256-bit intermediate precision (rounds up)
/// Returns ceil((a * b) / denominator)
pub fn mul_div_rounding_up(
    env: &Env,
    a: u128,
    b: u128,
    denominator: u128,
) -> Result<u128, ClmmError> {
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let result = div_u256(env, &product, denominator, true)?;
    to_u128(&result)
}

/// (value << 96) / denominator with 256-bit precision.
/// The quotient is returned as U256 since it can exceed u128.
pub fn shl96_div(
    env: &Env,
    value: u128,
    denominator: u128,
    round_up: bool,
) -> Result<U256, ClmmError> {
    let shifted = U256::from_u128(env, value).shl(96);
    div_u256(env, &shifted, denominator, round_up)
}

/// Divide a U256 numerator by a u128 denominator
pub fn div_u256(
    env: &Env,
    numerator: &U256,
    denominator: u128,
    round_up: bool,
) -> Result<U256, ClmmError> {
    if denominator == 0 {
        return Err(ClmmError::ArithmeticOverflow);
    }
    let denom = U256::from_u128(env, denominator);
    let quotient = numerator.div(&denom);
    if round_up && numerator.rem_euclid(&denom) != U256::from_u32(env, 0) {
        Ok(quotient.add(&U256::from_u32(env, 1)))
    } else {
        Ok(quotient)
    }
}

/// Convert U256 to u128
pub fn to_u128(value: &U256) -> Result<u128, ClmmError> {
    value.to_u128().ok_or(ClmmError::ArithmeticOverflow)
}

/// Unsigned division with rounding up
pub fn div_rounding_up(a: u128, b: u128) -> Result<u128, ClmmError> {
    if b == 0 {
        return Err(ClmmError::ArithmeticOverflow);
    }
    if a == 0 {
        return Ok(0);
    }
    Ok((a - 1) / b + 1)
}
