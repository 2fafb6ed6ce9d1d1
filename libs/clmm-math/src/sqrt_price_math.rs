use crate::full_math::{div_u256, mul_div, mul_div_rounding_up, shl96_div, to_u128};
use clmm_types::{ClmmError, Q96};
use soroban_sdk::{Env, U256};

/// Amount of token0 between two sqrt prices for a given liquidity
///
/// amount0 = L * 2^96 / sqrt_lower - L * 2^96 / sqrt_upper
///
/// Each quotient is taken in 256 bits and rounded so the difference is
/// rounded in the requested direction.
pub fn get_amount0_delta(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, ClmmError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_lower == 0 {
        return Err(ClmmError::InvalidPrice);
    }
    if liquidity == 0 || sqrt_lower == sqrt_upper {
        return Ok(0);
    }

    let at_lower = shl96_div(env, liquidity, sqrt_lower, round_up)?;
    let at_upper = shl96_div(env, liquidity, sqrt_upper, !round_up)?;

    if at_lower <= at_upper {
        return Ok(0);
    }
    to_u128(&at_lower.sub(&at_upper))
}

/// Amount of token1 between two sqrt prices for a given liquidity
///
/// amount1 = L * (sqrt_upper - sqrt_lower) / 2^96
pub fn get_amount1_delta(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, ClmmError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let diff = sqrt_upper - sqrt_lower;

    if round_up {
        mul_div_rounding_up(env, liquidity, diff, Q96)
    } else {
        mul_div(env, liquidity, diff, Q96)
    }
}

/// Next sqrt price after adding `amount_in` of the input token.
/// Rounds toward the starting price so the pool never gives away value.
pub fn get_next_sqrt_price_from_input(
    env: &Env,
    sqrt_price_x96: u128,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> Result<u128, ClmmError> {
    if sqrt_price_x96 == 0 {
        return Err(ClmmError::InvalidPrice);
    }
    if liquidity == 0 {
        return Err(ClmmError::InsufficientPoolLiquidity);
    }
    if amount_in == 0 {
        return Ok(sqrt_price_x96);
    }

    if zero_for_one {
        next_sqrt_price_from_amount0(env, sqrt_price_x96, liquidity, amount_in)
    } else {
        next_sqrt_price_from_amount1(env, sqrt_price_x96, liquidity, amount_in)
    }
}

/// sqrt_next = L * 2^96 / (L * 2^96 / sqrt_price + amount), rounded up
fn next_sqrt_price_from_amount0(
    env: &Env,
    sqrt_price_x96: u128,
    liquidity: u128,
    amount: u128,
) -> Result<u128, ClmmError> {
    let numerator = U256::from_u128(env, liquidity).shl(96);
    let denominator = shl96_div(env, liquidity, sqrt_price_x96, false)?
        .add(&U256::from_u128(env, amount));

    let quotient = numerator.div(&denominator);
    let next = if numerator.rem_euclid(&denominator) != U256::from_u32(env, 0) {
        quotient.add(&U256::from_u32(env, 1))
    } else {
        quotient
    };
    to_u128(&next)
}

/// sqrt_next = sqrt_price + amount * 2^96 / L, rounded down
fn next_sqrt_price_from_amount1(
    env: &Env,
    sqrt_price_x96: u128,
    liquidity: u128,
    amount: u128,
) -> Result<u128, ClmmError> {
    let quotient = to_u128(&div_u256(
        env,
        &U256::from_u128(env, amount).shl(96),
        liquidity,
        false,
    )?)?;
    sqrt_price_x96
        .checked_add(quotient)
        .ok_or(ClmmError::ArithmeticOverflow)
}

fn sorted(a: u128, b: u128) -> (u128, u128) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick_math::get_sqrt_ratio_at_tick;
    use clmm_types::Q96;
    use soroban_sdk::Env;

    // === amount deltas ===

    #[test]
    fn test_amount_deltas_over_symmetric_range() {
        let env = Env::default();
        let lower = get_sqrt_ratio_at_tick(&env, -1800).unwrap();
        let upper = get_sqrt_ratio_at_tick(&env, 1800).unwrap();

        assert_eq!(get_amount0_delta(&env, Q96, upper, 100_000, true), Ok(8607));
        assert_eq!(get_amount1_delta(&env, lower, Q96, 100_000, true), Ok(8607));
    }

    #[test]
    fn test_amount0_delta_large_liquidity_does_not_truncate() {
        let env = Env::default();
        let upper = get_sqrt_ratio_at_tick(&env, 1800).unwrap();
        let small = get_amount0_delta(&env, Q96, upper, 100_000, false).unwrap();
        let large = get_amount0_delta(&env, Q96, upper, 100_000 * (1u128 << 40), false).unwrap();

        // Scaling liquidity scales the amount
        assert!(large >= small * (1u128 << 40));
    }

    #[test]
    fn test_amount_deltas_round_up_not_below_round_down() {
        let env = Env::default();
        let a = get_sqrt_ratio_at_tick(&env, -60).unwrap();
        let b = get_sqrt_ratio_at_tick(&env, 60).unwrap();
        for liquidity in [1u128, 7, 1_000, 123_456_789] {
            let down0 = get_amount0_delta(&env, a, b, liquidity, false).unwrap();
            let up0 = get_amount0_delta(&env, a, b, liquidity, true).unwrap();
            let down1 = get_amount1_delta(&env, a, b, liquidity, false).unwrap();
            let up1 = get_amount1_delta(&env, a, b, liquidity, true).unwrap();
            assert!(up0 >= down0 && up0 - down0 <= 2);
            assert!(up1 >= down1 && up1 - down1 <= 1);
        }
    }

    #[test]
    fn test_amount_deltas_order_independent() {
        let env = Env::default();
        let a = get_sqrt_ratio_at_tick(&env, -600).unwrap();
        let b = get_sqrt_ratio_at_tick(&env, 600).unwrap();
        assert_eq!(
            get_amount0_delta(&env, a, b, 5_000, true),
            get_amount0_delta(&env, b, a, 5_000, true)
        );
        assert_eq!(
            get_amount1_delta(&env, a, b, 5_000, false),
            get_amount1_delta(&env, b, a, 5_000, false)
        );
    }

    #[test]
    fn test_amount_deltas_empty_interval() {
        let env = Env::default();
        assert_eq!(get_amount0_delta(&env, Q96, Q96, 1_000, true), Ok(0));
        assert_eq!(get_amount1_delta(&env, Q96, Q96, 1_000, true), Ok(0));
        assert_eq!(get_amount0_delta(&env, Q96, Q96 * 2, 0, true), Ok(0));
    }

    // === next price from input ===

    #[test]
    fn test_next_price_from_amount0_moves_down() {
        let env = Env::default();
        let next = get_next_sqrt_price_from_input(&env, Q96, 100_000, 49, true).unwrap();
        assert!(next < Q96);
        assert_eq!(next, 79189359727997618760351378161);
    }

    #[test]
    fn test_next_price_from_amount1_moves_up() {
        let env = Env::default();
        let next = get_next_sqrt_price_from_input(&env, Q96, 100_000, 49, false).unwrap();
        assert!(next > Q96);
        assert_eq!(next, 79266984313896327118964786871);
    }

    #[test]
    fn test_next_price_zero_amount_unchanged() {
        let env = Env::default();
        assert_eq!(get_next_sqrt_price_from_input(&env, Q96, 1_000, 0, true), Ok(Q96));
        assert_eq!(get_next_sqrt_price_from_input(&env, Q96, 1_000, 0, false), Ok(Q96));
    }

    #[test]
    fn test_next_price_requires_liquidity() {
        let env = Env::default();
        assert_eq!(
            get_next_sqrt_price_from_input(&env, Q96, 0, 10, true),
            Err(ClmmError::InsufficientPoolLiquidity)
        );
    }
}
