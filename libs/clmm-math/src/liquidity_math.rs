use crate::sqrt_price_math::{get_amount0_delta, get_amount1_delta};
use crate::tick_math::get_sqrt_ratio_at_tick;
use clmm_types::ClmmError;
use soroban_sdk::Env;

/// Add a signed liquidity delta to a liquidity value
pub fn add_delta(x: u128, y: i128) -> Result<u128, ClmmError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs())
            .ok_or(ClmmError::ArithmeticOverflow)
    } else {
        x.checked_add(y as u128).ok_or(ClmmError::ArithmeticOverflow)
    }
}

/// Token amounts backing `liquidity` over [tick_lower, tick_upper) at the
/// current pool price.
///
/// The branch is chosen on the current tick so it agrees with whether the
/// range contributes to in-range liquidity:
/// - tick < tick_lower: token0 only
/// - tick_lower <= tick < tick_upper: both tokens
/// - tick >= tick_upper: token1 only
pub fn get_amounts_for_liquidity(
    env: &Env,
    current_tick: i32,
    sqrt_price_x96: u128,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    round_up: bool,
) -> Result<(u128, u128), ClmmError> {
    let sqrt_lower = get_sqrt_ratio_at_tick(env, tick_lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(env, tick_upper)?;

    if current_tick < tick_lower {
        let amount0 = get_amount0_delta(env, sqrt_lower, sqrt_upper, liquidity, round_up)?;
        Ok((amount0, 0))
    } else if current_tick < tick_upper {
        let amount0 = get_amount0_delta(env, sqrt_price_x96, sqrt_upper, liquidity, round_up)?;
        let amount1 = get_amount1_delta(env, sqrt_lower, sqrt_price_x96, liquidity, round_up)?;
        Ok((amount0, amount1))
    } else {
        let amount1 = get_amount1_delta(env, sqrt_lower, sqrt_upper, liquidity, round_up)?;
        Ok((0, amount1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clmm_types::Q96;
    use soroban_sdk::Env;

    #[test]
    fn test_add_delta() {
        assert_eq!(add_delta(100, 50), Ok(150));
        assert_eq!(add_delta(100, -40), Ok(60));
        assert_eq!(add_delta(100, -100), Ok(0));
        assert_eq!(add_delta(100, -101), Err(ClmmError::ArithmeticOverflow));
        assert_eq!(add_delta(u128::MAX, 1), Err(ClmmError::ArithmeticOverflow));
    }

    #[test]
    fn test_amounts_in_range() {
        let env = Env::default();
        let amounts = get_amounts_for_liquidity(&env, 0, Q96, -1800, 1800, 100_000, true);
        assert_eq!(amounts, Ok((8607, 8607)));
    }

    #[test]
    fn test_amounts_range_above_price_is_token0_only() {
        let env = Env::default();
        let (amount0, amount1) =
            get_amounts_for_liquidity(&env, -1, Q96 - 1, 0, 1800, 100_000, true).unwrap();
        assert!(amount0 > 0);
        assert_eq!(amount1, 0);
    }

    #[test]
    fn test_amounts_range_below_price_is_token1_only() {
        let env = Env::default();
        let (amount0, amount1) =
            get_amounts_for_liquidity(&env, 0, Q96, -1800, 0, 100_000, true).unwrap();
        assert_eq!(amount0, 0);
        assert!(amount1 > 0);
    }

    #[test]
    fn test_amounts_range_starting_at_price() {
        let env = Env::default();
        // tick 0 with price exactly at the lower bound needs only token0
        let (amount0, amount1) =
            get_amounts_for_liquidity(&env, 0, Q96, 0, 1800, 100_000, true).unwrap();
        assert_eq!(amount0, 8607);
        assert_eq!(amount1, 0);
    }

    #[test]
    fn test_withdrawal_rounds_down() {
        let env = Env::default();
        let (deposit0, deposit1) =
            get_amounts_for_liquidity(&env, 0, Q96, -60, 60, 12_345, true).unwrap();
        let (withdraw0, withdraw1) =
            get_amounts_for_liquidity(&env, 0, Q96, -60, 60, 12_345, false).unwrap();
        assert!(withdraw0 <= deposit0);
        assert!(withdraw1 <= deposit1);
    }
}
