use crate::events;
use crate::invariants;
use crate::liquidity::to_token_amount;
use crate::storage::{get_config, get_state, set_state, MAX_TICK_ARRAYS_PER_SWAP};
use crate::tick_store::TickStore;
use clmm_math::{add_delta, compute_swap_step, get_sqrt_ratio_at_tick, tick_at_sqrt_ratio_within};
use clmm_types::{
    tick_array_span, tick_array_start_index, ClmmError, CrossDirection, PoolConfig, PoolState,
    SwapResult, MAX_TICK, MIN_TICK,
};
use soroban_sdk::{log, token, Address, Env, Vec};

/// Execute an exact-input swap
///
/// The trader pays exactly `amount_in` (fee included) and receives at least
/// `amount_out_minimum`, or the call fails with no effect.
pub fn execute_swap(
    env: &Env,
    trader: Address,
    amount_in: u64,
    zero_for_one: bool,
    amount_out_minimum: u64,
    tick_array_starts: Vec<i32>,
) -> Result<SwapResult, ClmmError> {
    let config = get_config(env)?;
    let state = get_state(env)?;

    let (result, new_state) =
        compute_swap(env, &config, &state, amount_in, zero_for_one, &tick_array_starts)?;

    if result.amount_out < amount_out_minimum {
        return Err(ClmmError::SlippageExceeded);
    }

    set_state(env, &new_state);

    let (token_in, token_out) = if zero_for_one {
        (&config.token0, &config.token1)
    } else {
        (&config.token1, &config.token0)
    };
    let pool = env.current_contract_address();

    token::Client::new(env, token_in).transfer(&trader, &pool, &i128::from(result.amount_in));
    if result.amount_out > 0 {
        token::Client::new(env, token_out).transfer(&pool, &trader, &i128::from(result.amount_out));
    }

    events::swap(env, &trader, zero_for_one, &result);
    Ok(result)
}

/// Simulate a swap against current state without writing anything
pub fn quote_swap(
    env: &Env,
    amount_in: u64,
    zero_for_one: bool,
    tick_array_starts: Vec<i32>,
) -> Result<SwapResult, ClmmError> {
    let config = get_config(env)?;
    let state = get_state(env)?;
    let (result, _) = compute_swap(env, &config, &state, amount_in, zero_for_one, &tick_array_starts)?;
    Ok(result)
}

/// Pure swap computation: returns the result and the state to persist.
pub fn compute_swap(
    env: &Env,
    config: &PoolConfig,
    state: &PoolState,
    amount_in: u64,
    zero_for_one: bool,
    tick_array_starts: &Vec<i32>,
) -> Result<(SwapResult, PoolState), ClmmError> {
    if amount_in == 0 {
        return Err(ClmmError::InsufficientInputAmount);
    }

    let store = load_window(env, config, state.tick, zero_for_one, tick_array_starts)?;
    let direction = if zero_for_one {
        CrossDirection::Down
    } else {
        CrossDirection::Up
    };

    let mut amount_remaining = u128::from(amount_in);
    let mut amount_out: u128 = 0;
    let mut fee_amount: u128 = 0;
    let mut sqrt_price_x96 = state.sqrt_price_x96;
    let mut tick = state.tick;
    let mut liquidity = state.liquidity;
    let mut ticks_crossed: u32 = 0;

    while amount_remaining > 0 {
        let next = store.next_initialized_tick(tick, zero_for_one)?;

        // Nothing left to trade against inside the declared window
        if liquidity == 0 && !next.initialized {
            return Err(ClmmError::InsufficientPoolLiquidity);
        }

        let tick_next = next.tick.clamp(MIN_TICK, MAX_TICK);
        let sqrt_price_next_x96 = get_sqrt_ratio_at_tick(env, tick_next)?;

        let step = compute_swap_step(
            env,
            sqrt_price_x96,
            sqrt_price_next_x96,
            liquidity,
            amount_remaining,
            config.fee,
        )?;

        debug_assert!(invariants::step_output_bounded(
            env,
            sqrt_price_x96,
            step.sqrt_ratio_next_x96,
            liquidity,
            step.amount_out,
            zero_for_one,
        ));

        let consumed = step
            .amount_in
            .checked_add(step.fee_amount)
            .ok_or(ClmmError::ArithmeticOverflow)?;
        amount_remaining = amount_remaining
            .checked_sub(consumed)
            .ok_or(ClmmError::ArithmeticOverflow)?;
        amount_out = amount_out
            .checked_add(step.amount_out)
            .ok_or(ClmmError::ArithmeticOverflow)?;
        fee_amount = fee_amount
            .checked_add(step.fee_amount)
            .ok_or(ClmmError::ArithmeticOverflow)?;

        let sqrt_price_start_x96 = sqrt_price_x96;
        sqrt_price_x96 = step.sqrt_ratio_next_x96;

        if sqrt_price_x96 == sqrt_price_next_x96 {
            if !next.in_window {
                // Crossing would need a page that was not declared
                if amount_remaining > 0 {
                    return Err(ClmmError::TickNotFound);
                }
                tick = tick_next - 1;
                break;
            }

            if next.initialized {
                let liquidity_delta = store.crossing_delta(tick_next, direction)?;
                liquidity = add_delta(liquidity, liquidity_delta)?;
                ticks_crossed += 1;
                log!(env, "crossed tick", tick_next, liquidity);
            }

            tick = if zero_for_one { tick_next - 1 } else { tick_next };

            if amount_remaining > 0 && (tick_next == MIN_TICK || tick_next == MAX_TICK) {
                return Err(ClmmError::InsufficientPoolLiquidity);
            }
        } else if sqrt_price_x96 != sqrt_price_start_x96 {
            // Price stopped between ticks
            tick = if zero_for_one {
                tick_at_sqrt_ratio_within(env, sqrt_price_x96, tick_next, tick)?
            } else {
                tick_at_sqrt_ratio_within(env, sqrt_price_x96, tick, tick_next)?
            };
        }
    }

    debug_assert!(invariants::tick_moved_in_direction(state.tick, tick, zero_for_one));

    let mut new_state = state.clone();
    new_state.sqrt_price_x96 = sqrt_price_x96;
    new_state.tick = tick;
    new_state.liquidity = liquidity;
    if zero_for_one {
        new_state.fees_accrued_0 = new_state
            .fees_accrued_0
            .checked_add(fee_amount)
            .ok_or(ClmmError::ArithmeticOverflow)?;
    } else {
        new_state.fees_accrued_1 = new_state
            .fees_accrued_1
            .checked_add(fee_amount)
            .ok_or(ClmmError::ArithmeticOverflow)?;
    }

    let result = SwapResult {
        amount_in,
        amount_out: to_token_amount(amount_out)?,
        fee_amount: to_token_amount(fee_amount)?,
        sqrt_price_x96,
        tick,
        liquidity,
        ticks_crossed,
    };

    Ok((result, new_state))
}

/// Load the pages a swap declared.
///
/// The first page must hold the current tick and each following page must
/// be its neighbour in the trade direction.
fn load_window(
    env: &Env,
    config: &PoolConfig,
    tick: i32,
    zero_for_one: bool,
    tick_array_starts: &Vec<i32>,
) -> Result<TickStore, ClmmError> {
    if tick_array_starts.is_empty() {
        return Err(ClmmError::TickNotFound);
    }
    if tick_array_starts.len() > MAX_TICK_ARRAYS_PER_SWAP {
        return Err(ClmmError::TickArraySequenceTooLong);
    }

    let span = tick_array_span(config.tick_spacing);
    let mut expected = tick_array_start_index(tick, config.tick_spacing);
    let mut store = TickStore::new(env, config.tick_spacing, config.max_liquidity_per_tick);

    for start in tick_array_starts.iter() {
        if start != expected {
            return Err(ClmmError::InvalidTickArrayIndex);
        }
        store.load(env, start)?;
        expected = if zero_for_one {
            expected - span
        } else {
            expected + span
        };
    }

    Ok(store)
}
