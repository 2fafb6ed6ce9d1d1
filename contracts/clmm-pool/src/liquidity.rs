use crate::events;
use crate::invariants;
use crate::storage::{get_config, get_position, get_state, has_position, set_position, set_state};
use crate::tick_store::TickStore;
use clmm_math::{add_delta, get_amounts_for_liquidity};
use clmm_types::{BoundaryRole, ClmmError, PoolConfig, PoolState, Position, PositionKey};
use soroban_sdk::{token, Address, Env};

/// Open a new position and deposit the tokens backing it
pub fn open_position(
    env: &Env,
    owner: Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    lower_array_start: i32,
    upper_array_start: i32,
) -> Result<(u64, u64), ClmmError> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;

    validate_ticks(tick_lower, tick_upper, config.tick_spacing)?;
    let delta = liquidity_delta(liquidity)?;

    let key = PositionKey {
        owner: owner.clone(),
        tick_lower,
        tick_upper,
    };
    if has_position(env, &key) {
        return Err(ClmmError::PositionAlreadyExists);
    }

    let mut position = Position {
        owner: owner.clone(),
        pool: env.current_contract_address(),
        tick_lower,
        tick_upper,
        liquidity: 0,
    };

    let amounts = modify_position(
        env,
        &config,
        &mut state,
        &mut position,
        delta,
        lower_array_start,
        upper_array_start,
    )?;

    transfer_in(env, &config, &owner, amounts);
    events::liquidity_changed(env, "open_position", &key, liquidity, amounts, &state);

    Ok(amounts)
}

/// Add liquidity to an existing position owned by `caller`
pub fn increase_liquidity(
    env: &Env,
    caller: Address,
    key: PositionKey,
    liquidity: u128,
    lower_array_start: i32,
    upper_array_start: i32,
) -> Result<(u64, u64), ClmmError> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let mut position = load_owned_position(env, &caller, &key)?;
    let delta = liquidity_delta(liquidity)?;

    let amounts = modify_position(
        env,
        &config,
        &mut state,
        &mut position,
        delta,
        lower_array_start,
        upper_array_start,
    )?;

    transfer_in(env, &config, &caller, amounts);
    events::liquidity_changed(env, "increase_liquidity", &key, liquidity, amounts, &state);

    Ok(amounts)
}

/// Remove liquidity from a position owned by `caller` and pay out the
/// tokens backing it. A position drained to zero stays on record.
pub fn decrease_liquidity(
    env: &Env,
    caller: Address,
    key: PositionKey,
    liquidity: u128,
    lower_array_start: i32,
    upper_array_start: i32,
) -> Result<(u64, u64), ClmmError> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let mut position = load_owned_position(env, &caller, &key)?;

    if position.liquidity == 0 {
        return Err(ClmmError::NoLiquidityToRemove);
    }
    if liquidity > position.liquidity {
        return Err(ClmmError::InsufficientLiquidity);
    }
    let delta = liquidity_delta(liquidity)?
        .checked_neg()
        .ok_or(ClmmError::ArithmeticOverflow)?;
    debug_assert!(invariants::liquidity_delta_valid(position.liquidity, delta));

    let amounts = modify_position(
        env,
        &config,
        &mut state,
        &mut position,
        delta,
        lower_array_start,
        upper_array_start,
    )?;

    transfer_out(env, &config, &caller, amounts);
    events::liquidity_changed(env, "decrease_liquidity", &key, liquidity, amounts, &state);

    Ok(amounts)
}

/// Apply `delta` to a position, its two boundary ticks and, when the range
/// holds the current tick, to in-range liquidity.
///
/// Every fallible step runs before the first write.
fn modify_position(
    env: &Env,
    config: &PoolConfig,
    state: &mut PoolState,
    position: &mut Position,
    delta: i128,
    lower_array_start: i32,
    upper_array_start: i32,
) -> Result<(u64, u64), ClmmError> {
    let mut store = TickStore::new(env, config.tick_spacing, config.max_liquidity_per_tick);
    store.load(env, lower_array_start)?;
    store.load(env, upper_array_start)?;

    store.apply_boundary_delta(
        lower_array_start,
        position.tick_lower,
        BoundaryRole::Lower,
        delta,
    )?;
    store.apply_boundary_delta(
        upper_array_start,
        position.tick_upper,
        BoundaryRole::Upper,
        delta,
    )?;

    // Deposits round up, withdrawals round down
    let (amount0, amount1) = get_amounts_for_liquidity(
        env,
        state.tick,
        state.sqrt_price_x96,
        position.tick_lower,
        position.tick_upper,
        delta.unsigned_abs(),
        delta > 0,
    )?;
    let amounts = (to_token_amount(amount0)?, to_token_amount(amount1)?);

    position.liquidity = add_delta(position.liquidity, delta)?;
    if invariants::range_contains_tick(state.tick, position.tick_lower, position.tick_upper) {
        state.liquidity = add_delta(state.liquidity, delta)?;
    }

    store.commit(env);
    set_position(env, position);
    set_state(env, state);

    Ok(amounts)
}

fn load_owned_position(env: &Env, caller: &Address, key: &PositionKey) -> Result<Position, ClmmError> {
    let position = get_position(env, key).ok_or(ClmmError::PositionNotFound)?;
    if position.owner != *caller {
        return Err(ClmmError::InvalidPositionOwner);
    }
    Ok(position)
}

fn validate_ticks(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> Result<(), ClmmError> {
    if !invariants::range_valid(tick_lower, tick_upper, tick_spacing) {
        return Err(ClmmError::InvalidTickRange);
    }
    Ok(())
}

fn liquidity_delta(liquidity: u128) -> Result<i128, ClmmError> {
    if liquidity == 0 {
        return Err(ClmmError::InvalidLiquidityAmount);
    }
    i128::try_from(liquidity).map_err(|_| ClmmError::ArithmeticOverflow)
}

pub(crate) fn to_token_amount(amount: u128) -> Result<u64, ClmmError> {
    u64::try_from(amount).map_err(|_| ClmmError::ArithmeticOverflow)
}

fn transfer_in(env: &Env, config: &PoolConfig, from: &Address, amounts: (u64, u64)) {
    let pool = env.current_contract_address();
    if amounts.0 > 0 {
        token::Client::new(env, &config.token0).transfer(from, &pool, &i128::from(amounts.0));
    }
    if amounts.1 > 0 {
        token::Client::new(env, &config.token1).transfer(from, &pool, &i128::from(amounts.1));
    }
}

fn transfer_out(env: &Env, config: &PoolConfig, to: &Address, amounts: (u64, u64)) {
    let pool = env.current_contract_address();
    if amounts.0 > 0 {
        token::Client::new(env, &config.token0).transfer(&pool, to, &i128::from(amounts.0));
    }
    if amounts.1 > 0 {
        token::Client::new(env, &config.token1).transfer(&pool, to, &i128::from(amounts.1));
    }
}
