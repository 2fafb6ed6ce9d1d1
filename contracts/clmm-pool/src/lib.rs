#![no_std]

mod events;
mod invariants;
mod liquidity;
mod storage;
mod swap;
mod tick_store;


use clmm_math::get_tick_at_sqrt_ratio;
use clmm_types::{
    is_valid_tick_spacing, max_liquidity_per_tick, tick_array_start_index, ClmmError, PoolConfig,
    PoolState, Position, PositionKey, SwapResult, TickArray, TickInfo, FEE_PIPS,
};
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};
use storage::{
    get_config, get_position, get_state, get_tick_array, is_initialized, set_config, set_state,
};

#[contract]
pub struct ClmmPool;

#[contractimpl]
impl ClmmPool {
    /// Initialize a new pool
    ///
    /// `token0` must sort strictly below `token1`. The current tick is
    /// derived from `sqrt_price_x96`.
    pub fn initialize(
        env: Env,
        registry: Address,
        token0: Address,
        token1: Address,
        tick_spacing: i32,
        sqrt_price_x96: u128,
    ) -> Result<(), ClmmError> {
        if is_initialized(&env) {
            return Err(ClmmError::AlreadyInitialized);
        }
        if token0 >= token1 {
            return Err(ClmmError::InvalidTokenPair);
        }
        if !is_valid_tick_spacing(tick_spacing) {
            return Err(ClmmError::InvalidTickSpacing);
        }
        if !invariants::price_in_bounds(sqrt_price_x96) {
            return Err(ClmmError::InvalidPrice);
        }

        let tick = get_tick_at_sqrt_ratio(&env, sqrt_price_x96)?;

        let config = PoolConfig {
            registry,
            token0,
            token1,
            fee: FEE_PIPS,
            tick_spacing,
            max_liquidity_per_tick: max_liquidity_per_tick(tick_spacing),
        };
        set_config(&env, &config);

        let state = PoolState::new(sqrt_price_x96, tick);
        set_state(&env, &state);

        events::initialized(&env, &config.token0, &config.token1, tick_spacing, &state);
        Ok(())
    }

    /// Open a position over [tick_lower, tick_upper)
    ///
    /// `lower_array_start` and `upper_array_start` are the TickArray pages
    /// holding the two bounds.
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts deposited
    pub fn open_position(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
        lower_array_start: i32,
        upper_array_start: i32,
    ) -> Result<(u64, u64), ClmmError> {
        owner.require_auth();
        liquidity::open_position(
            &env,
            owner,
            tick_lower,
            tick_upper,
            liquidity,
            lower_array_start,
            upper_array_start,
        )
    }

    /// Add liquidity to an existing position
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts deposited
    pub fn increase_liquidity(
        env: Env,
        caller: Address,
        position: PositionKey,
        liquidity: u128,
        lower_array_start: i32,
        upper_array_start: i32,
    ) -> Result<(u64, u64), ClmmError> {
        caller.require_auth();
        liquidity::increase_liquidity(
            &env,
            caller,
            position,
            liquidity,
            lower_array_start,
            upper_array_start,
        )
    }

    /// Remove liquidity from a position
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts withdrawn
    pub fn decrease_liquidity(
        env: Env,
        caller: Address,
        position: PositionKey,
        liquidity: u128,
        lower_array_start: i32,
        upper_array_start: i32,
    ) -> Result<(u64, u64), ClmmError> {
        caller.require_auth();
        liquidity::decrease_liquidity(
            &env,
            caller,
            position,
            liquidity,
            lower_array_start,
            upper_array_start,
        )
    }

    /// Execute an exact-input swap
    ///
    /// # Arguments
    /// * `trader` - Pays `amount_in` and receives the output
    /// * `amount_in` - Input amount, fee included
    /// * `zero_for_one` - True if swapping token0 for token1
    /// * `amount_out_minimum` - Slippage bound on the output
    /// * `tick_array_starts` - Pages the swap may traverse, starting with the
    ///   page of the current tick and walking in the trade direction
    pub fn swap(
        env: Env,
        trader: Address,
        amount_in: u64,
        zero_for_one: bool,
        amount_out_minimum: u64,
        tick_array_starts: Vec<i32>,
    ) -> Result<SwapResult, ClmmError> {
        trader.require_auth();
        swap::execute_swap(
            &env,
            trader,
            amount_in,
            zero_for_one,
            amount_out_minimum,
            tick_array_starts,
        )
    }

    /// Quote an exact-input swap without executing it
    pub fn quote_swap(
        env: Env,
        amount_in: u64,
        zero_for_one: bool,
        tick_array_starts: Vec<i32>,
    ) -> Result<SwapResult, ClmmError> {
        swap::quote_swap(&env, amount_in, zero_for_one, tick_array_starts)
    }

    // === View Functions ===

    /// Get current pool state
    pub fn get_state(env: Env) -> Result<PoolState, ClmmError> {
        get_state(&env)
    }

    /// Get pool configuration
    pub fn get_config(env: Env) -> Result<PoolConfig, ClmmError> {
        get_config(&env)
    }

    /// Get tick info; untouched ticks read as zero
    pub fn get_tick(env: Env, tick: i32) -> Result<TickInfo, ClmmError> {
        let config = get_config(&env)?;
        let start = tick_array_start_index(tick, config.tick_spacing);
        match get_tick_array(&env, start) {
            Some(page) => page.get(tick, config.tick_spacing),
            None => Ok(TickInfo::default()),
        }
    }

    /// Get a stored TickArray page
    pub fn get_tick_array(env: Env, start_tick_index: i32) -> Option<TickArray> {
        get_tick_array(&env, start_tick_index)
    }

    /// Get position info
    pub fn get_position(env: Env, position: PositionKey) -> Option<Position> {
        get_position(&env, &position)
    }

    pub fn sqrt_price_x96(env: Env) -> Result<u128, ClmmError> {
        Ok(get_state(&env)?.sqrt_price_x96)
    }

    pub fn tick(env: Env) -> Result<i32, ClmmError> {
        Ok(get_state(&env)?.tick)
    }

    pub fn liquidity(env: Env) -> Result<u128, ClmmError> {
        Ok(get_state(&env)?.liquidity)
    }

    pub fn token0(env: Env) -> Result<Address, ClmmError> {
        Ok(get_config(&env)?.token0)
    }

    pub fn token1(env: Env) -> Result<Address, ClmmError> {
        Ok(get_config(&env)?.token1)
    }

    pub fn tick_spacing(env: Env) -> Result<i32, ClmmError> {
        Ok(get_config(&env)?.tick_spacing)
    }
}
