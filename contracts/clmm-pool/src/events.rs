use clmm_types::{PoolState, PositionKey, SwapResult};
use soroban_sdk::{Address, Env, Symbol};

pub fn initialized(env: &Env, token0: &Address, token1: &Address, tick_spacing: i32, state: &PoolState) {
    env.events().publish(
        (Symbol::new(env, "initialized"),),
        (
            token0.clone(),
            token1.clone(),
            tick_spacing,
            state.sqrt_price_x96,
            state.tick,
        ),
    );
}

/// Emitted by open/increase/decrease with the liquidity delta as magnitude
pub fn liquidity_changed(
    env: &Env,
    action: &str,
    position: &PositionKey,
    liquidity: u128,
    amounts: (u64, u64),
    state: &PoolState,
) {
    env.events().publish(
        (Symbol::new(env, action), position.owner.clone()),
        (
            position.tick_lower,
            position.tick_upper,
            liquidity,
            amounts.0,
            amounts.1,
            state.liquidity,
        ),
    );
}

pub fn swap(env: &Env, trader: &Address, zero_for_one: bool, result: &SwapResult) {
    env.events().publish(
        (Symbol::new(env, "swap"), trader.clone()),
        (
            zero_for_one,
            result.amount_in,
            result.amount_out,
            result.fee_amount,
            result.sqrt_price_x96,
            result.tick,
            result.liquidity,
        ),
    );
}
