use soroban_sdk::{contracttype, Address};

/// Mutable pool state - stored in Instance storage for frequent access
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Current sqrt(price) as Q64.96
    pub sqrt_price_x96: u128,
    /// Current tick index
    pub tick: i32,
    /// Total liquidity currently in range
    pub liquidity: u128,
    /// Swap fees collected in token0. Distribution to positions is not
    /// tracked; this is the accrual hook for a fee-growth layer.
    pub fees_accrued_0: u128,
    /// Swap fees collected in token1
    pub fees_accrued_1: u128,
}

impl PoolState {
    pub fn new(sqrt_price_x96: u128, tick: i32) -> Self {
        Self {
            sqrt_price_x96,
            tick,
            liquidity: 0,
            fees_accrued_0: 0,
            fees_accrued_1: 0,
        }
    }
}

/// Pool configuration - immutable after creation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Registry that created this pool
    pub registry: Address,
    /// Token0 address (lower address)
    pub token0: Address,
    /// Token1 address (higher address)
    pub token1: Address,
    /// Swap fee in hundredths of bps
    pub fee: u32,
    /// Tick spacing for this pool
    pub tick_spacing: i32,
    /// Maximum gross liquidity per tick
    pub max_liquidity_per_tick: u128,
}

/// Registry key identifying a pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolKey {
    pub token0: Address,
    pub token1: Address,
    pub tick_spacing: i32,
}

impl PoolKey {
    /// Build a key from an unordered token pair
    pub fn sorted(token_a: Address, token_b: Address, tick_spacing: i32) -> Self {
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Self {
            token0,
            token1,
            tick_spacing,
        }
    }
}

/// Outcome of a swap, or of a quote for one
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapResult {
    /// Input token debited from the trader, fee included
    pub amount_in: u64,
    /// Output token credited to the trader
    pub amount_out: u64,
    /// Portion of `amount_in` retained as fee
    pub fee_amount: u64,
    /// Sqrt price after the swap
    pub sqrt_price_x96: u128,
    /// Tick after the swap
    pub tick: i32,
    /// In-range liquidity after the swap
    pub liquidity: u128,
    /// Initialized ticks crossed
    pub ticks_crossed: u32,
}
