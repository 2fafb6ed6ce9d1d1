use clmm_types::{ClmmError, PoolConfig, PoolState, Position, PositionKey, TickArray};
use soroban_sdk::{contracttype, Env};

// ============================================================================
// SOROBAN RESOURCE LIMITS - Critical constraints for pool operations:
// ============================================================================
// - Ledger entry size: 128 KiB max per entry
// - Read entries per tx: 100 entries / 200 KB
// - Write entries per tx: 50 entries / 132 KB
//
// Storage design:
// - Ticks are paged: one TickArray entry holds 30 ticks (~2.5 KB)
// - Each position is a separate entry keyed by (owner, lower, upper)
// - Pages with no referenced tick are removed on write-back
//
// Operation footprints:
// - Liquidity changes touch at most 2 pages + 1 position + instance
// - Swaps only read pages (crossing changes in-range liquidity, not tick
//   data), so the page count is bounded by the read budget
// ============================================================================

/// Maximum number of TickArray pages one swap may declare
pub const MAX_TICK_ARRAYS_PER_SWAP: u32 = 8;

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool configuration (Instance storage)
    Config,
    /// Current pool state (Instance storage)
    State,
    /// Tick page: start tick -> TickArray (Persistent storage)
    TickArray(i32),
    /// Position data: PositionKey -> Position (Persistent storage)
    Position(PositionKey),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<PoolConfig, ClmmError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ClmmError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> Result<PoolState, ClmmError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(ClmmError::NotInitialized)
}

pub fn set_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Tick Arrays ===

pub fn get_tick_array(env: &Env, start: i32) -> Option<TickArray> {
    let key = DataKey::TickArray(start);
    let array = env.storage().persistent().get(&key);
    if array.is_some() {
        extend_persistent_ttl(env, &key);
    }
    array
}

pub fn set_tick_array(env: &Env, array: &TickArray) {
    let key = DataKey::TickArray(array.start_tick_index);
    if array.is_empty() {
        // Remove empty page
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, array);
        extend_persistent_ttl(env, &key);
    }
}

// === Position ===

pub fn get_position(env: &Env, key: &PositionKey) -> Option<Position> {
    let data_key = DataKey::Position(key.clone());
    let position = env.storage().persistent().get(&data_key);
    if position.is_some() {
        extend_persistent_ttl(env, &data_key);
    }
    position
}

pub fn has_position(env: &Env, key: &PositionKey) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Position(key.clone()))
}

/// Positions drained to zero liquidity are kept
pub fn set_position(env: &Env, position: &Position) {
    let data_key = DataKey::Position(position.key());
    env.storage().persistent().set(&data_key, position);
    extend_persistent_ttl(env, &data_key);
}
