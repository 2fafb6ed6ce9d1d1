#![no_std]

use clmm_types::{is_valid_tick_spacing, ClmmError, PoolKey};
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{
    contract, contractimpl, contracttype, Address, BytesN, Env, IntoVal, Symbol, Vec,
};

#[contract]
pub struct ClmmRegistry;

/// Storage keys for the registry contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Admin address
    Admin,
    /// Pool WASM hash for deployment
    PoolWasmHash,
    /// (token0, token1, tick_spacing) -> pool address
    Pool(PoolKey),
    /// Total number of pools created (counter for indexed storage)
    PoolCount,
    /// Pool address at index (indexed storage to avoid unbounded Vec)
    PoolAt(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Page size cap for `get_pools_paginated`
const MAX_PAGE_SIZE: u32 = 50;

// ============================================================================
// SOROBAN RESOURCE LIMITS
// ============================================================================
// - Read entries per tx: 100 entries / 200 KB
// - Storage key size: 250 bytes max
//
// - Pool list uses indexed storage (PoolCount + PoolAt) instead of Vec
//   to avoid a single unbounded ledger entry
// - Each key maps to one pool; pools are separate contracts, so swaps
//   on different keys never share a footprint
// ============================================================================

#[contractimpl]
impl ClmmRegistry {
    /// Initialize registry with admin and pool WASM hash
    pub fn initialize(env: Env, admin: Address, pool_wasm_hash: BytesN<32>) -> Result<(), ClmmError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(ClmmError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::PoolWasmHash, &pool_wasm_hash);
        env.storage().instance().set(&DataKey::PoolCount, &0u32);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Create and initialize the pool for (token_a, token_b, tick_spacing)
    ///
    /// Token order does not matter. Returns the pool contract address.
    pub fn create_pool(
        env: Env,
        token_a: Address,
        token_b: Address,
        tick_spacing: i32,
        initial_sqrt_price_x96: u128,
    ) -> Result<Address, ClmmError> {
        let key = validated_key(token_a, token_b, tick_spacing)?;

        let pool_key = DataKey::Pool(key.clone());
        if env.storage().persistent().has(&pool_key) {
            return Err(ClmmError::PoolAlreadyExists);
        }

        let pool_wasm_hash: BytesN<32> = env
            .storage()
            .instance()
            .get(&DataKey::PoolWasmHash)
            .ok_or(ClmmError::NotInitialized)?;

        let pool_count: u32 = env
            .storage()
            .instance()
            .get(&DataKey::PoolCount)
            .unwrap_or(0);

        let pool_address = env
            .deployer()
            .with_current_contract(pool_salt(&env, &key))
            .deploy_v2(pool_wasm_hash, ());

        init_pool(
            &env,
            &pool_address,
            &env.current_contract_address(),
            &key,
            &initial_sqrt_price_x96,
        );

        env.storage().persistent().set(&pool_key, &pool_address);
        extend_persistent_ttl(&env, &pool_key);

        let pool_at_key = DataKey::PoolAt(pool_count);
        env.storage()
            .persistent()
            .set(&pool_at_key, &pool_address);
        extend_persistent_ttl(&env, &pool_at_key);

        env.storage()
            .instance()
            .set(&DataKey::PoolCount, &(pool_count + 1));

        env.events().publish(
            (Symbol::new(&env, "pool_created"),),
            (key.token0, key.token1, key.tick_spacing, pool_address.clone()),
        );

        extend_instance_ttl(&env);
        Ok(pool_address)
    }

    /// Get the pool for a key, if created
    pub fn get_pool(env: Env, token_a: Address, token_b: Address, tick_spacing: i32) -> Option<Address> {
        let key = PoolKey::sorted(token_a, token_b, tick_spacing);
        let pool_key = DataKey::Pool(key);
        let pool = env.storage().persistent().get(&pool_key);
        if pool.is_some() {
            extend_persistent_ttl(&env, &pool_key);
        }
        pool
    }

    /// Deterministic address of the pool for a key, whether created or not
    pub fn pool_address(
        env: Env,
        token_a: Address,
        token_b: Address,
        tick_spacing: i32,
    ) -> Result<Address, ClmmError> {
        let key = validated_key(token_a, token_b, tick_spacing)?;
        Ok(env
            .deployer()
            .with_current_contract(pool_salt(&env, &key))
            .deployed_address())
    }

    /// Get total number of pools created
    pub fn get_pool_count(env: Env) -> u32 {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::PoolCount)
            .unwrap_or(0)
    }

    /// Get pool address at specific index
    pub fn get_pool_at(env: Env, index: u32) -> Option<Address> {
        env.storage().persistent().get(&DataKey::PoolAt(index))
    }

    /// Get up to `limit` pools starting from `start_index`.
    /// `limit` is capped at 50 to stay within read entry limits.
    pub fn get_pools_paginated(env: Env, start_index: u32, limit: u32) -> Vec<Address> {
        let limit = limit.min(MAX_PAGE_SIZE);
        let pool_count = Self::get_pool_count(env.clone());
        let end_index = start_index.saturating_add(limit).min(pool_count);

        let mut pools: Vec<Address> = Vec::new(&env);
        for i in start_index..end_index {
            if let Some(pool) = env.storage().persistent().get(&DataKey::PoolAt(i)) {
                pools.push_back(pool);
            }
        }
        pools
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, ClmmError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ClmmError::NotInitialized)
    }

    /// Get pool WASM hash
    pub fn get_pool_wasm_hash(env: Env) -> Result<BytesN<32>, ClmmError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::PoolWasmHash)
            .ok_or(ClmmError::NotInitialized)
    }
}

fn validated_key(token_a: Address, token_b: Address, tick_spacing: i32) -> Result<PoolKey, ClmmError> {
    if token_a == token_b {
        return Err(ClmmError::InvalidTokenPair);
    }
    if !is_valid_tick_spacing(tick_spacing) {
        return Err(ClmmError::InvalidTickSpacing);
    }
    Ok(PoolKey::sorted(token_a, token_b, tick_spacing))
}

/// Deployment salt: sha256 of the XDR-encoded pool key
fn pool_salt(env: &Env, key: &PoolKey) -> BytesN<32> {
    env.crypto().sha256(&key.clone().to_xdr(env)).to_bytes()
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// Pool initialization via invoke
fn init_pool(env: &Env, pool_address: &Address, registry: &Address, key: &PoolKey, sqrt_price_x96: &u128) {
    env.invoke_contract::<()>(
        pool_address,
        &Symbol::new(env, "initialize"),
        (
            registry,
            &key.token0,
            &key.token1,
            &key.tick_spacing,
            sqrt_price_x96,
        )
            .into_val(env),
    );
}
