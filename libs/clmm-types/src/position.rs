use soroban_sdk::{contracttype, Address};

/// Key for position lookup. The pool is implied by the contract holding it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionKey {
    pub owner: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
}

/// Liquidity position
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub owner: Address,
    /// Pool contract the position lives in
    pub pool: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    /// Current liquidity. A position drained to zero is kept.
    pub liquidity: u128,
}

impl Position {
    pub fn key(&self) -> PositionKey {
        PositionKey {
            owner: self.owner.clone(),
            tick_lower: self.tick_lower,
            tick_upper: self.tick_upper,
        }
    }
}
