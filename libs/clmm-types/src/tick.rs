use crate::{ClmmError, TICKS_PER_ARRAY};
use soroban_sdk::{contracttype, Env, Vec};

/// Per-tick liquidity bookkeeping, split by the role the tick plays
/// for the positions that reference it.
///
/// `liquidity_net_lower` is added to in-range liquidity when price crosses
/// the tick moving up, `liquidity_net_upper` is added when price crosses it
/// moving down. Both are kept as magnitudes; direction lives in
/// the crossing rule, not in the stored sign.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickInfo {
    /// Liquidity of positions using this tick as lower bound
    pub liquidity_gross_lower: u128,
    /// Liquidity of positions using this tick as upper bound
    pub liquidity_gross_upper: u128,
    /// Liquidity entering range when crossing up
    pub liquidity_net_lower: u128,
    /// Liquidity entering range when crossing down
    pub liquidity_net_upper: u128,
    /// True while any position references this tick
    pub initialized: bool,
}

impl TickInfo {
    pub fn liquidity_gross(&self) -> u128 {
        self.liquidity_gross_lower
            .saturating_add(self.liquidity_gross_upper)
    }

    pub fn is_clear(&self) -> bool {
        !self.initialized
            && self.liquidity_gross_lower == 0
            && self.liquidity_gross_upper == 0
            && self.liquidity_net_lower == 0
            && self.liquidity_net_upper == 0
    }
}

/// Role a tick plays for a position
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoundaryRole {
    Lower,
    Upper,
}

/// Direction price moves through a tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CrossDirection {
    Up,
    Down,
}

/// Fixed-size page of ticks starting at `start_tick_index`.
/// Slot `i` holds tick `start_tick_index + i * tick_spacing`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickArray {
    pub start_tick_index: i32,
    pub ticks: Vec<TickInfo>,
}

impl TickArray {
    pub fn new(env: &Env, start_tick_index: i32) -> Self {
        let mut ticks = Vec::new(env);
        for _ in 0..TICKS_PER_ARRAY {
            ticks.push_back(TickInfo::default());
        }
        Self {
            start_tick_index,
            ticks,
        }
    }

    /// Slot index of `tick` in this page
    pub fn offset_for(&self, tick: i32, tick_spacing: i32) -> Result<u32, ClmmError> {
        if tick.rem_euclid(tick_spacing) != 0 {
            return Err(ClmmError::InvalidTickRange);
        }
        let offset = (tick - self.start_tick_index) / tick_spacing;
        if tick < self.start_tick_index || offset >= TICKS_PER_ARRAY {
            return Err(ClmmError::InvalidTickArrayIndex);
        }
        Ok(offset as u32)
    }

    pub fn get(&self, tick: i32, tick_spacing: i32) -> Result<TickInfo, ClmmError> {
        let offset = self.offset_for(tick, tick_spacing)?;
        Ok(self.ticks.get(offset).unwrap_or_default())
    }

    pub fn set(&mut self, tick: i32, tick_spacing: i32, info: TickInfo) -> Result<(), ClmmError> {
        let offset = self.offset_for(tick, tick_spacing)?;
        self.ticks.set(offset, info);
        Ok(())
    }

    /// True if no slot is referenced by any position
    pub fn is_empty(&self) -> bool {
        self.ticks.iter().all(|info| info.is_clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_new_array_is_empty() {
        let env = Env::default();
        let array = TickArray::new(&env, -1800);
        assert_eq!(array.ticks.len(), TICKS_PER_ARRAY as u32);
        assert!(array.is_empty());
    }

    #[test]
    fn test_offset_for() {
        let env = Env::default();
        let array = TickArray::new(&env, -1800);
        assert_eq!(array.offset_for(-1800, 60), Ok(0));
        assert_eq!(array.offset_for(-60, 60), Ok(29));
        assert_eq!(array.offset_for(0, 60), Err(ClmmError::InvalidTickArrayIndex));
        assert_eq!(array.offset_for(-1860, 60), Err(ClmmError::InvalidTickArrayIndex));
        assert_eq!(array.offset_for(-30, 60), Err(ClmmError::InvalidTickRange));
    }

    #[test]
    fn test_set_and_get() {
        let env = Env::default();
        let mut array = TickArray::new(&env, 0);
        let info = TickInfo {
            liquidity_gross_lower: 10,
            liquidity_net_lower: 10,
            initialized: true,
            ..Default::default()
        };
        array.set(120, 60, info.clone()).unwrap();

        assert_eq!(array.get(120, 60).unwrap(), info);
        assert_eq!(array.get(60, 60).unwrap(), TickInfo::default());
        assert!(!array.is_empty());
    }
}
