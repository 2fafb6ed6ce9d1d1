use crate::invariants;
use crate::storage::{get_tick_array, set_tick_array};
use clmm_math::add_delta;
use clmm_types::{
    is_valid_tick_array_start, tick_array_start_index, BoundaryRole, ClmmError, CrossDirection,
    TickArray, TickInfo, MAX_TICK, MIN_TICK,
};
use soroban_sdk::{Env, Map, Vec};

/// Result of scanning for the next initialized tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NextTick {
    pub tick: i32,
    /// False when `tick` is only the edge of the scanned window
    pub initialized: bool,
    /// False when `tick` lies in a page that was not declared, so its
    /// data is unknown and it cannot be crossed
    pub in_window: bool,
}

/// In-memory view over the TickArray pages declared for one operation.
///
/// Only declared pages are visible. Writes stay in memory until `commit`.
pub struct TickStore {
    tick_spacing: i32,
    max_liquidity_per_tick: u128,
    pages: Map<i32, TickArray>,
    dirty: Vec<i32>,
}

impl TickStore {
    pub fn new(env: &Env, tick_spacing: i32, max_liquidity_per_tick: u128) -> Self {
        Self {
            tick_spacing,
            max_liquidity_per_tick,
            pages: Map::new(env),
            dirty: Vec::new(env),
        }
    }

    /// Declare a page. A page never written before starts zeroed.
    pub fn load(&mut self, env: &Env, start: i32) -> Result<(), ClmmError> {
        if !is_valid_tick_array_start(start, self.tick_spacing) {
            return Err(ClmmError::InvalidTickArrayIndex);
        }
        if !self.pages.contains_key(start) {
            let page = get_tick_array(env, start).unwrap_or_else(|| TickArray::new(env, start));
            self.pages.set(start, page);
        }
        Ok(())
    }

    pub fn has_page(&self, start: i32) -> bool {
        self.pages.contains_key(start)
    }

    pub fn tick_info(&self, tick: i32) -> Result<TickInfo, ClmmError> {
        let start = tick_array_start_index(tick, self.tick_spacing);
        let page = self.pages.get(start).ok_or(ClmmError::TickNotFound)?;
        page.get(tick, self.tick_spacing)
    }

    /// Move the `role` fields of `tick` by `delta`.
    ///
    /// `page_start` is the page the caller declared for `tick`. Gross and
    /// net move together so the tick clears once nothing references it.
    pub fn apply_boundary_delta(
        &mut self,
        page_start: i32,
        tick: i32,
        role: BoundaryRole,
        delta: i128,
    ) -> Result<(), ClmmError> {
        if page_start != tick_array_start_index(tick, self.tick_spacing) {
            return Err(ClmmError::InvalidTickArrayIndex);
        }
        let mut page = self.pages.get(page_start).ok_or(ClmmError::TickNotFound)?;
        let mut info = page.get(tick, self.tick_spacing)?;

        match role {
            BoundaryRole::Lower => {
                info.liquidity_gross_lower = add_delta(info.liquidity_gross_lower, delta)?;
                info.liquidity_net_lower = add_delta(info.liquidity_net_lower, delta)?;
            }
            BoundaryRole::Upper => {
                info.liquidity_gross_upper = add_delta(info.liquidity_gross_upper, delta)?;
                info.liquidity_net_upper = add_delta(info.liquidity_net_upper, delta)?;
            }
        }

        if info.liquidity_gross() > self.max_liquidity_per_tick {
            return Err(ClmmError::LiquidityPerTickExceeded);
        }
        info.initialized = info.liquidity_gross_lower != 0 || info.liquidity_gross_upper != 0;
        debug_assert!(invariants::tick_fields_consistent(&info));

        page.set(tick, self.tick_spacing, info)?;
        self.pages.set(page_start, page);
        if !self.dirty.contains(page_start) {
            self.dirty.push_back(page_start);
        }
        Ok(())
    }

    /// Signed change to in-range liquidity when price crosses `tick`.
    ///
    /// Up: ranges starting here enter, ranges ending here leave.
    /// Down is the exact negation.
    pub fn crossing_delta(&self, tick: i32, direction: CrossDirection) -> Result<i128, ClmmError> {
        let info = self.tick_info(tick)?;
        let entering = i128::try_from(info.liquidity_net_lower)
            .map_err(|_| ClmmError::ArithmeticOverflow)?;
        let leaving = i128::try_from(info.liquidity_net_upper)
            .map_err(|_| ClmmError::ArithmeticOverflow)?;
        let up = entering
            .checked_sub(leaving)
            .ok_or(ClmmError::ArithmeticOverflow)?;

        match direction {
            CrossDirection::Up => Ok(up),
            CrossDirection::Down => up.checked_neg().ok_or(ClmmError::ArithmeticOverflow),
        }
    }

    /// Next initialized tick strictly above `tick` (up) or at/below it
    /// (down), scanning only declared pages.
    ///
    /// When the scan runs out of declared pages the window edge is returned:
    /// going down, the lowest scanned tick; going up, the first tick of the
    /// missing page.
    pub fn next_initialized_tick(&self, tick: i32, zero_for_one: bool) -> Result<NextTick, ClmmError> {
        let spacing = self.tick_spacing;
        if !self.has_page(tick_array_start_index(tick, spacing)) {
            return Err(ClmmError::TickNotFound);
        }

        let compressed = tick.div_euclid(spacing);
        let mut candidate = if zero_for_one {
            compressed * spacing
        } else {
            (compressed + 1) * spacing
        };
        let mut cached: Option<TickArray> = None;

        loop {
            if candidate < MIN_TICK || candidate > MAX_TICK {
                return Ok(NextTick {
                    tick: candidate.clamp(MIN_TICK, MAX_TICK),
                    initialized: false,
                    in_window: true,
                });
            }

            let start = tick_array_start_index(candidate, spacing);
            let page = match cached.take() {
                Some(page) if page.start_tick_index == start => page,
                _ => match self.pages.get(start) {
                    Some(page) => page,
                    None if zero_for_one => {
                        return Ok(NextTick {
                            tick: candidate + spacing,
                            initialized: false,
                            in_window: true,
                        })
                    }
                    None => {
                        return Ok(NextTick {
                            tick: candidate,
                            initialized: false,
                            in_window: false,
                        })
                    }
                },
            };

            if page.get(candidate, spacing)?.initialized {
                return Ok(NextTick {
                    tick: candidate,
                    initialized: true,
                    in_window: true,
                });
            }

            cached = Some(page);
            candidate = if zero_for_one {
                candidate - spacing
            } else {
                candidate + spacing
            };
        }
    }

    /// Write back every page touched by `apply_boundary_delta`
    pub fn commit(&self, env: &Env) {
        for start in self.dirty.iter() {
            if let Some(page) = self.pages.get(start) {
                set_tick_array(env, &page);
            }
        }
    }
}
