//! Daily glass counter slice.
//!
//! # Invariants
//! - `glasses` never goes below zero; there is no upper bound.
//! - `Reset` clears `glasses` only; `goal` is set independently.

use serde::{Deserialize, Serialize};

/// Default daily goal in glasses.
pub const DEFAULT_GOAL: u32 = 12;

/// Glasses drunk today against the daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrationState {
    pub glasses: u32,
    pub goal: u32,
}

impl Default for HydrationState {
    fn default() -> Self {
        Self {
            glasses: 0,
            goal: DEFAULT_GOAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationAction {
    AddGlass,
    RemoveGlass,
    Reset,
    SetGoal(u32),
    SetGlasses(u32),
}

/// Applies one hydration action.
pub fn reduce(state: &HydrationState, action: HydrationAction) -> HydrationState {
    let mut next = *state;
    match action {
        HydrationAction::AddGlass => next.glasses = next.glasses.saturating_add(1),
        HydrationAction::RemoveGlass => next.glasses = next.glasses.saturating_sub(1),
        HydrationAction::Reset => next.glasses = 0,
        HydrationAction::SetGoal(goal) => next.goal = goal,
        HydrationAction::SetGlasses(glasses) => next.glasses = glasses,
    }
    next
}

/// Visual fill bucket of the water glass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlassLevel {
    Empty,
    Low,
    Quarter,
    Half,
    AlmostFull,
    Full,
    /// More than two glasses past a reached goal.
    Overflowing,
}

impl HydrationState {
    /// Fraction of the goal reached, capped at `1.0`.
    ///
    /// A zero goal is always reported as full.
    pub fn fill_ratio(&self) -> f64 {
        if self.goal == 0 {
            return 1.0;
        }
        (f64::from(self.glasses) / f64::from(self.goal)).min(1.0)
    }

    /// Rounded progress percentage in `0..=100`.
    pub fn progress_percent(&self) -> u8 {
        (self.fill_ratio() * 100.0).round() as u8
    }

    pub fn remaining(&self) -> u32 {
        self.goal.saturating_sub(self.glasses)
    }

    pub fn goal_reached(&self) -> bool {
        self.glasses >= self.goal
    }

    pub fn level(&self) -> GlassLevel {
        let percent = self.fill_ratio() * 100.0;
        if percent >= 100.0 {
            if self.glasses > self.goal.saturating_add(2) {
                GlassLevel::Overflowing
            } else {
                GlassLevel::Full
            }
        } else if percent <= 0.0 {
            GlassLevel::Empty
        } else if percent < 25.0 {
            GlassLevel::Low
        } else if percent < 50.0 {
            GlassLevel::Quarter
        } else if percent < 75.0 {
            GlassLevel::Half
        } else {
            GlassLevel::AlmostFull
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, GlassLevel, HydrationAction, HydrationState};

    fn state(glasses: u32, goal: u32) -> HydrationState {
        HydrationState { glasses, goal }
    }

    #[test]
    fn remove_glass_floors_at_zero() {
        assert_eq!(reduce(&state(0, 12), HydrationAction::RemoveGlass), state(0, 12));
        assert_eq!(reduce(&state(3, 12), HydrationAction::RemoveGlass), state(2, 12));
    }

    #[test]
    fn add_glass_is_unbounded_above_goal() {
        let mut current = state(0, 12);
        for _ in 0..15 {
            current = reduce(&current, HydrationAction::AddGlass);
        }
        assert_eq!(current, state(15, 12));
    }

    #[test]
    fn reset_keeps_goal_and_setters_are_independent() {
        let reset = reduce(&state(7, 8), HydrationAction::Reset);
        assert_eq!(reset, state(0, 8));

        let with_goal = reduce(&reset, HydrationAction::SetGoal(10));
        assert_eq!(with_goal, state(0, 10));

        let with_glasses = reduce(&with_goal, HydrationAction::SetGlasses(4));
        assert_eq!(with_glasses, state(4, 10));
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let before = state(2, 12);
        let _ = reduce(&before, HydrationAction::AddGlass);
        assert_eq!(before, state(2, 12));
    }

    #[test]
    fn progress_is_capped_and_rounded() {
        assert_eq!(state(0, 12).progress_percent(), 0);
        assert_eq!(state(6, 12).progress_percent(), 50);
        assert_eq!(state(1, 3).progress_percent(), 33);
        assert_eq!(state(20, 12).progress_percent(), 100);
        assert_eq!(state(5, 0).progress_percent(), 100);
        assert_eq!(state(9, 12).remaining(), 3);
        assert_eq!(state(13, 12).remaining(), 0);
    }

    #[test]
    fn glass_level_buckets() {
        assert_eq!(state(0, 12).level(), GlassLevel::Empty);
        assert_eq!(state(2, 12).level(), GlassLevel::Low);
        assert_eq!(state(3, 12).level(), GlassLevel::Quarter);
        assert_eq!(state(6, 12).level(), GlassLevel::Half);
        assert_eq!(state(11, 12).level(), GlassLevel::AlmostFull);
        assert_eq!(state(14, 12).level(), GlassLevel::Full);
        assert_eq!(state(15, 12).level(), GlassLevel::Overflowing);
    }
}
