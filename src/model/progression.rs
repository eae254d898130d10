use serde::{Deserialize, Serialize};

const INITIAL_MAX_XP: u32 = 100;
// each level asks 20% more XP than the one before
const XP_GROWTH: f64 = 1.2;

/// One mode's leveling track. XP accrues at one point per ten score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeProgress {
    pub level: u32,
    pub xp: u32,
    pub max_xp: u32,
}

impl Default for ModeProgress {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            max_xp: INITIAL_MAX_XP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

impl ModeProgress {
    /// Folds a finished game's score into the track. Several level-ups
    /// may trigger at once; the XP requirement compounds through each.
    pub fn apply_score(&mut self, score: u32) -> Option<LevelUp> {
        if self.max_xp == 0 {
            // corrupt persisted data would spin the carry loop forever
            self.max_xp = INITIAL_MAX_XP;
        }
        let prior = self.level;
        self.xp += score / 10;
        while self.xp >= self.max_xp {
            self.xp -= self.max_xp;
            self.level += 1;
            self.max_xp = (self.max_xp as f64 * XP_GROWTH).floor() as u32;
        }
        (self.level > prior).then_some(LevelUp {
            from: prior,
            to: self.level,
        })
    }

    /// Fill share of the current level's XP bar, 0-100.
    pub fn percent(&self) -> f64 {
        self.xp as f64 / self.max_xp as f64 * 100.0
    }
}
