//! Achievement catalog and unlock tracking

use serde::Serialize;

use super::state::PopRing;
use crate::consts::*;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstPop,
    #[serde(rename = "combo_5")]
    Combo5,
    #[serde(rename = "score_1000")]
    Score1000,
    SpeedDemon,
    BubbleMaster,
}

impl AchievementId {
    /// All achievements in display order.
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstPop,
        AchievementId::Combo5,
        AchievementId::Score1000,
        AchievementId::SpeedDemon,
        AchievementId::BubbleMaster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstPop => "first_pop",
            AchievementId::Combo5 => "combo_5",
            AchievementId::Score1000 => "score_1000",
            AchievementId::SpeedDemon => "speed_demon",
            AchievementId::BubbleMaster => "bubble_master",
        }
    }

    pub fn def(&self) -> &'static AchievementDef {
        &ALL_ACHIEVEMENTS[self.index()]
    }

    fn index(&self) -> usize {
        match self {
            AchievementId::FirstPop => 0,
            AchievementId::Combo5 => 1,
            AchievementId::Score1000 => 2,
            AchievementId::SpeedDemon => 3,
            AchievementId::BubbleMaster => 4,
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstPop,
        title: "First Pop!",
        description: "Pop your first bubble",
        icon: "🎈",
    },
    AchievementDef {
        id: AchievementId::Combo5,
        title: "Combo Master",
        description: "Achieve a 5x combo",
        icon: "🔥",
    },
    AchievementDef {
        id: AchievementId::Score1000,
        title: "High Scorer",
        description: "Reach 1000 points",
        icon: "⭐",
    },
    AchievementDef {
        id: AchievementId::SpeedDemon,
        title: "Speed Demon",
        description: "Pop 10 bubbles in 5 seconds",
        icon: "⚡",
    },
    AchievementDef {
        id: AchievementId::BubbleMaster,
        title: "Bubble Master",
        description: "Pop 100 bubbles total",
        icon: "👑",
    },
];

/// Counters an evaluation looks at, taken right after a pop
#[derive(Debug, Clone, Copy, Default)]
pub struct PopStats {
    pub score: u64,
    pub combo: u32,
    pub total_popped: u64,
}

/// Unlock flags, indexed like `ALL_ACHIEVEMENTS`
#[derive(Debug, Clone, Default)]
pub struct Achievements {
    unlocked: [bool; 5],
}

impl Achievements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an achievement is unlocked.
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked[id.index()]
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        let slot = &mut self.unlocked[id.index()];
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.iter().filter(|&&u| u).count()
    }

    /// Unlock everything whose condition now holds; returns only the
    /// achievements that were locked before this call.
    pub fn evaluate(&mut self, stats: &PopStats, recent: &PopRing, now: u64) -> Vec<AchievementId> {
        let checks = [
            (AchievementId::FirstPop, stats.total_popped >= 1),
            (AchievementId::Combo5, stats.combo >= COMBO_STEP),
            (AchievementId::Score1000, stats.score >= 1000),
            (AchievementId::BubbleMaster, stats.total_popped >= 100),
            (
                AchievementId::SpeedDemon,
                recent.count_within(now, SPEED_DEMON_WINDOW_MS) >= SPEED_DEMON_POPS,
            ),
        ];

        checks
            .into_iter()
            .filter(|&(id, met)| met && self.unlock(id))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(score: u64, combo: u32, total_popped: u64) -> PopStats {
        PopStats {
            score,
            combo,
            total_popped,
        }
    }

    #[test]
    fn test_catalog_matches_ids() {
        assert_eq!(ALL_ACHIEVEMENTS.len(), AchievementId::ALL.len());
        for id in AchievementId::ALL {
            assert_eq!(id.def().id, id);
        }
        assert_eq!(AchievementId::SpeedDemon.def().title, "Speed Demon");
    }

    #[test]
    fn test_achievement_unlock() {
        let mut achievements = Achievements::new();

        assert!(!achievements.is_unlocked(AchievementId::FirstPop));
        assert!(achievements.unlock(AchievementId::FirstPop));
        assert!(achievements.is_unlocked(AchievementId::FirstPop));

        // Second unlock should return false
        assert!(!achievements.unlock(AchievementId::FirstPop));
    }

    #[test]
    fn test_first_pop_unlocks_once() {
        let mut achievements = Achievements::new();
        let ring = PopRing::new();

        assert_eq!(achievements.evaluate(&stats(10, 1, 1), &ring, 0), vec![AchievementId::FirstPop]);
        for total in 2..50 {
            assert!(achievements.evaluate(&stats(10, 1, total), &ring, 0).is_empty());
        }
        assert_eq!(achievements.unlocked_count(), 1);
    }

    #[test]
    fn test_thresholds() {
        let mut achievements = Achievements::new();
        let ring = PopRing::new();

        assert!(achievements.evaluate(&stats(999, 4, 0), &ring, 0).is_empty());
        assert_eq!(
            achievements.evaluate(&stats(1000, 5, 100), &ring, 0),
            vec![
                AchievementId::FirstPop,
                AchievementId::Combo5,
                AchievementId::Score1000,
                AchievementId::BubbleMaster,
            ]
        );
    }

    #[test]
    fn test_speed_demon_window() {
        let mut achievements = Achievements::new();
        let mut ring = PopRing::new();
        let popped = stats(0, 0, 0);

        // 9 pops spread over 4999ms
        for i in 0..9u64 {
            ring.record(i * 4999 / 8);
        }
        assert!(achievements.evaluate(&popped, &ring, 4999).is_empty());

        ring.record(4999);
        assert_eq!(achievements.evaluate(&popped, &ring, 4999), vec![AchievementId::SpeedDemon]);
    }

    #[test]
    fn test_speed_demon_needs_all_ten_in_window() {
        let mut achievements = Achievements::new();
        let mut ring = PopRing::new();
        for i in 0..10u64 {
            ring.record(i * 600);
        }
        // oldest pop (t=0) is exactly 5400ms old
        assert!(achievements.evaluate(&stats(0, 0, 0), &ring, 5400).is_empty());
        assert!(!achievements.is_unlocked(AchievementId::SpeedDemon));
    }

    #[test]
    fn test_as_str_matches_wire_name() {
        for id in AchievementId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
