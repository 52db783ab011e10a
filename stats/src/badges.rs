//! Badge catalogue.
//!
//! A badge is awarded for every tracked statistic that has a value, zero
//! included. Only stats the decoder never reported for a player are skipped.
//! The two categories are evaluated and stored independently.

use crate::line::{StatLine, BEHAVIOUR_STATS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    /// One badge per behavioural statistic.
    Unique,
    /// Leaderboard style badges.
    Generic,
}

impl BadgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Generic => "generic",
        }
    }
}

impl std::str::FromStr for BadgeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unique" => Ok(Self::Unique),
            "generic" => Ok(Self::Generic),
            other => Err(format!("Unknown badge category {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Badge {
    pub name: &'static str,
    pub glyph: &'static str,
    pub category: BadgeCategory,
}

impl Badge {
    const fn unique(name: &'static str, glyph: &'static str) -> Self {
        Self {
            name,
            glyph,
            category: BadgeCategory::Unique,
        }
    }

    const fn generic(name: &'static str, glyph: &'static str) -> Self {
        Self {
            name,
            glyph,
            category: BadgeCategory::Generic,
        }
    }
}

const IN_GAME_LEADER: Badge = Badge::unique("In-Game Leader", "👑");

const TOP_KILLER: Badge = Badge::generic("Top Killer", "🏆");
const TOP_DEATHS: Badge = Badge::generic("Top Deaths", "☠️");
const TOP_HEADSHOTS: Badge = Badge::generic("Top Headshots", "🎯");
const TOP_KD_RATIO: Badge = Badge::generic("Top KD Ratio", "📈");

/// Size of the unique catalogue: assists plus every behavioural stat.
pub const UNIQUE_BADGE_COUNT: usize = BEHAVIOUR_STATS.len() + 1;

pub fn evaluate(category: BadgeCategory, totals: &StatLine) -> Vec<Badge> {
    match category {
        BadgeCategory::Unique => unique_badges(totals),
        BadgeCategory::Generic => generic_badges(totals),
    }
}

pub fn unique_badges(totals: &StatLine) -> Vec<Badge> {
    // assists is mandatory, the leader badge always applies
    let mut badges = vec![IN_GAME_LEADER];

    badges.extend(
        BEHAVIOUR_STATS
            .iter()
            .zip(totals.behaviour.tracked())
            .filter(|(_, tracked)| *tracked)
            .map(|(stat, _)| Badge::unique(stat.badge, stat.glyph)),
    );

    badges
}

pub fn generic_badges(totals: &StatLine) -> Vec<Badge> {
    let mut badges = vec![TOP_KILLER, TOP_DEATHS, TOP_HEADSHOTS];

    if totals.kd_ratio().is_some() {
        badges.push(TOP_KD_RATIO);
    }

    badges
}
