//! Parsing of the JSON report written by the demo decoder.
//!
//! The decoder emits `{"players": [{"name": ..., "kills": ..., ...}]}`.
//! `kills`, `deaths`, `headshots` and `assists` are mandatory for every
//! player, all behavioural stats and the `heatmaps` samples are optional.

use std::collections::BTreeMap;

use crate::line::{Behaviour, StatLine};

#[derive(Debug, thiserror::Error)]
pub enum MalformedReport {
    #[error("report is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("report has no `players` list")]
    MissingPlayers,
    #[error("player entry {index} is invalid: {source}")]
    InvalidEntry {
        index: usize,
        source: serde_json::Error,
    },
    #[error("player entry {index} has no name")]
    MissingName { index: usize },
    #[error("player {name:?} is missing mandatory field `{field}`")]
    MissingField { name: String, field: &'static str },
    #[error("player {name:?} has a negative or non-finite `{field}`")]
    InvalidValue { name: String, field: &'static str },
    #[error("player {0:?} appears more than once")]
    DuplicatePlayer(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatReport {
    pub players: BTreeMap<String, PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub steam_id: Option<String>,
    pub stats: StatLine,
    /// Position samples per map name.
    pub heatmaps: BTreeMap<String, Vec<HeatmapSample>>,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeatmapSample {
    pub x: f64,
    pub y: f64,
}

#[derive(serde::Deserialize)]
struct RawReport {
    players: Option<Vec<serde_json::Value>>,
}

#[derive(serde::Deserialize)]
struct RawPlayer {
    name: Option<String>,
    steam_id: Option<serde_json::Value>,
    kills: Option<i64>,
    deaths: Option<i64>,
    headshots: Option<i64>,
    assists: Option<i64>,
    heatmaps: Option<BTreeMap<String, Vec<HeatmapSample>>>,
    #[serde(flatten)]
    behaviour: Behaviour,
}

pub fn parse(buf: &[u8]) -> Result<StatReport, MalformedReport> {
    let raw: RawReport = serde_json::from_slice(buf)?;
    let entries = raw.players.ok_or(MalformedReport::MissingPlayers)?;

    let mut players = BTreeMap::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let raw: RawPlayer = serde_json::from_value(entry)
            .map_err(|source| MalformedReport::InvalidEntry { index, source })?;

        let name = match raw.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(MalformedReport::MissingName { index }),
        };

        let stats = StatLine {
            kills: mandatory(&name, "kills", raw.kills)?,
            deaths: mandatory(&name, "deaths", raw.deaths)?,
            headshots: mandatory(&name, "headshots", raw.headshots)?,
            assists: mandatory(&name, "assists", raw.assists)?,
            behaviour: raw.behaviour,
        };
        if let Some(field) = stats.behaviour.invalid_stat() {
            return Err(MalformedReport::InvalidValue { name, field });
        }

        let steam_id = match raw.steam_id {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        if players.contains_key(&name) {
            return Err(MalformedReport::DuplicatePlayer(name));
        }

        tracing::trace!(?name, "Parsed player entry");

        players.insert(
            name,
            PlayerRecord {
                steam_id,
                stats,
                heatmaps: raw.heatmaps.unwrap_or_default(),
            },
        );
    }

    Ok(StatReport { players })
}

fn mandatory(name: &str, field: &'static str, value: Option<i64>) -> Result<i64, MalformedReport> {
    match value {
        None => Err(MalformedReport::MissingField {
            name: name.to_owned(),
            field,
        }),
        Some(v) if v < 0 => Err(MalformedReport::InvalidValue {
            name: name.to_owned(),
            field,
        }),
        Some(v) => Ok(v),
    }
}
