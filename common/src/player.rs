#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerSummary {
    pub id: i64,
    pub name: String,
    pub kills: i64,
    pub deaths: i64,
    pub headshots: i64,
    pub assists: i64,
    pub kd_ratio: Option<f64>,
    pub rating: f64,
}

/// Cumulative totals plus badges, as shown on a player profile.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerProfile {
    #[serde(flatten)]
    pub summary: PlayerSummary,
    pub steam_id: Option<String>,
    /// Every behavioural stat that has been reported at least once.
    pub stats: std::collections::BTreeMap<String, f64>,
    pub badges: Vec<PlayerBadge>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerBadge {
    pub name: String,
    pub glyph: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerHeatmap {
    pub map: String,
    pub png_data: String,
}
