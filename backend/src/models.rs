use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::demos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Demo {
    pub id: i64,
    pub file_path: String,
    pub status: String,
    pub uploaded_at: chrono::NaiveDateTime,
    pub processed_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::demos)]
pub struct NewDemo<'a> {
    pub file_path: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub steam_id: Option<String>,
    pub kills: i64,
    pub deaths: i64,
    pub headshots: i64,
    pub assists: i64,
    pub tactical_kills: Option<i64>,
    pub flank_kills: Option<i64>,
    pub entry_kills: Option<i64>,
    pub first_seconds_kills: Option<i64>,
    pub duels_initiated: Option<i64>,
    pub awp_kills: Option<i64>,
    pub awp_purchases: Option<i64>,
    pub defensive_multi_kills: Option<i64>,
    pub clutch_wins: Option<i64>,
    pub grenade_damage: Option<i64>,
    pub blinded_enemies: Option<i64>,
    pub molotov_damage: Option<i64>,
    pub he_kills: Option<i64>,
    pub backstab_kills: Option<i64>,
    pub control_zone_kills: Option<i64>,
    pub stationary_kills: Option<i64>,
    pub eco_rounds_won: Option<i64>,
    pub pistol_rounds_won: Option<i64>,
    pub total_damage_taken: Option<i64>,
    pub bot_eco_deaths: Option<i64>,
    pub first_kill_deaths: Option<i64>,
    pub missed_shots: Option<i64>,
    pub clutch_losses: Option<i64>,
    pub no_trade_deaths: Option<i64>,
    pub missed_before_hit: Option<i64>,
    pub awp_noscope_misses: Option<i64>,
    pub leg_shots: Option<i64>,
    pub wasted_shots: Option<i64>,
    pub fake_defuse_deaths: Option<i64>,
    pub self_blinded: Option<i64>,
    pub teamkills: Option<i64>,
    pub exploded_by_c4: Option<i64>,
    pub nade_damage_taken: Option<i64>,
    pub headshot_percentage: Option<f64>,
    pub survival_rate: Option<f64>,
    pub rotation_time: Option<f64>,
    pub money_saved: Option<f64>,
    pub lowest_kills: Option<f64>,
    pub inactive_time: Option<f64>,
    pub last_alive_first_die: Option<f64>,
    pub wandering_time: Option<f64>,
    pub kd_ratio: Option<f64>,
    pub rating: f64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Player {
    pub fn stat_line(&self) -> stats::StatLine {
        stats::StatLine {
            kills: self.kills,
            deaths: self.deaths,
            headshots: self.headshots,
            assists: self.assists,
            behaviour: stats::Behaviour {
                tactical_kills: self.tactical_kills,
                flank_kills: self.flank_kills,
                entry_kills: self.entry_kills,
                first_seconds_kills: self.first_seconds_kills,
                duels_initiated: self.duels_initiated,
                awp_kills: self.awp_kills,
                awp_purchases: self.awp_purchases,
                defensive_multi_kills: self.defensive_multi_kills,
                clutch_wins: self.clutch_wins,
                grenade_damage: self.grenade_damage,
                blinded_enemies: self.blinded_enemies,
                molotov_damage: self.molotov_damage,
                he_kills: self.he_kills,
                backstab_kills: self.backstab_kills,
                control_zone_kills: self.control_zone_kills,
                stationary_kills: self.stationary_kills,
                eco_rounds_won: self.eco_rounds_won,
                pistol_rounds_won: self.pistol_rounds_won,
                total_damage_taken: self.total_damage_taken,
                bot_eco_deaths: self.bot_eco_deaths,
                first_kill_deaths: self.first_kill_deaths,
                missed_shots: self.missed_shots,
                clutch_losses: self.clutch_losses,
                no_trade_deaths: self.no_trade_deaths,
                missed_before_hit: self.missed_before_hit,
                awp_noscope_misses: self.awp_noscope_misses,
                leg_shots: self.leg_shots,
                wasted_shots: self.wasted_shots,
                fake_defuse_deaths: self.fake_defuse_deaths,
                self_blinded: self.self_blinded,
                teamkills: self.teamkills,
                exploded_by_c4: self.exploded_by_c4,
                nade_damage_taken: self.nade_damage_taken,
                headshot_percentage: self.headshot_percentage,
                survival_rate: self.survival_rate,
                rotation_time: self.rotation_time,
                money_saved: self.money_saved,
                lowest_kills: self.lowest_kills,
                inactive_time: self.inactive_time,
                last_alive_first_die: self.last_alive_first_die,
                wandering_time: self.wandering_time,
            },
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::players)]
pub struct NewPlayer<'a> {
    pub name: &'a str,
    pub steam_id: Option<&'a str>,
}

/// Replaces every cumulative stat of a player. Untracked stats are left out
/// of the update, so they stay NULL.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::schema::players)]
pub struct PlayerTotals {
    pub kills: i64,
    pub deaths: i64,
    pub headshots: i64,
    pub assists: i64,
    pub tactical_kills: Option<i64>,
    pub flank_kills: Option<i64>,
    pub entry_kills: Option<i64>,
    pub first_seconds_kills: Option<i64>,
    pub duels_initiated: Option<i64>,
    pub awp_kills: Option<i64>,
    pub awp_purchases: Option<i64>,
    pub defensive_multi_kills: Option<i64>,
    pub clutch_wins: Option<i64>,
    pub grenade_damage: Option<i64>,
    pub blinded_enemies: Option<i64>,
    pub molotov_damage: Option<i64>,
    pub he_kills: Option<i64>,
    pub backstab_kills: Option<i64>,
    pub control_zone_kills: Option<i64>,
    pub stationary_kills: Option<i64>,
    pub eco_rounds_won: Option<i64>,
    pub pistol_rounds_won: Option<i64>,
    pub total_damage_taken: Option<i64>,
    pub bot_eco_deaths: Option<i64>,
    pub first_kill_deaths: Option<i64>,
    pub missed_shots: Option<i64>,
    pub clutch_losses: Option<i64>,
    pub no_trade_deaths: Option<i64>,
    pub missed_before_hit: Option<i64>,
    pub awp_noscope_misses: Option<i64>,
    pub leg_shots: Option<i64>,
    pub wasted_shots: Option<i64>,
    pub fake_defuse_deaths: Option<i64>,
    pub self_blinded: Option<i64>,
    pub teamkills: Option<i64>,
    pub exploded_by_c4: Option<i64>,
    pub nade_damage_taken: Option<i64>,
    pub headshot_percentage: Option<f64>,
    pub survival_rate: Option<f64>,
    pub rotation_time: Option<f64>,
    pub money_saved: Option<f64>,
    pub lowest_kills: Option<f64>,
    pub inactive_time: Option<f64>,
    pub last_alive_first_die: Option<f64>,
    pub wandering_time: Option<f64>,
    pub updated_at: chrono::NaiveDateTime,
}

impl PlayerTotals {
    pub fn new(totals: &stats::StatLine, updated_at: chrono::NaiveDateTime) -> Self {
        Self {
            kills: totals.kills,
            deaths: totals.deaths,
            headshots: totals.headshots,
            assists: totals.assists,
            tactical_kills: totals.behaviour.tactical_kills,
            flank_kills: totals.behaviour.flank_kills,
            entry_kills: totals.behaviour.entry_kills,
            first_seconds_kills: totals.behaviour.first_seconds_kills,
            duels_initiated: totals.behaviour.duels_initiated,
            awp_kills: totals.behaviour.awp_kills,
            awp_purchases: totals.behaviour.awp_purchases,
            defensive_multi_kills: totals.behaviour.defensive_multi_kills,
            clutch_wins: totals.behaviour.clutch_wins,
            grenade_damage: totals.behaviour.grenade_damage,
            blinded_enemies: totals.behaviour.blinded_enemies,
            molotov_damage: totals.behaviour.molotov_damage,
            he_kills: totals.behaviour.he_kills,
            backstab_kills: totals.behaviour.backstab_kills,
            control_zone_kills: totals.behaviour.control_zone_kills,
            stationary_kills: totals.behaviour.stationary_kills,
            eco_rounds_won: totals.behaviour.eco_rounds_won,
            pistol_rounds_won: totals.behaviour.pistol_rounds_won,
            total_damage_taken: totals.behaviour.total_damage_taken,
            bot_eco_deaths: totals.behaviour.bot_eco_deaths,
            first_kill_deaths: totals.behaviour.first_kill_deaths,
            missed_shots: totals.behaviour.missed_shots,
            clutch_losses: totals.behaviour.clutch_losses,
            no_trade_deaths: totals.behaviour.no_trade_deaths,
            missed_before_hit: totals.behaviour.missed_before_hit,
            awp_noscope_misses: totals.behaviour.awp_noscope_misses,
            leg_shots: totals.behaviour.leg_shots,
            wasted_shots: totals.behaviour.wasted_shots,
            fake_defuse_deaths: totals.behaviour.fake_defuse_deaths,
            self_blinded: totals.behaviour.self_blinded,
            teamkills: totals.behaviour.teamkills,
            exploded_by_c4: totals.behaviour.exploded_by_c4,
            nade_damage_taken: totals.behaviour.nade_damage_taken,
            headshot_percentage: totals.behaviour.headshot_percentage,
            survival_rate: totals.behaviour.survival_rate,
            rotation_time: totals.behaviour.rotation_time,
            money_saved: totals.behaviour.money_saved,
            lowest_kills: totals.behaviour.lowest_kills,
            inactive_time: totals.behaviour.inactive_time,
            last_alive_first_die: totals.behaviour.last_alive_first_die,
            wandering_time: totals.behaviour.wandering_time,
            updated_at,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::game_history)]
pub struct NewGameHistory {
    pub demo_id: i64,
    pub player_id: i64,
    pub kills: i64,
    pub deaths: i64,
    pub headshots: i64,
    pub assists: i64,
    pub tactical_kills: Option<i64>,
    pub flank_kills: Option<i64>,
    pub entry_kills: Option<i64>,
    pub first_seconds_kills: Option<i64>,
    pub duels_initiated: Option<i64>,
    pub awp_kills: Option<i64>,
    pub awp_purchases: Option<i64>,
    pub defensive_multi_kills: Option<i64>,
    pub clutch_wins: Option<i64>,
    pub grenade_damage: Option<i64>,
    pub blinded_enemies: Option<i64>,
    pub molotov_damage: Option<i64>,
    pub he_kills: Option<i64>,
    pub backstab_kills: Option<i64>,
    pub control_zone_kills: Option<i64>,
    pub stationary_kills: Option<i64>,
    pub eco_rounds_won: Option<i64>,
    pub pistol_rounds_won: Option<i64>,
    pub total_damage_taken: Option<i64>,
    pub bot_eco_deaths: Option<i64>,
    pub first_kill_deaths: Option<i64>,
    pub missed_shots: Option<i64>,
    pub clutch_losses: Option<i64>,
    pub no_trade_deaths: Option<i64>,
    pub missed_before_hit: Option<i64>,
    pub awp_noscope_misses: Option<i64>,
    pub leg_shots: Option<i64>,
    pub wasted_shots: Option<i64>,
    pub fake_defuse_deaths: Option<i64>,
    pub self_blinded: Option<i64>,
    pub teamkills: Option<i64>,
    pub exploded_by_c4: Option<i64>,
    pub nade_damage_taken: Option<i64>,
    pub headshot_percentage: Option<f64>,
    pub survival_rate: Option<f64>,
    pub rotation_time: Option<f64>,
    pub money_saved: Option<f64>,
    pub lowest_kills: Option<f64>,
    pub inactive_time: Option<f64>,
    pub last_alive_first_die: Option<f64>,
    pub wandering_time: Option<f64>,
}

impl NewGameHistory {
    pub fn new(demo_id: i64, player_id: i64, line: &stats::StatLine) -> Self {
        Self {
            demo_id,
            player_id,
            kills: line.kills,
            deaths: line.deaths,
            headshots: line.headshots,
            assists: line.assists,
            tactical_kills: line.behaviour.tactical_kills,
            flank_kills: line.behaviour.flank_kills,
            entry_kills: line.behaviour.entry_kills,
            first_seconds_kills: line.behaviour.first_seconds_kills,
            duels_initiated: line.behaviour.duels_initiated,
            awp_kills: line.behaviour.awp_kills,
            awp_purchases: line.behaviour.awp_purchases,
            defensive_multi_kills: line.behaviour.defensive_multi_kills,
            clutch_wins: line.behaviour.clutch_wins,
            grenade_damage: line.behaviour.grenade_damage,
            blinded_enemies: line.behaviour.blinded_enemies,
            molotov_damage: line.behaviour.molotov_damage,
            he_kills: line.behaviour.he_kills,
            backstab_kills: line.behaviour.backstab_kills,
            control_zone_kills: line.behaviour.control_zone_kills,
            stationary_kills: line.behaviour.stationary_kills,
            eco_rounds_won: line.behaviour.eco_rounds_won,
            pistol_rounds_won: line.behaviour.pistol_rounds_won,
            total_damage_taken: line.behaviour.total_damage_taken,
            bot_eco_deaths: line.behaviour.bot_eco_deaths,
            first_kill_deaths: line.behaviour.first_kill_deaths,
            missed_shots: line.behaviour.missed_shots,
            clutch_losses: line.behaviour.clutch_losses,
            no_trade_deaths: line.behaviour.no_trade_deaths,
            missed_before_hit: line.behaviour.missed_before_hit,
            awp_noscope_misses: line.behaviour.awp_noscope_misses,
            leg_shots: line.behaviour.leg_shots,
            wasted_shots: line.behaviour.wasted_shots,
            fake_defuse_deaths: line.behaviour.fake_defuse_deaths,
            self_blinded: line.behaviour.self_blinded,
            teamkills: line.behaviour.teamkills,
            exploded_by_c4: line.behaviour.exploded_by_c4,
            nade_damage_taken: line.behaviour.nade_damage_taken,
            headshot_percentage: line.behaviour.headshot_percentage,
            survival_rate: line.behaviour.survival_rate,
            rotation_time: line.behaviour.rotation_time,
            money_saved: line.behaviour.money_saved,
            lowest_kills: line.behaviour.lowest_kills,
            inactive_time: line.behaviour.inactive_time,
            last_alive_first_die: line.behaviour.last_alive_first_die,
            wandering_time: line.behaviour.wandering_time,
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::badges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Badge {
    pub id: i64,
    pub player_id: i64,
    pub category: String,
    pub name: String,
    pub glyph: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::badges)]
pub struct NewBadge<'a> {
    pub player_id: i64,
    pub category: &'a str,
    pub name: &'a str,
    pub glyph: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::heatmaps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Heatmap {
    pub id: i64,
    pub player_id: i64,
    pub map_name: String,
    pub image_path: String,
    pub rendered_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::heatmaps)]
pub struct NewHeatmap<'a> {
    pub player_id: i64,
    pub map_name: &'a str,
    pub image_path: &'a str,
}
