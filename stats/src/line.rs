//! The stat line shared by per-match snapshots and cumulative player totals.

/// Describes one behavioural stat together with the unique badge it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviourStat {
    pub stat: &'static str,
    pub badge: &'static str,
    pub glyph: &'static str,
}

macro_rules! behaviour {
    (
        counters { $($counter:ident => ($cbadge:literal, $cglyph:literal)),* $(,)? }
        gauges { $($gauge:ident => ($gbadge:literal, $gglyph:literal)),* $(,)? }
    ) => {
        /// Behavioural stats as reported by the decoder.
        ///
        /// Counters are summed across matches, gauges hold the value of the
        /// latest match that reported them. `None` means the decoder never
        /// reported the stat and counts as zero in any arithmetic.
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct Behaviour {
            $(
                #[serde(default)]
                pub $counter: Option<i64>,
            )*
            $(
                #[serde(default)]
                pub $gauge: Option<f64>,
            )*
        }

        /// All behavioural stats, counters first, in badge order.
        pub const BEHAVIOUR_STATS: &[BehaviourStat] = &[
            $(BehaviourStat { stat: stringify!($counter), badge: $cbadge, glyph: $cglyph },)*
            $(BehaviourStat { stat: stringify!($gauge), badge: $gbadge, glyph: $gglyph },)*
        ];

        impl Behaviour {
            /// Leaves `self` untouched if any counter would overflow.
            pub fn merge(&mut self, other: &Behaviour) -> Result<(), CounterOverflow> {
                let mut merged = self.clone();
                $(merged.$counter = add_counter(stringify!($counter), self.$counter, other.$counter)?;)*
                $(merged.$gauge = other.$gauge.or(self.$gauge);)*
                *self = merged;
                Ok(())
            }

            /// Every stat by name, in the order of [`BEHAVIOUR_STATS`].
            pub fn values(&self) -> Vec<(&'static str, Option<f64>)> {
                vec![
                    $((stringify!($counter), self.$counter.map(|v| v as f64)),)*
                    $((stringify!($gauge), self.$gauge),)*
                ]
            }

            /// Which stats have a value, in the order of [`BEHAVIOUR_STATS`].
            pub fn tracked(&self) -> Vec<bool> {
                self.values().into_iter().map(|(_, v)| v.is_some()).collect()
            }

            /// Returns the name of the first stat holding a negative or
            /// non-finite value.
            pub fn invalid_stat(&self) -> Option<&'static str> {
                $(
                    if self.$counter.is_some_and(|v| v < 0) {
                        return Some(stringify!($counter));
                    }
                )*
                $(
                    if self.$gauge.is_some_and(|v| !v.is_finite() || v < 0.0) {
                        return Some(stringify!($gauge));
                    }
                )*
                None
            }

            /// Every stat set, counters to zero and gauges to zero.
            pub fn zeroed() -> Self {
                Self {
                    $($counter: Some(0),)*
                    $($gauge: Some(0.0),)*
                }
            }
        }
    };
}

behaviour! {
    counters {
        tactical_kills => ("Tactical Genius", "💡"),
        flank_kills => ("Strategist", "🗺️"),
        entry_kills => ("Entry King", "🔑"),
        first_seconds_kills => ("Rush Master", "🏃"),
        duels_initiated => ("Fearless Fragger", "🗡️"),
        awp_kills => ("AWP Master", "🔭"),
        awp_purchases => ("AWP Thief", "💰"),
        defensive_multi_kills => ("The Wall", "🛡️"),
        clutch_wins => ("Clutch God", "💪"),
        grenade_damage => ("Utility King", "💣"),
        blinded_enemies => ("Flashbang King", "⚡"),
        molotov_damage => ("Molotov Magician", "⚗️"),
        he_kills => ("Grenade Master", "🔥"),
        backstab_kills => ("Silent Killer", "👻"),
        control_zone_kills => ("Connector King", "📍"),
        stationary_kills => ("Camp King", "🌲"),
        eco_rounds_won => ("Eco King", "🪙"),
        pistol_rounds_won => ("Pistol Expert", "🔫"),
        total_damage_taken => ("Bullet Sponge", "🤕"),
        bot_eco_deaths => ("Bot Eco", "🤖"),
        first_kill_deaths => ("Entry Feeder", "🍼"),
        missed_shots => ("Wall Sprayer", "🧱"),
        clutch_losses => ("1vX Choker", "💔"),
        no_trade_deaths => ("Baited Again", "🐟"),
        missed_before_hit => ("Whiffmaster", "🌬️"),
        awp_noscope_misses => ("AWP No-Scope Enjoyer", "🤷"),
        leg_shots => ("Leg Shot Lord", "🦵"),
        wasted_shots => ("Can't Spray, Won't Spray", "💦"),
        fake_defuse_deaths => ("Fake Defuse Believer", "🎩"),
        self_blinded => ("Flash Myself Pro", "👁️"),
        teamkills => ("Terrorist CT", "😡"),
        exploded_by_c4 => ("Bomberman", "🧨"),
        nade_damage_taken => ("Nade Magnet", "💫"),
    }
    gauges {
        headshot_percentage => ("Headshot Machine", "💥"),
        survival_rate => ("Survivor", "🧍"),
        rotation_time => ("Speedster", "💨"),
        money_saved => ("Money Saver", "💸"),
        lowest_kills => ("Silver Elite", "🥈"),
        inactive_time => ("CS Tourist", "🚶"),
        last_alive_first_die => ("Last Alive, First to Die", "😱"),
        wandering_time => ("Lost on the Map", "🧭"),
    }
}

/// A cumulative counter no longer fits into an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{stat} overflows when merged")]
pub struct CounterOverflow {
    pub stat: &'static str,
}

fn checked_add(stat: &'static str, current: i64, other: i64) -> Result<i64, CounterOverflow> {
    current.checked_add(other).ok_or(CounterOverflow { stat })
}

fn add_counter(
    stat: &'static str,
    current: Option<i64>,
    other: Option<i64>,
) -> Result<Option<i64>, CounterOverflow> {
    match (current, other) {
        (None, None) => Ok(None),
        (current, other) => checked_add(stat, current.unwrap_or(0), other.unwrap_or(0)).map(Some),
    }
}

/// Kills, deaths, headshots and assists are always present, the rest of the
/// line is optional.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatLine {
    pub kills: i64,
    pub deaths: i64,
    pub headshots: i64,
    pub assists: i64,
    #[serde(flatten)]
    pub behaviour: Behaviour,
}

impl StatLine {
    /// Folds a single match into these totals. On overflow the totals are
    /// left as they were.
    pub fn merge(&mut self, other: &StatLine) -> Result<(), CounterOverflow> {
        let mut behaviour = self.behaviour.clone();
        behaviour.merge(&other.behaviour)?;

        let kills = checked_add("kills", self.kills, other.kills)?;
        let deaths = checked_add("deaths", self.deaths, other.deaths)?;
        let headshots = checked_add("headshots", self.headshots, other.headshots)?;
        let assists = checked_add("assists", self.assists, other.assists)?;

        *self = StatLine {
            kills,
            deaths,
            headshots,
            assists,
            behaviour,
        };
        Ok(())
    }

    pub fn kd_ratio(&self) -> Option<f64> {
        kd_ratio(self.kills, self.deaths)
    }
}

/// `None` when there are no deaths to divide by.
pub fn kd_ratio(kills: i64, deaths: i64) -> Option<f64> {
    if deaths == 0 {
        return None;
    }

    Some(kills as f64 / deaths as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_add_and_gauges_replace() {
        let mut totals = StatLine {
            kills: 10,
            deaths: 5,
            headshots: 4,
            assists: 2,
            behaviour: Behaviour {
                entry_kills: Some(3),
                headshot_percentage: Some(40.0),
                ..Default::default()
            },
        };
        let latest = StatLine {
            kills: 7,
            deaths: 9,
            headshots: 1,
            assists: 0,
            behaviour: Behaviour {
                entry_kills: Some(2),
                clutch_wins: Some(1),
                headshot_percentage: Some(14.3),
                ..Default::default()
            },
        };

        totals.merge(&latest).unwrap();

        assert_eq!(17, totals.kills);
        assert_eq!(14, totals.deaths);
        assert_eq!(5, totals.headshots);
        assert_eq!(2, totals.assists);
        assert_eq!(Some(5), totals.behaviour.entry_kills);
        assert_eq!(Some(1), totals.behaviour.clutch_wins);
        assert_eq!(Some(14.3), totals.behaviour.headshot_percentage);
        assert_eq!(None, totals.behaviour.flank_kills);
    }

    #[test]
    fn unreported_gauge_keeps_previous_value() {
        let mut totals = Behaviour {
            survival_rate: Some(0.5),
            ..Default::default()
        };

        totals.merge(&Behaviour::default()).unwrap();

        assert_eq!(Some(0.5), totals.survival_rate);
    }

    #[test]
    fn overflowing_counter_leaves_totals_untouched() {
        let mut totals = StatLine {
            kills: i64::MAX,
            deaths: 3,
            ..Default::default()
        };
        let before = totals.clone();
        let latest = StatLine {
            kills: 1,
            deaths: 1,
            ..Default::default()
        };

        assert_eq!(
            Err(CounterOverflow { stat: "kills" }),
            totals.merge(&latest)
        );
        assert_eq!(before, totals);
    }

    #[test]
    fn overflowing_behaviour_counter() {
        let mut totals = Behaviour {
            clutch_wins: Some(i64::MAX),
            entry_kills: Some(1),
            ..Default::default()
        };
        let latest = Behaviour {
            clutch_wins: Some(1),
            entry_kills: Some(1),
            ..Default::default()
        };

        assert_eq!(
            Err(CounterOverflow { stat: "clutch_wins" }),
            totals.merge(&latest)
        );
        assert_eq!(Some(1), totals.entry_kills);
    }

    #[test]
    fn kd_ratio_without_deaths() {
        assert_eq!(None, kd_ratio(0, 0));
        assert_eq!(None, kd_ratio(25, 0));
        assert_eq!(Some(2.0), kd_ratio(20, 10));
    }

    #[test]
    fn catalogue_matches_struct() {
        assert_eq!(41, BEHAVIOUR_STATS.len());
        assert_eq!(BEHAVIOUR_STATS.len(), Behaviour::default().tracked().len());
        assert!(Behaviour::zeroed().tracked().into_iter().all(|t| t));
    }
}
