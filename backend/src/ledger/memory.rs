//! In-memory ledger for exercising the pipeline without a database.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use stats::badges::{Badge, BadgeCategory};
use stats::StatLine;

use super::{ClaimedDemo, DemoStatus, Ledger, Player, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDemo {
    pub id: i64,
    pub file_path: PathBuf,
    pub status: DemoStatus,
    pub processed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredBadge {
    pub player_id: i64,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredMatch {
    pub demo_id: i64,
    pub player_id: i64,
    pub stats: StatLine,
}

#[derive(Debug, Default)]
pub struct State {
    pub demos: Vec<StoredDemo>,
    pub players: Vec<Player>,
    pub badges: Vec<StoredBadge>,
    pub history: Vec<StoredMatch>,
    pub heatmaps: Vec<(i64, String, String)>,
    /// Player names whose history insert fails.
    pub failing_history: HashSet<String>,
    /// Player names whose stat merge fails.
    pub failing_merges: HashSet<String>,
    /// Number of upcoming name lookups that pretend the player is missing.
    pub stale_lookups: usize,
    claimed: HashSet<i64>,
}

impl State {
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn badges_of(&self, player_id: i64, category: BadgeCategory) -> Vec<&'static str> {
        self.badges
            .iter()
            .filter(|b| b.player_id == player_id && b.badge.category == category)
            .map(|b| b.badge.name)
            .collect()
    }

    pub fn demo(&self, id: i64) -> Option<&StoredDemo> {
        self.demos.iter().find(|d| d.id == id)
    }

    fn player_name(&self, player_id: i64) -> Option<String> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.name.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<Mutex<State>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }

    pub fn enqueue(&self, path: impl Into<PathBuf>) -> i64 {
        let mut state = self.state();
        let id = state.demos.len() as i64 + 1;
        state.demos.push(StoredDemo {
            id,
            file_path: path.into(),
            status: DemoStatus::Pending,
            processed: false,
        });
        id
    }

    pub fn reset_demo(&self, id: i64) {
        let mut state = self.state();
        if let Some(demo) = state.demos.iter_mut().find(|d| d.id == id) {
            demo.status = DemoStatus::Pending;
            demo.processed = false;
        }
    }

    /// A ledger session. Its claim is released when the session is dropped,
    /// the way a transaction releases its row lock.
    pub fn session(&self) -> MemoryLedger {
        MemoryLedger {
            store: self.clone(),
            claim: None,
        }
    }
}

pub struct MemoryLedger {
    store: MemoryStore,
    claim: Option<i64>,
}

impl Drop for MemoryLedger {
    fn drop(&mut self) {
        if let Some(id) = self.claim.take() {
            if let Ok(mut state) = self.store.0.lock() {
                state.claimed.remove(&id);
            }
        }
    }
}

fn injected(what: &str) -> StoreError {
    StoreError::Corrupt(format!("injected {} failure", what))
}

#[async_trait::async_trait]
impl Ledger for MemoryLedger {
    async fn claim_next_demo(&mut self) -> Result<Option<ClaimedDemo>, StoreError> {
        let mut state = self.store.state();

        let next = state
            .demos
            .iter()
            .filter(|d| d.status == DemoStatus::Pending && !state.claimed.contains(&d.id))
            .min_by_key(|d| d.id)
            .map(|d| ClaimedDemo {
                id: d.id,
                file_path: d.file_path.clone(),
            });

        if let Some(demo) = next.as_ref() {
            state.claimed.insert(demo.id);
            self.claim = Some(demo.id);
        }

        Ok(next)
    }

    async fn finish_demo(&mut self, demo_id: i64, status: DemoStatus) -> Result<(), StoreError> {
        let mut state = self.store.state();
        let demo = state
            .demos
            .iter_mut()
            .find(|d| d.id == demo_id)
            .filter(|d| d.status == DemoStatus::Pending && status != DemoStatus::Pending)
            .ok_or(StoreError::InvalidTransition(demo_id))?;

        demo.status = status;
        demo.processed = true;
        Ok(())
    }

    async fn find_player_by_name(&mut self, name: &str) -> Result<Option<Player>, StoreError> {
        let mut state = self.store.state();
        if state.stale_lookups > 0 {
            state.stale_lookups -= 1;
            return Ok(None);
        }

        Ok(state.player(name).cloned())
    }

    async fn create_player(
        &mut self,
        name: &str,
        steam_id: Option<&str>,
    ) -> Result<Player, StoreError> {
        let mut state = self.store.state();
        if state.player(name).is_some() {
            return Err(StoreError::DuplicatePlayer(name.to_owned()));
        }

        let player = Player {
            id: state.players.len() as i64 + 1,
            name: name.to_owned(),
            steam_id: steam_id.map(str::to_owned),
            totals: StatLine::default(),
            rating: stats::rating::INITIAL_RATING,
        };
        state.players.push(player.clone());
        Ok(player)
    }

    async fn merge_stats(&mut self, player_id: i64, stats: &StatLine) -> Result<Player, StoreError> {
        let mut state = self.store.state();
        if let Some(name) = state.player_name(player_id) {
            if state.failing_merges.contains(&name) {
                return Err(injected("merge"));
            }
        }

        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(StoreError::UnknownPlayer(player_id))?;
        player.totals.merge(stats)?;
        Ok(player.clone())
    }

    async fn update_rating(&mut self, player_id: i64, rating: f64) -> Result<(), StoreError> {
        let mut state = self.store.state();
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(StoreError::UnknownPlayer(player_id))?;
        player.rating = rating;
        Ok(())
    }

    async fn replace_badges(
        &mut self,
        player_id: i64,
        category: BadgeCategory,
        badges: &[Badge],
    ) -> Result<(), StoreError> {
        let mut state = self.store.state();
        state
            .badges
            .retain(|b| !(b.player_id == player_id && b.badge.category == category));
        state
            .badges
            .extend(badges.iter().map(|badge| StoredBadge {
                player_id,
                badge: *badge,
            }));
        Ok(())
    }

    async fn record_match(
        &mut self,
        demo_id: i64,
        player_id: i64,
        stats: &StatLine,
    ) -> Result<(), StoreError> {
        let mut state = self.store.state();
        if let Some(name) = state.player_name(player_id) {
            if state.failing_history.contains(&name) {
                return Err(injected("history"));
            }
        }

        state.history.push(StoredMatch {
            demo_id,
            player_id,
            stats: stats.clone(),
        });
        Ok(())
    }

    async fn record_heatmap(
        &mut self,
        player_id: i64,
        map_name: &str,
        image_path: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.store.state();
        state
            .heatmaps
            .retain(|(id, map, _)| !(*id == player_id && map == map_name));
        state
            .heatmaps
            .push((player_id, map_name.to_owned(), image_path.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::resolve_player;

    #[tokio::test]
    async fn claim_is_exclusive_until_released() {
        let store = MemoryStore::new();
        let first = store.enqueue("/demos/a.dem");
        let second = store.enqueue("/demos/b.dem");

        let mut a = store.session();
        let mut b = store.session();

        assert_eq!(first, a.claim_next_demo().await.unwrap().unwrap().id);
        assert_eq!(second, b.claim_next_demo().await.unwrap().unwrap().id);

        drop(b);
        let mut c = store.session();
        assert_eq!(second, c.claim_next_demo().await.unwrap().unwrap().id);
        assert_eq!(None, store.session().claim_next_demo().await.unwrap());
    }

    #[tokio::test]
    async fn finished_demo_cannot_transition_again() {
        let store = MemoryStore::new();
        let id = store.enqueue("/demos/a.dem");
        let mut ledger = store.session();

        ledger.finish_demo(id, DemoStatus::Failed).await.unwrap();

        assert!(matches!(
            ledger.finish_demo(id, DemoStatus::Processed).await,
            Err(StoreError::InvalidTransition(_))
        ));
        assert_eq!(DemoStatus::Failed, store.state().demo(id).unwrap().status);
    }

    #[tokio::test]
    async fn resolve_falls_back_to_lookup_after_losing_race() {
        let store = MemoryStore::new();
        let mut ledger = store.session();
        let existing = ledger.create_player("Excel", None).await.unwrap();

        store.state().stale_lookups = 1;
        let resolved = resolve_player(&mut ledger, "Excel", Some("1")).await.unwrap();

        assert_eq!(existing.id, resolved.id);
        assert_eq!(1, store.state().players.len());
    }
}
