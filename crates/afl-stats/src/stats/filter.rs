// Game and opponent filtering over a cleaned stats table.

use crate::stats::record::PlayerStat;
use serde::Deserialize;

/// Optional predicates narrowing a table to one game and/or one opponent.
/// Empty strings are treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameFilter {
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub opponent: Option<String>,
}

impl GameFilter {
    pub fn game(game_id: impl Into<String>) -> Self {
        Self {
            game_id: Some(game_id.into()),
            opponent: None,
        }
    }

    pub fn opponent(team: impl Into<String>) -> Self {
        Self {
            game_id: None,
            opponent: Some(team.into()),
        }
    }

    pub fn with_opponent(mut self, team: impl Into<String>) -> Self {
        self.opponent = Some(team.into());
        self
    }

    fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref().filter(|g| !g.is_empty())
    }

    fn opponent_team(&self) -> Option<&str> {
        self.opponent.as_deref().filter(|o| !o.is_empty())
    }

    /// True when neither predicate is set.
    pub fn is_empty(&self) -> bool {
        self.game_id().is_none() && self.opponent_team().is_none()
    }

    pub fn matches(&self, stat: &PlayerStat) -> bool {
        if let Some(game_id) = self.game_id() {
            if stat.provider_id.as_deref() != Some(game_id) {
                return false;
            }
        }
        if let Some(opponent) = self.opponent_team() {
            if !stat.involves_team(opponent) {
                return false;
            }
        }
        true
    }
}

/// Rows matching `filter`, in table order.
pub fn filter_by_game<'a>(records: &'a [PlayerStat], filter: &GameFilter) -> Vec<&'a PlayerStat> {
    records.iter().filter(|stat| filter.matches(stat)).collect()
}

/// Rows for one named player (given name + surname) in one game.
pub fn player_game_rows<'a>(
    records: &'a [PlayerStat],
    game_id: &str,
    player_name: &str,
) -> Vec<&'a PlayerStat> {
    records
        .iter()
        .filter(|stat| {
            stat.provider_id.as_deref() == Some(game_id) && stat.player_name() == player_name
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
