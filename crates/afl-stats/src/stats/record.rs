// Player stat records and the fixed column schema of the AFL stats export.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder written into text fields that were blank in the source.
pub const UNKNOWN: &str = "Unknown";

/// Columns every source file must carry, in output order. A filtered table is
/// written with exactly these columns.
pub const RELEVANT_COLUMNS: [&str; 25] = [
    "providerId",
    "utcStartTime",
    "team.name",
    "home.team.name",
    "away.team.name",
    "player.givenName",
    "player.surname",
    "goals",
    "behinds",
    "goalAccuracy",
    "goalAssists",
    "disposals",
    "kicks",
    "handballs",
    "contestedPossessions",
    "uncontestedPossessions",
    "totalPossessions",
    "tackles",
    "intercepts",
    "rebound50s",
    "disposalEfficiency",
    "clangers",
    "metresGained",
    "scoreInvolvements",
    "bounces",
];

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Identifying string columns of a stat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    ProviderId,
    UtcStartTime,
    TeamName,
    HomeTeamName,
    AwayTeamName,
    GivenName,
    Surname,
}

impl TextField {
    pub const ALL: [TextField; 7] = [
        TextField::ProviderId,
        TextField::UtcStartTime,
        TextField::TeamName,
        TextField::HomeTeamName,
        TextField::AwayTeamName,
        TextField::GivenName,
        TextField::Surname,
    ];

    /// Source column name (case-sensitive, dotted).
    pub fn column(self) -> &'static str {
        match self {
            TextField::ProviderId => "providerId",
            TextField::UtcStartTime => "utcStartTime",
            TextField::TeamName => "team.name",
            TextField::HomeTeamName => "home.team.name",
            TextField::AwayTeamName => "away.team.name",
            TextField::GivenName => "player.givenName",
            TextField::Surname => "player.surname",
        }
    }

    /// Look up a text field by its exact column name.
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Numeric performance columns of a stat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Goals,
    Behinds,
    GoalAccuracy,
    GoalAssists,
    Disposals,
    Kicks,
    Handballs,
    ContestedPossessions,
    UncontestedPossessions,
    TotalPossessions,
    Tackles,
    Intercepts,
    Rebound50s,
    DisposalEfficiency,
    Clangers,
    MetresGained,
    ScoreInvolvements,
    Bounces,
}

impl Metric {
    pub const ALL: [Metric; 18] = [
        Metric::Goals,
        Metric::Behinds,
        Metric::GoalAccuracy,
        Metric::GoalAssists,
        Metric::Disposals,
        Metric::Kicks,
        Metric::Handballs,
        Metric::ContestedPossessions,
        Metric::UncontestedPossessions,
        Metric::TotalPossessions,
        Metric::Tackles,
        Metric::Intercepts,
        Metric::Rebound50s,
        Metric::DisposalEfficiency,
        Metric::Clangers,
        Metric::MetresGained,
        Metric::ScoreInvolvements,
        Metric::Bounces,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Goals => "goals",
            Metric::Behinds => "behinds",
            Metric::GoalAccuracy => "goalAccuracy",
            Metric::GoalAssists => "goalAssists",
            Metric::Disposals => "disposals",
            Metric::Kicks => "kicks",
            Metric::Handballs => "handballs",
            Metric::ContestedPossessions => "contestedPossessions",
            Metric::UncontestedPossessions => "uncontestedPossessions",
            Metric::TotalPossessions => "totalPossessions",
            Metric::Tackles => "tackles",
            Metric::Intercepts => "intercepts",
            Metric::Rebound50s => "rebound50s",
            Metric::DisposalEfficiency => "disposalEfficiency",
            Metric::Clangers => "clangers",
            Metric::MetresGained => "metresGained",
            Metric::ScoreInvolvements => "scoreInvolvements",
            Metric::Bounces => "bounces",
        }
    }

    /// Look up a metric by its exact column name (e.g. "metresGained").
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// PlayerStat
// ---------------------------------------------------------------------------

/// One player's statistics for a single game.
///
/// Every column may be blank in the source export, so all fields are
/// optional until the table has been normalized. Field order matches
/// [`RELEVANT_COLUMNS`], which is also the serialized column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    #[serde(rename = "providerId")]
    pub provider_id: Option<String>,
    #[serde(rename = "utcStartTime")]
    pub utc_start_time: Option<String>,
    #[serde(rename = "team.name")]
    pub team_name: Option<String>,
    #[serde(rename = "home.team.name")]
    pub home_team_name: Option<String>,
    #[serde(rename = "away.team.name")]
    pub away_team_name: Option<String>,
    #[serde(rename = "player.givenName")]
    pub given_name: Option<String>,
    #[serde(rename = "player.surname")]
    pub surname: Option<String>,

    pub goals: Option<f64>,
    pub behinds: Option<f64>,
    #[serde(rename = "goalAccuracy")]
    pub goal_accuracy: Option<f64>,
    #[serde(rename = "goalAssists")]
    pub goal_assists: Option<f64>,
    pub disposals: Option<f64>,
    pub kicks: Option<f64>,
    pub handballs: Option<f64>,
    #[serde(rename = "contestedPossessions")]
    pub contested_possessions: Option<f64>,
    #[serde(rename = "uncontestedPossessions")]
    pub uncontested_possessions: Option<f64>,
    #[serde(rename = "totalPossessions")]
    pub total_possessions: Option<f64>,
    pub tackles: Option<f64>,
    pub intercepts: Option<f64>,
    #[serde(rename = "rebound50s")]
    pub rebound_50s: Option<f64>,
    #[serde(rename = "disposalEfficiency")]
    pub disposal_efficiency: Option<f64>,
    pub clangers: Option<f64>,
    #[serde(rename = "metresGained")]
    pub metres_gained: Option<f64>,
    #[serde(rename = "scoreInvolvements")]
    pub score_involvements: Option<f64>,
    pub bounces: Option<f64>,
}

impl PlayerStat {
    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::ProviderId => self.provider_id.as_deref(),
            TextField::UtcStartTime => self.utc_start_time.as_deref(),
            TextField::TeamName => self.team_name.as_deref(),
            TextField::HomeTeamName => self.home_team_name.as_deref(),
            TextField::AwayTeamName => self.away_team_name.as_deref(),
            TextField::GivenName => self.given_name.as_deref(),
            TextField::Surname => self.surname.as_deref(),
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut Option<String> {
        match field {
            TextField::ProviderId => &mut self.provider_id,
            TextField::UtcStartTime => &mut self.utc_start_time,
            TextField::TeamName => &mut self.team_name,
            TextField::HomeTeamName => &mut self.home_team_name,
            TextField::AwayTeamName => &mut self.away_team_name,
            TextField::GivenName => &mut self.given_name,
            TextField::Surname => &mut self.surname,
        }
    }

    /// Raw value of a metric; `None` when the source cell was blank.
    pub fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Goals => self.goals,
            Metric::Behinds => self.behinds,
            Metric::GoalAccuracy => self.goal_accuracy,
            Metric::GoalAssists => self.goal_assists,
            Metric::Disposals => self.disposals,
            Metric::Kicks => self.kicks,
            Metric::Handballs => self.handballs,
            Metric::ContestedPossessions => self.contested_possessions,
            Metric::UncontestedPossessions => self.uncontested_possessions,
            Metric::TotalPossessions => self.total_possessions,
            Metric::Tackles => self.tackles,
            Metric::Intercepts => self.intercepts,
            Metric::Rebound50s => self.rebound_50s,
            Metric::DisposalEfficiency => self.disposal_efficiency,
            Metric::Clangers => self.clangers,
            Metric::MetresGained => self.metres_gained,
            Metric::ScoreInvolvements => self.score_involvements,
            Metric::Bounces => self.bounces,
        }
    }

    /// Metric value with blanks counted as zero.
    pub fn metric(&self, metric: Metric) -> f64 {
        self.metric_value(metric).unwrap_or(0.0)
    }

    pub fn metric_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::Goals => &mut self.goals,
            Metric::Behinds => &mut self.behinds,
            Metric::GoalAccuracy => &mut self.goal_accuracy,
            Metric::GoalAssists => &mut self.goal_assists,
            Metric::Disposals => &mut self.disposals,
            Metric::Kicks => &mut self.kicks,
            Metric::Handballs => &mut self.handballs,
            Metric::ContestedPossessions => &mut self.contested_possessions,
            Metric::UncontestedPossessions => &mut self.uncontested_possessions,
            Metric::TotalPossessions => &mut self.total_possessions,
            Metric::Tackles => &mut self.tackles,
            Metric::Intercepts => &mut self.intercepts,
            Metric::Rebound50s => &mut self.rebound_50s,
            Metric::DisposalEfficiency => &mut self.disposal_efficiency,
            Metric::Clangers => &mut self.clangers,
            Metric::MetresGained => &mut self.metres_gained,
            Metric::ScoreInvolvements => &mut self.score_involvements,
            Metric::Bounces => &mut self.bounces,
        }
    }

    /// Display name used for grouping: given name and surname joined by a
    /// single space. Blank parts read as [`UNKNOWN`].
    pub fn player_name(&self) -> String {
        format!(
            "{} {}",
            self.given_name.as_deref().unwrap_or(UNKNOWN),
            self.surname.as_deref().unwrap_or(UNKNOWN)
        )
    }

    /// True when this row is `opponent`'s game, home or away.
    pub fn involves_team(&self, opponent: &str) -> bool {
        self.home_team_name.as_deref() == Some(opponent)
            || self.away_team_name.as_deref() == Some(opponent)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
