use serde::Deserialize;

/// A game platform, e.g. `{"id": "o1y9wo6q", "name": "GameCube"}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Platform {
    pub id: String,
    pub name: String,
}

/// A game genre
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameNames {
    pub international: String,
}

/// A game as listed in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Game {
    pub id: String,
    pub names: GameNames,

    /// Genre ids; `None` when the record carries no genre information at all
    #[serde(default)]
    pub genres: Option<Vec<String>>,

    /// Platform ids
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl Game {
    /// International display name
    pub fn name(&self) -> &str {
        &self.names.international
    }
}

/// A leaderboard category of a game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A category leaderboard, fastest run first
#[derive(Debug, Clone, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub runs: Vec<RankedRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankedRun {
    pub run: Run,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub times: RunTimes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunTimes {
    /// Primary timing in seconds
    pub primary_t: f64,
}

impl Leaderboard {
    /// Primary time of the top run, if any run exists
    pub fn record_seconds(&self) -> Option<f64> {
        self.runs.first().map(|ranked| ranked.run.times.primary_t)
    }
}
