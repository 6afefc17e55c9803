mod dataset;
mod index;
mod loader;

use std::fmt;

use serde::Serialize;

pub use dataset::{Dataset, DeveloperRecord, GameLinks, GameRecord};
pub use index::KeyIndex;
pub use loader::seed_database;

/// Row counts per catalog table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub developers: usize,
    pub games: usize,
    pub genres: usize,
    pub platforms: usize,
    pub game_genres: usize,
    pub game_platforms: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} developers, {} games, {} genres, {} platforms, {} game genres, {} game platforms",
            self.developers, self.games, self.genres, self.platforms, self.game_genres, self.game_platforms
        )
    }
}
