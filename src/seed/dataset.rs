//! The rows the seed loader writes, kept apart from the code that writes them.
//!
//! [`Dataset::builtin`] is the demo catalog. Alternate catalogs can be loaded
//! from YAML with the same shape.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SeedSummary;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub followers: i32,
    pub founding_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub title: String,
    pub description: String,
    pub rating: Decimal,
    pub price: Decimal,
    /// Natural key of the owning developer.
    pub developer_name: String,
}

/// One game's list of genre or platform labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLinks {
    pub game: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub developers: Vec<DeveloperRecord>,
    pub games: Vec<GameRecord>,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    #[serde(default)]
    pub game_genres: Vec<GameLinks>,
    #[serde(default)]
    pub game_platforms: Vec<GameLinks>,
}

fn developer(name: &str, description: &str, followers: i32, founded: (i32, u32, u32)) -> DeveloperRecord {
    DeveloperRecord {
        name: name.to_string(),
        description: description.to_string(),
        followers,
        founding_date: NaiveDate::from_ymd_opt(founded.0, founded.1, founded.2).expect("valid calendar date"),
    }
}

fn game(title: &str, description: &str, rating: i64, price: i64, developer_name: &str) -> GameRecord {
    GameRecord {
        title: title.to_string(),
        description: description.to_string(),
        rating: Decimal::new(rating, 1),
        price: Decimal::new(price, 2),
        developer_name: developer_name.to_string(),
    }
}

fn links(game: &str, labels: &[&str]) -> GameLinks {
    GameLinks {
        game: game.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}

const ZELDA: &str = "The Legend of Zelda: Breath of the Wild";
const HALF_LIFE: &str = "Half-Life 2";
const WITCHER: &str = "The Witcher 3: Wild Hunt";
const GTA: &str = "Grand Theft Auto V";
const ELDEN_RING: &str = "Elden Ring";
const PORTAL: &str = "Portal 2";
const MARIO: &str = "Super Mario Odyssey";
const CYBERPUNK: &str = "Cyberpunk 2077";

const CURRENT_GEN: &[&str] = &["PC", "PlayStation 5", "PlayStation 4", "Xbox Series X/S", "Xbox One"];

impl Dataset {
    /// The demo catalog: five studios, eight games and their genre and
    /// platform associations.
    pub fn builtin() -> Self {
        let developers = vec![
            developer(
                "Nintendo",
                "Japanese multinational video game company known for iconic franchises like Mario, Zelda, and Pokémon.",
                15_000_000,
                (1889, 9, 23),
            ),
            developer(
                "Valve Corporation",
                "American video game developer and digital distribution company, creators of Steam platform and Half-Life series.",
                8_500_000,
                (1996, 8, 24),
            ),
            developer(
                "CD Projekt RED",
                "Polish video game developer known for The Witcher series and Cyberpunk 2077.",
                3_200_000,
                (2002, 1, 1),
            ),
            developer(
                "Rockstar Games",
                "American video game publisher known for Grand Theft Auto and Red Dead Redemption series.",
                12_000_000,
                (1998, 12, 1),
            ),
            developer(
                "FromSoftware",
                "Japanese video game development company known for challenging action RPGs like Dark Souls and Elden Ring.",
                2_800_000,
                (1986, 11, 1),
            ),
        ];

        let games = vec![
            game(
                ZELDA,
                "An open-world action-adventure game that revolutionized the Zelda formula with complete freedom of exploration.",
                49,
                5999,
                "Nintendo",
            ),
            game(
                HALF_LIFE,
                "A groundbreaking first-person shooter that set new standards for physics-based gameplay and storytelling.",
                48,
                999,
                "Valve Corporation",
            ),
            game(
                WITCHER,
                "An epic open-world RPG following Geralt of Rivia on his quest to find his adopted daughter.",
                47,
                3999,
                "CD Projekt RED",
            ),
            game(
                GTA,
                "An open-world crime action-adventure game set in the fictional city of Los Santos.",
                45,
                2999,
                "Rockstar Games",
            ),
            game(
                ELDEN_RING,
                "A fantasy action RPG developed in collaboration with George R.R. Martin, featuring an open world.",
                46,
                5999,
                "FromSoftware",
            ),
            game(
                PORTAL,
                "A puzzle-platform game featuring innovative portal mechanics and cooperative gameplay.",
                49,
                1999,
                "Valve Corporation",
            ),
            game(
                MARIO,
                "A 3D platform game featuring Mario's cap-throwing abilities across various kingdoms.",
                48,
                4999,
                "Nintendo",
            ),
            game(
                CYBERPUNK,
                "A futuristic open-world RPG set in Night City with cybernetic enhancements and multiple storylines.",
                38,
                2999,
                "CD Projekt RED",
            ),
        ];

        let genres = [
            "Action",
            "Adventure",
            "RPG",
            "Shooter",
            "Platform",
            "Puzzle",
            "Open World",
            "Simulation",
            "Strategy",
            "Racing",
            "Fighting",
            "Horror",
        ];

        let platforms = [
            "PC",
            "PlayStation 5",
            "PlayStation 4",
            "Xbox Series X/S",
            "Xbox One",
            "Nintendo Switch",
            "iOS",
            "Android",
            "Steam Deck",
            "VR",
        ];

        let game_genres = vec![
            links(ZELDA, &["Action", "Adventure", "Open World"]),
            links(HALF_LIFE, &["Action", "Shooter", "Adventure"]),
            links(WITCHER, &["RPG", "Action", "Open World"]),
            links(GTA, &["Action", "Adventure", "Open World"]),
            links(ELDEN_RING, &["RPG", "Action", "Adventure"]),
            links(PORTAL, &["Puzzle", "Adventure", "Platform"]),
            links(MARIO, &["Platform", "Adventure", "Action"]),
            links(CYBERPUNK, &["RPG", "Action", "Open World"]),
        ];

        let game_platforms = vec![
            links(ZELDA, &["Nintendo Switch"]),
            links(HALF_LIFE, &["PC", "PlayStation 4", "Xbox One"]),
            links(
                WITCHER,
                &["PC", "PlayStation 5", "PlayStation 4", "Xbox Series X/S", "Xbox One", "Nintendo Switch"],
            ),
            links(GTA, CURRENT_GEN),
            links(ELDEN_RING, CURRENT_GEN),
            links(PORTAL, &["PC", "PlayStation 4", "Xbox One", "Steam Deck"]),
            links(MARIO, &["Nintendo Switch"]),
            links(CYBERPUNK, CURRENT_GEN),
        ];

        Dataset {
            developers,
            games,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            game_genres,
            game_platforms,
        }
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Dataset(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&text).map_err(|e| match e {
            CatalogError::Dataset(msg) => CatalogError::Dataset(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(text).map_err(|e| CatalogError::Dataset(e.to_string()))
    }

    /// Row counts a successful seed of this dataset leaves behind.
    pub fn expected_summary(&self) -> SeedSummary {
        SeedSummary {
            developers: self.developers.len(),
            games: self.games.len(),
            genres: self.genres.len(),
            platforms: self.platforms.len(),
            game_genres: self.game_genres.iter().map(|l| l.labels.len()).sum(),
            game_platforms: self.game_platforms.iter().map(|l| l.labels.len()).sum(),
        }
    }

    /// Checks the dataset against the table constraints before any statement
    /// is sent. Reports every problem found, not just the first.
    pub fn validate(&self, today: NaiveDate) -> Result<(), CatalogError> {
        let mut problems = Vec::new();

        let developers = unique_keys("developer", self.developers.iter().map(|d| d.name.as_str()), &mut problems);
        let games = unique_keys("game", self.games.iter().map(|g| g.title.as_str()), &mut problems);
        let genres = unique_keys("genre", self.genres.iter().map(String::as_str), &mut problems);
        let platforms = unique_keys("platform", self.platforms.iter().map(String::as_str), &mut problems);

        for dev in &self.developers {
            if dev.followers < 0 {
                problems.push(format!("developer {:?} has negative followers ({})", dev.name, dev.followers));
            }
            if dev.founding_date > today {
                problems.push(format!(
                    "developer {:?} has a founding date in the future ({})",
                    dev.name, dev.founding_date
                ));
            }
        }

        let max_rating = Decimal::new(5, 0);
        for g in &self.games {
            if !developers.contains(g.developer_name.as_str()) {
                problems.push(format!("game {:?} references unknown developer {:?}", g.title, g.developer_name));
            }
            if g.rating < Decimal::ZERO || g.rating > max_rating {
                problems.push(format!("game {:?} has rating {} outside [0, 5]", g.title, g.rating));
            }
        }

        check_links("genre", &self.game_genres, &games, &genres, &mut problems);
        check_links("platform", &self.game_platforms, &games, &platforms, &mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::InvalidDataset(problems))
        }
    }
}

fn unique_keys<'a>(
    kind: &str,
    keys: impl Iterator<Item = &'a str>,
    problems: &mut Vec<String>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.trim().is_empty() {
            problems.push(format!("{} with an empty name", kind));
        }
        if !seen.insert(key) {
            problems.push(format!("duplicate {} {:?}", kind, key));
        }
    }
    seen
}

fn check_links(
    kind: &str,
    mappings: &[GameLinks],
    games: &HashSet<&str>,
    labels: &HashSet<&str>,
    problems: &mut Vec<String>,
) {
    let mut pairs = HashSet::new();
    for mapping in mappings {
        if !games.contains(mapping.game.as_str()) {
            problems.push(format!("{} mapping references unknown game {:?}", kind, mapping.game));
        }
        for label in &mapping.labels {
            if !labels.contains(label.as_str()) {
                problems.push(format!("game {:?} references unknown {} {:?}", mapping.game, kind, label));
            }
            if !pairs.insert((mapping.game.as_str(), label.as_str())) {
                problems.push(format!("game {:?} lists {} {:?} twice", mapping.game, kind, label));
            }
        }
    }
}
