use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Developer {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub followers: Option<i32>,
    pub founding_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Game {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub rating: Option<Decimal>,
    pub price: Option<Decimal>,
    pub release_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub developer_id: i32,
}

/// A game together with its resolved developer and association labels.
#[derive(Debug, Clone, Serialize)]
pub struct GameProfile {
    pub game: Game,
    pub developer: Developer,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
}
