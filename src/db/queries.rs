use sqlx::PgPool;

use super::models::{Developer, Game, GameProfile};
use super::schema::PlatformTable;
use crate::error::CatalogError;
use crate::seed::SeedSummary;

async fn count(pool: &PgPool, table: &str) -> Result<usize, CatalogError> {
    let statement = format!("SELECT COUNT(*) FROM {}", table);
    let n: i64 = sqlx::query_scalar(&statement)
        .fetch_one(pool)
        .await
        .map_err(|e| CatalogError::statement(format!("counting {}", table), statement.as_str(), e))?;
    Ok(n as usize)
}

pub async fn table_counts(pool: &PgPool, platforms: PlatformTable) -> Result<SeedSummary, CatalogError> {
    Ok(SeedSummary {
        developers: count(pool, "developers").await?,
        games: count(pool, "games").await?,
        genres: count(pool, "genres").await?,
        platforms: count(pool, platforms.table()).await?,
        game_genres: count(pool, "games_genres").await?,
        game_platforms: count(pool, platforms.join_table()).await?,
    })
}

pub async fn fetch_game_profile(
    pool: &PgPool,
    title: &str,
    platforms: PlatformTable,
) -> Result<Option<GameProfile>, CatalogError> {
    let game_sql = "SELECT id, title, description, rating, price, release_date, created_at, updated_at, developer_id
                    FROM games WHERE title = $1";
    let game: Option<Game> = sqlx::query_as(game_sql)
        .bind(title)
        .fetch_optional(pool)
        .await
        .map_err(|e| CatalogError::statement("fetching game", game_sql, e))?;

    let Some(game) = game else {
        return Ok(None);
    };

    let developer_sql = "SELECT id, name, description, followers, founding_date FROM developers WHERE id = $1";
    let developer: Developer = sqlx::query_as(developer_sql)
        .bind(game.developer_id)
        .fetch_one(pool)
        .await
        .map_err(|e| CatalogError::statement("fetching developer", developer_sql, e))?;

    let genres_sql = "SELECT g.type FROM genres g
                      JOIN games_genres gg ON gg.genres_id = g.id
                      WHERE gg.game_id = $1 ORDER BY g.id";
    let genres: Vec<String> = sqlx::query_scalar(genres_sql)
        .bind(game.id)
        .fetch_all(pool)
        .await
        .map_err(|e| CatalogError::statement("fetching genres", genres_sql, e))?;

    let platforms_sql = format!(
        "SELECT p.type FROM {table} p
         JOIN {join} gp ON gp.{column} = p.id
         WHERE gp.game_id = $1 ORDER BY p.id",
        table = platforms.table(),
        join = platforms.join_table(),
        column = platforms.join_column()
    );
    let platform_labels: Vec<String> = sqlx::query_scalar(&platforms_sql)
        .bind(game.id)
        .fetch_all(pool)
        .await
        .map_err(|e| CatalogError::statement("fetching platforms", platforms_sql.as_str(), e))?;

    Ok(Some(GameProfile {
        game,
        developer,
        genres,
        platforms: platform_labels,
    }))
}
