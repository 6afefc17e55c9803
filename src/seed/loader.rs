use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};

use super::{Dataset, GameLinks, KeyIndex, SeedSummary};
use crate::db::PlatformTable;
use crate::error::CatalogError;

/// Empties the catalog and writes `dataset` into it.
///
/// Everything runs in one transaction: either the whole dataset is seeded or
/// the tables keep their previous contents. Identity columns restart at 1,
/// so repeated runs over the same dataset produce the same ids.
pub async fn seed_database(
    pool: &PgPool,
    dataset: &Dataset,
    platforms: PlatformTable,
) -> Result<SeedSummary, CatalogError> {
    let mut tx = pool.begin().await.map_err(CatalogError::Connect)?;

    match seed(&mut *tx, dataset, platforms).await {
        Ok(summary) => {
            tx.commit()
                .await
                .map_err(|e| CatalogError::statement("committing seed", "COMMIT", e))?;
            info!("Seeded {}", summary);
            Ok(summary)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                warn!("Rollback failed: {}", rollback);
            }
            Err(e)
        }
    }
}

async fn seed(conn: &mut PgConnection, dataset: &Dataset, platforms: PlatformTable) -> Result<SeedSummary, CatalogError> {
    clear_tables(conn, platforms).await?;
    restart_identities(conn, platforms).await?;

    let developers = insert_developers(conn, dataset).await?;
    let games = insert_games(conn, dataset, &developers).await?;
    let genres = insert_labels(conn, "genres", &dataset.genres).await?;
    let platform_ids = insert_labels(conn, platforms.table(), &dataset.platforms).await?;

    let game_genres = insert_links(conn, "games_genres", "genres_id", &dataset.game_genres, &games, &genres).await?;
    let game_platforms = insert_links(
        conn,
        platforms.join_table(),
        platforms.join_column(),
        &dataset.game_platforms,
        &games,
        &platform_ids,
    )
    .await?;

    Ok(SeedSummary {
        developers: developers.len(),
        games: games.len(),
        genres: genres.len(),
        platforms: platform_ids.len(),
        game_genres,
        game_platforms,
    })
}

async fn execute(conn: &mut PgConnection, context: &str, statement: &str) -> Result<(), CatalogError> {
    debug!("Executing: {}", statement);
    sqlx::query(statement)
        .execute(&mut *conn)
        .await
        .map_err(|e| CatalogError::statement(context, statement, e))?;
    Ok(())
}

// Children before parents, so no cascade is needed.
async fn clear_tables(conn: &mut PgConnection, platforms: PlatformTable) -> Result<(), CatalogError> {
    let order = [
        platforms.join_table(),
        "games_genres",
        "games",
        "genres",
        platforms.table(),
        "developers",
    ];

    for table in order {
        execute(conn, &format!("clearing {}", table), &format!("DELETE FROM {}", table)).await?;
    }
    info!("Cleared {}", order.join(", "));
    Ok(())
}

async fn restart_identities(conn: &mut PgConnection, platforms: PlatformTable) -> Result<(), CatalogError> {
    for table in ["games", "developers", "genres", platforms.table()] {
        execute(
            conn,
            &format!("restarting {} ids", table),
            &format!("ALTER TABLE {} ALTER COLUMN id RESTART WITH 1", table),
        )
        .await?;
    }
    Ok(())
}

async fn insert_developers(conn: &mut PgConnection, dataset: &Dataset) -> Result<KeyIndex, CatalogError> {
    const SQL: &str =
        "INSERT INTO developers (name, description, followers, founding_date) VALUES ($1, $2, $3, $4) RETURNING id";

    let mut index = KeyIndex::new("developers");
    for dev in &dataset.developers {
        let id: i32 = sqlx::query_scalar(SQL)
            .bind(&dev.name)
            .bind(&dev.description)
            .bind(dev.followers)
            .bind(dev.founding_date)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| CatalogError::statement(format!("inserting developer {:?}", dev.name), SQL, e))?;
        index.insert(dev.name.as_str(), id);
    }
    info!("Inserted {} developers", index.len());
    Ok(index)
}

async fn insert_games(
    conn: &mut PgConnection,
    dataset: &Dataset,
    developers: &KeyIndex,
) -> Result<KeyIndex, CatalogError> {
    const SQL: &str =
        "INSERT INTO games (title, description, rating, price, developer_id) VALUES ($1, $2, $3, $4, $5) RETURNING id";

    let mut index = KeyIndex::new("games");
    for game in &dataset.games {
        let developer_id = developers.resolve(&game.developer_name)?;
        let id: i32 = sqlx::query_scalar(SQL)
            .bind(&game.title)
            .bind(&game.description)
            .bind(game.rating)
            .bind(game.price)
            .bind(developer_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| CatalogError::statement(format!("inserting game {:?}", game.title), SQL, e))?;
        index.insert(game.title.as_str(), id);
    }
    info!("Inserted {} games", index.len());
    Ok(index)
}

async fn insert_labels(conn: &mut PgConnection, table: &'static str, labels: &[String]) -> Result<KeyIndex, CatalogError> {
    let sql = format!("INSERT INTO {} (type) VALUES ($1) RETURNING id", table);

    let mut index = KeyIndex::new(table);
    for label in labels {
        let id: i32 = sqlx::query_scalar(&sql)
            .bind(label)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| CatalogError::statement(format!("inserting {} {:?}", table, label), sql.as_str(), e))?;
        index.insert(label.as_str(), id);
    }
    info!("Inserted {} {}", index.len(), table);
    Ok(index)
}

async fn insert_links(
    conn: &mut PgConnection,
    join_table: &str,
    label_column: &str,
    mappings: &[GameLinks],
    games: &KeyIndex,
    labels: &KeyIndex,
) -> Result<usize, CatalogError> {
    let sql = format!("INSERT INTO {} (game_id, {}) VALUES ($1, $2)", join_table, label_column);

    let mut inserted = 0;
    for mapping in mappings {
        let game_id = games.resolve(&mapping.game)?;
        for label in &mapping.labels {
            let label_id = labels.resolve(label)?;
            sqlx::query(&sql)
                .bind(game_id)
                .bind(label_id)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    CatalogError::statement(format!("linking {:?} to {:?}", mapping.game, label), sql.as_str(), e)
                })?;
            inserted += 1;
        }
    }
    info!("Inserted {} {} rows", inserted, join_table);
    Ok(inserted)
}
