use sqlx::{query, query_as, query_scalar, SqlitePool};

use crate::db::models::{BlipRecord, NewBlip};

/// Retrieves all blip records, oldest first so radar colors stay stable as
/// new blips arrive.
pub async fn get_blips(pool: &SqlitePool) -> Result<Vec<BlipRecord>, sqlx::Error> {
    let blips = query_as::<_, BlipRecord>(
        "SELECT id, name, sector, ring, description, created FROM blip ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(blips)
}

pub async fn count_blips(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM blip")
        .fetch_one(pool)
        .await
}

pub async fn count_blips_by_sector(
    pool: &SqlitePool,
) -> Result<Vec<(String, i64)>, sqlx::Error> {
    let rows = query_as::<_, (String, i64)>(
        "SELECT sector, COUNT(*) FROM blip WHERE sector IS NOT NULL GROUP BY sector",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn count_blips_by_ring(pool: &SqlitePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    let rows = query_as::<_, (String, i64)>(
        "SELECT ring, COUNT(*) FROM blip WHERE ring IS NOT NULL GROUP BY ring",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Checks if a blip already exists by name
pub async fn blip_exists_by_name(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let exists: i64 = query_scalar("SELECT EXISTS(SELECT 1 FROM blip WHERE name = ?)")
        .bind(name)
        .fetch_one(pool)
        .await?;

    Ok(exists != 0)
}

/// Inserts a new blip record into the database
pub async fn insert_new_blip(pool: &SqlitePool, blip: &NewBlip) -> Result<(), sqlx::Error> {
    query("INSERT INTO blip (name, sector, ring, description, created) VALUES (?, ?, ?, ?, ?)")
        .bind(&blip.name)
        .bind(&blip.sector)
        .bind(&blip.ring)
        .bind(&blip.description)
        .bind(&blip.created)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> Result<SqlitePool, sqlx::Error> {
        // Use an in-memory database for testing
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect("sqlite::memory:")
            .await?;

        crate::db::migrations::setup_database(&pool).await?;

        query(
            "INSERT INTO blip (name, sector, ring, description, created)
             VALUES ('Rust', 'languages', 'adopt', 'Systems programming', '2026-08-01'),
                    ('Jenkins', 'tools', 'hold', 'Legacy CI', '2026-08-02')",
        )
        .execute(&pool)
        .await?;

        Ok(pool)
    }

    #[tokio::test]
    async fn test_get_blips_oldest_first() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let blips = get_blips(&pool).await?;
        assert_eq!(blips.len(), 2);
        assert_eq!(blips[0].name, "Rust");
        assert_eq!(blips[0].sector, Some("languages".to_string()));
        assert_eq!(blips[1].name, "Jenkins");

        Ok(())
    }

    #[tokio::test]
    async fn test_counts_by_sector_and_ring() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        assert_eq!(count_blips(&pool).await?, 2);

        let by_sector = count_blips_by_sector(&pool).await?;
        assert!(by_sector.contains(&("languages".to_string(), 1)));
        assert!(by_sector.contains(&("tools".to_string(), 1)));

        let by_ring = count_blips_by_ring(&pool).await?;
        assert!(by_ring.contains(&("adopt".to_string(), 1)));
        assert!(by_ring.contains(&("hold".to_string(), 1)));

        Ok(())
    }

    #[tokio::test]
    async fn test_insert_and_exists() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        assert!(!blip_exists_by_name(&pool, "Terraform").await?);

        let blip = NewBlip {
            name: "Terraform".to_string(),
            sector: "tools".to_string(),
            ring: "adopt".to_string(),
            description: "Infrastructure as code".to_string(),
            created: "2026-08-05".to_string(),
        };
        insert_new_blip(&pool, &blip).await?;

        assert!(blip_exists_by_name(&pool, "Terraform").await?);
        assert_eq!(count_blips(&pool).await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_demo_blips_only_fills_empty_tables()
    -> Result<(), Box<dyn std::error::Error>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect("sqlite::memory:")
            .await?;
        crate::db::migrations::setup_database(&pool).await?;

        crate::db::migrations::seed_demo_blips(&pool).await?;
        let seeded = count_blips(&pool).await?;
        assert!(seeded > 0);

        // A second seeding pass must not duplicate anything.
        crate::db::migrations::seed_demo_blips(&pool).await?;
        assert_eq!(count_blips(&pool).await?, seeded);

        Ok(())
    }
}
