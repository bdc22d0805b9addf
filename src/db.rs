//! Single-row persistence for sensor readings.
//!
//! Every insert opens its own dedicated PostgreSQL connection, writes one row
//! inside an explicit transaction, commits, and closes the connection. There
//! is no pool and no shared state; concurrent requests are isolated from each
//! other and the destination table absorbs independent appends natively.

use sqlx::{Connection, PgConnection};
use tracing::{debug, error};

use crate::config::SchemaVariant;
use crate::{Config, IngestError, Reading};

// ---

/// Insert one reading into its destination table.
///
/// Preconditions are checked before any I/O:
/// - credentials must be non-empty (`IngestError::Configuration`)
/// - the payload's table name must be allow-listed (`IngestError::TableNotAllowed`)
/// - the `offsets` variant requires both offsets present (`IngestError::MissingOffsets`)
///
/// The three core values are stored rounded to two decimal places; offsets
/// are stored verbatim. Failures during connect/prepare/execute/commit are
/// logged and propagated; the uncommitted transaction rolls back on drop.
pub async fn insert_reading(config: &Config, reading: &Reading) -> Result<(), IngestError> {
    // ---
    if !config.credentials_present() {
        return Err(IngestError::Configuration);
    }

    if !config.table_allowed(&reading.name) {
        return Err(IngestError::TableNotAllowed(reading.name.clone()));
    }

    if config.variant == SchemaVariant::Offsets
        && (reading.temperature_f_offset.is_none() || reading.humidity_percentage_offset.is_none())
    {
        return Err(IngestError::MissingOffsets);
    }

    let row = reading.rounded();

    debug!(
        "connecting to {}:{}/{}",
        config.db_host, config.db_port, config.db_name
    );

    let mut conn = PgConnection::connect(&config.connect_url())
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            IngestError::Database(e)
        })?;

    let outcome = execute_insert(&mut conn, &row, config.variant).await;

    // Release the connection on every exit path; an uncommitted transaction
    // rolls back when its handle drops inside `execute_insert`.
    conn.close().await.ok();

    outcome.map_err(|e| {
        error!("Failed to store reading for '{}': {}", reading.name, e);
        IngestError::Database(e)
    })
}

/// Run the parameterized INSERT and commit.
async fn execute_insert(
    conn: &mut PgConnection,
    row: &Reading,
    variant: SchemaVariant,
) -> Result<(), sqlx::Error> {
    // ---
    let sql = insert_sql(&row.name, variant);
    debug!("executing: {}", sql);

    let mut tx = conn.begin().await?;

    let query = sqlx::query(&sql);
    let query = match variant {
        SchemaVariant::Base => query
            .bind(row.temperature_f)
            .bind(row.humidity_percentage)
            .bind(row.heat_index_f),
        SchemaVariant::Offsets => query
            .bind(row.temperature_f)
            .bind(row.temperature_f_offset)
            .bind(row.humidity_percentage)
            .bind(row.humidity_percentage_offset)
            .bind(row.heat_index_f),
    };
    query.execute(&mut *tx).await?;

    tx.commit().await?;
    Ok(())
}

/// INSERT statement for the active column set.
///
/// The table identifier cannot be bound as a parameter; callers must have
/// validated it against the allow-list before this runs. All values are
/// bound, never interpolated.
fn insert_sql(table: &str, variant: SchemaVariant) -> String {
    // ---
    match variant {
        SchemaVariant::Base => format!(
            "INSERT INTO {} (temperature_f, humidity_percentage, heat_index_f) \
             VALUES ($1, $2, $3)",
            table
        ),
        SchemaVariant::Offsets => format!(
            "INSERT INTO {} (temperature_f, temperature_f_offset, humidity_percentage, \
             humidity_percentage_offset, heat_index_f) \
             VALUES ($1, $2, $3, $4, $5)",
            table
        ),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_config() -> Config {
        // ---
        Config {
            db_user: "sensor_writer".to_string(),
            db_password: "secret".to_string(),
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_name: "environmental_sensors".to_string(),
            allowed_tables: vec!["environmental_sensor_data".to_string()],
            variant: SchemaVariant::Base,
        }
    }

    fn create_test_reading() -> Reading {
        // ---
        Reading {
            name: "environmental_sensor_data".to_string(),
            temperature_f: 72.567,
            humidity_percentage: 45.0,
            heat_index_f: 75.004,
            temperature_f_offset: None,
            humidity_percentage_offset: None,
        }
    }

    #[test]
    fn test_insert_sql_base_columns() {
        // ---
        let sql = insert_sql("environmental_sensor_data", SchemaVariant::Base);
        assert_eq!(
            sql,
            "INSERT INTO environmental_sensor_data \
             (temperature_f, humidity_percentage, heat_index_f) VALUES ($1, $2, $3)"
        );
    }

    #[test]
    fn test_insert_sql_offsets_columns() {
        // ---
        let sql = insert_sql("environmental_sensor_data", SchemaVariant::Offsets);
        assert!(sql.contains("temperature_f_offset"));
        assert!(sql.contains("humidity_percentage_offset"));
        assert!(sql.contains("heat_index_f"));
        assert!(sql.ends_with("VALUES ($1, $2, $3, $4, $5)"));
    }

    #[test]
    fn test_insert_sql_values_are_placeholders_only() {
        // ---
        // No value ever appears in the SQL text; only the identifier does.
        let sql = insert_sql("greenhouse", SchemaVariant::Base);
        assert!(!sql.contains("72"));
        assert!(sql.contains("$1") && sql.contains("$3"));
    }

    #[tokio::test]
    async fn test_empty_credentials_fail_before_any_io() {
        // ---
        let cfg = Config {
            db_password: String::new(),
            ..create_test_config()
        };

        let result = insert_reading(&cfg, &create_test_reading()).await;
        assert!(matches!(result, Err(IngestError::Configuration)));
    }

    #[tokio::test]
    async fn test_unknown_table_rejected_before_any_io() {
        // ---
        let cfg = create_test_config();
        let reading = Reading {
            name: "not_on_the_list".to_string(),
            ..create_test_reading()
        };

        let result = insert_reading(&cfg, &reading).await;
        match result {
            Err(IngestError::TableNotAllowed(name)) => assert_eq!(name, "not_on_the_list"),
            other => panic!("expected TableNotAllowed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_offsets_variant_requires_offsets() {
        // ---
        let cfg = Config {
            variant: SchemaVariant::Offsets,
            ..create_test_config()
        };

        // Both offsets absent
        let result = insert_reading(&cfg, &create_test_reading()).await;
        assert!(matches!(result, Err(IngestError::MissingOffsets)));

        // Only one offset present
        let reading = Reading {
            temperature_f_offset: Some(0.25),
            ..create_test_reading()
        };
        let result = insert_reading(&cfg, &reading).await;
        assert!(matches!(result, Err(IngestError::MissingOffsets)));
    }
}
