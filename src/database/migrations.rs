//! Database Migrations
//!
//! Handles schema creation and versioned migrations.

use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::info;

/// Current database schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Create migrations table if it doesn't exist
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    let current_version = get_current_version(pool).await?;

    info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    if current_version < SCHEMA_VERSION {
        info!(
            "Running database migrations from v{} to v{}",
            current_version, SCHEMA_VERSION
        );

        for version in (current_version + 1)..=SCHEMA_VERSION {
            run_migration(pool, version).await?;
        }

        info!("Database migrations completed successfully");
    }

    Ok(())
}

/// Get the current schema version
async fn get_current_version(pool: &SqlitePool) -> Result<i32, sqlx::Error> {
    let result = sqlx::query("SELECT MAX(version) as version FROM _migrations")
        .fetch_optional(pool)
        .await?;

    Ok(result
        .and_then(|row| row.try_get::<i32, _>("version").ok())
        .unwrap_or(0))
}

/// Run a specific migration version
async fn run_migration(pool: &SqlitePool, version: i32) -> Result<(), sqlx::Error> {
    let (name, sql) = match version {
        1 => ("initial_schema", MIGRATION_V1),
        _ => return Ok(()),
    };

    info!("Applying migration v{}: {}", version, name);

    let mut tx = pool.begin().await?;

    for statement in sql.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(version)
        .bind(name)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

const MIGRATION_V1: &str = r#"
CREATE TABLE IF NOT EXISTS artisan_statuses (
    id TEXT PRIMARY KEY,
    code TEXT,
    label TEXT,
    color TEXT
);

CREATE TABLE IF NOT EXISTS intervention_statuses (
    id TEXT PRIMARY KEY,
    code TEXT,
    label TEXT,
    color TEXT
);

CREATE TABLE IF NOT EXISTS metiers (
    id TEXT PRIMARY KEY,
    code TEXT,
    label TEXT
);

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    firstname TEXT,
    lastname TEXT,
    username TEXT,
    code_gestionnaire TEXT,
    color TEXT
);

CREATE TABLE IF NOT EXISTS artisans (
    id TEXT PRIMARY KEY,
    prenom TEXT,
    nom TEXT,
    plain_nom TEXT,
    raison_sociale TEXT,
    email TEXT,
    telephone TEXT,
    telephone2 TEXT,
    numero_associe TEXT,
    statut_id TEXT REFERENCES artisan_statuses(id),
    is_active INTEGER
);

CREATE INDEX IF NOT EXISTS idx_artisans_numero_associe ON artisans(numero_associe);
CREATE INDEX IF NOT EXISTS idx_artisans_plain_nom ON artisans(plain_nom);

CREATE TABLE IF NOT EXISTS artisan_metiers (
    artisan_id TEXT NOT NULL REFERENCES artisans(id),
    metier_id TEXT NOT NULL REFERENCES metiers(id),
    is_primary INTEGER,
    PRIMARY KEY (artisan_id, metier_id)
);

CREATE TABLE IF NOT EXISTS tenants (
    id TEXT PRIMARY KEY,
    firstname TEXT,
    lastname TEXT,
    telephone TEXT,
    telephone2 TEXT,
    email TEXT,
    adresse TEXT,
    code_postal TEXT,
    ville TEXT
);

CREATE TABLE IF NOT EXISTS interventions (
    id TEXT PRIMARY KEY,
    id_inter TEXT,
    agence_id TEXT,
    statut_id TEXT REFERENCES intervention_statuses(id),
    metier_id TEXT REFERENCES metiers(id),
    assigned_user_id TEXT REFERENCES users(id),
    tenant_id TEXT REFERENCES tenants(id),
    contexte_intervention TEXT,
    consigne_intervention TEXT,
    commentaire_agent TEXT,
    adresse TEXT,
    code_postal TEXT,
    ville TEXT,
    date TEXT,
    date_prevue TEXT,
    due_date TEXT,
    is_active INTEGER
);

CREATE INDEX IF NOT EXISTS idx_interventions_id_inter ON interventions(id_inter);
CREATE INDEX IF NOT EXISTS idx_interventions_date ON interventions(date);

CREATE TABLE IF NOT EXISTS intervention_artisans (
    intervention_id TEXT NOT NULL REFERENCES interventions(id),
    artisan_id TEXT NOT NULL REFERENCES artisans(id),
    is_primary INTEGER,
    role TEXT,
    PRIMARY KEY (intervention_id, artisan_id)
);

CREATE INDEX IF NOT EXISTS idx_intervention_artisans_artisan ON intervention_artisans(artisan_id)
"#;
