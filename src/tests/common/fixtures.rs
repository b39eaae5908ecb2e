//! Test Fixtures
//!
//! Record builders for scoring and orchestrator tests, plus a seeded
//! in-memory SQLite database for end-to-end search tests.

use crate::core::search::models::{ArtisanRecord, InterventionRecord};
use crate::database::Database;

// =============================================================================
// Record Builders
// =============================================================================

/// A bare artisan record; tests fill in the fields they exercise.
pub fn artisan(id: &str, code: &str) -> ArtisanRecord {
    ArtisanRecord {
        id: id.to_string(),
        prenom: None,
        nom: None,
        plain_nom: None,
        raison_sociale: None,
        email: None,
        telephone: None,
        telephone2: None,
        numero_associe: Some(code.to_string()),
        statut_id: None,
        is_active: None,
        status: None,
        metiers: Vec::new(),
        active_intervention_count: None,
    }
}

/// A bare intervention record; tests fill in the fields they exercise.
pub fn intervention(id: &str, reference: &str) -> InterventionRecord {
    InterventionRecord {
        id: id.to_string(),
        id_inter: Some(reference.to_string()),
        agence_id: None,
        statut_id: None,
        metier_id: None,
        assigned_user_id: None,
        contexte_intervention: None,
        consigne_intervention: None,
        commentaire_agent: None,
        adresse: None,
        code_postal: None,
        ville: None,
        date: None,
        date_prevue: None,
        due_date: None,
        tenant: None,
        status: None,
        metier: None,
        assigned_user: None,
        intervention_artisans: Vec::new(),
    }
}

// =============================================================================
// Database Fixtures
// =============================================================================

/// Create an in-memory database seeded with a small CRM dataset:
/// two artisans (one plumber, one electrician), two interventions (one
/// active, assigned to the plumber) and the lookup rows they reference.
pub async fn seed_search_db() -> Database {
    let db = Database::in_memory()
        .await
        .expect("Failed to create test database");
    let pool = db.pool();

    sqlx::query("INSERT INTO artisan_statuses (id, code, label) VALUES ('as1', 'ACT', 'Actif')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO intervention_statuses (id, code, label) VALUES ('is1', 'EC', 'En cours')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO metiers (id, code, label) VALUES \
         ('m1', 'PLB', 'Plomberie'), ('m2', 'ELE', 'Electricite')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO users (id, firstname, lastname, username, code_gestionnaire) VALUES \
         ('u1', 'Claire', 'Moreau', 'cmoreau', 'CM')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO tenants (id, firstname, lastname, telephone, adresse, code_postal, ville) \
         VALUES ('t1', 'Marie', 'Bernard', '0612345678', '10 rue de la Paix', '75014', 'Paris')",
    )
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO artisans \
         (id, prenom, nom, plain_nom, raison_sociale, email, telephone, numero_associe, \
          statut_id, is_active) VALUES \
         ('a1', 'Jean', 'Dupont', 'Jean Dupont', 'Dupont Plomberie', \
          'jean.dupont@example.fr', '0698765432', 'DP42', 'as1', 1), \
         ('a2', 'Luc', 'Martin', 'Luc Martin', 'Martin Elec', \
          'luc.martin@example.fr', '0611223344', 'ME07', 'as1', 1)",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO artisan_metiers (artisan_id, metier_id, is_primary) VALUES \
         ('a1', 'm1', 1), ('a2', 'm2', 1)",
    )
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO interventions \
         (id, id_inter, statut_id, metier_id, assigned_user_id, tenant_id, \
          contexte_intervention, adresse, code_postal, ville, date, is_active) VALUES \
         ('i1', 'INT-4582', 'is1', 'm1', 'u1', 't1', \
          'Fuite d''eau sous evier', '10 rue de la Paix', '75014', 'Paris', \
          '2026-08-01', 1), \
         ('i2', 'INT-4583', 'is1', 'm2', NULL, NULL, \
          'Panne electrique generale', '4 avenue Foch', '69006', 'Lyon', \
          '2026-07-15', 0)",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO intervention_artisans (intervention_id, artisan_id, is_primary) VALUES \
         ('i1', 'a1', 1)",
    )
    .execute(pool)
    .await
    .unwrap();

    db
}
