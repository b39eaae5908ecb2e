//! SQLite Search Repository
//!
//! Translates structured candidate queries into parameterized SQL and
//! hydrates the relation-borne parts of each record (status, trades,
//! tenant, assigned user, artisan assignments) with batched lookups.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::core::search::error::Result;
use crate::core::search::models::{
    ArtisanMetier, ArtisanRecord, ArtisanRef, AssignedUser, ContactRecord, InterventionArtisan,
    InterventionRecord, MetierRef, StatusRef,
};
use crate::core::search::repository::{
    ArtisanColumn, CandidateQuery, CandidateSet, ColumnPredicate, InterventionColumn,
    SearchRepository, TextMatch,
};

use super::Database;

/// LIKE pattern for a predicate; patterns arrive already wildcard-escaped.
fn like_pattern(matcher: TextMatch, pattern: &str) -> String {
    match matcher {
        TextMatch::Exact => pattern.to_string(),
        TextMatch::Prefix => format!("{pattern}%"),
        TextMatch::Contains => format!("%{pattern}%"),
    }
}

/// Append the OR-combined WHERE clause for a predicate list. The column
/// names come from a closed enum, never from input.
fn push_where<C: Copy>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    filters: &[ColumnPredicate<C>],
    column_name: fn(C) -> &'static str,
) {
    builder.push(" WHERE ");
    let mut separated = builder.separated(" OR ");
    for filter in filters {
        separated.push(format!("{} LIKE ", column_name(filter.column)));
        separated.push_bind_unseparated(like_pattern(filter.matcher, &filter.pattern));
        separated.push_unseparated(" ESCAPE '\\'");
    }
}

// ============================================================================
// Flat row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ArtisanRow {
    id: String,
    prenom: Option<String>,
    nom: Option<String>,
    plain_nom: Option<String>,
    raison_sociale: Option<String>,
    email: Option<String>,
    telephone: Option<String>,
    telephone2: Option<String>,
    numero_associe: Option<String>,
    statut_id: Option<String>,
    is_active: Option<bool>,
}

impl From<ArtisanRow> for ArtisanRecord {
    fn from(row: ArtisanRow) -> Self {
        Self {
            id: row.id,
            prenom: row.prenom,
            nom: row.nom,
            plain_nom: row.plain_nom,
            raison_sociale: row.raison_sociale,
            email: row.email,
            telephone: row.telephone,
            telephone2: row.telephone2,
            numero_associe: row.numero_associe,
            statut_id: row.statut_id,
            is_active: row.is_active,
            status: None,
            metiers: Vec::new(),
            active_intervention_count: None,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InterventionRow {
    id: String,
    id_inter: Option<String>,
    agence_id: Option<String>,
    statut_id: Option<String>,
    metier_id: Option<String>,
    assigned_user_id: Option<String>,
    tenant_id: Option<String>,
    contexte_intervention: Option<String>,
    consigne_intervention: Option<String>,
    commentaire_agent: Option<String>,
    adresse: Option<String>,
    code_postal: Option<String>,
    ville: Option<String>,
    date: Option<String>,
    date_prevue: Option<String>,
    due_date: Option<String>,
}

impl From<&InterventionRow> for InterventionRecord {
    fn from(row: &InterventionRow) -> Self {
        Self {
            id: row.id.clone(),
            id_inter: row.id_inter.clone(),
            agence_id: row.agence_id.clone(),
            statut_id: row.statut_id.clone(),
            metier_id: row.metier_id.clone(),
            assigned_user_id: row.assigned_user_id.clone(),
            contexte_intervention: row.contexte_intervention.clone(),
            consigne_intervention: row.consigne_intervention.clone(),
            commentaire_agent: row.commentaire_agent.clone(),
            adresse: row.adresse.clone(),
            code_postal: row.code_postal.clone(),
            ville: row.ville.clone(),
            date: row.date.clone(),
            date_prevue: row.date_prevue.clone(),
            due_date: row.due_date.clone(),
            tenant: None,
            status: None,
            metier: None,
            assigned_user: None,
            intervention_artisans: Vec::new(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatusRow {
    id: String,
    code: Option<String>,
    label: Option<String>,
    color: Option<String>,
}

impl From<StatusRow> for StatusRef {
    fn from(row: StatusRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            label: row.label,
            color: row.color,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MetierRow {
    id: String,
    code: Option<String>,
    label: Option<String>,
}

impl From<MetierRow> for MetierRef {
    fn from(row: MetierRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            label: row.label,
        }
    }
}

// ============================================================================
// Batched lookups
// ============================================================================

async fn fetch_statuses(
    db: &Database,
    table: &str,
    ids: &[&str],
) -> Result<HashMap<String, StatusRef>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT id, code, label, color FROM {table} WHERE id IN ("));
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    builder.push(")");
    let rows: Vec<StatusRow> = builder.build_query_as().fetch_all(db.pool()).await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.id.clone(), row.into()))
        .collect())
}

async fn fetch_metiers(db: &Database, ids: &[&str]) -> Result<HashMap<String, MetierRef>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, code, label FROM metiers WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    builder.push(")");
    let rows: Vec<MetierRow> = builder.build_query_as().fetch_all(db.pool()).await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.id.clone(), row.into()))
        .collect())
}

/// Trade associations for a batch of artisans, keyed by artisan id.
async fn fetch_artisan_metiers(
    db: &Database,
    artisan_ids: &[&str],
) -> Result<HashMap<String, Vec<ArtisanMetier>>> {
    if artisan_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT am.artisan_id, am.is_primary, m.id, m.code, m.label \
         FROM artisan_metiers am \
         JOIN metiers m ON m.id = am.metier_id \
         WHERE am.artisan_id IN (",
    );
    let mut separated = builder.separated(", ");
    for id in artisan_ids {
        separated.push_bind(*id);
    }
    builder.push(") ORDER BY am.is_primary DESC");

    let rows = builder.build().fetch_all(db.pool()).await?;
    let mut by_artisan: HashMap<String, Vec<ArtisanMetier>> = HashMap::new();
    for row in rows {
        let artisan_id: String = row.try_get("artisan_id")?;
        let is_primary: Option<bool> = row.try_get("is_primary")?;
        let metier = MetierRef {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            label: row.try_get("label")?,
        };
        by_artisan.entry(artisan_id).or_default().push(ArtisanMetier {
            is_primary,
            metier: Some(metier),
        });
    }
    Ok(by_artisan)
}

async fn fetch_tenants(db: &Database, ids: &[&str]) -> Result<HashMap<String, ContactRecord>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, firstname, lastname, telephone, telephone2, email, adresse, \
         code_postal, ville FROM tenants WHERE id IN (",
    );
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    builder.push(")");
    let rows = builder.build().fetch_all(db.pool()).await?;
    let mut map = HashMap::new();
    for row in rows {
        let contact = ContactRecord {
            id: row.try_get("id")?,
            firstname: row.try_get("firstname")?,
            lastname: row.try_get("lastname")?,
            telephone: row.try_get("telephone")?,
            telephone2: row.try_get("telephone2")?,
            email: row.try_get("email")?,
            adresse: row.try_get("adresse")?,
            code_postal: row.try_get("code_postal")?,
            ville: row.try_get("ville")?,
        };
        map.insert(contact.id.clone(), contact);
    }
    Ok(map)
}

async fn fetch_users(db: &Database, ids: &[&str]) -> Result<HashMap<String, AssignedUser>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, firstname, lastname, username, code_gestionnaire, color \
         FROM users WHERE id IN (",
    );
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    builder.push(")");
    let rows = builder.build().fetch_all(db.pool()).await?;
    let mut map = HashMap::new();
    for row in rows {
        let user = AssignedUser {
            id: row.try_get("id")?,
            firstname: row.try_get("firstname")?,
            lastname: row.try_get("lastname")?,
            username: row.try_get("username")?,
            code_gestionnaire: row.try_get("code_gestionnaire")?,
            color: row.try_get("color")?,
        };
        map.insert(user.id.clone(), user);
    }
    Ok(map)
}

/// Artisan assignments for a batch of interventions, keyed by intervention
/// id, primary assignment first.
async fn fetch_intervention_artisans(
    db: &Database,
    intervention_ids: &[&str],
) -> Result<HashMap<String, Vec<InterventionArtisan>>> {
    if intervention_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT ia.intervention_id, ia.is_primary, ia.role, \
         a.id, a.prenom, a.nom, a.numero_associe, a.telephone, a.telephone2 \
         FROM intervention_artisans ia \
         JOIN artisans a ON a.id = ia.artisan_id \
         WHERE ia.intervention_id IN (",
    );
    let mut separated = builder.separated(", ");
    for id in intervention_ids {
        separated.push_bind(*id);
    }
    builder.push(") ORDER BY ia.is_primary DESC");

    let rows = builder.build().fetch_all(db.pool()).await?;
    let mut by_intervention: HashMap<String, Vec<InterventionArtisan>> = HashMap::new();
    for row in rows {
        let intervention_id: String = row.try_get("intervention_id")?;
        let artisan = ArtisanRef {
            id: row.try_get("id")?,
            prenom: row.try_get("prenom")?,
            nom: row.try_get("nom")?,
            numero_associe: row.try_get("numero_associe")?,
            telephone: row.try_get("telephone")?,
            telephone2: row.try_get("telephone2")?,
        };
        by_intervention
            .entry(intervention_id)
            .or_default()
            .push(InterventionArtisan {
                is_primary: row.try_get("is_primary")?,
                role: row.try_get("role")?,
                artisan: Some(artisan),
            });
    }
    Ok(by_intervention)
}

fn dedup_ids<'a, I>(ids: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut out: Vec<&str> = ids.into_iter().flatten().collect();
    out.sort_unstable();
    out.dedup();
    out
}

// ============================================================================
// SearchRepository implementation
// ============================================================================

#[async_trait]
impl SearchRepository for Database {
    async fn find_artisan_candidates(
        &self,
        query: &CandidateQuery<ArtisanColumn>,
    ) -> Result<CandidateSet<ArtisanRecord>> {
        let mut count_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM artisans");
        push_where(&mut count_builder, &query.filters, ArtisanColumn::as_str);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await?;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, prenom, nom, plain_nom, raison_sociale, email, telephone, \
             telephone2, numero_associe, statut_id, is_active FROM artisans",
        );
        push_where(&mut builder, &query.filters, ArtisanColumn::as_str);
        builder.push(" ORDER BY numero_associe ASC LIMIT ");
        builder.push_bind(query.fetch_limit as i64);

        let rows: Vec<ArtisanRow> = builder.build_query_as().fetch_all(self.pool()).await?;
        let mut records: Vec<ArtisanRecord> = rows.into_iter().map(Into::into).collect();

        let status_ids = dedup_ids(records.iter().map(|r| r.statut_id.as_deref()));
        let artisan_ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let statuses = fetch_statuses(self, "artisan_statuses", &status_ids).await?;
        let mut metiers = fetch_artisan_metiers(self, &artisan_ids).await?;

        for record in &mut records {
            record.status = record
                .statut_id
                .as_deref()
                .and_then(|id| statuses.get(id).cloned());
            record.metiers = metiers.remove(&record.id).unwrap_or_default();
        }

        Ok(CandidateSet {
            rows: records,
            total: total as u64,
        })
    }

    async fn find_intervention_candidates(
        &self,
        query: &CandidateQuery<InterventionColumn>,
    ) -> Result<CandidateSet<InterventionRecord>> {
        let mut count_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM interventions");
        push_where(&mut count_builder, &query.filters, InterventionColumn::as_str);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await?;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, id_inter, agence_id, statut_id, metier_id, assigned_user_id, \
             tenant_id, contexte_intervention, consigne_intervention, commentaire_agent, \
             adresse, code_postal, ville, date, date_prevue, due_date FROM interventions",
        );
        push_where(&mut builder, &query.filters, InterventionColumn::as_str);
        // NULL dates sort last under DESC in SQLite.
        builder.push(" ORDER BY date DESC LIMIT ");
        builder.push_bind(query.fetch_limit as i64);

        let rows: Vec<InterventionRow> = builder.build_query_as().fetch_all(self.pool()).await?;
        let mut records: Vec<InterventionRecord> = rows.iter().map(Into::into).collect();

        let intervention_ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        let status_ids = dedup_ids(rows.iter().map(|r| r.statut_id.as_deref()));
        let metier_ids = dedup_ids(rows.iter().map(|r| r.metier_id.as_deref()));
        let tenant_ids = dedup_ids(rows.iter().map(|r| r.tenant_id.as_deref()));
        let user_ids = dedup_ids(rows.iter().map(|r| r.assigned_user_id.as_deref()));

        let statuses = fetch_statuses(self, "intervention_statuses", &status_ids).await?;
        let metiers = fetch_metiers(self, &metier_ids).await?;
        let tenants = fetch_tenants(self, &tenant_ids).await?;
        let users = fetch_users(self, &user_ids).await?;
        let mut assignments = fetch_intervention_artisans(self, &intervention_ids).await?;

        for (record, row) in records.iter_mut().zip(rows.iter()) {
            record.status = row
                .statut_id
                .as_deref()
                .and_then(|id| statuses.get(id).cloned());
            record.metier = row
                .metier_id
                .as_deref()
                .and_then(|id| metiers.get(id).cloned());
            record.tenant = row
                .tenant_id
                .as_deref()
                .and_then(|id| tenants.get(id).cloned());
            record.assigned_user = row
                .assigned_user_id
                .as_deref()
                .and_then(|id| users.get(id).cloned());
            record.intervention_artisans = assignments.remove(&record.id).unwrap_or_default();
        }

        Ok(CandidateSet {
            rows: records,
            total: total as u64,
        })
    }

    async fn active_intervention_counts(
        &self,
        artisan_ids: &[String],
    ) -> Result<HashMap<String, u32>> {
        if artisan_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT ia.artisan_id, COUNT(DISTINCT ia.intervention_id) AS active_count \
             FROM intervention_artisans ia \
             JOIN interventions i ON i.id = ia.intervention_id \
             WHERE i.is_active = 1 AND ia.artisan_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in artisan_ids {
            separated.push_bind(id.as_str());
        }
        builder.push(") GROUP BY ia.artisan_id");

        let rows = builder.build().fetch_all(self.pool()).await?;
        let mut counts = HashMap::new();
        for row in rows {
            let artisan_id: String = row.try_get("artisan_id")?;
            let count: i64 = row.try_get("active_count")?;
            counts.insert(artisan_id, count as u32);
        }
        Ok(counts)
    }
}
