//! Read-only repositories over the `injury` and `diagnostic` tables.
//!
//! Every operation fails soft: a data-access failure is logged and resolved
//! to an empty result, so a storage fault renders as an ordinary "no
//! results" page instead of an outage. Callers cannot distinguish "error"
//! from "legitimately empty", and that is the contract.

use anyhow::{Context, Result};
use gcloud_spanner::statement::Statement;

use crate::models::{Diagnostic, Injury};
use crate::store::SpannerStore;

/// Build the bound LIKE value for a case-insensitive substring match.
///
/// The wildcards live inside the bound value, never in the query template.
fn contains_pattern(term: &str) -> String {
    format!("%{}%", term.to_lowercase())
}

/// Resolve an operation result, substituting the empty value on failure.
/// Exactly one log entry per failed operation.
fn soft_fail<T: Default>(result: Result<T>, operation: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("{operation}: {e:#}");
            T::default()
        }
    }
}

/// Read access to the `injury` table.
#[derive(Clone)]
pub struct InjuryRepository {
    store: SpannerStore,
}

impl InjuryRepository {
    pub fn new(store: SpannerStore) -> Self {
        Self { store }
    }

    /// All injuries whose name contains `term` (case-insensitive), ordered
    /// alphabetically by name. Empty on any data-access failure.
    pub async fn get_by_name(&self, term: &str) -> Vec<Injury> {
        soft_fail(
            self.try_get_by_name(term).await,
            "Error fetching injuries by name",
        )
    }

    /// All injuries, ordered alphabetically by name. Empty on failure.
    pub async fn get_all(&self) -> Vec<Injury> {
        soft_fail(self.try_get_all().await, "Error fetching injuries")
    }

    /// Injuries whose name, description, or treatment contains `keyword`
    /// (case-insensitive), ordered by name. Empty on failure.
    pub async fn search(&self, keyword: &str) -> Vec<Injury> {
        soft_fail(self.try_search(keyword).await, "Error searching injuries")
    }

    async fn try_get_by_name(&self, term: &str) -> Result<Vec<Injury>> {
        let mut statement = Statement::new(format!(
            "SELECT {} FROM injury WHERE LOWER(name) LIKE @name ORDER BY name",
            Injury::COLUMNS
        ));
        statement.add_param("name", &contains_pattern(term));

        self.query(statement).await
    }

    async fn try_get_all(&self) -> Result<Vec<Injury>> {
        let statement = Statement::new(format!(
            "SELECT {} FROM injury ORDER BY name",
            Injury::COLUMNS
        ));

        self.query(statement).await
    }

    async fn try_search(&self, keyword: &str) -> Result<Vec<Injury>> {
        let mut statement = Statement::new(format!(
            "SELECT {} FROM injury \
             WHERE LOWER(name) LIKE @keyword \
             OR LOWER(description) LIKE @keyword \
             OR LOWER(treatment) LIKE @keyword \
             ORDER BY name",
            Injury::COLUMNS
        ));
        statement.add_param("keyword", &contains_pattern(keyword));

        self.query(statement).await
    }

    async fn query(&self, statement: Statement) -> Result<Vec<Injury>> {
        let mut tx = self
            .store
            .client()
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query injury table")?;

        let mut injuries = Vec::new();
        while let Some(row) = result_set.next().await? {
            injuries.push(Injury::from_row(&row)?);
        }

        Ok(injuries)
    }
}

/// Read access to the `diagnostic` table.
#[derive(Clone)]
pub struct DiagnosticRepository {
    store: SpannerStore,
}

impl DiagnosticRepository {
    pub fn new(store: SpannerStore) -> Self {
        Self { store }
    }

    /// The first diagnostic whose name contains `term` (case-insensitive).
    ///
    /// Unlike the injury side this returns a single best record; the
    /// questionnaire shows one suggested diagnosis per body part. `None` on
    /// no match or data-access failure.
    pub async fn get_by_name(&self, term: &str) -> Option<Diagnostic> {
        soft_fail(
            self.try_get_by_name(term).await,
            "Error fetching diagnostic by name",
        )
    }

    /// All diagnostics, ordered alphabetically by name. Empty on failure.
    pub async fn get_all(&self) -> Vec<Diagnostic> {
        soft_fail(self.try_get_all().await, "Error fetching diagnostics")
    }

    /// Diagnostics whose name or description contains `keyword`
    /// (case-insensitive), ordered by name. Empty on failure.
    pub async fn search(&self, keyword: &str) -> Vec<Diagnostic> {
        soft_fail(self.try_search(keyword).await, "Error searching diagnostics")
    }

    async fn try_get_by_name(&self, term: &str) -> Result<Option<Diagnostic>> {
        let mut statement = Statement::new(format!(
            "SELECT {} FROM diagnostic WHERE LOWER(name) LIKE @name LIMIT 1",
            Diagnostic::COLUMNS
        ));
        statement.add_param("name", &contains_pattern(term));

        Ok(self.query(statement).await?.into_iter().next())
    }

    async fn try_get_all(&self) -> Result<Vec<Diagnostic>> {
        let statement = Statement::new(format!(
            "SELECT {} FROM diagnostic ORDER BY name",
            Diagnostic::COLUMNS
        ));

        self.query(statement).await
    }

    async fn try_search(&self, keyword: &str) -> Result<Vec<Diagnostic>> {
        let mut statement = Statement::new(format!(
            "SELECT {} FROM diagnostic \
             WHERE LOWER(name) LIKE @keyword \
             OR LOWER(description) LIKE @keyword \
             ORDER BY name",
            Diagnostic::COLUMNS
        ));
        statement.add_param("keyword", &contains_pattern(keyword));

        self.query(statement).await
    }

    async fn query(&self, statement: Statement) -> Result<Vec<Diagnostic>> {
        let mut tx = self
            .store
            .client()
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query diagnostic table")?;

        let mut diagnostics = Vec::new();
        while let Some(row) = result_set.next().await? {
            diagnostics.push(Diagnostic::from_row(&row)?);
        }

        Ok(diagnostics)
    }
}
