use anyhow::{Context, Result};
use gcloud_spanner::row::Row;
use serde::Serialize;

/// A single catalog entry from the `injury` table. Read-only seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Injury {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub treatment: String,
    pub reference_link: Option<String>,
}

impl Injury {
    pub const COLUMNS: &'static str = "id, name, description, treatment, reference_link";

    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Injury {
            id: row.column_by_name("id").context("injury row missing id")?,
            name: row.column_by_name("name").context("injury row missing name")?,
            description: row
                .column_by_name("description")
                .context("injury row missing description")?,
            treatment: row
                .column_by_name("treatment")
                .context("injury row missing treatment")?,
            reference_link: row
                .column_by_name("reference_link")
                .context("injury row missing reference_link")?,
        })
    }
}

/// A suggested diagnosis from the `diagnostic` table. Read-only seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl Diagnostic {
    pub const COLUMNS: &'static str = "id, name, description";

    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Diagnostic {
            id: row.column_by_name("id").context("diagnostic row missing id")?,
            name: row
                .column_by_name("name")
                .context("diagnostic row missing name")?,
            description: row
                .column_by_name("description")
                .context("diagnostic row missing description")?,
        })
    }
}
