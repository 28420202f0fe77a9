//! CSV export of admin tables.
//!
//! The header comes from the column names of the first record. Every later
//! record is written in that header's order, so records may list their
//! columns in any order. Missing values render as empty fields.

use crate::{AppError, Application, NewsletterSubscription, RegistrationWithEvent};

/// Content type of exported files.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Error message for an export of zero rows.
pub const NO_DATA_MESSAGE: &str = "No data to export";

/// A row that can be written to CSV as named columns.
pub trait ExportRecord {
    fn columns(&self) -> Vec<(String, Option<String>)>;
}

impl ExportRecord for Vec<(String, Option<String>)> {
    fn columns(&self) -> Vec<(String, Option<String>)> {
        self.clone()
    }
}

impl ExportRecord for Vec<(&str, &str)> {
    fn columns(&self) -> Vec<(String, Option<String>)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }
}

/// Render records as a single CSV document (lines joined by `\n`).
pub fn to_csv<R: ExportRecord>(rows: &[R]) -> Result<String, AppError> {
    let first = rows
        .first()
        .ok_or_else(|| AppError::bad_request(NO_DATA_MESSAGE))?;
    let header: Vec<String> = first.columns().into_iter().map(|(name, _)| name).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    // Header names go through the same escaping as values.
    lines.push(header.iter().map(|h| escape_field(h)).collect::<Vec<_>>().join(","));

    for row in rows {
        let columns = row.columns();
        let line = header
            .iter()
            .map(|name| {
                columns
                    .iter()
                    .find(|(column, _)| column == name)
                    .and_then(|(_, value)| value.as_deref())
                    .map(escape_field)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Quote a field containing a comma, double quote or newline, doubling any
/// inner quotes.
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Download name for an export.
pub fn export_filename(label: &str) -> String {
    format!("{label}.csv")
}

fn date(value: chrono::DateTime<chrono::Utc>) -> Option<String> {
    Some(value.format("%Y-%m-%d").to_string())
}

impl ExportRecord for RegistrationWithEvent {
    fn columns(&self) -> Vec<(String, Option<String>)> {
        let r = &self.registration;
        vec![
            ("Name".into(), Some(r.name.clone())),
            ("Email".into(), Some(r.email.clone())),
            ("Phone".into(), r.phone.clone()),
            ("College".into(), r.college.clone()),
            ("Event".into(), self.event_title.clone()),
            ("Status".into(), Some(r.status.as_str().to_string())),
            ("Registered At".into(), date(r.created_at)),
        ]
    }
}

impl ExportRecord for Application {
    fn columns(&self) -> Vec<(String, Option<String>)> {
        vec![
            ("Name".into(), Some(self.name.clone())),
            ("Email".into(), Some(self.email.clone())),
            ("Phone".into(), Some(self.phone.clone())),
            ("College".into(), Some(self.college.clone())),
            ("Year".into(), Some(self.year_of_study.clone())),
            ("Position".into(), Some(self.position.clone())),
            ("Portfolio".into(), self.portfolio_url.clone()),
            ("Resume".into(), self.resume_url.clone()),
            ("Status".into(), Some(self.status.as_str().to_string())),
            ("Applied At".into(), date(self.created_at)),
        ]
    }
}

impl ExportRecord for NewsletterSubscription {
    fn columns(&self) -> Vec<(String, Option<String>)> {
        let status = if self.is_active { "Active" } else { "Inactive" };
        vec![
            ("Email".into(), Some(self.email.clone())),
            ("Status".into(), Some(status.to_string())),
            ("Subscribed At".into(), date(self.subscribed_at)),
        ]
    }
}
