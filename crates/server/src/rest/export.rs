use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use shared_types::{
    export_filename, to_csv, AppError, ApplicationKind, ExportDataset, CSV_CONTENT_TYPE,
};

use crate::auth::extractors::AdminRequired;
use crate::db::AppState;

async fn render(state: &AppState, dataset: ExportDataset) -> Result<String, AppError> {
    match dataset {
        ExportDataset::Registrations => to_csv(&state.store.list_registrations().await?),
        ExportDataset::Interns => {
            to_csv(&state.store.list_applications(Some(ApplicationKind::Internship)).await?)
        }
        ExportDataset::Careers => {
            to_csv(&state.store.list_applications(Some(ApplicationKind::Career)).await?)
        }
        ExportDataset::Newsletter => to_csv(&state.store.list_subscriptions().await?),
    }
}

/// Download an admin table as CSV.
#[utoipa::path(
    get,
    path = "/api/admin/export/{dataset}",
    params(("dataset" = String, Path, description = "registrations, interns, careers or newsletter")),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv"),
        (status = 400, description = "Unknown dataset or no rows", body = AppError)
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn export_dataset(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(dataset): Path<String>,
) -> Result<Response, AppError> {
    let dataset = ExportDataset::from_str_opt(&dataset)
        .ok_or_else(|| AppError::bad_request(format!("Unknown export dataset: {dataset}")))?;

    let csv = render(&state, dataset).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(dataset.label())
    );

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
