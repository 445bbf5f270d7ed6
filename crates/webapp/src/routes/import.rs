//! Spreadsheet import route handlers.
//!
//! One upload form per import kind; the file is forwarded as-is to the
//! API, which does all parsing and validation. The result page renders
//! the counters the API returns.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response},
};

use crate::api::{ImportKind, ImportSummary};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Largest upload accepted (8 MiB).
const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Upload form page template.
#[derive(Template, WebTemplate)]
#[template(path = "import/index.html")]
pub struct ImportTemplate {
    pub user: CurrentUser,
    pub kinds: [ImportKind; 3],
    pub error: Option<String>,
}

/// Import result page template.
#[derive(Template, WebTemplate)]
#[template(path = "import/result.html")]
pub struct ImportResultTemplate {
    pub user: CurrentUser,
    pub kind: ImportKind,
    pub filename: String,
    pub summary: ImportSummary,
}

const IMPORT_KINDS: [ImportKind; 3] =
    [ImportKind::Produits, ImportKind::Stocks, ImportKind::Livraisons];

/// GET /import - Render the upload forms.
pub async fn index(RequireAuth(user): RequireAuth) -> ImportTemplate {
    ImportTemplate {
        user,
        kinds: IMPORT_KINDS,
        error: None,
    }
}

fn parse_kind(raw: &str) -> Result<ImportKind> {
    match raw {
        "produits" => Ok(ImportKind::Produits),
        "stocks" => Ok(ImportKind::Stocks),
        "livraisons" => Ok(ImportKind::Livraisons),
        other => Err(AppError::NotFound(format!("import inconnu : {other}"))),
    }
}

/// POST /import/{kind} - Forward an uploaded spreadsheet to the API.
pub async fn upload(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<Response> {
    let kind = parse_kind(&kind)?;

    // Find the "file" part; ignore any other form fields
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Formulaire invalide : {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .unwrap_or("import.xlsx")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Lecture du fichier impossible : {e}")))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Ok(ImportTemplate {
            user,
            kinds: IMPORT_KINDS,
            error: Some("Aucun fichier sélectionné.".to_string()),
        }
        .into_response());
    };

    if bytes.is_empty() {
        return Ok(ImportTemplate {
            user,
            kinds: IMPORT_KINDS,
            error: Some("Le fichier est vide.".to_string()),
        }
        .into_response());
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Ok(ImportTemplate {
            user,
            kinds: IMPORT_KINDS,
            error: Some("Le fichier dépasse la taille maximale (8 Mo).".to_string()),
        }
        .into_response());
    }

    let summary = state
        .stocks()
        .import_spreadsheet(&user.token, kind, filename.clone(), bytes)
        .await?;

    tracing::info!(
        kind = kind.label(),
        %filename,
        imported = summary.imported,
        skipped = summary.skipped,
        "Spreadsheet imported"
    );

    Ok(ImportResultTemplate {
        user,
        kind,
        filename,
        summary,
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("produits").unwrap(), ImportKind::Produits);
        assert_eq!(parse_kind("livraisons").unwrap(), ImportKind::Livraisons);
        assert!(parse_kind("commandes").is_err());
    }
}
