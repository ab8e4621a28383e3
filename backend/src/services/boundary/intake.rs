//! # Boundary Intake
//!
//! HTTP handlers that turn a submission request into a typed
//! [`SubmissionInput`] and answer with the resolved boundary.
//!
//! - `process` reads a `multipart/form-data` submission. The `kml_file` part is
//!   spooled into a temporary file while its MD5 is computed, then read back
//!   through [`KmlUpload::from_reader`], which leaves the spool rewound. The
//!   digest is returned so the record store can recognise repeated uploads.
//! - `process_json` reads a JSON [`SubmissionRequest`].
//!
//! Both answer `200 OK` with a [`BoundaryResponse`], even when the boundary
//! is empty. Only transport problems produce `400 Bad Request`.

use super::resolver::BoundaryResolver;
use crate::config::Config;
use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use common::model::submission::{CenterValue, DrawnPolygon, KmlUpload, SubmissionInput};
use common::requests::{fields, BoundaryResponse, SubmissionRequest};
use futures_util::StreamExt;
use log::info;
use std::io::Write;
use tempfile::SpooledTempFile;
use thiserror::Error;

/// Uploads up to this size stay in memory; larger ones go to disk.
const SPOOL_IN_MEMORY_BYTES: usize = 256 * 1024;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("could not buffer upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("field '{0}' is not valid UTF-8")]
    NotUtf8(String),

    #[error("field '{field}' exceeds the {limit} byte limit")]
    TooLarge { field: String, limit: usize },
}

impl ResponseError for IntakeError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Boundary sources read from a multipart submission, plus the KML digest.
#[derive(Debug, Default)]
struct MultipartSubmission {
    input: SubmissionInput,
    kml_md5: Option<String>,
}

pub async fn process(
    payload: Multipart,
    resolver: web::Data<BoundaryResolver>,
    config: web::Data<Config>,
) -> impl Responder {
    match read_multipart(payload, config.max_upload_bytes).await {
        Ok(submission) => {
            let resolution = resolver.resolve(&submission.input);
            HttpResponse::Ok().json(BoundaryResponse::new(resolution, submission.kml_md5))
        }
        Err(e) => e.error_response(),
    }
}

pub async fn process_json(
    payload: web::Json<SubmissionRequest>,
    resolver: web::Data<BoundaryResolver>,
) -> impl Responder {
    let input = SubmissionInput::from(payload.into_inner());
    HttpResponse::Ok().json(BoundaryResponse::new(resolver.resolve(&input), None))
}

async fn read_multipart(mut payload: Multipart, limit: usize) -> Result<MultipartSubmission, IntakeError> {
    let mut submission = MultipartSubmission::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();

        match name.as_str() {
            fields::KML_FILE => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
                if let Some((upload, md5)) = spool_kml(&mut field, file_name, limit).await? {
                    info!(
                        "[INTAKE] KML file uploaded: {} ({} bytes)",
                        upload.file_name.as_deref().unwrap_or("<unnamed>"),
                        upload.content.len()
                    );
                    submission.input.kml_file = Some(upload);
                    submission.kml_md5 = Some(md5);
                }
            }
            fields::POLYGON => {
                let text = read_text(&mut field, &name, limit).await?;
                submission.input.drawn_polygon = Some(DrawnPolygon::Raw(text));
            }
            fields::LAT => {
                let text = read_text(&mut field, &name, limit).await?;
                submission.input.center_lat = Some(CenterValue::Text(text));
            }
            fields::LNG => {
                let text = read_text(&mut field, &name, limit).await?;
                submission.input.center_lng = Some(CenterValue::Text(text));
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// Spools the KML part to a temporary file while hashing it.
///
/// An empty part (a form submitted without choosing a file) counts as no upload.
async fn spool_kml(
    field: &mut Field,
    file_name: Option<String>,
    limit: usize,
) -> Result<Option<(KmlUpload, String)>, IntakeError> {
    let mut spool = SpooledTempFile::new(SPOOL_IN_MEMORY_BYTES);
    let mut hasher = md5::Context::new();
    let mut written = 0usize;

    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        written += chunk.len();
        if written > limit {
            return Err(IntakeError::TooLarge {
                field: fields::KML_FILE.to_string(),
                limit,
            });
        }
        hasher.consume(&chunk);
        spool.write_all(&chunk)?;
    }

    if written == 0 {
        return Ok(None);
    }

    let md5 = format!("{:x}", hasher.finalize());
    let upload = KmlUpload::from_reader(file_name, &mut spool)?;
    Ok(Some((upload, md5)))
}

async fn read_text(field: &mut Field, name: &str, limit: usize) -> Result<String, IntakeError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk?);
        if bytes.len() > limit {
            return Err(IntakeError::TooLarge {
                field: name.to_string(),
                limit,
            });
        }
    }
    String::from_utf8(bytes).map_err(|_| IntakeError::NotUtf8(name.to_string()))
}
