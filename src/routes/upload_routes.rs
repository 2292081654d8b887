use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    extract::Multipart,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::errors::AppError;
use crate::storage::UploadFile;
use crate::AppState;

enum DepotOperation {
    Read,
    Create(Vec<UploadFile>),
    Update(Vec<UploadFile>),
}

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(redirect_root))
        .route(
            "/{*request_path}",
            get(redirect_path)
                .post(create_directory)
                .patch(update_directory),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

async fn redirect_root(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Response, AppError> {
    dispatch(&state, "", DepotOperation::Read).await
}

async fn redirect_path(
    axum::extract::State(state): axum::extract::State<AppState>,
    axum::extract::Path(request_path): axum::extract::Path<String>,
) -> Result<Response, AppError> {
    dispatch(&state, &request_path, DepotOperation::Read).await
}

#[tracing::instrument(skip(state, multipart))]
async fn create_directory(
    axum::extract::State(state): axum::extract::State<AppState>,
    axum::extract::Path(request_path): axum::extract::Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let batch = collect_upload_batch(multipart).await?;
    dispatch(&state, &request_path, DepotOperation::Create(batch)).await
}

#[tracing::instrument(skip(state, multipart))]
async fn update_directory(
    axum::extract::State(state): axum::extract::State<AppState>,
    axum::extract::Path(request_path): axum::extract::Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let batch = collect_upload_batch(multipart).await?;
    dispatch(&state, &request_path, DepotOperation::Update(batch)).await
}

async fn dispatch(
    state: &AppState,
    request_path: &str,
    operation: DepotOperation,
) -> Result<Response, AppError> {
    match operation {
        DepotOperation::Read => {
            let target = state.redirects.resolve(request_path).await;
            internal_redirect(&target)
        }
        DepotOperation::Create(batch) => {
            let dir = state.guard.validate(request_path)?;
            state.store.create(&dir, &batch).await?;

            Ok((
                StatusCode::CREATED,
                Json(json!({ "message": "Successfully added" })),
            )
                .into_response())
        }
        DepotOperation::Update(batch) => {
            let dir = state.guard.validate(request_path)?;
            state.store.update(&dir, &batch).await?;

            Ok((
                StatusCode::OK,
                Json(json!({ "message": "Successfully updated" })),
            )
                .into_response())
        }
    }
}

async fn collect_upload_batch(mut multipart: Multipart) -> Result<Vec<UploadFile>, AppError> {
    let mut batch = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::BadRequest(format!("Invalid multipart payload: {error}")))?
    {
        // Field names carry no meaning here; every part with a filename
        // joins the batch, in request order.
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(|error| {
            AppError::BadRequest(format!("Failed to read upload field: {error}"))
        })?;

        batch.push(UploadFile {
            name,
            bytes: bytes.to_vec(),
        });
    }

    Ok(batch)
}

fn internal_redirect(target: &str) -> Result<Response, AppError> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    // No Content-Type: the proxy controls delivery of the target.
    response.headers_mut().insert(
        HeaderName::from_static("x-accel-redirect"),
        HeaderValue::from_str(target)
            .map_err(|_| AppError::Internal("Invalid redirect target for header".into()))?,
    );

    Ok(response)
}
