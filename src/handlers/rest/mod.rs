use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_macros::{FromRequest, FromRequestParts, debug_handler};
use serde::Deserialize;
use utoipa::OpenApi;
use uuid::Uuid;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, DeleteNoteResponse, ErrorResponse, HealthResponse, NoteResponse,
        UpdateNoteRequest,
    },
    error::ApiError,
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Notes API", description = "Simple Notes API providing CRUD endpoints for notes."),
    paths(
        health_check,
        create_note,
        update_note,
        delete_note,
        get_one_note,
        get_all_notes
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        DeleteNoteResponse,
        HealthResponse,
        ErrorResponse
    )),
    tags(
        (name = "health", description = "Health and status endpoints"),
        (name = "notes", description = "CRUD operations for notes")
    )
)]
pub struct ApiDoc;

/// Note id taken from the path. Anything that is not a UUID is rejected
/// with 422 before the handler runs.
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct NoteId(pub Uuid);

/// JSON body whose rejections are reported through [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct NoteJson<T>(pub T);

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "health"
)]
#[debug_handler]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Healthy".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 422, description = "Missing or mistyped field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    NoteJson(payload): NoteJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    let note = service.create_note(payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Malformed note ID or body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
    NoteJson(payload): NoteJson<UpdateNoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    service.update_note(id, payload).await.map(Json)
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeleteNoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Malformed note ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
) -> Result<Json<DeleteNoteResponse>, ApiError> {
    service.delete_note(id).await?;
    Ok(Json(DeleteNoteResponse::deleted(id)))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Malformed note ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
) -> Result<Json<NoteResponse>, ApiError> {
    service.get_one_note(id).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes, most recently updated first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    service.get_all_notes().await.map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        Router,
        body::Body,
        http::{Request, header},
        routing::{get, post},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // Routes that exercise the extractors without a database behind them.
    fn extractor_router() -> Router {
        Router::new()
            .route(
                "/notes/{id}",
                get(|NoteId(id): NoteId| async move { id.to_string() }),
            )
            .route(
                "/notes",
                post(|NoteJson(req): NoteJson<CreateNoteRequest>| async move {
                    format!("{}|{}", req.title, req.content)
                }),
            )
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = extractor_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/notes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_id_is_unprocessable() {
        let request = Request::get("/notes/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert!(error.error.starts_with("Invalid note id"));
    }

    #[tokio::test]
    async fn malformed_id_is_unprocessable_for_delete() {
        let router = Router::new().route(
            "/notes/{id}",
            axum::routing::delete(|NoteId(id): NoteId| async move { id.to_string() }),
        );
        let request = Request::delete("/notes/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn well_formed_id_reaches_handler() {
        let id = Uuid::new_v4();
        let request = Request::get(format!("/notes/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, id.to_string());
    }

    #[tokio::test]
    async fn empty_strings_are_accepted() {
        let (status, body) = send(post_json(r#"{"title":"","content":""}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "|");
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        let (status, body) = send(post_json(r#"{"title":"A"}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert!(error.error.starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, _) = send(post_json("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_check_reports_healthy() {
        let Json(health) = health_check().await;
        assert_eq!(health.message, "Healthy");
    }

    #[test]
    fn openapi_lists_note_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/notes"));
        assert!(doc.paths.paths.contains_key("/notes/{id}"));
    }
}
