use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    error::ApiError,
    repository::Repository,
};

use std::sync::Arc;

use uuid::Uuid;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<Repository>,
}

impl NoteService {
    pub const fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<NoteResponse, ApiError> {
        let note = self
            .repo
            .create_note(&request.title, &request.content)
            .await?;

        tracing::info!("created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: Uuid,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ApiError> {
        self.repo
            .update_note(id, &request.title, &request.content)
            .await?
            .map(NoteResponse::from)
            .ok_or(ApiError::NotFound)
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<(), ApiError> {
        if self.repo.delete_note(id).await? {
            tracing::info!("deleted note {id}");
            Ok(())
        } else {
            Err(ApiError::NotFound)
        }
    }

    pub async fn get_one_note(&self, id: Uuid) -> Result<NoteResponse, ApiError> {
        self.repo
            .get_one_note(id)
            .await?
            .map(NoteResponse::from)
            .ok_or(ApiError::NotFound)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ApiError> {
        let notes = self.repo.get_all_notes().await?;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }
}
