use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use tether_core::domain::{ContactId, NoteId};
use tether_core::time::now_utc;
use tether_core::{MessageDto, NoteDto, NoteWithContactsDto};
use tether_store::repo::{LinkOutcome, UnlinkOutcome};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::payload::{NoteCreate, NotePatch, PageQuery};
use crate::state::AppState;

pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<NoteDto>>, ApiError> {
    let Query(query) = query?;
    let page = state.page(query.skip, query.limit);
    let notes = state
        .with_store(move |store| store.notes().list(page))
        .await?;
    Ok(Json(notes.into_iter().map(NoteDto::from).collect()))
}

pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Json<NoteCreate>, JsonRejection>,
) -> Result<Json<NoteDto>, ApiError> {
    let Json(body) = body?;
    let note = state
        .with_store(move |store| store.notes().create(now_utc(), body.into()))
        .await?;
    info!(note_id = %note.id, is_group = note.is_group, "note created");
    Ok(Json(note.into()))
}

pub async fn get_note(
    State(state): State<AppState>,
    id: Result<Path<NoteId>, PathRejection>,
) -> Result<Json<NoteWithContactsDto>, ApiError> {
    let Path(id) = id?;
    let (note, contact_ids) = state
        .with_store(move |store| {
            let notes = store.notes();
            let note = notes.require(id)?;
            let contact_ids = notes.contact_ids(id)?;
            Ok((note, contact_ids))
        })
        .await?;
    Ok(Json(NoteWithContactsDto {
        note: note.into(),
        contact_ids,
    }))
}

pub async fn update_note(
    State(state): State<AppState>,
    id: Result<Path<NoteId>, PathRejection>,
    body: Result<Json<NotePatch>, JsonRejection>,
) -> Result<Json<NoteDto>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let update = body.into_update()?;
    let note = state
        .with_store(move |store| store.notes().update(now_utc(), id, update))
        .await?;
    Ok(Json(note.into()))
}

pub async fn delete_note(
    State(state): State<AppState>,
    id: Result<Path<NoteId>, PathRejection>,
) -> Result<Json<MessageDto>, ApiError> {
    let Path(id) = id?;
    state.with_store(move |store| store.notes().delete(id)).await?;
    Ok(Json(MessageDto::new("Note deleted successfully")))
}

pub async fn add_contact_to_note(
    State(state): State<AppState>,
    ids: Result<Path<(NoteId, ContactId)>, PathRejection>,
) -> Result<Json<MessageDto>, ApiError> {
    let Path((note_id, contact_id)) = ids?;
    let outcome = state
        .with_store(move |store| store.notes().add_contact(note_id, contact_id))
        .await?;
    let message = match outcome {
        LinkOutcome::Linked => "Contact added to note successfully",
        LinkOutcome::AlreadyLinked => "Contact already associated with this note",
    };
    Ok(Json(MessageDto::new(message)))
}

pub async fn remove_contact_from_note(
    State(state): State<AppState>,
    ids: Result<Path<(NoteId, ContactId)>, PathRejection>,
) -> Result<Json<MessageDto>, ApiError> {
    let Path((note_id, contact_id)) = ids?;
    let outcome = state
        .with_store(move |store| store.notes().remove_contact(note_id, contact_id))
        .await?;
    let message = match outcome {
        UnlinkOutcome::Unlinked => "Contact removed from note successfully",
        UnlinkOutcome::NotLinked => "Contact is not associated with this note",
    };
    Ok(Json(MessageDto::new(message)))
}
