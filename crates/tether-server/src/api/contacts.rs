use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use tether_core::domain::ContactId;
use tether_core::time::now_utc;
use tether_core::{parse_search, ContactDto, ContactSearch, MessageDto, NoteDto};

use crate::api::error::ApiError;
use crate::api::payload::{ContactCreate, ContactListQuery, ContactPatch, PageQuery};
use crate::state::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    query: Result<Query<ContactListQuery>, QueryRejection>,
) -> Result<Json<Vec<ContactDto>>, ApiError> {
    let Query(query) = query?;
    let page = state.page(query.skip, query.limit);
    let search = query
        .search
        .as_deref()
        .map(parse_search)
        .unwrap_or(ContactSearch::All);

    let contacts = state
        .with_store(move |store| store.contacts().list(&search, page))
        .await?;
    Ok(Json(contacts.into_iter().map(ContactDto::from).collect()))
}

pub async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactCreate>, JsonRejection>,
) -> Result<Json<ContactDto>, ApiError> {
    let Json(body) = body?;
    let contact = state
        .with_store(move |store| store.contacts().create(now_utc(), body.into()))
        .await?;
    Ok(Json(contact.into()))
}

pub async fn get_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<ContactDto>, ApiError> {
    let Path(id) = id?;
    let contact = state
        .with_store(move |store| store.contacts().require(id))
        .await?;
    Ok(Json(contact.into()))
}

pub async fn update_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
    body: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<ContactDto>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let update = body.into_update()?;
    let contact = state
        .with_store(move |store| store.contacts().update(now_utc(), id, update))
        .await?;
    Ok(Json(contact.into()))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<MessageDto>, ApiError> {
    let Path(id) = id?;
    state
        .with_store(move |store| store.contacts().delete(id))
        .await?;
    Ok(Json(MessageDto::new("Contact deleted successfully")))
}

pub async fn list_contact_notes(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<NoteDto>>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let page = state.page(query.skip, query.limit);
    let notes = state
        .with_store(move |store| store.contacts().notes_for(id, page))
        .await?;
    Ok(Json(notes.into_iter().map(NoteDto::from).collect()))
}
