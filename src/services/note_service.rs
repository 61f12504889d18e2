use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::note::timestamp_now;
use crate::database::models::Note;
use crate::database::{NoteChanges, Store};

use super::ServiceError;

/// Note CRUD scoped to the calling principal's owner pair.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn Store>,
}

impl NoteService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, principal: &Principal) -> Result<Vec<Note>, ServiceError> {
        Ok(self.store.list_notes(principal).await?)
    }

    pub async fn get(&self, principal: &Principal, id: Uuid) -> Result<Note, ServiceError> {
        self.owned_note(principal, id).await
    }

    /// Omitted title or content default to the empty string.
    pub async fn create(
        &self,
        principal: &Principal,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Note, ServiceError> {
        let note = Note::new(principal, title.unwrap_or_default(), content.unwrap_or_default());
        self.store.insert_note(&note).await?;
        Ok(note)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<Note, ServiceError> {
        self.owned_note(principal, id).await?;

        // The note may vanish between the ownership check and the write.
        self.store
            .update_note(id, principal, changes, timestamp_now())
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
        self.owned_note(principal, id).await?;

        if self.store.delete_note(id, principal).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    /// `NotFound` when the id is unknown, `Forbidden` when another pair owns it.
    async fn owned_note(&self, principal: &Principal, id: Uuid) -> Result<Note, ServiceError> {
        let note = self.store.find_note(id).await?.ok_or(ServiceError::NotFound)?;
        if !note.is_owned_by(principal) {
            return Err(ServiceError::Forbidden);
        }
        Ok(note)
    }
}
