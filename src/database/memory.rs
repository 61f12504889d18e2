use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::manager::DatabaseError;
use crate::database::models::{Drawer, Note, User};
use crate::database::store::{NoteChanges, Store};

/// In-process [`Store`] with the same uniqueness and ownership rules as the
/// PostgreSQL store. Used by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    drawers: RwLock<HashMap<String, Drawer>>,
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(DatabaseError::Duplicate("email"));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert_drawer(&self, drawer: &Drawer) -> Result<(), DatabaseError> {
        let mut drawers = self.drawers.write().await;
        if drawers.contains_key(&drawer.drawer_name) {
            return Err(DatabaseError::Duplicate("drawerName"));
        }
        drawers.insert(drawer.drawer_name.clone(), drawer.clone());
        Ok(())
    }

    async fn find_drawer_by_name(&self, drawer_name: &str) -> Result<Option<Drawer>, DatabaseError> {
        Ok(self.drawers.read().await.get(drawer_name).cloned())
    }

    async fn list_notes(&self, owner: &Principal) -> Result<Vec<Note>, DatabaseError> {
        let notes = self.notes.read().await;
        let mut owned: Vec<Note> = notes
            .values()
            .filter(|note| note.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn insert_note(&self, note: &Note) -> Result<(), DatabaseError> {
        self.notes.write().await.insert(note.id, note.clone());
        Ok(())
    }

    async fn find_note(&self, id: Uuid) -> Result<Option<Note>, DatabaseError> {
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn update_note(
        &self,
        id: Uuid,
        owner: &Principal,
        changes: NoteChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, DatabaseError> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.get_mut(&id).filter(|note| note.is_owned_by(owner)) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(content) = changes.content {
            note.content = content;
        }
        note.updated_at = Some(updated_at);
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: Uuid, owner: &Principal) -> Result<bool, DatabaseError> {
        let mut notes = self.notes.write().await;
        match notes.get(&id) {
            Some(note) if note.is_owned_by(owner) => {
                notes.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
