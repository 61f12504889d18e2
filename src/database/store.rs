use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::manager::DatabaseError;
use crate::database::models::{Drawer, Note, User};

/// Changes applied by a note update. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Persistence for accounts, drawers and notes.
///
/// Every write is a single-record operation. Note updates and deletes are
/// filtered by the owner pair so a note can never change hands.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `DatabaseError::Duplicate("email")` when the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with `DatabaseError::Duplicate("drawerName")` when the name is taken.
    async fn insert_drawer(&self, drawer: &Drawer) -> Result<(), DatabaseError>;

    async fn find_drawer_by_name(&self, drawer_name: &str) -> Result<Option<Drawer>, DatabaseError>;

    /// Notes for one owner pair, newest first.
    async fn list_notes(&self, owner: &Principal) -> Result<Vec<Note>, DatabaseError>;

    async fn insert_note(&self, note: &Note) -> Result<(), DatabaseError>;

    async fn find_note(&self, id: Uuid) -> Result<Option<Note>, DatabaseError>;

    /// Returns `None` when no note with this id belongs to `owner`.
    async fn update_note(
        &self,
        id: Uuid,
        owner: &Principal,
        changes: NoteChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, DatabaseError>;

    /// Returns whether a note was removed.
    async fn delete_note(&self, id: Uuid, owner: &Principal) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
