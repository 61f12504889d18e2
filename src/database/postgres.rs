use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::note::NoteRow;
use crate::database::models::{Drawer, Note, User};
use crate::database::store::{NoteChanges, Store};

const NOTE_COLUMNS: &str = "id, owner_type, owner_id, title, content, created_at, updated_at";

/// [`Store`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (id, email, username, password_hash, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseManager::map_unique(e, "email"))?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, username, password_hash, created_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_drawer(&self, drawer: &Drawer) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO drawers (id, drawer_name, password_hash, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(drawer.id)
        .bind(&drawer.drawer_name)
        .bind(&drawer.password_hash)
        .bind(drawer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseManager::map_unique(e, "drawerName"))?;
        Ok(())
    }

    async fn find_drawer_by_name(&self, drawer_name: &str) -> Result<Option<Drawer>, DatabaseError> {
        let drawer = sqlx::query_as::<_, Drawer>(
            "SELECT id, drawer_name, password_hash, created_at
             FROM drawers
             WHERE drawer_name = $1",
        )
        .bind(drawer_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(drawer)
    }

    async fn list_notes(&self, owner: &Principal) -> Result<Vec<Note>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM notes
             WHERE owner_type = $1 AND owner_id = $2
             ORDER BY created_at DESC, id DESC",
            NOTE_COLUMNS
        );
        let rows = sqlx::query_as::<_, NoteRow>(&sql)
            .bind(owner.owner_type().as_str())
            .bind(owner.id())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Note::try_from).collect()
    }

    async fn insert_note(&self, note: &Note) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO notes (id, owner_type, owner_id, title, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(note.id)
        .bind(note.owner_type.as_str())
        .bind(note.owner_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_note(&self, id: Uuid) -> Result<Option<Note>, DatabaseError> {
        let sql = format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS);
        let row = sqlx::query_as::<_, NoteRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Note::try_from).transpose()
    }

    async fn update_note(
        &self,
        id: Uuid,
        owner: &Principal,
        changes: NoteChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, DatabaseError> {
        let sql = format!(
            "UPDATE notes
             SET title = COALESCE($4, title),
                 content = COALESCE($5, content),
                 updated_at = $6
             WHERE id = $1 AND owner_type = $2 AND owner_id = $3
             RETURNING {}",
            NOTE_COLUMNS
        );
        let row = sqlx::query_as::<_, NoteRow>(&sql)
            .bind(id)
            .bind(owner.owner_type().as_str())
            .bind(owner.id())
            .bind(changes.title)
            .bind(changes.content)
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Note::try_from).transpose()
    }

    async fn delete_note(&self, id: Uuid, owner: &Principal) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_type = $2 AND owner_id = $3")
            .bind(id)
            .bind(owner.owner_type().as_str())
            .bind(owner.id())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
