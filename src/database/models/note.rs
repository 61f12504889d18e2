use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::{OwnerType, Principal};
use crate::database::DatabaseError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub owner_type: OwnerType,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Current time at the microsecond precision PostgreSQL stores, so a note
/// returned from a write compares equal to the same note read back later.
pub(crate) fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Note {
    pub fn new(owner: &Principal, title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_type: owner.owner_type(),
            owner_id: owner.id(),
            title,
            content,
            created_at: timestamp_now(),
            updated_at: None,
        }
    }

    pub fn is_owned_by(&self, principal: &Principal) -> bool {
        principal.owns(self.owner_type, self.owner_id)
    }
}

/// Row shape as stored; `owner_type` is kept as text in the table.
#[derive(Debug, FromRow)]
pub(crate) struct NoteRow {
    pub id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<NoteRow> for Note {
    type Error = DatabaseError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let owner_type = row.owner_type.parse().map_err(DatabaseError::Corrupt)?;
        Ok(Self {
            id: row.id,
            owner_type,
            owner_id: row.owner_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
