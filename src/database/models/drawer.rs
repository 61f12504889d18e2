use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A shared, password-gated note namespace.
#[derive(Debug, Clone, FromRow)]
pub struct Drawer {
    pub id: Uuid,
    pub drawer_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerProfile {
    pub id: Uuid,
    pub drawer_name: String,
}

impl From<&Drawer> for DrawerProfile {
    fn from(drawer: &Drawer) -> Self {
        Self {
            id: drawer.id,
            drawer_name: drawer.drawer_name.clone(),
        }
    }
}
