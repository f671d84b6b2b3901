use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub place: Option<String>,
    pub about: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
