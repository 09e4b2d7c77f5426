use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

// Create and update both carry the full field set; updates overwrite
// unconditionally.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}
