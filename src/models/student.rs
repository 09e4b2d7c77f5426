use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub course_id: Option<i64>,
    pub created_at: String,
}

// Read-side shape: a student left-joined to its course. course_name is
// null when course_id is null or the course no longer exists.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentWithCourse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub course_id: Option<i64>,
    pub created_at: String,
    pub course_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentRequest {
    pub name: String,
    pub email: String,
    pub age: i64,
    #[serde(default, deserialize_with = "nullable_id")]
    pub course_id: Option<i64>,
}

// Accepts a number, a numeric string, "" or null; form-driven clients
// send "" for "no course".
fn nullable_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("course_id must be an integer")),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid course_id: {other}"
        ))),
    }
}
