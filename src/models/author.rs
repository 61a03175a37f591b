//! Author model

use sqlx::FromRow;

/// Author row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub biography: String,
}
