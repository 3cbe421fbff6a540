use sqlx::FromRow;

/// A blip row. Sector and ring are stored as plain text so the radar shape
/// can change without a schema migration; rows that no longer match the
/// configured radar are filtered at layout time.
#[derive(Debug, FromRow, Clone)]
pub struct BlipRecord {
    pub id: i32,
    pub name: String,
    pub sector: Option<String>,
    pub ring: Option<String>,
    pub description: Option<String>,
    pub created: String,
}

/// Parameters for creating a new blip
#[derive(Debug, Clone)]
pub struct NewBlip {
    pub name: String,
    pub sector: String,
    pub ring: String,
    pub description: String,
    pub created: String,
}
