/// Auto-assigned primary keys (assignees, users) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Reserved room id assigned when an asset's real room cannot be resolved.
pub const UNKNOWN_ROOM_ID: &str = "UNKNOWN";

/// Reserved floor id owning the UNKNOWN room.
pub const DEFAULT_FLOOR_ID: &str = "DEFAULT";

/// Reserved building id owning the DEFAULT floor.
pub const DEFAULT_BUILDING_ID: &str = "DEFAULT";

/// Actor recorded on scan events when no authenticated user is available.
pub const SYSTEM_ACTOR: &str = "SYSTEM";
