/// Record identifiers are opaque strings assigned by the store at creation
/// (derived from the creation timestamp). Client-generated placeholders use
/// a `temp-` prefix and never reach the store.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
