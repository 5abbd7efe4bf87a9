//! Constants for the gibr-monday client

/// Monday.com GraphQL endpoint
pub const API_URL: &str = "https://api.monday.com/v2";

/// API version pinned through the `API-Version` header
pub const API_VERSION: &str = "2024-10";

/// Maximum number of items returned by a listing
pub const MAX_RESULTS: u32 = 50;

/// Status texts treated as finished, compared case-insensitively
pub const DONE_STATUSES: [&str; 3] = ["done", "complete", "completed"];

/// Column types read from each item
pub const STATUS_COLUMN: &str = "status";
pub const PEOPLE_COLUMN: &str = "people";

/// Environment variable suggested for the API token
pub const DEFAULT_TOKEN_VAR: &str = "MONDAY_TOKEN";
