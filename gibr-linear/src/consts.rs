//! Constants for the gibr-linear client

/// Linear GraphQL endpoint
pub const API_URL: &str = "https://api.linear.app/graphql";

/// Maximum number of issues returned by a listing
pub const MAX_RESULTS: u32 = 50;

/// Workflow state type of finished issues
pub const COMPLETED_STATE: &str = "completed";

/// Environment variable suggested for the API key
pub const DEFAULT_TOKEN_VAR: &str = "LINEAR_TOKEN";
