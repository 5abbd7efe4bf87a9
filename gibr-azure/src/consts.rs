//! Constants for the gibr-azure client

/// REST API version sent with every request
pub const API_VERSION: &str = "7.1";

/// Maximum number of work items returned by a listing
pub const MAX_RESULTS: usize = 30;

/// States treated as closed when `closed_states` is not configured
pub const DEFAULT_CLOSED_STATES: [&str; 3] = ["Done", "Removed", "Closed"];

/// Organization URL offered by `gibr init`
pub const DEFAULT_URL: &str = "https://dev.azure.com/YOURORG";

/// Environment variable suggested for the personal access token
pub const DEFAULT_TOKEN_VAR: &str = "AZURE_TOKEN";

/// Fields requested for work items
pub const FIELDS: &str = "System.Id,System.Title,System.WorkItemType,System.State,System.AssignedTo";
