//! Constants for the gibr-jira client

/// Maximum number of issues requested by a search
pub const MAX_RESULTS: u32 = 50;

/// Fields requested from the search endpoint
pub const SEARCH_FIELDS: &str = "summary,issuetype,assignee,status";

/// Status category key Jira uses for finished work
pub const DONE_CATEGORY: &str = "done";

/// Environment variable suggested for the API token
pub const DEFAULT_TOKEN_VAR: &str = "JIRA_TOKEN";

/// Number of `accountId` characters used as an assignee fallback
pub const ACCOUNT_ID_PREFIX_LEN: usize = 8;
