//! Constants for the gibr-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github+json";

/// API version pinned through the `X-GitHub-Api-Version` header
pub const API_VERSION: &str = "2022-11-28";

/// Page size used when listing issues
pub const PER_PAGE: u32 = 100;

/// Environment variable suggested for the token
pub const DEFAULT_TOKEN_VAR: &str = "GITHUB_TOKEN";
