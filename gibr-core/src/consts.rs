//! Constants shared by the gibr crates.

/// Name of the configuration file searched for in the current directory and
/// its ancestors
pub const CONFIG_FILENAME: &str = ".gibrconfig";

/// Section holding tool-wide defaults
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Section selecting the issue tracker
pub const TRACKER_SECTION: &str = "issue-tracker";

/// Key holding the branch name template in the default section
pub const BRANCH_NAME_FORMAT_KEY: &str = "branch_name_format";

/// Key holding the registry key of the selected tracker
pub const TRACKER_NAME_KEY: &str = "name";

/// Branch name template written by `gibr init`
pub const DEFAULT_BRANCH_NAME_FORMAT: &str = "{issue}-{title}";

/// Issue type used when a tracker has no notion of issue types
pub const DEFAULT_ISSUE_TYPE: &str = "issue";

/// Remote that new branches are pushed to
pub const DEFAULT_REMOTE: &str = "origin";

/// Suffix offered when a branch name is already taken
pub const DEFAULT_BRANCH_SUFFIX: &str = "take2";

/// User-Agent header value for tracker API clients
pub const USER_AGENT: &str = concat!("gibr/", env!("CARGO_PKG_VERSION"));

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";
