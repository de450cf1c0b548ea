//! Branch names, branch values and commit id arguments

pub mod branch_name;
pub mod revision;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const DEFAULT_BRANCH: &str = "master";
pub const HEADS_PREFIX: &str = "refs/heads/";
