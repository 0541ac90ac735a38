//! Build identification, fixed at compile time.
//!
//! Set these when building the application to stamp a release:
//!
//! ```text
//! RANKFIG_BUILD_ID=v1.2.0 \
//! RANKFIG_COMMIT_HASH=$(git rev-parse HEAD) \
//! RANKFIG_BUILD_TIME=$(date +%Y/%m/%d-%H:%M:%S) \
//! cargo build --release
//! ```

/// Used when a build identifier was not provided.
pub const DEV: &str = "dev";

/// Used when the commit or build time was not provided.
pub const UNSET: &str = "<unset>";

pub const IDENTIFIER: &str = match option_env!("RANKFIG_BUILD_ID") {
    Some(id) => id,
    None => DEV,
};

pub const COMMIT_HASH: &str = match option_env!("RANKFIG_COMMIT_HASH") {
    Some(hash) => hash,
    None => UNSET,
};

pub const BUILD_TIME: &str = match option_env!("RANKFIG_BUILD_TIME") {
    Some(time) => time,
    None => UNSET,
};

/// `<identifier> [<commit>] (built: <time>)`.
pub fn build() -> String {
    format(IDENTIFIER, COMMIT_HASH, BUILD_TIME)
}

fn format(identifier: &str, commit: &str, time: &str) -> String {
    format!("{identifier} [{commit}] (built: {time})")
}
