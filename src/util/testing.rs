// src/util/testing.rs

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{ENV_DEFAULT_SORT, ENV_STORE_PATH};
use crate::domain::clock::MILLIS_PER_DAY;
use crate::domain::tree::TreeNode;

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    /// Snapshot used by the integration tests
    pub snapshot_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            snapshot_path: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests/resources/bookmarks.json"),
        }
    }
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once and sets up logging.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        let data = TestEnv::new();
        setup_test_logging();
        info!("Test environment initialized");
        data
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["mio", "tokio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the `BOOKMARKX_*` environment variables on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    store_path: Option<String>,
    default_sort: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            store_path: env::var(ENV_STORE_PATH).ok(),
            default_sort: env::var(ENV_DEFAULT_SORT).ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var(ENV_STORE_PATH);
        env::remove_var(ENV_DEFAULT_SORT);
        if let Some(val) = &self.store_path {
            env::set_var(ENV_STORE_PATH, val);
        }
        if let Some(val) = &self.default_sort {
            env::set_var(ENV_DEFAULT_SORT, val);
        }
    }
}

/// "now" used by the fixtures: day 1000 after the epoch
pub const TEST_NOW: i64 = 1000 * MILLIS_PER_DAY;

/// Milliseconds timestamp `days` before [`TEST_NOW`]
pub fn days_ago(days: i64) -> i64 {
    TEST_NOW - days * MILLIS_PER_DAY
}

/// A browser-like forest:
///
/// ```text
/// "" (0)
/// ├── Bookmarks Bar (1)
/// │   ├── Rust Book          doc.rust-lang.org   1 day ago
/// │   ├── Work (10)
/// │   │   ├── Issue Tracker  github.com          3 days ago
/// │   │   └── Reviews (11)
/// │   │       └── Pull Requests github.com       20 days ago
/// │   └── News (12)
/// │       └── Hacker News    news.ycombinator    400 days ago
/// └── Other Bookmarks (2)
///     ├── Crates             crates.io           10 days ago
///     └── Broken             not a url           2 days ago
/// ```
pub fn sample_forest() -> Vec<TreeNode> {
    vec![TreeNode::folder(
        "0",
        "",
        vec![
            TreeNode::folder(
                "1",
                "Bookmarks Bar",
                vec![
                    TreeNode::leaf("20", "Rust Book", "https://doc.rust-lang.org/book/", days_ago(1)),
                    TreeNode::folder(
                        "10",
                        "Work",
                        vec![
                            TreeNode::leaf(
                                "21",
                                "Issue Tracker",
                                "https://github.com/rust-lang/rust/issues",
                                days_ago(3),
                            ),
                            TreeNode::folder(
                                "11",
                                "Reviews",
                                vec![TreeNode::leaf(
                                    "22",
                                    "Pull Requests",
                                    "https://github.com/pulls",
                                    days_ago(20),
                                )],
                            ),
                        ],
                    ),
                    TreeNode::folder(
                        "12",
                        "News",
                        vec![TreeNode::leaf(
                            "23",
                            "Hacker News",
                            "https://news.ycombinator.com/",
                            days_ago(400),
                        )],
                    ),
                ],
            ),
            TreeNode::folder(
                "2",
                "Other Bookmarks",
                vec![
                    TreeNode::leaf("24", "Crates", "https://crates.io/", days_ago(10)),
                    TreeNode::leaf("25", "Broken", "not a url", days_ago(2)),
                ],
            ),
        ],
    )]
}
