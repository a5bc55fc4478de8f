//! Engine options
//!
//! One options struct is shared by every engine entry point. Fields missing
//! from a deserialized config fall back to their defaults.
//!
//! # Usage
//!
//! ```rust
//! use unarian::Options;
//!
//! let options = Options::default().with_debug(false).with_max_depth(500);
//! assert!(options.simplify);
//! ```

use serde::{Deserialize, Serialize};

/// Default evaluation stack bound
pub const DEFAULT_MAX_DEPTH: usize = 20_000;

/// Parse and evaluation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Run the simplifier after parsing
    #[serde(default = "default_true")]
    pub simplify: bool,
    /// Let `!` and `@` actually write output
    #[serde(default = "default_true")]
    pub debug: bool,
    /// Maximum number of evaluation frames
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Options {
    fn default() -> Self {
        Self {
            simplify: true,
            debug: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    pub fn with_simplify(
        mut self,
        simplify: bool,
    ) -> Self {
        self.simplify = simplify;
        self
    }

    pub fn with_debug(
        mut self,
        debug: bool,
    ) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth;
        self
    }
}
