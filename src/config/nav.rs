//! `[nav]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[nav]` section in syllabus.toml - sidebar behaviour.
///
/// # Example
/// ```toml
/// [nav]
/// scroll_reset = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct NavConfig {
    /// Scroll the page to the top on every route change.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub scroll_reset: bool,
}
