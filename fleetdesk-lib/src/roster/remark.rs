use chrono::{DateTime, Utc};
use getset::{CopyGetters, Getters};

/// A free-text note attached to a driver. Remarks are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Remark {
    #[getset(get = "pub")]
    text: String,
    /// When the remark was added
    #[getset(get_copy = "pub")]
    date: DateTime<Utc>,
}

impl Remark {
    pub(super) fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            date: Utc::now(),
        }
    }
}
