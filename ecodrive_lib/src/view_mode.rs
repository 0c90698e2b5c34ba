use serde::{Deserialize, Serialize};

/// How the history calendar is shown: a fixed week strip or a full month grid.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Weekly,
    Monthly,
}
