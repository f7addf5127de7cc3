//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::compose::ComposeMode;

/// Which dispatch response contract the backend speaks.
///
/// The mode also fixes the composition policy. The flat-id contract comes
/// from the legacy client generation and keeps its drop-empty normalization;
/// the structured-report contract submits batches as-is. The two pairings
/// come from the same two generations of the deployed schema and are never
/// mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Legacy contract: the batch insert returns the flat ordered list of
    /// created row ids.
    FlatIds,

    /// Primary contract: a per-item delivery report with aggregate counts.
    #[default]
    Report,
}

impl DispatchMode {
    /// Composition policy paired with this contract.
    pub fn compose_mode(self) -> ComposeMode {
        match self {
            DispatchMode::FlatIds => ComposeMode::Legacy,
            DispatchMode::Report => ComposeMode::Passthrough,
        }
    }
}

/// Configuration for [`Client`](crate::Client).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Dispatch response contract; defaults to the structured report.
    #[serde(default)]
    pub dispatch_mode: DispatchMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_report() {
        assert_eq!(ClientConfig::default().dispatch_mode, DispatchMode::Report);
    }

    #[test]
    fn test_mode_pairs_with_compose_policy() {
        assert_eq!(DispatchMode::FlatIds.compose_mode(), ComposeMode::Legacy);
        assert_eq!(DispatchMode::Report.compose_mode(), ComposeMode::Passthrough);
    }
}
