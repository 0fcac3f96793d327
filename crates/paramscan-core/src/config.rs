// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scanner configuration

use paramscan_model::ViewKind;
use serde::{Deserialize, Serialize};

/// Policy settings for [`ParameterScanner`](crate::ParameterScanner)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// View kinds in which scanning is permitted
    #[serde(default = "default_allowed_views")]
    pub allowed_views: Vec<ViewKind>,
}

fn default_allowed_views() -> Vec<ViewKind> {
    vec![ViewKind::FloorPlan, ViewKind::CeilingPlan, ViewKind::ThreeD]
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            allowed_views: default_allowed_views(),
        }
    }
}

impl ScannerConfig {
    /// Create the default configuration (plans, ceiling plans and 3D views)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the allowed view kinds
    pub fn with_allowed_views(mut self, views: impl IntoIterator<Item = ViewKind>) -> Self {
        self.allowed_views = views.into_iter().collect();
        self
    }

    /// Whether scanning may run in `view`
    pub fn is_view_allowed(&self, view: ViewKind) -> bool {
        self.allowed_views.contains(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::new();
        assert!(config.is_view_allowed(ViewKind::FloorPlan));
        assert!(config.is_view_allowed(ViewKind::CeilingPlan));
        assert!(config.is_view_allowed(ViewKind::ThreeD));
        assert!(!config.is_view_allowed(ViewKind::Section));
    }

    #[test]
    fn test_override() {
        let config = ScannerConfig::new().with_allowed_views([ViewKind::Section]);
        assert!(config.is_view_allowed(ViewKind::Section));
        assert!(!config.is_view_allowed(ViewKind::ThreeD));
    }
}
