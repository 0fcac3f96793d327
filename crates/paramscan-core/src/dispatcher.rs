// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applies a match set to the host as a selection or a temporary isolation

use log::info;
use paramscan_model::{HostDocument, MatchSet, Result, ScanMode};
use serde::Serialize;

/// What the dispatcher did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The active view now shows only `count` elements
    Isolated { count: usize },
    /// The host selection was replaced with `count` elements
    Selected { count: usize },
    /// Select mode found nothing; the selection was left as it was
    NothingFound,
}

/// Apply `matches` to the host according to `mode`
///
/// Isolation runs even for an empty set. Selection of an empty set is a
/// no-op on the host.
pub fn dispatch(host: &mut dyn HostDocument, matches: &MatchSet, mode: ScanMode) -> Result<Outcome> {
    match mode {
        ScanMode::Isolate => {
            host.isolate_temporary(matches.ids())?;
            info!("Isolated {} elements in the active view", matches.len());
            Ok(Outcome::Isolated {
                count: matches.len(),
            })
        }
        ScanMode::Select if matches.is_empty() => {
            info!("No elements matched; selection unchanged");
            Ok(Outcome::NothingFound)
        }
        ScanMode::Select => {
            host.set_selection(matches.ids())?;
            info!("Selected {} elements", matches.len());
            Ok(Outcome::Selected {
                count: matches.len(),
            })
        }
    }
}
