// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for host calls and scan requests

use crate::{ElementId, ViewKind};
use thiserror::Error;

/// Result type alias for host calls
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Result type alias for scan requests
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors raised by a host implementation
#[derive(Error, Debug)]
pub enum HostError {
    /// The host rejected an argument
    #[error("{0}")]
    InvalidArgument(String),

    /// Element not known to the host
    #[error("Element {0} not found")]
    ElementNotFound(ElementId),

    /// Failed to load a host document
    #[error("Failed to load document: {0}")]
    Load(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl HostError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        HostError::InvalidArgument(msg.into())
    }

    /// Create a document load error
    pub fn load(msg: impl Into<String>) -> Self {
        HostError::Load(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        HostError::Other(msg.into())
    }
}

/// Errors that abort a scan request
#[derive(Error, Debug)]
pub enum ScanError {
    /// The parameter name field was empty
    #[error("Please enter a Parameter Name before performing the operation.")]
    EmptyParameterName,

    /// The active view kind is not in the allowed set
    #[error("This functionality is restricted to {}.", describe_views(.allowed))]
    ViewRestricted {
        active: ViewKind,
        allowed: Vec<ViewKind>,
    },

    /// A host call failed
    #[error(transparent)]
    Host(#[from] HostError),

    /// Anything else, including a panic caught at the request boundary
    #[error("{0}")]
    Unexpected(String),
}

impl ScanError {
    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        ScanError::Unexpected(msg.into())
    }
}

/// Join plural view labels as "A, B, and C"
pub fn describe_views(views: &[ViewKind]) -> String {
    let labels: Vec<&str> = views.iter().map(|v| v.plural_label()).collect();
    match labels.as_slice() {
        [] => "no views".to_string(),
        [only] => (*only).to_string(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
