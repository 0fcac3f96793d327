// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host capability traits
//!
//! The scanner never talks to a host directly. It only needs to enumerate
//! elements, resolve a type entity, read the active view kind and hand ids
//! back for selection or isolation, so that is all these traits expose.

use crate::{Element, ElementId, HostResult, ViewKind};
use std::sync::Arc;

/// Read access to the host's elements
///
/// # Example
///
/// ```ignore
/// use paramscan_model::ElementSource;
///
/// fn count_typed(source: &dyn ElementSource) -> usize {
///     source
///         .instance_elements()
///         .iter()
///         .filter(|e| e.type_id.and_then(|t| source.element(t)).is_some())
///         .count()
/// }
/// ```
pub trait ElementSource: Send + Sync {
    /// All elements that are not type entities, in host order
    fn instance_elements(&self) -> Vec<Arc<Element>>;

    /// Look up any element (instance or type) by id
    fn element(&self, id: ElementId) -> Option<Arc<Element>>;

    /// Resolve the type entity of an instance
    ///
    /// Returns `None` when the element has no type reference or the
    /// reference does not resolve.
    fn type_of(&self, element: &Element) -> Option<Arc<Element>> {
        element.type_id.and_then(|id| self.element(id))
    }
}

/// The host's active view
pub trait ViewControl: Send + Sync {
    /// Kind of the currently active view
    fn active_view(&self) -> ViewKind;

    /// Temporarily show only the given elements in the active view
    ///
    /// An empty slice isolates to nothing. The isolation stays until the
    /// host's own controls reset it.
    fn isolate_temporary(&mut self, ids: &[ElementId]) -> HostResult<()>;

    /// Elements currently isolated in the active view, if any
    fn temporary_isolation(&self) -> Option<Vec<ElementId>>;
}

/// The host's element selection
pub trait SelectionControl: Send + Sync {
    /// Replace the current selection with exactly these elements
    fn set_selection(&mut self, ids: &[ElementId]) -> HostResult<()>;

    /// Currently selected elements
    fn selection(&self) -> Vec<ElementId>;
}

/// Everything the scanner needs from a host document
///
/// Implemented automatically for any type providing the three capabilities.
pub trait HostDocument: ElementSource + ViewControl + SelectionControl {}

impl<T> HostDocument for T where T: ElementSource + ViewControl + SelectionControl {}
