// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host document
//!
//! Stands in for a real host in tests and demos. It records selection and
//! isolation calls, counts element enumerations, and can be told to fail a
//! host call so error reporting can be exercised.

use paramscan_model::{
    Element, ElementId, ElementSource, HostError, HostResult, SelectionControl, ViewControl,
    ViewKind,
};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Host call that [`MemoryDocument`] can be told to fail
#[derive(Clone, Debug, PartialEq)]
pub enum Failure {
    /// `set_selection` returns `HostError::InvalidArgument`
    RejectSelection(String),
    /// `isolate_temporary` returns `HostError::Other`
    RejectIsolation(String),
    /// `instance_elements` panics
    PanicOnEnumerate(String),
}

/// Host document backed by plain vectors
pub struct MemoryDocument {
    instances: Vec<Arc<Element>>,
    index: FxHashMap<ElementId, Arc<Element>>,
    active_view: ViewKind,
    selection: Vec<ElementId>,
    isolation: Option<Vec<ElementId>>,
    failure: Option<Failure>,
    enumerations: AtomicUsize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create an empty document with a 3D view active
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            index: FxHashMap::default(),
            active_view: ViewKind::ThreeD,
            selection: Vec::new(),
            isolation: None,
            failure: None,
            enumerations: AtomicUsize::new(0),
        }
    }

    /// Set the active view kind
    pub fn with_view(mut self, view: ViewKind) -> Self {
        self.active_view = view;
        self
    }

    /// Add an instance element
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id;
        let element = Arc::new(element);
        self.index.insert(id, element.clone());
        self.instances.push(element);
        id
    }

    /// Add a type entity (resolvable, never enumerated)
    pub fn add_type(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.index.insert(id, Arc::new(element));
        id
    }

    /// Change the active view kind
    pub fn set_active_view(&mut self, view: ViewKind) {
        self.active_view = view;
    }

    /// Make a host call fail from now on
    pub fn fail_with(&mut self, failure: Failure) {
        self.failure = Some(failure);
    }

    /// Stop failing host calls
    pub fn clear_failure(&mut self) {
        self.failure = None;
    }

    /// Reset the temporary isolation, as the host's own controls would
    pub fn clear_isolation(&mut self) {
        self.isolation = None;
    }

    /// How many times the elements were enumerated
    pub fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::Relaxed)
    }
}

impl ElementSource for MemoryDocument {
    fn instance_elements(&self) -> Vec<Arc<Element>> {
        self.enumerations.fetch_add(1, Ordering::Relaxed);
        if let Some(Failure::PanicOnEnumerate(msg)) = &self.failure {
            panic!("{}", msg);
        }
        self.instances.clone()
    }

    fn element(&self, id: ElementId) -> Option<Arc<Element>> {
        self.index.get(&id).cloned()
    }
}

impl ViewControl for MemoryDocument {
    fn active_view(&self) -> ViewKind {
        self.active_view
    }

    fn isolate_temporary(&mut self, ids: &[ElementId]) -> HostResult<()> {
        if let Some(Failure::RejectIsolation(msg)) = &self.failure {
            return Err(HostError::other(msg.clone()));
        }
        self.isolation = Some(ids.to_vec());
        Ok(())
    }

    fn temporary_isolation(&self) -> Option<Vec<ElementId>> {
        self.isolation.clone()
    }
}

impl SelectionControl for MemoryDocument {
    fn set_selection(&mut self, ids: &[ElementId]) -> HostResult<()> {
        if let Some(Failure::RejectSelection(msg)) = &self.failure {
            return Err(HostError::invalid_argument(msg.clone()));
        }
        if let Some(unknown) = ids.iter().find(|id| !self.index.contains_key(id)) {
            return Err(HostError::ElementNotFound(*unknown));
        }
        self.selection = ids.to_vec();
        Ok(())
    }

    fn selection(&self) -> Vec<ElementId> {
        self.selection.clone()
    }
}
