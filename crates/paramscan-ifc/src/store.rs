// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lazily decoded entity store

use crate::entity::StepEntity;
use crate::scanner::EntityScanner;
use crate::tokenizer::parse_entity;
use log::warn;
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

#[derive(Clone, Debug)]
struct Record {
    start: usize,
    end: usize,
    type_name: String,
}

/// All records of one file, indexed by id and by type
///
/// Records are decoded on first access and cached.
pub struct EntityStore {
    content: String,
    records: FxHashMap<u32, Record>,
    /// Upper-case type name -> ids, in file order
    by_type: FxHashMap<String, Vec<u32>>,
    /// All ids in file order
    order: Vec<u32>,
    cache: RwLock<FxHashMap<u32, Arc<StepEntity>>>,
}

impl EntityStore {
    /// Index `content` without decoding any record
    pub fn new(content: String) -> Self {
        let mut records = FxHashMap::default();
        let mut by_type: FxHashMap<String, Vec<u32>> = FxHashMap::default();
        let mut order = Vec::new();

        for span in EntityScanner::new(&content) {
            let type_name = span.type_name.to_ascii_uppercase();
            by_type.entry(type_name.clone()).or_default().push(span.id);
            order.push(span.id);
            records.insert(
                span.id,
                Record {
                    start: span.start,
                    end: span.end,
                    type_name,
                },
            );
        }

        Self {
            content,
            records,
            by_type,
            order,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All ids in file order
    pub fn ids(&self) -> &[u32] {
        &self.order
    }

    /// Upper-case type name of a record, without decoding it
    pub fn type_name(&self, id: u32) -> Option<&str> {
        self.records.get(&id).map(|r| r.type_name.as_str())
    }

    /// Ids of all records of an (upper-case) type, in file order
    pub fn ids_of_type(&self, type_name: &str) -> &[u32] {
        self.by_type.get(type_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Decoded records of an (upper-case) type, in file order
    pub fn entities_of_type(&self, type_name: &str) -> Vec<Arc<StepEntity>> {
        self.ids_of_type(type_name)
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    /// Decode (or fetch from cache) one record
    ///
    /// Malformed records are logged and treated as absent.
    pub fn get(&self, id: u32) -> Option<Arc<StepEntity>> {
        {
            let cache = self.cache.read().ok()?;
            if let Some(cached) = cache.get(&id) {
                return Some(Arc::clone(cached));
            }
        }

        let record = self.records.get(&id)?;
        let entity = match parse_entity(&self.content[record.start..record.end]) {
            Ok(entity) => Arc::new(entity),
            Err(err) => {
                warn!("Skipping #{} ({}): {}", id, record.type_name, err);
                return None;
            }
        };

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(id, Arc::clone(&entity));
        }
        Some(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "DATA;
#1=IFCWALL('a',$,'Wall 1',$,$,$,$,$);
#2=IFCDOOR('b',$,'Door 1',$,$,$,$,$,2.1,0.9);
#3=IFCWALL('c',$,'Wall 2',$,$,$,$,$);
#4=IFCWALL('d',$,
ENDSEC;
";

    #[test]
    fn test_type_index_keeps_file_order() {
        let store = EntityStore::new(CONTENT.to_string());
        assert_eq!(store.ids_of_type("IFCWALL"), &[1, 3, 4]);
        assert_eq!(store.type_name(2), Some("IFCDOOR"));
        assert!(store.ids_of_type("IFCSLAB").is_empty());
    }

    #[test]
    fn test_get_decodes_and_caches() {
        let store = EntityStore::new(CONTENT.to_string());
        let first = store.get(3).unwrap();
        let second = store.get(3).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.get_str(2), Some("Wall 2"));
        assert!(store.get(99).is_none());
    }

    #[test]
    fn test_malformed_record_is_absent() {
        let store = EntityStore::new(CONTENT.to_string());
        // #4 runs into the next record's terminator and fails to decode
        assert_eq!(store.entities_of_type("IFCWALL").len(), 2);
    }
}
