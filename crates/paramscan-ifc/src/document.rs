// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC file as a scanner host document

use crate::entity::StepEntity;
use crate::properties::{ParameterReader, PropertyIndex};
use crate::scanner::schema_version;
use crate::store::EntityStore;
use crate::units::UnitTable;
use log::{debug, info};
use paramscan_model::{
    Element, ElementId, ElementSource, HostError, HostResult, SelectionControl, ViewControl,
    ViewKind,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Options for opening an IFC document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IfcOptions {
    /// Decimals in float display strings
    pub decimals: usize,
    /// View kind reported as active
    pub active_view: ViewKind,
}

impl Default for IfcOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            active_view: ViewKind::ThreeD,
        }
    }
}

impl IfcOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_active_view(mut self, view: ViewKind) -> Self {
        self.active_view = view;
        self
    }
}

/// Categories of well-known occurrence types: (type, category, spatial)
///
/// Products outside this table are still exposed when a product relation
/// names them; see [`ProductRelations`].
const OCCURRENCE_TYPES: &[(&str, &str, bool)] = &[
    ("IFCWALL", "Walls", false),
    ("IFCWALLSTANDARDCASE", "Walls", false),
    ("IFCWALLELEMENTEDCASE", "Walls", false),
    ("IFCCURTAINWALL", "Curtain Walls", false),
    ("IFCSLAB", "Floors", false),
    ("IFCSLABSTANDARDCASE", "Floors", false),
    ("IFCSLABELEMENTEDCASE", "Floors", false),
    ("IFCROOF", "Roofs", false),
    ("IFCBEAM", "Structural Framing", false),
    ("IFCBEAMSTANDARDCASE", "Structural Framing", false),
    ("IFCCOLUMN", "Columns", false),
    ("IFCCOLUMNSTANDARDCASE", "Columns", false),
    ("IFCMEMBER", "Members", false),
    ("IFCMEMBERSTANDARDCASE", "Members", false),
    ("IFCPLATE", "Plates", false),
    ("IFCPLATESTANDARDCASE", "Plates", false),
    ("IFCFOOTING", "Structural Foundations", false),
    ("IFCPILE", "Piles", false),
    ("IFCDOOR", "Doors", false),
    ("IFCDOORSTANDARDCASE", "Doors", false),
    ("IFCWINDOW", "Windows", false),
    ("IFCWINDOWSTANDARDCASE", "Windows", false),
    ("IFCSTAIR", "Stairs", false),
    ("IFCSTAIRFLIGHT", "Stairs", false),
    ("IFCRAMP", "Ramps", false),
    ("IFCRAMPFLIGHT", "Ramps", false),
    ("IFCRAILING", "Railings", false),
    ("IFCCOVERING", "Coverings", false),
    ("IFCCHIMNEY", "Chimneys", false),
    ("IFCSHADINGDEVICE", "Shading Devices", false),
    ("IFCBUILDINGELEMENTPROXY", "Generic Models", false),
    ("IFCBUILDINGELEMENTPART", "Parts", false),
    ("IFCELEMENTASSEMBLY", "Assemblies", false),
    ("IFCDISCRETEACCESSORY", "Accessories", false),
    ("IFCMECHANICALFASTENER", "Fasteners", false),
    ("IFCREINFORCINGBAR", "Rebar", false),
    ("IFCREINFORCINGMESH", "Rebar", false),
    ("IFCTRANSPORTELEMENT", "Transport Elements", false),
    ("IFCFURNISHINGELEMENT", "Furniture", false),
    ("IFCFURNITURE", "Furniture", false),
    ("IFCSYSTEMFURNITUREELEMENT", "Furniture Systems", false),
    ("IFCLIGHTFIXTURE", "Lighting Fixtures", false),
    ("IFCSANITARYTERMINAL", "Plumbing Fixtures", false),
    ("IFCAIRTERMINAL", "Air Terminals", false),
    ("IFCDUCTSEGMENT", "Ducts", false),
    ("IFCDUCTFITTING", "Duct Fittings", false),
    ("IFCPIPESEGMENT", "Pipes", false),
    ("IFCPIPEFITTING", "Pipe Fittings", false),
    ("IFCFLOWTERMINAL", "Flow Terminals", false),
    ("IFCFLOWSEGMENT", "Flow Segments", false),
    ("IFCFLOWFITTING", "Flow Fittings", false),
    ("IFCFLOWCONTROLLER", "Flow Controllers", false),
    ("IFCFLOWSTORAGEDEVICE", "Flow Storage Devices", false),
    ("IFCFLOWTREATMENTDEVICE", "Flow Treatment Devices", false),
    ("IFCFLOWMOVINGDEVICE", "Mechanical Equipment", false),
    ("IFCENERGYCONVERSIONDEVICE", "Mechanical Equipment", false),
    ("IFCELECTRICAPPLIANCE", "Electrical Equipment", false),
    ("IFCDISTRIBUTIONELEMENT", "Distribution Elements", false),
    ("IFCDISTRIBUTIONCONTROLELEMENT", "Distribution Elements", false),
    ("IFCOPENINGELEMENT", "Openings", false),
    ("IFCOPENINGSTANDARDCASE", "Openings", false),
    ("IFCSITE", "Site", true),
    ("IFCBUILDING", "Buildings", true),
    ("IFCBUILDINGSTOREY", "Levels", true),
    ("IFCSPACE", "Rooms", true),
    ("IFCSPATIALZONE", "Zones", true),
    ("IFCEXTERNALSPATIALELEMENT", "External Spaces", true),
];

fn occurrence_kind(type_name: &str) -> Option<(&'static str, bool)> {
    OCCURRENCE_TYPES
        .iter()
        .find(|(name, _, _)| *name == type_name)
        .map(|(_, category, spatial)| (*category, *spatial))
}

/// Relations whose slots only hold products: (type, first slot, second slot)
const PRODUCT_RELATIONS: &[(&str, usize, usize)] = &[
    ("IFCRELCONTAINEDINSPATIALSTRUCTURE", 4, 5),
    ("IFCRELREFERENCEDINSPATIALSTRUCTURE", 4, 5),
    ("IFCRELAGGREGATES", 4, 5),
    ("IFCRELNESTS", 4, 5),
    ("IFCRELVOIDSELEMENT", 4, 5),
    ("IFCRELFILLSELEMENT", 4, 5),
];

/// Records that must never be exposed even when a relation names them
fn is_non_product(type_name: &str) -> bool {
    matches!(type_name, "IFCPROJECT" | "IFCPROJECTLIBRARY")
        || type_name.starts_with("IFCREL")
        || type_name.starts_with("IFCPROPERTY")
        || type_name.starts_with("IFCQUANTITY")
        || type_name == "IFCELEMENTQUANTITY"
        || type_name.ends_with("TYPE")
        || type_name.ends_with("STYLE")
}

/// Product ids found through the spatial and composition relations
#[derive(Debug, Default)]
struct ProductRelations {
    products: FxHashSet<u32>,
    structures: FxHashSet<u32>,
}

impl ProductRelations {
    fn collect(store: &EntityStore) -> Self {
        let mut relations = Self::default();
        for &(rel_type, first, second) in PRODUCT_RELATIONS {
            for rel in store.entities_of_type(rel_type) {
                relations.products.extend(refs_at(&rel, first));
                relations.products.extend(refs_at(&rel, second));
                if rel_type == "IFCRELCONTAINEDINSPATIALSTRUCTURE" {
                    relations.structures.extend(rel.get_ref(second));
                }
            }
        }
        // IfcRelDefinesByType: only occurrences are typed
        for rel in store.entities_of_type("IFCRELDEFINESBYTYPE") {
            relations.products.extend(rel.get_refs(4));
        }
        relations
    }

    /// Category and spatial flag of a record, if it is an occurrence
    fn classify(&self, id: u32, type_name: &str) -> Option<(String, bool)> {
        if let Some((category, spatial)) = occurrence_kind(type_name) {
            return Some((category.to_string(), spatial));
        }
        if !self.products.contains(&id) || is_non_product(type_name) {
            return None;
        }
        Some((type_category(type_name), self.structures.contains(&id)))
    }
}

/// Ids held by an attribute that is either one reference or a list of them
fn refs_at(entity: &StepEntity, index: usize) -> Vec<u32> {
    match entity.get_ref(index) {
        Some(id) => vec![id],
        None => entity.get_refs(index),
    }
}

/// Readable category from an entity name, e.g. `IFCDOORTYPE` -> `IfcDoorType`
fn type_category(type_name: &str) -> String {
    type_name
        .strip_prefix("IFC")
        .map(|rest| format!("Ifc{}", title_case(rest)))
        .unwrap_or_else(|| type_name.to_string())
}

fn title_case(upper: &str) -> String {
    for suffix in ["TYPE", "STYLE"] {
        if let Some(stem) = upper.strip_suffix(suffix) {
            return format!("{}{}", capitalize(stem), capitalize(suffix));
        }
    }
    capitalize(upper)
}

fn capitalize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// An IFC file with selection and isolation state
///
/// Elements are the product occurrences of the file in file order. Type
/// objects linked through `IfcRelDefinesByType` resolve through
/// [`ElementSource::element`] but are never enumerated.
pub struct IfcDocument {
    schema: Option<String>,
    instances: Vec<Arc<Element>>,
    index: FxHashMap<ElementId, Arc<Element>>,
    active_view: ViewKind,
    selection: Vec<ElementId>,
    isolation: Option<Vec<ElementId>>,
}

impl IfcDocument {
    /// Read and index an IFC file
    pub fn open(path: impl AsRef<Path>, options: IfcOptions) -> HostResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        info!("Opened {} ({} bytes)", path.display(), content.len());
        Self::parse(content, options)
    }

    /// Index IFC content
    pub fn parse(content: impl Into<String>, options: IfcOptions) -> HostResult<Self> {
        let content = content.into();
        if !content
            .trim_start_matches('\u{feff}')
            .trim_start()
            .starts_with("ISO-10303-21")
        {
            return Err(HostError::load("not an ISO-10303-21 (STEP) file"));
        }
        let schema = schema_version(&content);

        let store = EntityStore::new(content);
        if store.is_empty() {
            return Err(HostError::load("file contains no entity records"));
        }

        let units = UnitTable::from_store(&store, options.decimals);
        let properties = PropertyIndex::build(&store);
        let reader = ParameterReader::new(&store, &units, &properties);

        // IfcRelDefinesByType: RelatedObjects at index 4, RelatingType at index 5
        let mut type_of: FxHashMap<u32, u32> = FxHashMap::default();
        let mut index: FxHashMap<ElementId, Arc<Element>> = FxHashMap::default();
        for rel in store.entities_of_type("IFCRELDEFINESBYTYPE") {
            let Some(type_id) = rel.get_ref(5) else {
                continue;
            };
            for related in rel.get_refs(4) {
                type_of.entry(related).or_insert(type_id);
            }

            let key = ElementId::from(type_id);
            if index.contains_key(&key) {
                continue;
            }
            if let Some(entity) = store.get(type_id) {
                let mut element = Element::new(key, type_category(&entity.type_name));
                element.parameters = reader.type_parameters(&entity);
                index.insert(key, Arc::new(element));
            }
        }
        let type_count = index.len();

        let relations = ProductRelations::collect(&store);
        let mut instances = Vec::new();
        for &id in store.ids() {
            // Relating types are already indexed as type objects
            if index.contains_key(&ElementId::from(id)) {
                continue;
            }
            let Some((category, spatial)) = store
                .type_name(id)
                .and_then(|type_name| relations.classify(id, type_name))
            else {
                continue;
            };
            let Some(entity) = store.get(id) else {
                continue;
            };
            let mut element = Element::new(ElementId::from(id), category);
            element.type_id = type_of.get(&id).copied().map(ElementId::from);
            element.parameters = reader.occurrence_parameters(&entity, spatial);

            let element = Arc::new(element);
            index.insert(element.id, Arc::clone(&element));
            instances.push(element);
        }

        debug!(
            "Indexed {} records: {} elements, {} types, schema {}",
            store.len(),
            instances.len(),
            type_count,
            schema.as_deref().unwrap_or("unknown")
        );

        Ok(Self {
            schema,
            instances,
            index,
            active_view: options.active_view,
            selection: Vec::new(),
            isolation: None,
        })
    }

    /// `FILE_SCHEMA` identifier, e.g. `IFC4`
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Number of enumerable elements
    pub fn element_count(&self) -> usize {
        self.instances.len()
    }

    pub fn set_active_view(&mut self, view: ViewKind) {
        self.active_view = view;
    }

    /// Reset the temporary isolation
    pub fn clear_isolation(&mut self) {
        self.isolation = None;
    }

    fn check_known(&self, ids: &[ElementId]) -> HostResult<()> {
        match ids.iter().find(|id| !self.index.contains_key(id)) {
            Some(unknown) => Err(HostError::ElementNotFound(*unknown)),
            None => Ok(()),
        }
    }
}

impl ElementSource for IfcDocument {
    fn instance_elements(&self) -> Vec<Arc<Element>> {
        self.instances.clone()
    }

    fn element(&self, id: ElementId) -> Option<Arc<Element>> {
        self.index.get(&id).cloned()
    }
}

impl ViewControl for IfcDocument {
    fn active_view(&self) -> ViewKind {
        self.active_view
    }

    fn isolate_temporary(&mut self, ids: &[ElementId]) -> HostResult<()> {
        self.check_known(ids)?;
        self.isolation = Some(ids.to_vec());
        Ok(())
    }

    fn temporary_isolation(&self) -> Option<Vec<ElementId>> {
        self.isolation.clone()
    }
}

impl SelectionControl for IfcDocument {
    fn set_selection(&mut self, ids: &[ElementId]) -> HostResult<()> {
        self.check_known(ids)?;
        self.selection = ids.to_vec();
        Ok(())
    }

    fn selection(&self) -> Vec<ElementId> {
        self.selection.clone()
    }
}
