// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter extraction from attributes, property sets and quantities

use crate::entity::{StepEntity, StepValue};
use crate::store::EntityStore;
use crate::units::{unit_symbol, UnitKind, UnitTable};
use paramscan_model::{ElementId, Parameter, ParameterValue};
use rustc_hash::FxHashMap;

/// Object id -> property definitions, built from `IfcRelDefinesByProperties`
pub struct PropertyIndex {
    /// Cache: object id -> property set ids, in relation order
    pset_cache: FxHashMap<u32, Vec<u32>>,
    /// Cache: object id -> element quantity ids, in relation order
    qset_cache: FxHashMap<u32, Vec<u32>>,
}

impl PropertyIndex {
    pub fn build(store: &EntityStore) -> Self {
        let mut pset_cache: FxHashMap<u32, Vec<u32>> = FxHashMap::default();
        let mut qset_cache: FxHashMap<u32, Vec<u32>> = FxHashMap::default();

        for rel in store.entities_of_type("IFCRELDEFINESBYPROPERTIES") {
            // RelatedObjects at index 4, RelatingPropertyDefinition at index 5
            let Some(definition_id) = rel.get_ref(5) else {
                continue;
            };
            let cache = match store.type_name(definition_id) {
                Some("IFCPROPERTYSET") => &mut pset_cache,
                Some("IFCELEMENTQUANTITY") => &mut qset_cache,
                _ => continue,
            };
            for related in rel.get_refs(4) {
                cache.entry(related).or_default().push(definition_id);
            }
        }

        Self {
            pset_cache,
            qset_cache,
        }
    }

    pub fn property_sets(&self, object: u32) -> &[u32] {
        self.pset_cache.get(&object).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn quantity_sets(&self, object: u32) -> &[u32] {
        self.qset_cache.get(&object).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Builds host parameters for occurrences and type objects
pub struct ParameterReader<'a> {
    store: &'a EntityStore,
    units: &'a UnitTable,
    index: &'a PropertyIndex,
}

impl<'a> ParameterReader<'a> {
    pub fn new(store: &'a EntityStore, units: &'a UnitTable, index: &'a PropertyIndex) -> Self {
        Self {
            store,
            units,
            index,
        }
    }

    /// Attributes, then properties, then quantities of an occurrence
    ///
    /// Spatial elements expose `LongName` where other products expose `Tag`;
    /// both live at index 7.
    pub fn occurrence_parameters(&self, entity: &StepEntity, spatial: bool) -> Vec<Parameter> {
        let seventh = if spatial { "LongName" } else { "Tag" };
        let mut parameters: Vec<Parameter> = [
            ("GlobalId", 0),
            ("Name", 2),
            ("Description", 3),
            ("ObjectType", 4),
            (seventh, 7),
        ]
        .into_iter()
        .map(|(name, index)| text_attribute(entity, name, index))
        .collect();

        for pset in self.index.property_sets(entity.id) {
            self.push_definition(*pset, &mut parameters);
        }
        for qset in self.index.quantity_sets(entity.id) {
            self.push_definition(*qset, &mut parameters);
        }
        parameters
    }

    /// `Name`, `Description`, then the type's own property sets
    ///
    /// IfcTypeObject keeps HasPropertySets at index 5.
    pub fn type_parameters(&self, entity: &StepEntity) -> Vec<Parameter> {
        let mut parameters = vec![
            text_attribute(entity, "Name", 2),
            text_attribute(entity, "Description", 3),
        ];
        for definition in entity.get_refs(5) {
            self.push_definition(definition, &mut parameters);
        }
        parameters
    }

    fn push_definition(&self, id: u32, parameters: &mut Vec<Parameter>) {
        let Some(definition) = self.store.get(id) else {
            return;
        };
        match definition.type_name.as_str() {
            // HasProperties at index 4
            "IFCPROPERTYSET" => parameters.extend(
                definition
                    .get_refs(4)
                    .into_iter()
                    .filter_map(|p| self.store.get(p))
                    .map(|p| self.property(&p)),
            ),
            // Quantities at index 5
            "IFCELEMENTQUANTITY" => parameters.extend(
                definition
                    .get_refs(5)
                    .into_iter()
                    .filter_map(|q| self.store.get(q))
                    .map(|q| self.quantity(&q)),
            ),
            _ => {}
        }
    }

    /// One `IfcProperty`; the name is always at index 0
    fn property(&self, prop: &StepEntity) -> Parameter {
        let value = match prop.type_name.as_str() {
            // NominalValue at index 2, Unit at index 3
            "IFCPROPERTYSINGLEVALUE" => {
                let symbol = self.explicit_symbol(prop.get_ref(3));
                prop.get(2)
                    .map(|v| self.convert(v, symbol.as_deref()))
                    .unwrap_or(ParameterValue::Text(None))
            }
            // EnumerationValues at index 2
            "IFCPROPERTYENUMERATEDVALUE" => match prop.get(2).and_then(StepValue::as_list) {
                Some(items) => ParameterValue::Text(Some(
                    items
                        .iter()
                        .map(|v| self.plain_text(v))
                        .collect::<Vec<_>>()
                        .join(", "),
                )),
                None => ParameterValue::Text(None),
            },
            // PropertyReference at index 3
            "IFCPROPERTYREFERENCEVALUE" => match prop.get_ref(3) {
                Some(id) => ParameterValue::ReferenceId(ElementId::from(id)),
                None => ParameterValue::Unsupported,
            },
            _ => ParameterValue::Unsupported,
        };
        named(prop.get_str(0), value)
    }

    /// One physical simple quantity: Unit at index 2, value at index 3
    fn quantity(&self, quantity: &StepEntity) -> Parameter {
        let value = match quantity.get_f64(3) {
            // Counts are whole numbers even when written as `2.`
            Some(number) if quantity.is("IFCQUANTITYCOUNT") => {
                ParameterValue::Integer(number.round() as i64)
            }
            Some(number) => {
                let display = match self.explicit_symbol(quantity.get_ref(2)) {
                    Some(symbol) => self.units.format_with_symbol(number, Some(symbol.as_str())),
                    None => self
                        .units
                        .format(number, UnitKind::from_quantity(&quantity.type_name)),
                };
                ParameterValue::Float {
                    value: number,
                    display: Some(display),
                }
            }
            None => ParameterValue::Unsupported,
        };
        named(quantity.get_str(0), value)
    }

    fn explicit_symbol(&self, unit: Option<u32>) -> Option<String> {
        unit.and_then(|id| self.store.get(id))
            .and_then(|entity| unit_symbol(&entity))
    }

    /// Map a nominal value onto a storage kind
    fn convert(&self, value: &StepValue, symbol: Option<&str>) -> ParameterValue {
        match value {
            StepValue::Null | StepValue::Derived => ParameterValue::Text(None),
            StepValue::String(s) => ParameterValue::text(s.as_str()),
            StepValue::Enum(e) => ParameterValue::text(e.as_str()),
            StepValue::Integer(i) => ParameterValue::Integer(*i),
            StepValue::Float(f) => self.float(*f, None, symbol),
            StepValue::Ref(_) | StepValue::List(_) => ParameterValue::Unsupported,
            StepValue::Typed(type_name, inner) => match (type_name.as_str(), &**inner) {
                ("IFCBOOLEAN" | "IFCLOGICAL", StepValue::Enum(flag)) => match flag.as_str() {
                    "T" => ParameterValue::Integer(1),
                    "F" => ParameterValue::Integer(0),
                    _ => ParameterValue::Unsupported,
                },
                ("IFCINTEGER" | "IFCCOUNTMEASURE", StepValue::Integer(i)) => {
                    ParameterValue::Integer(*i)
                }
                (_, StepValue::String(s)) => ParameterValue::text(s.as_str()),
                (_, inner) => match inner.as_f64() {
                    Some(number) => self.float(number, UnitKind::from_measure(type_name), symbol),
                    None => ParameterValue::Unsupported,
                },
            },
        }
    }

    fn float(&self, value: f64, kind: Option<UnitKind>, symbol: Option<&str>) -> ParameterValue {
        let display = match symbol {
            Some(symbol) => self.units.format_with_symbol(value, Some(symbol)),
            None => self.units.format(value, kind),
        };
        ParameterValue::Float {
            value,
            display: Some(display),
        }
    }

    /// Text of one enumeration item
    fn plain_text(&self, value: &StepValue) -> String {
        match self.convert(value, None) {
            ParameterValue::Text(text) => text.unwrap_or_default(),
            ParameterValue::Integer(i) => i.to_string(),
            ParameterValue::Float { display, .. } => display.unwrap_or_default(),
            ParameterValue::ReferenceId(id) => id.integer_value().to_string(),
            ParameterValue::Unsupported => String::new(),
        }
    }
}

fn text_attribute(entity: &StepEntity, name: &str, index: usize) -> Parameter {
    Parameter::new(name, ParameterValue::Text(entity.get_str(index).map(str::to_string)))
}

/// Properties with an empty name have no usable definition
fn named(name: Option<&str>, value: ParameterValue) -> Parameter {
    match name {
        Some(name) if !name.is_empty() => Parameter::new(name, value),
        _ => Parameter::without_definition(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WALL: &str = "DATA;
#1=IFCWALL('0abc',$,'Basic Wall',$,'Generic - 200',$,$,'W-12');
#10=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#1),#11);
#11=IFCPROPERTYSET('ps',$,'Pset_WallCommon',$,(#12,#13,#14,#15,#16,#17));
#12=IFCPROPERTYSINGLEVALUE('IsExternal',$,IFCBOOLEAN(.T.),$);
#13=IFCPROPERTYSINGLEVALUE('FireRating',$,IFCLABEL('2HR'),$);
#14=IFCPROPERTYENUMERATEDVALUE('Status',$,(IFCLABEL('New'),IFCLABEL('Temporary')),$);
#15=IFCPROPERTYREFERENCEVALUE('Host',$,$,#1);
#16=IFCPROPERTYBOUNDEDVALUE('Range',$,IFCREAL(2.),IFCREAL(1.),$,$);
#17=IFCPROPERTYSINGLEVALUE('Thickness',$,IFCLENGTHMEASURE(0.2),#30);
#20=IFCRELDEFINESBYPROPERTIES('r2',$,$,$,(#1),#21);
#21=IFCELEMENTQUANTITY('q',$,'Qto_WallBaseQuantities',$,$,(#22,#23));
#22=IFCQUANTITYAREA('NetSideArea',$,$,12.5,$);
#23=IFCQUANTITYCOUNT('Openings',$,$,2.,$);
#30=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
ENDSEC;
";

    fn wall_parameters() -> Vec<Parameter> {
        let store = EntityStore::new(WALL.to_string());
        let units = UnitTable::new(2);
        let index = PropertyIndex::build(&store);
        let reader = ParameterReader::new(&store, &units, &index);
        let wall = store.get(1).unwrap();
        reader.occurrence_parameters(&wall, false)
    }

    fn value_of<'p>(parameters: &'p [Parameter], name: &str) -> &'p ParameterValue {
        &parameters
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .unwrap()
            .value
    }

    #[test]
    fn test_parameter_order() {
        let names: Vec<String> = wall_parameters()
            .into_iter()
            .filter_map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "GlobalId",
                "Name",
                "Description",
                "ObjectType",
                "Tag",
                "IsExternal",
                "FireRating",
                "Status",
                "Host",
                "Range",
                "Thickness",
                "NetSideArea",
                "Openings",
            ]
        );
    }

    #[test]
    fn test_storage_mapping() {
        let parameters = wall_parameters();
        assert_eq!(value_of(&parameters, "Description"), &ParameterValue::Text(None));
        assert_eq!(value_of(&parameters, "Tag"), &ParameterValue::text("W-12"));
        assert_eq!(value_of(&parameters, "IsExternal"), &ParameterValue::Integer(1));
        assert_eq!(value_of(&parameters, "FireRating"), &ParameterValue::text("2HR"));
        assert_eq!(
            value_of(&parameters, "Status"),
            &ParameterValue::text("New, Temporary")
        );
        assert_eq!(
            value_of(&parameters, "Host"),
            &ParameterValue::ReferenceId(ElementId(1))
        );
        assert_eq!(value_of(&parameters, "Range"), &ParameterValue::Unsupported);
    }

    #[test]
    fn test_measured_values_carry_units() {
        let parameters = wall_parameters();
        assert_eq!(
            value_of(&parameters, "Thickness"),
            &ParameterValue::float(0.2, "0.20 mm")
        );
        assert_eq!(
            value_of(&parameters, "NetSideArea"),
            &ParameterValue::float(12.5, "12.50 m²")
        );
    }

    #[test]
    fn test_counts_are_integers() {
        let parameters = wall_parameters();
        assert_eq!(value_of(&parameters, "Openings"), &ParameterValue::Integer(2));
    }

    #[test]
    fn test_type_parameters() {
        let content = "DATA;
#1=IFCDOORTYPE('t',$,'Single Flush',$,$,(#2),$,$,$,.DOOR.,.SINGLE_SWING_LEFT.,$,$);
#2=IFCPROPERTYSET('ps',$,'Pset_DoorCommon',$,(#3));
#3=IFCPROPERTYSINGLEVALUE('Manufacturer',$,IFCLABEL('Acme Doors'),$);
ENDSEC;
";
        let store = EntityStore::new(content.to_string());
        let units = UnitTable::new(2);
        let index = PropertyIndex::build(&store);
        let reader = ParameterReader::new(&store, &units, &index);
        let parameters = reader.type_parameters(&store.get(1).unwrap());
        assert_eq!(
            parameters,
            vec![
                Parameter::new("Name", ParameterValue::text("Single Flush")),
                Parameter::new("Description", ParameterValue::Text(None)),
                Parameter::new("Manufacturer", ParameterValue::text("Acme Doors")),
            ]
        );
    }
}
