// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project units and display strings for measured values

use crate::entity::StepEntity;
use crate::store::EntityStore;
use log::debug;
use rustc_hash::FxHashMap;

/// Unit kinds that carry a display symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Length,
    Area,
    Volume,
    PlaneAngle,
    Mass,
    Time,
}

impl UnitKind {
    /// Kind from an `IfcUnitEnum` value such as `LENGTHUNIT`
    pub fn from_unit_type(unit_type: &str) -> Option<Self> {
        match unit_type {
            "LENGTHUNIT" => Some(UnitKind::Length),
            "AREAUNIT" => Some(UnitKind::Area),
            "VOLUMEUNIT" => Some(UnitKind::Volume),
            "PLANEANGLEUNIT" => Some(UnitKind::PlaneAngle),
            "MASSUNIT" => Some(UnitKind::Mass),
            "TIMEUNIT" => Some(UnitKind::Time),
            _ => None,
        }
    }

    /// Kind implied by a measure type name such as `IFCAREAMEASURE`
    pub fn from_measure(type_name: &str) -> Option<Self> {
        match type_name {
            "IFCLENGTHMEASURE" | "IFCPOSITIVELENGTHMEASURE" | "IFCNONNEGATIVELENGTHMEASURE" => {
                Some(UnitKind::Length)
            }
            "IFCAREAMEASURE" => Some(UnitKind::Area),
            "IFCVOLUMEMEASURE" => Some(UnitKind::Volume),
            "IFCPLANEANGLEMEASURE" | "IFCPOSITIVEPLANEANGLEMEASURE" => Some(UnitKind::PlaneAngle),
            "IFCMASSMEASURE" => Some(UnitKind::Mass),
            "IFCTIMEMEASURE" => Some(UnitKind::Time),
            _ => None,
        }
    }

    /// Kind of a physical quantity entity such as `IFCQUANTITYAREA`
    pub fn from_quantity(type_name: &str) -> Option<Self> {
        match type_name {
            "IFCQUANTITYLENGTH" => Some(UnitKind::Length),
            "IFCQUANTITYAREA" => Some(UnitKind::Area),
            "IFCQUANTITYVOLUME" => Some(UnitKind::Volume),
            "IFCQUANTITYWEIGHT" => Some(UnitKind::Mass),
            "IFCQUANTITYTIME" => Some(UnitKind::Time),
            _ => None,
        }
    }

    /// Symbol used when the project assigns no unit of this kind
    fn default_symbol(self) -> &'static str {
        match self {
            UnitKind::Length => "m",
            UnitKind::Area => "m²",
            UnitKind::Volume => "m³",
            UnitKind::PlaneAngle => "rad",
            UnitKind::Mass => "kg",
            UnitKind::Time => "s",
        }
    }
}

fn si_prefix(prefix: &str) -> &'static str {
    match prefix {
        "EXA" => "E",
        "PETA" => "P",
        "TERA" => "T",
        "GIGA" => "G",
        "MEGA" => "M",
        "KILO" => "k",
        "HECTO" => "h",
        "DECA" => "da",
        "DECI" => "d",
        "CENTI" => "c",
        "MILLI" => "m",
        "MICRO" => "µ",
        "NANO" => "n",
        "PICO" => "p",
        "FEMTO" => "f",
        "ATTO" => "a",
        _ => "",
    }
}

/// IFCSIUNIT(*, UnitType, Prefix, Name)
fn si_symbol(unit: &StepEntity) -> Option<String> {
    let prefix = unit.get_enum(2).map(si_prefix).unwrap_or("");
    let name = unit.get_enum(3)?;
    let base = match name {
        "METRE" => "m",
        "SQUARE_METRE" => "m²",
        "CUBIC_METRE" => "m³",
        "GRAM" => "g",
        "SECOND" => "s",
        "RADIAN" => "rad",
        "STERADIAN" => "sr",
        "KELVIN" => "K",
        "AMPERE" => "A",
        other => return Some(format!("{}{}", prefix, other.to_ascii_lowercase())),
    };
    Some(format!("{}{}", prefix, base))
}

/// IFCCONVERSIONBASEDUNIT(Dimensions, UnitType, Name, ConversionFactor)
fn conversion_symbol(unit: &StepEntity) -> Option<String> {
    let name = unit.get_str(2)?.trim().to_ascii_uppercase().replace('_', " ");
    let symbol = match name.as_str() {
        "INCH" => "in",
        "FOOT" => "ft",
        "YARD" => "yd",
        "MILE" => "mi",
        "SQUARE INCH" => "in²",
        "SQUARE FOOT" => "SF",
        "SQUARE YARD" => "yd²",
        "ACRE" => "ac",
        "CUBIC INCH" => "in³",
        "CUBIC FOOT" => "CF",
        "CUBIC YARD" => "yd³",
        "GALLON US" | "GALLON" => "gal",
        "DEGREE" => "°",
        "POUND" => "lb",
        "TON US" => "ton",
        "MINUTE" => "min",
        "HOUR" => "h",
        "DAY" => "d",
        _ => return Some(name.to_ascii_lowercase()),
    };
    Some(symbol.to_string())
}

/// Display symbol of a named unit entity, if it is one we understand
pub fn unit_symbol(unit: &StepEntity) -> Option<String> {
    match unit.type_name.as_str() {
        "IFCSIUNIT" => si_symbol(unit),
        "IFCCONVERSIONBASEDUNIT" | "IFCCONVERSIONBASEDUNITWITHOFFSET" => conversion_symbol(unit),
        _ => None,
    }
}

/// Unit kind declared by a named unit entity
fn unit_kind(unit: &StepEntity) -> Option<UnitKind> {
    unit.get_enum(1).and_then(UnitKind::from_unit_type)
}

/// Project-wide unit symbols and display precision
#[derive(Clone, Debug)]
pub struct UnitTable {
    symbols: FxHashMap<UnitKind, String>,
    decimals: usize,
}

impl UnitTable {
    /// Table with SI defaults only
    pub fn new(decimals: usize) -> Self {
        Self {
            symbols: FxHashMap::default(),
            decimals,
        }
    }

    /// Read the first project's unit assignment
    ///
    /// IFCPROJECT has UnitsInContext at index 8; IFCUNITASSIGNMENT lists the
    /// units at index 0.
    pub fn from_store(store: &EntityStore, decimals: usize) -> Self {
        let mut table = Self::new(decimals);

        let Some(project) = store.entities_of_type("IFCPROJECT").into_iter().next() else {
            debug!("No IFCPROJECT, using SI unit symbols");
            return table;
        };
        let Some(assignment) = project.get_ref(8).and_then(|id| store.get(id)) else {
            return table;
        };

        for unit in assignment.get_refs(0).into_iter().filter_map(|id| store.get(id)) {
            if let (Some(kind), Some(symbol)) = (unit_kind(&unit), unit_symbol(&unit)) {
                debug!("Unit {:?} -> {}", kind, symbol);
                table.symbols.insert(kind, symbol);
            }
        }

        table
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Symbol for a unit kind, falling back to the SI default
    pub fn symbol(&self, kind: UnitKind) -> &str {
        self.symbols
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_symbol())
    }

    /// `{value} {symbol}` with the configured number of decimals
    pub fn format(&self, value: f64, kind: Option<UnitKind>) -> String {
        match kind {
            Some(kind) => self.format_with_symbol(value, Some(self.symbol(kind))),
            None => self.format_with_symbol(value, None),
        }
    }

    /// Like [`format`](Self::format) with an explicit symbol
    pub fn format_with_symbol(&self, value: f64, symbol: Option<&str>) -> String {
        match symbol {
            Some(symbol) => format!("{:.*} {}", self.decimals, value, symbol),
            None => format!("{:.*}", self.decimals, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::parse_entity;

    const IMPERIAL: &str = "DATA;
#1=IFCPROJECT('p',$,'Project',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3,#4,#5));
#3=IFCCONVERSIONBASEDUNIT(#10,.LENGTHUNIT.,'FOOT',#11);
#4=IFCCONVERSIONBASEDUNIT(#12,.AREAUNIT.,'SQUARE FOOT',#13);
#5=IFCSIUNIT(*,.MASSUNIT.,.KILO.,.GRAM.);
ENDSEC;
";

    #[test]
    fn test_project_units() {
        let store = EntityStore::new(IMPERIAL.to_string());
        let units = UnitTable::from_store(&store, 2);
        assert_eq!(units.symbol(UnitKind::Length), "ft");
        assert_eq!(units.symbol(UnitKind::Area), "SF");
        assert_eq!(units.symbol(UnitKind::Mass), "kg");
        assert_eq!(units.symbol(UnitKind::Volume), "m³");
        assert_eq!(units.format(120.5, Some(UnitKind::Area)), "120.50 SF");
    }

    #[test]
    fn test_no_project_uses_si() {
        let store = EntityStore::new("DATA;\nENDSEC;\n".to_string());
        let units = UnitTable::from_store(&store, 3);
        assert_eq!(units.format(2.0, Some(UnitKind::Length)), "2.000 m");
        assert_eq!(units.format(0.5, None), "0.500");
    }

    #[test]
    fn test_si_prefixes() {
        let unit = parse_entity("#3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);").unwrap();
        assert_eq!(unit_symbol(&unit).as_deref(), Some("mm"));
        let unit = parse_entity("#4=IFCSIUNIT(*,.AREAUNIT.,$,.SQUARE_METRE.);").unwrap();
        assert_eq!(unit_symbol(&unit).as_deref(), Some("m²"));
    }

    #[test]
    fn test_measure_kinds() {
        assert_eq!(UnitKind::from_measure("IFCPOSITIVELENGTHMEASURE"), Some(UnitKind::Length));
        assert_eq!(UnitKind::from_measure("IFCLABEL"), None);
        assert_eq!(UnitKind::from_quantity("IFCQUANTITYWEIGHT"), Some(UnitKind::Mass));
        assert_eq!(UnitKind::from_quantity("IFCQUANTITYCOUNT"), None);
    }
}
