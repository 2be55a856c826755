//! Element reference data and the lookup boundary used to resolve symbols.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use thiserror::Error;

/// A chemical element as supplied by an [`ElementLookup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub symbol: String,
    /// Display name; empty when the data source does not track it.
    #[serde(default)]
    pub name: String,
    pub atomic_weight: f64,
}

impl Element {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, atomic_weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            atomic_weight,
        }
    }
}

/// Operational failures of an element data source.
///
/// A symbol that simply is not in the data set is *not* an error; lookups
/// report that as `Ok(None)`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("element lookup I/O failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("element lookup for '{symbol}' failed: {detail}")]
    Backend { symbol: String, detail: String },
}

impl LookupError {
    pub fn backend(symbol: &str, detail: impl Into<String>) -> Self {
        Self::Backend {
            symbol: symbol.to_string(),
            detail: detail.into(),
        }
    }
}

/// Resolves element symbols to [`Element`] records.
///
/// Implementations return `Ok(Some(_))` when the symbol is known, `Ok(None)`
/// when it is absent from the data set, and `Err(_)` only when the data
/// source itself could not be queried.
pub trait ElementLookup {
    fn lookup(&self, symbol: &str) -> Result<Option<Element>, LookupError>;
}

/// Standard atomic weights (IUPAC abridged values; mass number of the most
/// stable isotope for elements without a standard weight).
const PERIODIC_TABLE: [(&str, &str, f64); 118] = [
    ("H", "Hydrogen", 1.008),
    ("He", "Helium", 4.0026),
    ("Li", "Lithium", 6.94),
    ("Be", "Beryllium", 9.0122),
    ("B", "Boron", 10.81),
    ("C", "Carbon", 12.011),
    ("N", "Nitrogen", 14.007),
    ("O", "Oxygen", 15.999),
    ("F", "Fluorine", 18.998),
    ("Ne", "Neon", 20.180),
    ("Na", "Sodium", 22.990),
    ("Mg", "Magnesium", 24.305),
    ("Al", "Aluminium", 26.982),
    ("Si", "Silicon", 28.085),
    ("P", "Phosphorus", 30.974),
    ("S", "Sulfur", 32.06),
    ("Cl", "Chlorine", 35.45),
    ("Ar", "Argon", 39.95),
    ("K", "Potassium", 39.098),
    ("Ca", "Calcium", 40.078),
    ("Sc", "Scandium", 44.956),
    ("Ti", "Titanium", 47.867),
    ("V", "Vanadium", 50.942),
    ("Cr", "Chromium", 51.996),
    ("Mn", "Manganese", 54.938),
    ("Fe", "Iron", 55.845),
    ("Co", "Cobalt", 58.933),
    ("Ni", "Nickel", 58.693),
    ("Cu", "Copper", 63.546),
    ("Zn", "Zinc", 65.38),
    ("Ga", "Gallium", 69.723),
    ("Ge", "Germanium", 72.630),
    ("As", "Arsenic", 74.922),
    ("Se", "Selenium", 78.971),
    ("Br", "Bromine", 79.904),
    ("Kr", "Krypton", 83.798),
    ("Rb", "Rubidium", 85.468),
    ("Sr", "Strontium", 87.62),
    ("Y", "Yttrium", 88.906),
    ("Zr", "Zirconium", 91.224),
    ("Nb", "Niobium", 92.906),
    ("Mo", "Molybdenum", 95.95),
    ("Tc", "Technetium", 97.0),
    ("Ru", "Ruthenium", 101.07),
    ("Rh", "Rhodium", 102.91),
    ("Pd", "Palladium", 106.42),
    ("Ag", "Silver", 107.87),
    ("Cd", "Cadmium", 112.41),
    ("In", "Indium", 114.82),
    ("Sn", "Tin", 118.71),
    ("Sb", "Antimony", 121.76),
    ("Te", "Tellurium", 127.60),
    ("I", "Iodine", 126.90),
    ("Xe", "Xenon", 131.29),
    ("Cs", "Caesium", 132.91),
    ("Ba", "Barium", 137.33),
    ("La", "Lanthanum", 138.91),
    ("Ce", "Cerium", 140.12),
    ("Pr", "Praseodymium", 140.91),
    ("Nd", "Neodymium", 144.24),
    ("Pm", "Promethium", 145.0),
    ("Sm", "Samarium", 150.36),
    ("Eu", "Europium", 151.96),
    ("Gd", "Gadolinium", 157.25),
    ("Tb", "Terbium", 158.93),
    ("Dy", "Dysprosium", 162.50),
    ("Ho", "Holmium", 164.93),
    ("Er", "Erbium", 167.26),
    ("Tm", "Thulium", 168.93),
    ("Yb", "Ytterbium", 173.05),
    ("Lu", "Lutetium", 174.97),
    ("Hf", "Hafnium", 178.49),
    ("Ta", "Tantalum", 180.95),
    ("W", "Tungsten", 183.84),
    ("Re", "Rhenium", 186.21),
    ("Os", "Osmium", 190.23),
    ("Ir", "Iridium", 192.22),
    ("Pt", "Platinum", 195.08),
    ("Au", "Gold", 196.97),
    ("Hg", "Mercury", 200.59),
    ("Tl", "Thallium", 204.38),
    ("Pb", "Lead", 207.2),
    ("Bi", "Bismuth", 208.98),
    ("Po", "Polonium", 209.0),
    ("At", "Astatine", 210.0),
    ("Rn", "Radon", 222.0),
    ("Fr", "Francium", 223.0),
    ("Ra", "Radium", 226.0),
    ("Ac", "Actinium", 227.0),
    ("Th", "Thorium", 232.04),
    ("Pa", "Protactinium", 231.04),
    ("U", "Uranium", 238.03),
    ("Np", "Neptunium", 237.0),
    ("Pu", "Plutonium", 244.0),
    ("Am", "Americium", 243.0),
    ("Cm", "Curium", 247.0),
    ("Bk", "Berkelium", 247.0),
    ("Cf", "Californium", 251.0),
    ("Es", "Einsteinium", 252.0),
    ("Fm", "Fermium", 257.0),
    ("Md", "Mendelevium", 258.0),
    ("No", "Nobelium", 259.0),
    ("Lr", "Lawrencium", 266.0),
    ("Rf", "Rutherfordium", 267.0),
    ("Db", "Dubnium", 268.0),
    ("Sg", "Seaborgium", 269.0),
    ("Bh", "Bohrium", 270.0),
    ("Hs", "Hassium", 269.0),
    ("Mt", "Meitnerium", 278.0),
    ("Ds", "Darmstadtium", 281.0),
    ("Rg", "Roentgenium", 282.0),
    ("Cn", "Copernicium", 285.0),
    ("Nh", "Nihonium", 286.0),
    ("Fl", "Flerovium", 289.0),
    ("Mc", "Moscovium", 290.0),
    ("Lv", "Livermorium", 293.0),
    ("Ts", "Tennessine", 294.0),
    ("Og", "Oganesson", 294.0),
];

/// In-memory element data keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    elements: HashMap<String, Element>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of all 118 elements with their standard atomic weights.
    pub fn standard() -> Self {
        PERIODIC_TABLE
            .iter()
            .map(|&(symbol, name, weight)| Element::new(symbol, name, weight))
            .collect()
    }

    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        elements.into_iter().collect()
    }

    /// Loads a table from a JSON array of elements, e.g.
    /// `[{"symbol": "H", "name": "Hydrogen", "atomic_weight": 1.008}]`.
    ///
    /// Later entries replace earlier ones with the same symbol.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        let elements: Vec<Element> = serde_json::from_reader(reader)?;
        let table = Self::from_elements(elements);
        debug!("loaded element table with {} entries", table.len());
        Ok(table)
    }

    /// Inserts an element, returning the record it replaced.
    pub fn insert(&mut self, element: Element) -> Option<Element> {
        self.elements.insert(element.symbol.clone(), element)
    }

    pub fn get(&self, symbol: &str) -> Option<&Element> {
        self.elements.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Element> for ElementTable {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut table = Self::new();
        for element in iter {
            table.insert(element);
        }
        table
    }
}

impl ElementLookup for ElementTable {
    fn lookup(&self, symbol: &str) -> Result<Option<Element>, LookupError> {
        let found = self.get(symbol).cloned();
        trace!("lookup '{symbol}': found = {}", found.is_some());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standard_table_covers_periodic_table() {
        let table = ElementTable::standard();
        assert_eq!(table.len(), 118);

        let iron = table.lookup("Fe").unwrap().unwrap();
        assert_eq!(iron.name, "Iron");
        assert_relative_eq!(iron.atomic_weight, 55.845);

        let oganesson = table.get("Og").unwrap();
        assert_relative_eq!(oganesson.atomic_weight, 294.0);
    }

    #[test]
    fn unknown_symbol_is_not_an_error() {
        let table = ElementTable::standard();
        assert!(table.lookup("Xx").unwrap().is_none());
        assert!(table.lookup("h").unwrap().is_none());
    }

    #[test]
    fn standard_symbols_are_unique() {
        let mut symbols: Vec<_> = PERIODIC_TABLE.iter().map(|(s, _, _)| *s).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), PERIODIC_TABLE.len());
    }

    #[test]
    fn loads_table_from_json() {
        let json = r#"[
            {"symbol": "H", "name": "Hydrogen", "atomic_weight": 1.008},
            {"symbol": "O", "atomic_weight": 16.0},
            {"symbol": "O", "atomic_weight": 15.999}
        ]"#;
        let table = ElementTable::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let oxygen = table.lookup("O").unwrap().unwrap();
        assert_eq!(oxygen.name, "");
        assert_relative_eq!(oxygen.atomic_weight, 15.999);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ElementTable::from_json_reader("{\"symbol\": 1}".as_bytes()).is_err());
    }

    #[test]
    fn insert_replaces_existing_symbol() {
        let mut table = ElementTable::new();
        assert!(table.is_empty());
        assert!(table.insert(Element::new("C", "Carbon", 12.0)).is_none());
        let previous = table.insert(Element::new("C", "Carbon", 12.011)).unwrap();
        assert_relative_eq!(previous.atomic_weight, 12.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn backend_error_names_symbol() {
        let error = LookupError::backend("Na", "connection refused");
        assert_eq!(
            error.to_string(),
            "element lookup for 'Na' failed: connection refused"
        );
    }
}
