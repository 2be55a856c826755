use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::parser::{parse, ParseError};

/// A parsed chemical formula together with its element composition.
///
/// The composition maps each element symbol to the total number of atoms of
/// that element, in the order the symbols first appear in the formula.
/// Every stored count is at least 1. A `Compound` is only built by the
/// parser and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compound {
    formula: String,
    composition: IndexMap<String, u32>,
}

impl Compound {
    pub(crate) fn new(formula: &str, composition: IndexMap<String, u32>) -> Self {
        Self {
            formula: formula.to_string(),
            composition,
        }
    }

    /// The formula exactly as it was given to the parser.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn composition(&self) -> &IndexMap<String, u32> {
        &self.composition
    }

    /// Number of atoms of `symbol`, or 0 if the compound does not contain it.
    pub fn count(&self, symbol: &str) -> u32 {
        self.composition.get(symbol).copied().unwrap_or(0)
    }

    /// Distinct element symbols in first-appearance order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.composition.keys().map(String::as_str)
    }

    pub fn total_atoms(&self) -> u64 {
        self.composition.values().map(|&c| u64::from(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.composition.is_empty()
    }
}

impl FromStr for Compound {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_report_composition() {
        let compound: Compound = "Al2(SO4)3".parse().unwrap();
        assert_eq!(compound.formula(), "Al2(SO4)3");
        assert_eq!(compound.count("Al"), 2);
        assert_eq!(compound.count("S"), 3);
        assert_eq!(compound.count("O"), 12);
        assert_eq!(compound.count("Fe"), 0);
        assert_eq!(compound.total_atoms(), 17);
        assert_eq!(compound.symbols().collect::<Vec<_>>(), ["Al", "S", "O"]);
        assert!(!compound.is_empty());
    }

    #[test]
    fn display_preserves_original_formula() {
        let compound: Compound = "Mg(OH)2".parse().unwrap();
        assert_eq!(compound.to_string(), "Mg(OH)2");
    }

    #[test]
    fn empty_formula_is_empty_compound() {
        let compound: Compound = "".parse().unwrap();
        assert!(compound.is_empty());
        assert_eq!(compound.total_atoms(), 0);
    }

    #[test]
    fn from_str_surfaces_parse_errors() {
        assert!("Mg(OH".parse::<Compound>().is_err());
    }

    #[test]
    fn serializes_formula_and_composition() {
        let compound: Compound = "H2O".parse().unwrap();
        let json = serde_json::to_value(&compound).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "formula": "H2O", "composition": { "H": 2, "O": 1 } })
        );
    }
}
