use serde::Serialize;
use std::collections::HashSet;

use crate::compound::Compound;
use crate::element::Element;

/// One element's share of a compound's molar mass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementContribution {
    pub symbol: String,
    pub name: String,
    pub atom_count: u32,
    /// `atom_count * atomic_weight`, in g/mol.
    pub weight_in_compound: f64,
    /// Share of the molar mass in percent; 0 when the molar mass is 0.
    pub weight_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MolarMassResult {
    /// Molar mass of the compound (sum of all contributions), in g/mol.
    pub aggregate_weight: f64,
    /// Contributions in the order the elements were supplied.
    pub elements: Vec<ElementContribution>,
}

/// Computes the molar mass of `compound` and each element's contribution.
///
/// `elements` are the already-resolved records for the compound's symbols and
/// are reported in the order given. An element whose symbol does not occur in
/// the compound is reported with zero atoms; a repeated symbol is only counted
/// once. Symbols of the compound with no matching element contribute nothing.
///
/// # Examples
/// ```
/// use molar_mass::{compute, parse, Element};
///
/// let compound = parse("O2").unwrap();
/// let result = compute(&compound, &[Element::new("O", "Oxygen", 16.0)]);
/// assert_eq!(result.aggregate_weight, 32.0);
/// assert_eq!(result.elements[0].weight_percent, 100.0);
/// ```
pub fn compute(compound: &Compound, elements: &[Element]) -> MolarMassResult {
    let mut seen = HashSet::new();
    let mut contributions: Vec<ElementContribution> = elements
        .iter()
        .filter(|element| seen.insert(element.symbol.as_str()))
        .map(|element| {
            let atom_count = compound.count(&element.symbol);
            ElementContribution {
                symbol: element.symbol.clone(),
                name: element.name.clone(),
                atom_count,
                weight_in_compound: f64::from(atom_count) * element.atomic_weight,
                weight_percent: 0.0,
            }
        })
        .collect();

    let total_mass: f64 = contributions.iter().map(|c| c.weight_in_compound).sum();
    if total_mass > 0.0 {
        for contribution in &mut contributions {
            contribution.weight_percent = 100.0 * contribution.weight_in_compound / total_mass;
        }
    }

    MolarMassResult {
        aggregate_weight: total_mass,
        elements: contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use approx::assert_relative_eq;

    fn hydrogen() -> Element {
        Element::new("H", "Hydrogen", 1.008)
    }

    fn oxygen() -> Element {
        Element::new("O", "Oxygen", 16.00)
    }

    fn carbon() -> Element {
        Element::new("C", "Carbon", 12.011)
    }

    #[test]
    fn test_compute_dioxygen() {
        let compound = parse("O2").unwrap();
        let result = compute(&compound, &[oxygen()]);

        assert_relative_eq!(result.aggregate_weight, 32.00);
        assert_eq!(result.elements.len(), 1);
        let info = &result.elements[0];
        assert_eq!(info.name, "Oxygen");
        assert_eq!(info.atom_count, 2);
        assert_relative_eq!(info.weight_in_compound, 32.00);
        assert_relative_eq!(info.weight_percent, 100.0);
    }

    #[test]
    fn test_compute_water() {
        let compound = parse("H2O").unwrap();
        let result = compute(&compound, &[hydrogen(), oxygen()]);

        assert_relative_eq!(result.aggregate_weight, 18.016, epsilon = 1e-9);
        assert_eq!(result.elements[0].symbol, "H");
        assert_eq!(result.elements[0].atom_count, 2);
        assert_relative_eq!(result.elements[0].weight_in_compound, 2.016, epsilon = 1e-9);
        assert_relative_eq!(
            result.elements[0].weight_percent,
            100.0 * 2.016 / 18.016,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.elements[1].weight_percent,
            100.0 * 16.0 / 18.016,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_compute_glucose_keeps_supplied_order() {
        let compound = parse("C6H12O6").unwrap();
        let result = compute(&compound, &[carbon(), hydrogen(), oxygen()]);

        let names: Vec<_> = result.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Carbon", "Hydrogen", "Oxygen"]);
        assert_relative_eq!(result.elements[0].weight_in_compound, 72.066, epsilon = 1e-9);
        assert_relative_eq!(result.elements[1].weight_in_compound, 12.096, epsilon = 1e-9);
        assert_relative_eq!(result.elements[2].weight_in_compound, 96.0, epsilon = 1e-9);
        assert_relative_eq!(result.aggregate_weight, 180.162, epsilon = 1e-9);

        let percent_sum: f64 = result.elements.iter().map(|e| e.weight_percent).sum();
        assert_relative_eq!(percent_sum, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compute_empty_compound() {
        let compound = parse("").unwrap();
        let result = compute(&compound, &[]);
        assert_eq!(result.aggregate_weight, 0.0);
        assert!(result.elements.is_empty());
    }

    #[test]
    fn test_compute_zero_total_mass() {
        let compound = parse("").unwrap();
        let result = compute(&compound, &[hydrogen(), oxygen()]);

        assert_eq!(result.aggregate_weight, 0.0);
        assert_eq!(result.elements.len(), 2);
        for info in &result.elements {
            assert_eq!(info.atom_count, 0);
            assert_eq!(info.weight_percent, 0.0);
            assert!(!info.weight_percent.is_nan());
        }
    }

    #[test]
    fn test_compute_ignores_unresolved_symbols() {
        let compound = parse("NaCl").unwrap();
        let result = compute(&compound, &[Element::new("Na", "", 22.990)]);

        assert_eq!(result.elements.len(), 1);
        assert_eq!(result.elements[0].name, "");
        assert_relative_eq!(result.aggregate_weight, 22.990);
        assert_relative_eq!(result.elements[0].weight_percent, 100.0);
    }

    #[test]
    fn test_compute_skips_repeated_element() {
        let compound = parse("H2").unwrap();
        let result = compute(&compound, &[hydrogen(), hydrogen()]);

        assert_eq!(result.elements.len(), 1);
        assert_relative_eq!(result.aggregate_weight, 2.016, epsilon = 1e-9);
    }
}
