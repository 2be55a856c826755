use log::debug;

use crate::calculator::{compute, MolarMassResult};
use crate::compound::Compound;
use crate::element::{Element, ElementLookup, LookupError};
use crate::error::Error;
use crate::parser::parse;

/// Outcome of resolving a compound's symbols against an [`ElementLookup`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    /// Found elements, in composition order.
    pub elements: Vec<Element>,
    /// Symbols the data source does not know, in composition order.
    pub missing: Vec<String>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Looks up every distinct symbol of `compound` exactly once.
///
/// Unknown symbols are collected in [`Resolution::missing`]; whether that is
/// acceptable is the caller's decision. The first lookup failure aborts the
/// resolution and is returned as is.
pub fn resolve_elements<L>(compound: &Compound, lookup: &L) -> Result<Resolution, LookupError>
where
    L: ElementLookup + ?Sized,
{
    let mut resolution = Resolution::default();
    for symbol in compound.symbols() {
        match lookup.lookup(symbol)? {
            Some(element) => resolution.elements.push(element),
            None => {
                debug!("no element data for symbol '{symbol}' in '{compound}'");
                resolution.missing.push(symbol.to_string());
            }
        }
    }
    Ok(resolution)
}

/// Parses `formula`, resolves its elements and computes its molar mass.
///
/// Fails with [`Error::UnknownElements`] if any symbol cannot be resolved.
///
/// # Examples
/// ```
/// use molar_mass::{molar_mass, ElementTable};
///
/// let table = ElementTable::standard();
/// let result = molar_mass("H2O", &table).unwrap();
/// assert!((result.aggregate_weight - 18.015).abs() < 1e-9);
/// ```
pub fn molar_mass<L>(formula: &str, lookup: &L) -> Result<MolarMassResult, Error>
where
    L: ElementLookup + ?Sized,
{
    let compound = parse(formula)?;
    compound_molar_mass(&compound, lookup)
}

/// Resolves the elements of an already parsed compound and computes its
/// molar mass.
///
/// Fails with [`Error::UnknownElements`] if any symbol cannot be resolved.
pub fn compound_molar_mass<L>(compound: &Compound, lookup: &L) -> Result<MolarMassResult, Error>
where
    L: ElementLookup + ?Sized,
{
    let Resolution { elements, missing } = resolve_elements(compound, lookup)?;
    if !missing.is_empty() {
        return Err(Error::UnknownElements { symbols: missing });
    }
    debug!("resolved {} element(s) for '{compound}'", elements.len());
    Ok(compute(compound, &elements))
}
