//! Chemical formula parsing and molar mass calculation.
//!
//! A formula such as `"Mg(OH)2"` is parsed into a [`Compound`] (element
//! symbol → atom count). Given the [`Element`] records for its symbols,
//! [`compute`] derives the molar mass and each element's contribution.
//!
//! ```
//! use molar_mass::{compute, parse, Element};
//!
//! let compound = parse("Mg(OH)2")?;
//! assert_eq!(compound.count("H"), 2);
//!
//! let elements = [
//!     Element::new("H", "Hydrogen", 1.008),
//!     Element::new("Mg", "Magnesium", 24.305),
//!     Element::new("O", "Oxygen", 15.999),
//! ];
//! let result = compute(&compound, &elements);
//! assert!((result.aggregate_weight - 58.319).abs() < 1e-9);
//! # Ok::<(), molar_mass::ParseError>(())
//! ```
//!
//! Element data comes from any [`ElementLookup`]; [`ElementTable::standard`]
//! provides the standard atomic weights and [`molar_mass`] runs the whole
//! pipeline against a lookup.

pub mod calculator;
pub mod compound;
pub mod element;
pub mod error;
pub mod parser;
pub mod resolve;

pub use calculator::{compute, ElementContribution, MolarMassResult};
pub use compound::Compound;
pub use element::{Element, ElementLookup, ElementTable, LookupError};
pub use error::Error;
pub use parser::{parse, ParseError};
pub use resolve::{compound_molar_mass, molar_mass, resolve_elements, Resolution};
