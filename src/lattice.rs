//! Builds a [`Property`] lattice from a nested template.
//!
//! This is the one external collaborator the core ships: everything
//! else that constructs [`Property`] values — a domain-specific operator
//! taxonomy, say — stays outside this crate and only needs
//! `Property::new`/`Property::anonymous` directly.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::LatticeError;
use crate::property::Property;

/// A nested `(name, children)` template describing a property lattice
/// before construction.
///
/// Each non-root node in a template singly inherits from its template
/// parent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Template {
    /// The property's name.
    pub name: String,
    /// Templates for the properties that directly inherit from this one.
    pub children: Vec<Template>,
}

impl Template {
    /// Constructs a leaf or interior template node.
    pub fn new(name: impl Into<String>, children: Vec<Template>) -> Self {
        Template {
            name: name.into(),
            children,
        }
    }

    /// Parses a template from JSON, e.g. one loaded from a configuration
    /// file by client code.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serializes the template to JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A constructed [`Property`] together with the [`PropertyTree`]s of its
/// direct descendants, mirroring the shape of the [`Template`] it was
/// built from.
#[derive(Debug, Clone)]
pub struct PropertyTree {
    /// The property at this node.
    pub property: Property,
    /// Subtrees for the properties that inherit from this one.
    pub children: Vec<PropertyTree>,
}

/// Builds a [`PropertyTree`] from `template`, optionally attaching it
/// under `parent`.
pub fn build_property_tree(template: &Template, parent: Option<&Property>) -> PropertyTree {
    let parents = parent.into_iter().cloned().collect();
    let property = Property::new(template.name.clone(), parents);

    let children = template
        .children
        .iter()
        .map(|child| build_property_tree(child, Some(&property)))
        .collect();

    PropertyTree { property, children }
}

/// Builds a flat name-to-[`Property`] map from `template`.
///
/// Fails with [`LatticeError`] if two template nodes share a name.
pub fn build_property_map(template: &Template) -> Result<HashMap<String, Property>, LatticeError> {
    let mut map = HashMap::new();
    insert_template(template, None, &mut map)?;
    Ok(map)
}

fn insert_template(
    template: &Template,
    parent: Option<&Property>,
    map: &mut HashMap<String, Property>,
) -> Result<(), LatticeError> {
    if map.contains_key(&template.name) {
        return Err(LatticeError {
            name: template.name.clone(),
        });
    }

    let parents = parent.into_iter().cloned().collect();
    let property = Property::new(template.name.clone(), parents);
    map.insert(template.name.clone(), property.clone());

    for child in &template.children {
        insert_template(child, Some(&property), map)?;
    }

    Ok(())
}
