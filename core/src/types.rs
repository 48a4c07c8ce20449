//! Domain DTOs for the Libpostal API.
//!
//! # Design
//! The parse endpoint answers with a list of `{label, value}` pairs rather
//! than an object, so `AddressComponent` mirrors the wire shape and
//! `Address` is assembled from it by label. The set of labels is the one the
//! Libpostal address parser emits; anything else is handled according to an
//! explicit `UnknownLabels` policy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One labeled component of a parse response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressComponent {
    pub label: String,
    pub value: String,
}

/// What to do with labels that have no matching `Address` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLabels {
    /// Drop them silently.
    #[default]
    Ignore,
    /// Keep them in `Address::extra`.
    Preserve,
    /// Fail the call with `Error::UnknownLabel`.
    Reject,
}

/// A parsed address. Every field is optional because the service only
/// returns the labels it recognized in the input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staircase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub island: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_region: Option<String>,

    /// Labels outside the fields above. Only filled under
    /// `UnknownLabels::Preserve`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Address {
    /// Fold `{label, value}` pairs into an address. A repeated label keeps
    /// its last value.
    ///
    /// Under `UnknownLabels::Reject` the first label outside the schema is
    /// returned as `Err`.
    pub fn from_components<I>(components: I, policy: UnknownLabels) -> Result<Self, String>
    where
        I: IntoIterator<Item = AddressComponent>,
    {
        let mut address = Self::default();
        for AddressComponent { label, value } in components {
            if let Some(slot) = address.field_mut(&label) {
                *slot = Some(value);
                continue;
            }
            match policy {
                UnknownLabels::Ignore => {}
                UnknownLabels::Preserve => {
                    address.extra.insert(label, value);
                }
                UnknownLabels::Reject => return Err(label),
            }
        }
        Ok(address)
    }

    /// Value of a label, looking at `extra` for labels outside the schema.
    pub fn get(&self, label: &str) -> Option<&str> {
        match self.field(label) {
            Some(value) => value.as_deref(),
            None => self.extra.get(label).map(String::as_str),
        }
    }
}

/// Label-to-field accessors, generated from one list so both stay in step.
macro_rules! label_fields {
    ($($field:ident),+ $(,)?) => {
        impl Address {
            /// Slot for a known label, `None` if the label is not part of the
            /// schema.
            pub fn field(&self, label: &str) -> Option<&Option<String>> {
                match label {
                    $(stringify!($field) => Some(&self.$field),)+
                    _ => None,
                }
            }

            /// Mutable slot for a known label, `None` if the label is not
            /// part of the schema.
            pub fn field_mut(&mut self, label: &str) -> Option<&mut Option<String>> {
                match label {
                    $(stringify!($field) => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}

label_fields!(
    house,
    category,
    near,
    house_number,
    road,
    unit,
    level,
    staircase,
    entrance,
    po_box,
    postcode,
    suburb,
    city_district,
    city,
    island,
    state_district,
    state,
    country_region,
    country,
    world_region,
);
