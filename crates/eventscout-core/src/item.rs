//! The normalized event record produced by the discovery pipeline.
//!
//! Every field always holds a value: upstream absence is represented by the
//! empty value of the field's type (`""`, `0.0`, an empty set), never by an
//! `Option`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One discoverable event, frozen after construction.
///
/// Build instances with [`ItemBuilder`]. A `distance` of `0.0` means either
/// "not reported" or a genuine zero distance; the provider does not
/// distinguish the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    item_id: String,
    name: String,
    url: String,
    distance: f64,
    address: String,
    categories: BTreeSet<String>,
    image_url: String,
}

impl Item {
    #[must_use]
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Single assembled address line of the first venue with any address data.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

/// Single-use accumulator for an [`Item`].
///
/// Starts with every field empty; setters overwrite, [`ItemBuilder::build`]
/// consumes the builder.
#[derive(Debug, Default)]
pub struct ItemBuilder {
    item_id: String,
    name: String,
    url: String,
    distance: f64,
    address: String,
    categories: BTreeSet<String>,
    image_url: String,
}

impl ItemBuilder {
    pub fn item_id(&mut self, item_id: impl Into<String>) -> &mut Self {
        self.item_id = item_id.into();
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self
    }

    pub fn distance(&mut self, distance: f64) -> &mut Self {
        self.distance = distance;
        self
    }

    pub fn address(&mut self, address: impl Into<String>) -> &mut Self {
        self.address = address.into();
        self
    }

    pub fn categories(&mut self, categories: BTreeSet<String>) -> &mut Self {
        self.categories = categories;
        self
    }

    pub fn image_url(&mut self, image_url: impl Into<String>) -> &mut Self {
        self.image_url = image_url.into();
        self
    }

    #[must_use]
    pub fn build(self) -> Item {
        Item {
            item_id: self.item_id,
            name: self.name,
            url: self.url,
            distance: self.distance,
            address: self.address,
            categories: self.categories,
            image_url: self.image_url,
        }
    }
}
