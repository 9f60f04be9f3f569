use crate::listing::Location;
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One normalized listing
///
/// Serializes as a single flat object: `price`, `img`, `district`, `street`
/// followed by the scraped feature labels. A feature whose label collides
/// with a fixed key replaces that key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    /// Price with the currency unit stripped
    pub price: u64,

    /// Thumbnail image URL as found in the catalog entry
    pub img: String,

    pub district: String,

    pub street: String,

    /// Detail-page features in page order
    pub features: Vec<(String, String)>,
}

impl ListingRecord {
    pub fn new(price: u64, img: String, location: Location, features: Vec<(String, String)>) -> Self {
        Self {
            price,
            img,
            district: location.district,
            street: location.street,
            features,
        }
    }

    /// Looks up a value by key, features first
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some((_, value)) = self.features.iter().rev().find(|(label, _)| label == key) {
            return Some(Value::String(value.clone()));
        }

        match key {
            "price" => Some(Value::from(self.price)),
            "img" => Some(Value::String(self.img.clone())),
            "district" => Some(Value::String(self.district.clone())),
            "street" => Some(Value::String(self.street.clone())),
            _ => None,
        }
    }

    /// Flattens the record into a JSON object
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("price".to_string(), Value::from(self.price));
        map.insert("img".to_string(), Value::String(self.img.clone()));
        map.insert("district".to_string(), Value::String(self.district.clone()));
        map.insert("street".to_string(), Value::String(self.street.clone()));

        for (label, value) in &self.features {
            map.insert(label.clone(), Value::String(value.clone()));
        }

        map
    }
}

impl Serialize for ListingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}
