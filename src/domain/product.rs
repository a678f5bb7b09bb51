use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product as returned by the catalogue backend.
///
/// Fields the client does not interpret are kept in `extra` so an updated
/// product can be rendered without losing server data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductWire")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape of a product. Backends send `_id`, `id`, or both.
#[derive(Deserialize)]
struct ProductWire {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    name: String,
    price: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    stock: u32,
    #[serde(default)]
    images: Vec<ProductImage>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<ProductWire> for Product {
    type Error = String;

    fn try_from(wire: ProductWire) -> Result<Self, Self::Error> {
        let mut extra = wire.extra;
        let id = match (wire.mongo_id, wire.id) {
            (Some(mongo_id), Some(plain)) => {
                // keep the plain id so it is sent back unchanged
                extra.insert("id".to_string(), Value::String(plain));
                mongo_id
            }
            (Some(id), None) | (None, Some(id)) => id,
            (None, None) => return Err("missing field `_id`".to_string()),
        };
        Ok(Self {
            id,
            name: wire.name,
            price: wire.price,
            description: wire.description,
            category: wire.category,
            stock: wire.stock,
            images: wire.images,
            extra,
        })
    }
}

/// Reference to a hosted product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub public_id: String,
    pub url: String,
}

/// Payload for creating or updating a product. Absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,
}

#[allow(dead_code)]
impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: String::new(),
            category: String::new(),
            stock: 0,
            images: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[allow(dead_code)]
impl ProductDraft {
    /// Draft carrying the two fields a new product must have.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Returns the name of the first required field missing for a create.
    pub fn missing_create_field(&self) -> Option<&'static str> {
        match (&self.name, self.price) {
            (None, _) => Some("name"),
            (Some(name), _) if name.trim().is_empty() => Some("name"),
            (_, None) => Some("price"),
            _ => None,
        }
    }
}
