use serde::{Deserialize, Serialize};

/// A catalog entry as persisted in the storage file.
///
/// Ids are assigned by the store on insertion and are unique within the
/// file; every other field is taken from the caller as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Image reference or filename
    pub thumbnail: String,
    /// Merchant-defined SKU
    pub code: String,
    pub stock: u32,
}

/// A product as supplied by callers, before the store has assigned an id.
///
/// Carrying no id field means an update can never smuggle in a different
/// id: the store always re-applies the original one.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: u32,
}

impl ProductDraft {
    /// Materialize the draft under the given id.
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            thumbnail: self.thumbnail,
            code: self.code,
            stock: self.stock,
        }
    }
}
