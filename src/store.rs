use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::product::{Product, ProductDraft};

/// Result of reloading the store from the storage file.
///
/// On either failure variant the in-memory sequence and the id counter are
/// left untouched, so a caller that ignores the outcome keeps serving the
/// previous snapshot.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file was read and parsed; the in-memory sequence was replaced.
    Loaded(usize),
    /// The storage file could not be read.
    IoFailure(std::io::Error),
    /// The storage file did not contain a valid product array.
    ParseFailure(serde_json::Error),
}

impl LoadOutcome {
    /// True when the in-memory sequence was replaced from disk.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

/// Error writing the current sequence back to the storage file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write storage file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize products: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-memory product list backed by a single JSON file.
///
/// The file always holds a complete snapshot of the sequence; every
/// mutation rewrites it wholesale. There is no locking here: shared access
/// is arranged by the caller (the HTTP layer wraps the store in an RwLock).
pub struct ProductStore {
    path: PathBuf,
    products: Vec<Product>,
    next_id: u64,
}

impl ProductStore {
    /// Create an empty store over the given storage file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            products: Vec::new(),
            next_id: 0,
        }
    }

    /// Path of the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory sequence with the storage file contents.
    ///
    /// The id counter resumes from the id of the LAST element rather than
    /// the maximum id in the file. For a file in insertion order the two
    /// agree; a reordered file would make later inserts collide with
    /// existing ids.
    pub async fn load(&mut self) -> LoadOutcome {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return LoadOutcome::IoFailure(e);
            }
        };

        let products: Vec<Product> = match serde_json::from_str(&data) {
            Ok(products) => products,
            Err(e) => {
                error!("Failed to parse {}: {}", self.path.display(), e);
                return LoadOutcome::ParseFailure(e);
            }
        };

        // An empty array leaves the counter at its previous value.
        if let Some(last) = products.last() {
            self.next_id = last.id;
        }
        let count = products.len();
        self.products = products;
        LoadOutcome::Loaded(count)
    }

    /// Serialize the current sequence and overwrite the storage file.
    pub async fn save(&self) -> Result<(), SaveError> {
        let data = serde_json::to_string(&self.products)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }

    /// Save, logging instead of propagating.
    ///
    /// A failed save leaves the file behind memory until the next
    /// successful save; mutating operations still take effect in memory.
    async fn persist(&self) {
        if let Err(e) = self.save().await {
            error!("Failed to save {}: {}", self.path.display(), e);
        }
    }

    /// Assign the next id to the draft, append it, and persist.
    ///
    /// Returns the assigned id.
    pub async fn add(&mut self, draft: ProductDraft) -> u64 {
        self.next_id += 1;
        let product = draft.into_product(self.next_id);
        info!("Product {} added ({})", product.id, product.code);
        self.products.push(product);
        self.persist().await;
        self.next_id
    }

    /// All products, in insertion order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: u64) -> Option<&Product> {
        let found = self.products.iter().find(|p| p.id == id);
        if found.is_none() {
            warn!("Product {} not found", id);
        }
        found
    }

    /// Replace the product with the given id by the draft, keeping the id.
    ///
    /// Returns false (and mutates nothing) when the id is absent.
    pub async fn update(&mut self, id: u64, draft: ProductDraft) -> bool {
        match self.products.iter().position(|p| p.id == id) {
            Some(index) => {
                self.products[index] = draft.into_product(id);
                info!("Product {} updated", id);
                self.persist().await;
                true
            }
            None => {
                warn!("Product {} not found", id);
                false
            }
        }
    }

    /// Remove the product with the given id.
    ///
    /// Returns false (and mutates nothing) when the id is absent.
    pub async fn delete(&mut self, id: u64) -> bool {
        match self.products.iter().position(|p| p.id == id) {
            Some(index) => {
                self.products.remove(index);
                info!("Product {} deleted", id);
                self.persist().await;
                true
            }
            None => {
                warn!("Product {} not found", id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn draft(title: &str, code: &str) -> ProductDraft {
        ProductDraft {
            title: title.to_string(),
            description: format!("{} description", title),
            price: 4.25,
            thumbnail: format!("{}.jpg", title.to_lowercase()),
            code: code.to_string(),
            stock: 7,
        }
    }

    fn store_in(dir: &TempDir) -> ProductStore {
        ProductStore::new(dir.path().join("products.json"))
    }

    #[tokio::test]
    async fn test_missing_file_then_sequential_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert!(matches!(store.load().await, LoadOutcome::IoFailure(_)));

        let a = store.add(draft("Latte", "LATTE001")).await;
        let b = store.add(draft("Mocha", "MOCHA001")).await;
        let c = store.add(draft("Espresso", "ESP001")).await;
        assert_eq!((a, b, c), (1, 2, 3));

        let titles: Vec<&str> = store.all().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Latte", "Mocha", "Espresso"]);
    }

    #[tokio::test]
    async fn test_get_returns_the_added_record() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let added = draft("Cappuccino", "CAPPU001");
        let id = store.add(added.clone()).await;

        let found = store.get(id).unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.title, added.title);
        assert_eq!(found.description, added.description);
        assert_eq!(found.price, added.price);
        assert_eq!(found.thumbnail, added.thumbnail);
        assert_eq!(found.code, added.code);
        assert_eq!(found.stock, added.stock);

        assert!(store.get(99).is_none());
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_replaces_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(draft("Latte", "LATTE001")).await;
        store.add(draft("Mocha", "MOCHA001")).await;

        let replacement = draft("Flat White", "FLAT001");
        assert!(store.update(1, replacement.clone()).await);

        let updated = store.get(1).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, replacement.title);
        assert_eq!(updated.code, replacement.code);

        // The other record is untouched.
        assert_eq!(store.get(2).unwrap().title, "Mocha");
        assert_eq!(store.all().len(), 2);

        // Unknown id: no mutation.
        assert!(!store.update(42, draft("Ghost", "GHOST001")).await);
        assert_eq!(store.all().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(draft("Latte", "LATTE001")).await;
        store.add(draft("Mocha", "MOCHA001")).await;
        store.add(draft("Espresso", "ESP001")).await;

        assert!(store.delete(2).await);
        assert_eq!(store.all().len(), 2);
        assert!(store.get(2).is_none());
        assert!(store.get(1).is_some());
        assert!(store.get(3).is_some());

        assert!(!store.delete(2).await);
        assert_eq!(store.all().len(), 2);
    }

    #[tokio::test]
    async fn test_reload_reproduces_the_sequence() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(draft("Latte", "LATTE001")).await;
        store.add(draft("Mocha", "MOCHA001")).await;
        store.add(draft("Espresso", "ESP001")).await;
        store.update(2, draft("Cappuccino", "CAPPU001")).await;
        store.delete(1).await;

        let mut fresh = store_in(&dir);
        assert!(fresh.load().await.is_loaded());
        assert_eq!(fresh.all(), store.all());
    }

    #[tokio::test]
    async fn test_counter_resumes_from_last_element() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");

        // Last element carries id 3 while an earlier one carries 7: the
        // counter follows the last element, so the next insert gets id 4.
        let out_of_order = vec![
            draft("Latte", "LATTE001").into_product(7),
            draft("Mocha", "MOCHA001").into_product(3),
        ];
        std::fs::write(&path, serde_json::to_string(&out_of_order).unwrap()).unwrap();

        let mut store = ProductStore::new(&path);
        assert!(matches!(store.load().await, LoadOutcome::Loaded(2)));
        assert_eq!(store.add(draft("Espresso", "ESP001")).await, 4);
    }

    #[tokio::test]
    async fn test_parse_failure_keeps_previous_state() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(draft("Latte", "LATTE001")).await;
        store.add(draft("Mocha", "MOCHA001")).await;

        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load().await, LoadOutcome::ParseFailure(_)));

        assert_eq!(store.all().len(), 2);
        // The counter is also untouched.
        assert_eq!(store.add(draft("Espresso", "ESP001")).await, 3);
    }

    #[tokio::test]
    async fn test_empty_array_keeps_the_counter() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(draft("Latte", "LATTE001")).await;
        store.add(draft("Mocha", "MOCHA001")).await;

        std::fs::write(store.path(), "[]").unwrap();
        assert!(matches!(store.load().await, LoadOutcome::Loaded(0)));

        assert!(store.all().is_empty());
        assert_eq!(store.add(draft("Espresso", "ESP001")).await, 3);
    }

    #[tokio::test]
    async fn test_failed_save_still_mutates_memory() {
        let dir = TempDir::new().unwrap();
        // Parent directory does not exist, so every save fails.
        let mut store = ProductStore::new(dir.path().join("missing/products.json"));

        assert_eq!(store.add(draft("Latte", "LATTE001")).await, 1);
        assert_eq!(store.all().len(), 1);
        assert!(store.save().await.is_err());
    }
}
