use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use catalog_core::{NewProduct, Product};

mod seed;

pub use seed::seed_products;

/// Shared handle over the in-memory product catalog.
///
/// Clones share the same underlying list. Every read and append goes through a
/// single mutex so id assignment stays consistent under concurrent creates.
#[derive(Clone, Default)]
pub struct CatalogStore {
    products: Arc<Mutex<Vec<Product>>>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the startup seed products.
    pub fn seeded() -> Self {
        Self::from_products(seed_products())
    }

    /// Creates a catalog over an existing ordered list of records.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }

    /// Returns every product in insertion order.
    pub fn list_all(&self) -> Vec<Product> {
        self.lock().clone()
    }

    /// Returns the products whose category matches `category`, ignoring case.
    ///
    /// An unknown category yields an empty list.
    pub fn list_by_category(&self, category: &str) -> Vec<Product> {
        self.lock()
            .iter()
            .filter(|product| product.in_category(category))
            .cloned()
            .collect()
    }

    /// Looks up a single product by id.
    pub fn find_by_id(&self, id: u64) -> Result<Product, CatalogError> {
        self.lock()
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Stores a validated product at the end of the catalog.
    ///
    /// The id is the catalog size plus one, computed while the lock is held.
    pub fn append(&self, product: NewProduct) -> Product {
        let mut products = self.lock();
        let id = products.len() as u64 + 1;
        let stored = product.into_product(id);
        products.push(stored.clone());
        stored
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // No operation can leave the vector half-written, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        self.products
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Errors returned by catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(u64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn new_product(name: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price: 9.99,
            stock: 3,
            description: String::new(),
        }
    }

    #[test]
    fn seeded_store_lists_products_in_order() {
        let store = CatalogStore::seeded();
        let ids: Vec<u64> = store.list_all().iter().map(|product| product.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.len(), 5);
        assert!(!store.is_empty());
    }

    #[test]
    fn filters_by_category_case_insensitively() {
        let store = CatalogStore::seeded();
        for query in ["Apparel", "apparel", "APPAREL"] {
            let names: Vec<String> = store
                .list_by_category(query)
                .into_iter()
                .map(|product| product.name)
                .collect();
            assert_eq!(names, vec!["Classic T-Shirt", "Denim Jeans", "Hoodie"]);
        }
        assert!(store.list_by_category("Electronics").is_empty());
    }

    #[test]
    fn find_by_id_reports_missing_products() {
        let store = CatalogStore::seeded();
        assert_eq!(store.find_by_id(1).expect("seeded").name, "Classic T-Shirt");
        assert_eq!(store.find_by_id(9999), Err(CatalogError::NotFound(9999)));
    }

    #[test]
    fn append_assigns_count_plus_one() {
        let store = CatalogStore::seeded();
        let stored = store.append(new_product("Cap", "Apparel"));
        assert_eq!(stored.id, 6);
        assert_eq!(store.find_by_id(6), Ok(stored.clone()));
        assert_eq!(store.list_all().last(), Some(&stored));

        let empty = CatalogStore::new();
        assert!(empty.is_empty());
        assert_eq!(empty.append(new_product("Cap", "Apparel")).id, 1);
    }

    #[test]
    fn clones_share_the_same_catalog() {
        let store = CatalogStore::new();
        let handle = store.clone();
        handle.append(new_product("Cap", "Apparel"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_appends_receive_unique_sequential_ids() {
        let store = CatalogStore::seeded();
        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|n| store.append(new_product(&format!("item-{worker}-{n}"), "Bulk")).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = workers
            .into_iter()
            .flat_map(|worker| worker.join().expect("worker panicked"))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (6..=205).collect::<Vec<_>>());
    }
}
