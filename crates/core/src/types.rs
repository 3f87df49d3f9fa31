use serde::Serialize;

/// A sellable item held in the catalog.
///
/// Field order matches the JSON representation served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u64,
    pub description: String,
}

impl Product {
    /// Case-insensitive category comparison used for filtering.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Validated product fields awaiting an id from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u64,
    pub description: String,
}

impl NewProduct {
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shirt() -> Product {
        NewProduct {
            name: "Classic T-Shirt".to_string(),
            category: "Apparel".to_string(),
            price: 19.99,
            stock: 100,
            description: "Comfortable cotton t-shirt".to_string(),
        }
        .into_product(1)
    }

    #[test]
    fn category_match_ignores_case() {
        let product = shirt();
        assert!(product.in_category("apparel"));
        assert!(product.in_category("APPAREL"));
        assert!(!product.in_category("Footwear"));
    }

    #[test]
    fn serializes_all_fields() {
        let value = serde_json::to_value(shirt()).expect("serialize product");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Classic T-Shirt",
                "category": "Apparel",
                "price": 19.99,
                "stock": 100,
                "description": "Comfortable cotton t-shirt"
            })
        );
    }
}
