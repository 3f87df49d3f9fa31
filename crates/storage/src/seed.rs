use catalog_core::Product;

/// Products present when the service starts.
pub fn seed_products() -> Vec<Product> {
    [
        ("Classic T-Shirt", "Apparel", 19.99, 100, "Comfortable cotton t-shirt"),
        ("Running Shoes", "Footwear", 79.99, 50, "Lightweight running shoes"),
        ("Denim Jeans", "Apparel", 49.99, 75, "Classic fit denim jeans"),
        ("Laptop Backpack", "Accessories", 39.99, 30, "Water-resistant laptop backpack"),
        ("Hoodie", "Apparel", 34.99, 60, "Warm and cozy hoodie"),
    ]
    .into_iter()
    .zip(1u64..)
    .map(|((name, category, price, stock, description), id)| Product {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price,
        stock,
        description: description.to_string(),
    })
    .collect()
}
