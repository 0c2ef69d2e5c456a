//! Category signatures for product-type detection

/// Substrings characteristic of one product category
#[derive(Debug, Clone)]
pub struct CategorySignature {
    /// Category label (e.g., "TOOTHPASTE")
    pub category: String,
    /// Indicator substrings, matched against lowercased ingredients
    pub indicators: Vec<String>,
    /// Base confidence weight in (0, 1]
    pub weight: f64,
}

impl CategorySignature {
    fn new(category: &str, indicators: &[&str], weight: f64) -> Self {
        Self {
            category: category.to_string(),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
            weight,
        }
    }
}

/// Catalog of category signatures, visited in declaration order
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    entries: Vec<CategorySignature>,
}

impl SignatureCatalog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Built-in category signatures
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.register(CategorySignature::new(
            "TOOTHPASTE",
            &["sodium fluoride", "hydrated silica"],
            0.9,
        ));
        catalog.register(CategorySignature::new(
            "SHAMPOO",
            &["sodium laureth sulfate", "cocamidopropyl"],
            0.85,
        ));
        catalog.register(CategorySignature::new(
            "FACE_MOISTURIZER",
            &["hyaluronic acid", "ceramides"],
            0.80,
        ));
        catalog.register(CategorySignature::new(
            "SUNSCREEN",
            &["zinc oxide", "titanium dioxide"],
            0.90,
        ));

        catalog
    }

    pub fn register(&mut self, signature: CategorySignature) {
        self.entries.push(signature);
    }

    pub fn entries(&self) -> &[CategorySignature] {
        &self.entries
    }
}

impl Default for SignatureCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
