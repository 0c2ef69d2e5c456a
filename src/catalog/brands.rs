//! Product/brand catalog for brand identification

/// One known product in the brand catalog
#[derive(Debug, Clone)]
pub struct BrandCandidate {
    /// Product name (e.g., "Colgate Total 12")
    pub name: String,
    /// Brand name (e.g., "Colgate")
    pub brand: String,
    /// Product category the entry is filed under; not used for matching
    pub category: String,
    /// Ingredients that characterize this product on its label
    pub key_ingredients: Vec<String>,
    /// Base confidence weight in (0, 1]
    pub confidence_weight: f64,
}

impl BrandCandidate {
    fn new(
        category: &str,
        name: &str,
        brand: &str,
        key_ingredients: &[&str],
        confidence_weight: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            key_ingredients: key_ingredients.iter().map(|s| s.to_string()).collect(),
            confidence_weight,
        }
    }
}

/// Catalog of known products, visited in declaration order during matching
#[derive(Debug, Clone)]
pub struct BrandCatalog {
    candidates: Vec<BrandCandidate>,
}

impl BrandCatalog {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Built-in product catalog
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.register(BrandCandidate::new(
            "TOOTHPASTE",
            "Colgate Total 12",
            "Colgate",
            &["Sodium Fluoride", "Hydrated Silica"],
            0.95,
        ));
        catalog.register(BrandCandidate::new(
            "TOOTHPASTE",
            "Sensodyne Repair",
            "Sensodyne",
            &["Potassium Nitrate", "Sodium Fluoride"],
            0.96,
        ));
        catalog.register(BrandCandidate::new(
            "SHAMPOO",
            "Pantene Pro-V",
            "Pantene",
            &["Sodium Laureth Sulfate", "Panthenol"],
            0.93,
        ));
        catalog.register(BrandCandidate::new(
            "SHAMPOO",
            "Head & Shoulders Classic",
            "Head & Shoulders",
            &["Pyrithione Zinc", "Sodium Laureth Sulfate"],
            0.92,
        ));
        catalog.register(BrandCandidate::new(
            "FACE_MOISTURIZER",
            "CeraVe Moisturizing Cream",
            "CeraVe",
            &["Hyaluronic Acid", "Ceramides", "Glycerin"],
            0.90,
        ));
        catalog.register(BrandCandidate::new(
            "SUNSCREEN",
            "Neutrogena Sheer Zinc",
            "Neutrogena",
            &["Zinc Oxide", "Titanium Dioxide"],
            0.91,
        ));

        catalog
    }

    pub fn register(&mut self, candidate: BrandCandidate) {
        self.candidates.push(candidate);
    }

    /// All candidates across all categories, in declaration order
    pub fn candidates(&self) -> &[BrandCandidate] {
        &self.candidates
    }
}

impl Default for BrandCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
