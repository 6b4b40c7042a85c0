use crate::foundation::error::{DrapeError, DrapeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tshirt,
    Dress,
}

impl std::str::FromStr for Category {
    type Err = DrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tshirt" => Ok(Category::Tshirt),
            "dress" => Ok(Category::Dress),
            _ => Err(DrapeError::validation(format!("unknown category '{s}'"))),
        }
    }
}

/// A catalog entry. Field names follow the storefront's JSON (`isCustomizable`, ...).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    #[serde(default)]
    pub is_customizable: bool,
    #[serde(default)]
    pub is_virtual_try_on: bool,
}

impl Product {
    pub fn validate(&self) -> DrapeResult<()> {
        if self.id.trim().is_empty() {
            return Err(DrapeError::validation("product id must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DrapeError::validation(format!(
                "product '{}' has invalid price {}",
                self.id, self.price
            )));
        }
        if self.sizes.is_empty() {
            return Err(DrapeError::validation(format!(
                "product '{}' lists no sizes",
                self.id
            )));
        }
        Ok(())
    }

    /// Size preselected when a tool opens.
    pub fn default_size(&self) -> &str {
        self.sizes.first().map(String::as_str).unwrap_or("M")
    }

    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
