use serde::{Deserialize, Serialize};

/// Product as reported by the catalog service. Read-only; never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(rename = "units")]
    pub available_units: i64,
}

impl Product {
    pub fn can_fulfil(&self, quantity: i32) -> bool {
        self.available_units >= i64::from(quantity)
    }
}
