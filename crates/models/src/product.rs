use serde::{Deserialize, Serialize};

/// A catalogue product.
///
/// `id` is assigned by the repository on creation; any value supplied by a
/// caller before `save` is overwritten. Missing JSON fields decode to their
/// zero value so that validation, not the decoder, reports them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    pub is_published: bool,
    /// Expiration date, `MM/DD/YYYY`.
    pub expiration: String,
    pub price: f64,
}

impl Product {
    /// Same record carrying a different identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}
