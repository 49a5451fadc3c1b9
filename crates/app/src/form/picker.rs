use async_trait::async_trait;
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedVariant {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    pub original_src: String,
    pub alt_text: Option<String>,
}

/// A product chosen in the host's resource picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub variants: Vec<PickedVariant>,
    pub images: Vec<PickedImage>,
}

/// Host product picker.
#[automock]
#[async_trait]
pub trait ResourcePicker: Send + Sync {
    /// Opens the picker and waits for a choice. `None` when cancelled.
    async fn pick_product(&self) -> Option<Vec<PickedProduct>>;
}
