use serde::{Deserialize, Serialize};

/// Sentinel used by upstream content feeds to mark an item without artwork.
pub const NO_IMAGE_MARKER: &str = "no-image";

/// Fallback image reference used when an item has no usable artwork.
pub const PLACEHOLDER_IMAGE: &str = "assets/placeholder.png";

/// An immutable carousel content record. Created once from a static ordered
/// list and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Raw image reference as provided by the content feed. May be empty or
    /// the "no image" marker; use [`Item::image`] for the resolved reference.
    pub image_ref: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

impl Item {
    pub fn new<S: Into<String>>(id: S, image_ref: S, title: S, description: S, link: S) -> Self {
        Self {
            id: id.into(),
            image_ref: image_ref.into(),
            title: title.into(),
            description: description.into(),
            link: link.into(),
        }
    }

    /// Resolved image reference: the placeholder when the record carries no
    /// usable artwork, the raw reference otherwise.
    pub fn image(&self) -> &str {
        if self.image_ref.is_empty() || self.image_ref == NO_IMAGE_MARKER {
            PLACEHOLDER_IMAGE
        } else {
            &self.image_ref
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_fallback_on_empty_reference() {
        let item = Item::new("p1", "", "Project One", "A thing", "https://example.com/p1");
        assert_eq!(item.image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_image_fallback_on_marker() {
        let item = Item::new(
            "p2",
            NO_IMAGE_MARKER,
            "Project Two",
            "Another thing",
            "https://example.com/p2",
        );
        assert_eq!(item.image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_image_passthrough() {
        let item = Item::new(
            "p3",
            "assets/p3.jpg",
            "Project Three",
            "Third thing",
            "https://example.com/p3",
        );
        assert_eq!(item.image(), "assets/p3.jpg");
    }
}
