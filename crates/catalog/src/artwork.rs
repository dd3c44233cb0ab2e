//! Artwork catalog entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use artglass_core::ArtworkId;

/// Fixed catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtworkCategory {
    DigitalPainting,
    #[serde(rename = "3d-art")]
    ThreeDArt,
    PixelArt,
    Animation,
    GenerativeArt,
    Photography,
    MixedMedia,
    ConceptArt,
}

impl core::fmt::Display for ArtworkCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ArtworkCategory::DigitalPainting => "digital-painting",
            ArtworkCategory::ThreeDArt => "3d-art",
            ArtworkCategory::PixelArt => "pixel-art",
            ArtworkCategory::Animation => "animation",
            ArtworkCategory::GenerativeArt => "generative-art",
            ArtworkCategory::Photography => "photography",
            ArtworkCategory::MixedMedia => "mixed-media",
            ArtworkCategory::ConceptArt => "concept-art",
        };
        f.write_str(name)
    }
}

/// Output formats an artwork is delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtworkFormat {
    Jpeg,
    Png,
    Gif,
    Svg,
    Video,
    #[serde(rename = "3d-model")]
    Model3d,
}

/// Purchasable rights tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    Standard,
    Extended,
    Exclusive,
}

impl core::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            LicenseType::Standard => "standard",
            LicenseType::Extended => "extended",
            LicenseType::Exclusive => "exclusive",
        };
        f.write_str(name)
    }
}

/// One purchasable rights tier of an artwork, with its own price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseVariant {
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
}

/// Immutable catalog entity.
///
/// Owned by the catalog store; the cart and session stores hold copies taken
/// at add-time rather than references back into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub description: String,
    pub category: ArtworkCategory,
    pub format: ArtworkFormat,
    /// Display price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub featured: bool,
    pub rating: Option<f64>,
    pub licenses: Vec<LicenseVariant>,
}

impl Artwork {
    /// Resolve a license variant by its type tag.
    pub fn license(&self, license_type: LicenseType) -> Option<&LicenseVariant> {
        self.licenses
            .iter()
            .find(|l| l.license_type == license_type)
    }
}
