//! Seed artwork collection.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use artglass_catalog::{
    Artwork, ArtworkCategory, ArtworkFormat, ArtworkSource, LicenseType, LicenseVariant,
};
use artglass_core::ArtworkId;

/// Fixture-backed [`ArtworkSource`], optionally with simulated latency.
#[derive(Debug, Default)]
pub struct FixtureCatalog {
    latency: Duration,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate remote-call latency on every fetch.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ArtworkSource for FixtureCatalog {
    async fn fetch_all(&self) -> anyhow::Result<Vec<Artwork>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(seed_artworks())
    }
}

fn artwork(
    id: &str,
    title: &str,
    description: &str,
    category: ArtworkCategory,
    format: ArtworkFormat,
    price: u64,
    tags: &[&str],
    created: (i32, u32, u32),
    featured: bool,
    rating: Option<f64>,
) -> Artwork {
    let (y, m, d) = created;
    Artwork {
        id: ArtworkId::new(id),
        title: title.into(),
        description: description.into(),
        category,
        format,
        price,
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        created_at: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        featured,
        rating,
        licenses: vec![
            LicenseVariant {
                license_type: LicenseType::Standard,
                price,
            },
            LicenseVariant {
                license_type: LicenseType::Extended,
                price: price * 3,
            },
        ],
    }
}

/// The full seed catalog: 13 artworks across all eight categories.
pub fn seed_artworks() -> Vec<Artwork> {
    use ArtworkCategory::*;
    use ArtworkFormat::*;

    vec![
        artwork(
            "art-001",
            "Neon Tide",
            "Synthwave shoreline bathed in magenta afterglow",
            DigitalPainting,
            Png,
            4900,
            &["neon", "synthwave", "ocean"],
            (2023, 6, 14),
            true,
            Some(4.8),
        ),
        artwork(
            "art-002",
            "Crystal Bloom",
            "Procedurally grown crystal garden rendered at dawn",
            ThreeDArt,
            Model3d,
            12900,
            &["crystal", "render", "procedural"],
            (2023, 2, 3),
            true,
            Some(4.6),
        ),
        artwork(
            "art-003",
            "Harbor Sprites",
            "A bustling 64x64 harbor town, frame by frame",
            PixelArt,
            Gif,
            2400,
            &["pixel", "town", "retro"],
            (2023, 9, 21),
            false,
            Some(4.2),
        ),
        artwork(
            "art-004",
            "Looping Lanterns",
            "Seamless lantern festival loop with volumetric light",
            Animation,
            Video,
            8900,
            &["loop", "festival", "light"],
            (2023, 1, 17),
            false,
            None,
        ),
        artwork(
            "art-005",
            "Flow Field No. 7",
            "Ten thousand particles tracing a curl-noise field",
            GenerativeArt,
            Svg,
            3400,
            &["generative", "particles", "noise"],
            (2023, 11, 2),
            true,
            Some(4.9),
        ),
        artwork(
            "art-006",
            "Wet Asphalt",
            "Night street photography, reflections after rain",
            Photography,
            Jpeg,
            1900,
            &["urban", "night", "rain"],
            (2023, 4, 8),
            false,
            Some(3.8),
        ),
        artwork(
            "art-007",
            "Paper Circuits",
            "Collage of hand-torn paper over traced circuit boards",
            MixedMedia,
            Png,
            5600,
            &["collage", "circuit", "texture"],
            (2023, 7, 30),
            false,
            None,
        ),
        artwork(
            "art-008",
            "Outpost Delta",
            "Environment concept for a derelict orbital station",
            ConceptArt,
            Jpeg,
            15900,
            &["environment", "scifi", "station"],
            (2023, 3, 12),
            true,
            Some(4.7),
        ),
        artwork(
            "art-009",
            "Gilded Koi",
            "Ink-and-gold koi study with animated shimmer pass",
            DigitalPainting,
            Png,
            6700,
            &["ink", "koi", "gold"],
            (2023, 8, 5),
            false,
            Some(4.4),
        ),
        artwork(
            "art-010",
            "Voxel Orchard",
            "Isometric voxel orchard through four seasons",
            ThreeDArt,
            Model3d,
            7800,
            &["voxel", "isometric", "seasons"],
            (2023, 5, 26),
            false,
            Some(4.0),
        ),
        artwork(
            "art-011",
            "Signal Decay",
            "CRT glitch choreography scored to a 90 bpm pulse",
            Animation,
            Video,
            9900,
            &["glitch", "crt", "loop"],
            (2023, 10, 11),
            false,
            None,
        ),
        artwork(
            "art-012",
            "Tessellate",
            "Penrose tiling walk with rule-driven palette drift",
            GenerativeArt,
            Svg,
            2900,
            &["tiling", "penrose", "palette"],
            (2023, 12, 19),
            false,
            Some(4.5),
        ),
        artwork(
            "art-013",
            "Last Tram Home",
            "Long-exposure tramline threading the old town",
            Photography,
            Jpeg,
            2200,
            &["urban", "night", "long-exposure"],
            (2024, 1, 9),
            false,
            Some(4.1),
        ),
    ]
}
