//! Static fallback catalog, shown whenever no remote data is available.
//!
//! The table is version-controlled data, already canonical: it is served
//! verbatim, never re-normalized and never mutated at runtime.

use std::sync::OnceLock;

use crate::model::SkipId;
use crate::skip::Skip;
use crate::DEFAULT_HIRE_PERIOD;

pub const FALLBACK_IMAGE_URL: &str =
    "https://via.placeholder.com/400x300/3498db/ffffff?text=Skip+Image";

const ROAD_RESTRICTION: &str = "Not Allowed On The Road";

/// The seven standard offerings, 4 to 14 yards, prices increasing with size.
/// Sizes of 10 yards and up may not be placed on the road.
#[must_use]
pub fn fallback_skips() -> &'static [Skip] {
    static CATALOG: OnceLock<Vec<Skip>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            entry("1", 4, 211.0, "Ideal for small home projects", 120.0, 45.0),
            entry("2", 5, 241.0, "Perfect for medium-sized projects", 130.0, 50.0),
            entry("3", 6, 264.0, "Great for home renovations", 140.0, 55.0),
            entry("4", 8, 295.0, "Suitable for larger projects", 150.0, 60.0),
            entry("5", 10, 356.0, "For commercial use", 160.0, 70.0),
            entry("6", 12, 390.0, "For large commercial projects", 170.0, 80.0),
            entry("7", 14, 434.0, "For industrial use", 180.0, 90.0),
        ]
    })
}

fn entry(
    id: &str,
    size: u32,
    price: f64,
    description: &str,
    per_tonne_cost: f64,
    transport_cost: f64,
) -> Skip {
    let allowed_on_road = size < 10;
    Skip {
        id: SkipId::new(id),
        size,
        name: format!("{size} Yard Skip"),
        price_before_vat: price,
        price,
        description: description.into(),
        image_url: FALLBACK_IMAGE_URL.into(),
        hire_period: DEFAULT_HIRE_PERIOD.into(),
        allowed_on_road,
        allows_heavy_waste: true,
        per_tonne_cost,
        transport_cost,
        restrictions: if allowed_on_road {
            Vec::new()
        } else {
            vec![ROAD_RESTRICTION.into()]
        },
    }
}
