//! Points of interest and their category vocabulary.
//!
//! POIs are created by an external feed (see `ar-feed`) and are never
//! mutated by the positioning core.

use std::fmt;

use crate::GeoPoint;

// ── PoiId ─────────────────────────────────────────────────────────────────────

/// Unique, feed-assigned POI identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PoiId(pub String);

impl PoiId {
    pub fn new(id: impl Into<String>) -> Self {
        PoiId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PoiId {
    fn from(s: String) -> Self {
        PoiId(s)
    }
}

impl From<&str> for PoiId {
    fn from(s: &str) -> Self {
        PoiId(s.to_owned())
    }
}

// ── Category ──────────────────────────────────────────────────────────────────

/// Closed set of POI categories the presentation layer keys icons on.
///
/// Feed strings that match none of the known keys map to
/// [`Category::Unknown`] rather than failing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Landmark,
    Museum,
    Restaurant,
    Cafe,
    Shop,
    Park,
    Viewpoint,
    Transit,
    Hotel,
    #[default]
    Unknown,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Landmark,
        Category::Museum,
        Category::Restaurant,
        Category::Cafe,
        Category::Shop,
        Category::Park,
        Category::Viewpoint,
        Category::Transit,
        Category::Hotel,
        Category::Unknown,
    ];

    /// Parse a feed category key.  Case-insensitive; a few common synonyms
    /// are accepted.  Anything else is `Unknown`.
    pub fn from_key(key: &str) -> Category {
        match key.trim().to_ascii_lowercase().as_str() {
            "landmark" | "monument" | "attraction" => Category::Landmark,
            "museum" | "gallery"                   => Category::Museum,
            "restaurant" | "food"                  => Category::Restaurant,
            "cafe" | "coffee"                      => Category::Cafe,
            "shop" | "shopping" | "store"          => Category::Shop,
            "park" | "garden"                      => Category::Park,
            "viewpoint" | "view"                   => Category::Viewpoint,
            "transit" | "station" | "stop"         => Category::Transit,
            "hotel" | "lodging"                    => Category::Hotel,
            _                                      => Category::Unknown,
        }
    }

    /// Stable lowercase key, used in feeds and as the style-table key.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Landmark   => "landmark",
            Category::Museum     => "museum",
            Category::Restaurant => "restaurant",
            Category::Cafe       => "cafe",
            Category::Shop       => "shop",
            Category::Park       => "park",
            Category::Viewpoint  => "viewpoint",
            Category::Transit    => "transit",
            Category::Hotel      => "hotel",
            Category::Unknown    => "unknown",
        }
    }

    /// Presentation descriptor for this category.
    pub fn style(self) -> &'static CategoryStyle {
        CategoryStyle::lookup(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CategoryStyle ─────────────────────────────────────────────────────────────

/// Icon and colour descriptor the renderer keys on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CategoryStyle {
    pub category: Category,
    pub icon:     &'static str,
    /// Packed `0xRRGGBB`.
    pub color:    u32,
}

static STYLES: [CategoryStyle; 10] = [
    CategoryStyle { category: Category::Landmark,   icon: "landmark",   color: 0xE6_7E_22 },
    CategoryStyle { category: Category::Museum,     icon: "museum",     color: 0x8E_44_AD },
    CategoryStyle { category: Category::Restaurant, icon: "restaurant", color: 0xC0_39_2B },
    CategoryStyle { category: Category::Cafe,       icon: "cafe",       color: 0x6E_4B_3A },
    CategoryStyle { category: Category::Shop,       icon: "shop",       color: 0x29_80_B9 },
    CategoryStyle { category: Category::Park,       icon: "park",       color: 0x27_AE_60 },
    CategoryStyle { category: Category::Viewpoint,  icon: "viewpoint",  color: 0x16_A0_85 },
    CategoryStyle { category: Category::Transit,    icon: "transit",    color: 0x2C_3E_50 },
    CategoryStyle { category: Category::Hotel,      icon: "hotel",      color: 0xD3_54_00 },
    CategoryStyle { category: Category::Unknown,    icon: "pin",        color: 0x7F_8C_8D },
];

impl CategoryStyle {
    /// Look up the style for `category`, falling back to the `Unknown` entry.
    pub fn lookup(category: Category) -> &'static CategoryStyle {
        STYLES
            .iter()
            .find(|s| s.category == category)
            .unwrap_or(&STYLES[STYLES.len() - 1])
    }

    /// `(r, g, b)` components of [`color`](Self::color).
    pub fn rgb(&self) -> (u8, u8, u8) {
        ((self.color >> 16) as u8, (self.color >> 8) as u8, self.color as u8)
    }
}

// ── PointOfInterest ───────────────────────────────────────────────────────────

/// A named, located, categorized entity to display in the AR view.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    pub id:          PoiId,
    pub location:    GeoPoint,
    pub name:        String,
    pub category:    Category,
    pub description: Option<String>,
}

impl PointOfInterest {
    pub fn new(
        id:       impl Into<PoiId>,
        name:     impl Into<String>,
        category: Category,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            name: name.into(),
            category,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `false` for POIs whose geometry cannot be positioned.
    #[inline]
    pub fn has_valid_location(&self) -> bool {
        self.location.is_valid()
    }
}
