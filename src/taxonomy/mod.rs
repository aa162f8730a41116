//! Waste taxonomy: the six material classes the model scores, the smaller
//! set of application-facing categories they map onto, and the reward points
//! awarded per category.
//!
//! The tables here are fixed at compile time and shared read-only by every
//! request; the order of `CLASS_NAMES` must match the model's output vector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Model output labels, index-aligned with the classifier's score vector.
pub const CLASS_NAMES: [&str; 6] = ["cardboard", "glass", "metal", "paper", "plastic", "trash"];

// ---------------------------------------------------------------------------
// Model classes
// ---------------------------------------------------------------------------

/// One of the six material classes the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteClass {
    Cardboard,
    Glass,
    Metal,
    Paper,
    Plastic,
    Trash,
}

impl WasteClass {
    /// All classes in model output order.
    pub const ALL: [WasteClass; 6] = [
        WasteClass::Cardboard,
        WasteClass::Glass,
        WasteClass::Metal,
        WasteClass::Paper,
        WasteClass::Plastic,
        WasteClass::Trash,
    ];

    /// Class for a position in the model's output vector.
    pub fn from_index(index: usize) -> Option<WasteClass> {
        WasteClass::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        CLASS_NAMES[self as usize]
    }

    /// Maps the model class onto the application-facing waste category.
    pub fn category(self) -> WasteCategory {
        match self {
            WasteClass::Cardboard => WasteCategory::Paper,
            WasteClass::Glass     => WasteCategory::Glass,
            WasteClass::Metal     => WasteCategory::Metal,
            WasteClass::Paper     => WasteCategory::Paper,
            WasteClass::Plastic   => WasteCategory::Plastic,
            WasteClass::Trash     => WasteCategory::General,
        }
    }
}

impl fmt::Display for WasteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Application categories
// ---------------------------------------------------------------------------

/// Caller-facing waste category after remapping from the model's label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    Paper,
    Glass,
    Metal,
    Plastic,
    General,
}

impl WasteCategory {
    pub fn name(self) -> &'static str {
        match self {
            WasteCategory::Paper   => "paper",
            WasteCategory::Glass   => "glass",
            WasteCategory::Metal   => "metal",
            WasteCategory::Plastic => "plastic",
            WasteCategory::General => "general",
        }
    }

    /// Parses a category name; anything unrecognized falls back to `General`.
    pub fn from_name(name: &str) -> WasteCategory {
        match name {
            "paper"   => WasteCategory::Paper,
            "glass"   => WasteCategory::Glass,
            "metal"   => WasteCategory::Metal,
            "plastic" => WasteCategory::Plastic,
            _         => WasteCategory::General,
        }
    }

    /// Reward points awarded for a correctly sorted item of this category.
    pub fn points(self) -> u32 {
        match self {
            WasteCategory::Plastic => 10,
            WasteCategory::Paper   => 8,
            WasteCategory::Metal   => 12,
            WasteCategory::Glass   => 15,
            WasteCategory::General => 5,
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
