//! nutriscreen-standards
//!
//! The reference table store. Pure data: sex-partitioned boundary tables and
//! median/SD distribution tables for each growth indicator, loaded from the
//! versioned JSON files under `data/` and validated before use. Loaded tables
//! are never mutated.

pub mod error;
pub mod file;
pub mod store;
pub mod table;
pub mod validate;

use std::sync::{Arc, LazyLock};

use store::ReferenceStore;

/// Reference data compiled into the binary, keyed by its path under `data/`.
pub const BUILTIN_FILES: [(&str, &str); 10] = [
    (
        "weight_for_age/male.json",
        include_str!("../data/weight_for_age/male.json"),
    ),
    (
        "weight_for_age/female.json",
        include_str!("../data/weight_for_age/female.json"),
    ),
    (
        "height_for_age/male.json",
        include_str!("../data/height_for_age/male.json"),
    ),
    (
        "height_for_age/female.json",
        include_str!("../data/height_for_age/female.json"),
    ),
    (
        "weight_for_height/male.json",
        include_str!("../data/weight_for_height/male.json"),
    ),
    (
        "weight_for_height/female.json",
        include_str!("../data/weight_for_height/female.json"),
    ),
    (
        "weight_for_length/male.json",
        include_str!("../data/weight_for_length/male.json"),
    ),
    (
        "weight_for_length/female.json",
        include_str!("../data/weight_for_length/female.json"),
    ),
    (
        "bmi_for_age/male.json",
        include_str!("../data/bmi_for_age/male.json"),
    ),
    (
        "bmi_for_age/female.json",
        include_str!("../data/bmi_for_age/female.json"),
    ),
];

static BUILTIN: LazyLock<Arc<ReferenceStore>> = LazyLock::new(|| {
    let store = ReferenceStore::from_sources(BUILTIN_FILES)
        .unwrap_or_else(|e| panic!("built-in reference data is defective: {e}"));
    Arc::new(store)
});

/// The embedded reference dataset, parsed and validated on first use.
///
/// # Panics
///
/// Panics if the embedded data fails validation. The files are compiled in,
/// so this indicates a data bug that the test suite catches.
pub fn builtin() -> Arc<ReferenceStore> {
    Arc::clone(&BUILTIN)
}
