use gurume_core::codes::{AmenityFlag, BUDGET_OPTIONS, GENRE_OPTIONS};
use gurume_core::SCENE_PRESETS;

use super::EMPTY;

/// Prints the static option tables. No server call is made.
pub(crate) fn run_options() {
    println!("GENRES");
    for option in GENRE_OPTIONS.iter().filter(|o| !o.code.is_empty()) {
        println!("  {:<6}{}", option.code, option.label);
    }

    println!("BUDGETS");
    for option in BUDGET_OPTIONS.iter().filter(|o| !o.code.is_empty()) {
        println!("  {:<6}{}", option.code, option.label);
    }

    println!("AMENITIES");
    for flag in AmenityFlag::ALL {
        println!("  {:<14}{}", flag.id(), flag.label());
    }

    println!("SCENES");
    for scene in SCENE_PRESETS {
        println!(
            "  {:<10}{}  party {}  amenities {}  category {}",
            scene.id,
            scene.label,
            scene.party_size,
            scene.amenities.join(","),
            scene.special_category.unwrap_or(EMPTY),
        );
    }
}
