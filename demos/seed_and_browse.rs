// demos/seed_and_browse.rs
//
// BROWSE VALIDATION: First open, seed data, and the consumer surface
//
// PURPOSE:
// - Validate that an empty slot seeds the two initial titles
// - Validate provider readiness and the browse reads (featured,
//   by-kind rails, search)
// - Validate that repository writes appear only after a refresh
// - Validate that a second open restores instead of reseeding
//
// DOES NOT:
// - Touch the real application data directory (runs in a temp dir)
// - Exercise delete/reset (see admin_roundtrip)

use std::sync::Arc;

use pavi_catalog::{
    CatalogRepository, ContentKind, ContentProvider, FileSlot, NewContent,
    SqliteCatalogRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== SEED AND BROWSE VALIDATION ===");
    println!();

    // =========================================================================
    // 1. OPEN OVER AN EMPTY SLOT
    // =========================================================================
    let dir = tempfile::tempdir()?;
    let slot_path = dir.path().join("storage.json");
    println!("[SETUP] Slot document: {:?}", slot_path);

    // One repository handle shared by the browse and admin surfaces;
    // writes from one handle are invisible to another until reopen, so
    // everything in-process goes through this one.
    let repository = Arc::new(SqliteCatalogRepository::open(Box::new(FileSlot::new(
        &slot_path,
    )))?);

    let provider = ContentProvider::new();
    provider.start_with_repository(repository.clone());

    if !provider.is_ready() {
        println!("[FAIL] Provider did not become ready on a fresh slot!");
        std::process::exit(1);
    }
    println!("[SETUP] Provider ready.");
    println!();

    // =========================================================================
    // 2. BROWSE THE SEEDED CATALOG
    // =========================================================================
    let catalog = provider.catalog();
    println!("[BROWSE] Catalog: {} titles", catalog.len());
    for row in &catalog {
        println!("  #{} {} ({}, {})", row.id, row.title, row.year, row.kind);
    }

    if catalog.len() != 2 {
        println!("[FAIL] Expected 2 seeded titles, got {}", catalog.len());
        std::process::exit(1);
    }

    let featured = provider.featured().ok_or("no featured title")?;
    println!("[BROWSE] Featured: {}", featured.title);

    let movies = provider.of_kind(ContentKind::Movie);
    let series = provider.of_kind(ContentKind::Series);
    println!("[BROWSE] Movies rail: {}", movies.len());
    println!("[BROWSE] Series rail: {}", series.len());

    let hits = provider.search("dora");
    println!("[BROWSE] Search 'dora': {} hit(s)", hits.len());
    if hits.len() != 1 || hits[0].title != "Doraemon" {
        println!("[FAIL] Search should have found exactly Doraemon");
        std::process::exit(1);
    }

    let series_details = provider
        .get_content(series[0].id)?
        .ok_or("series details missing")?;
    println!(
        "[BROWSE] {}: {} episodes, {} cast",
        series_details.content.title,
        series_details.episodes.len(),
        series_details.cast.len()
    );
    if series_details.episodes.len() != 150 {
        println!("[FAIL] Seeded series should have 150 episodes");
        std::process::exit(1);
    }
    println!();

    // =========================================================================
    // 3. WRITES ARE INVISIBLE UNTIL REFRESH
    // =========================================================================
    println!("[ADMIN] Adding a title through the repository...");
    repository.add_content(&NewContent {
        title: "Interstellar".to_string(),
        year: 2014,
        genre: "Sci-Fi/Drama".to_string(),
        rating: "8.7".to_string(),
        poster_url: "/assets/interstellar.webp".to_string(),
        banner_url: "/assets/interstellar-banner.webp".to_string(),
        kind: ContentKind::Movie,
        duration: "2h 49m".to_string(),
        overview: "A team of explorers travel through a wormhole in space.".to_string(),
        streaming_url: String::new(),
    })?;

    if provider.catalog().len() != 2 {
        println!("[FAIL] Provider cache refreshed itself; refresh must be manual");
        std::process::exit(1);
    }
    println!("[ADMIN] Cache still shows 2 titles (stale, as designed).");

    provider.refresh()?;
    println!("[ADMIN] After refresh: {} titles", provider.catalog().len());
    if provider.catalog().len() != 3 {
        println!("[FAIL] Refresh did not pick up the new title");
        std::process::exit(1);
    }
    println!();

    // =========================================================================
    // 4. SECOND OPEN RESTORES, NEVER RESEEDS
    // =========================================================================
    println!("[REOPEN] Starting a fresh provider over the same slot...");
    let second = ContentProvider::new();
    second.start(Box::new(FileSlot::new(&slot_path))).await;

    let reopened = second.catalog();
    println!("[REOPEN] Catalog: {} titles", reopened.len());
    if reopened.len() != 3 {
        println!("[FAIL] Restore lost a title (or reseeded)");
        std::process::exit(1);
    }
    println!();

    // =========================================================================
    // 5. FINAL RESULT
    // =========================================================================
    println!("===========================================");
    println!("SEED AND BROWSE VALIDATION: PASSED");
    println!("===========================================");
    println!();
    println!("Summary:");
    println!("  - Fresh slot seeded 2 titles, 150 episodes");
    println!("  - Featured title: {}", featured.title);
    println!("  - Search and kind rails served from cache");
    println!("  - Repository write visible only after refresh()");
    println!("  - Reopen restored 3 titles from the slot image");

    Ok(())
}
