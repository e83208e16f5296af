// demos/catalog_sync.rs
//
// End-to-end walk: bootstrap, refresh the remote catalog into the local
// store, then resolve one image through the cache. Run twice to see the
// second resolve stay local.

use anyhow::Result;
use photohub::{AppState, CatalogRefreshed, ImageResolved};

#[tokio::main]
async fn main() -> Result<()> {
    let state = AppState::bootstrap()?;

    state.event_bus.subscribe::<CatalogRefreshed, _>(|event| {
        println!(
            "[event] catalog refreshed: {} fetched, {} stored",
            event.fetched, event.persisted
        );
    });
    state.event_bus.subscribe::<ImageResolved, _>(|event| {
        let source = if event.from_cache { "cache" } else { "network" };
        println!(
            "[event] image {} resolved from {} ({} bytes)",
            event.photo_id, source, event.byte_len
        );
    });

    let photos = state.photo_service.refresh_catalog().await?;
    println!("Catalog holds {} photos", photos.len());

    for photo in photos.iter().take(5) {
        println!("  {} - {} ({})", photo.photo_id, photo.title, photo.taken_at);
    }

    if let Some(first) = photos.first() {
        let bytes = state.photo_service.resolve_image(first).await?;
        println!("Resolved '{}': {} bytes", first.title, bytes.len());
    }

    Ok(())
}
