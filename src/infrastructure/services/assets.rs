use myrtio_blink_core::StaticAssetStore;

/// Asset store over the files embedded from `web/`.
pub fn web_asset_store() -> StaticAssetStore {
    StaticAssetStore::new(myrtio_blink_web_assets::ASSETS)
}

/// List every stored file on the console.
pub fn log_asset_inventory(store: &StaticAssetStore) {
    let mut count = 0usize;
    for asset in store.assets() {
        log::info!("assets: FILE: {} ({} bytes)", asset.name(), asset.len());
        count += 1;
    }
    if count == 0 {
        log::warn!("assets: no files embedded, every page will be 404");
    }
}
