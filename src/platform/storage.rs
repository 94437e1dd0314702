//! LocalStorage access
//!
//! Storage is optional in browsers (private mode, disabled cookies), so every
//! call is best-effort: failures are logged and reported as absent values.

/// Read a string value
#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    let Some(storage) = storage else {
        log::warn!("LocalStorage unavailable, cannot read {key}");
        return None;
    };
    storage.get_item(key).ok().flatten()
}

/// Write a string value, returns false if it could not be stored
#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => {
            log::warn!("LocalStorage unavailable, cannot write {key}");
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(_key: &str, _value: &str) -> bool {
    // No-op for native
    false
}
