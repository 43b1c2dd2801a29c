//! Browser local storage helpers

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Returns false when storage is unavailable or full
pub fn write(key: &str, value: &str) -> bool {
    local_storage()
        .map(|s| s.set_item(key, value).is_ok())
        .unwrap_or(false)
}

pub fn remove(key: &str) -> bool {
    local_storage()
        .map(|s| s.remove_item(key).is_ok())
        .unwrap_or(false)
}
