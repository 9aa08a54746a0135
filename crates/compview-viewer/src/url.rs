//! Page URL query parameters

/// Value of a query parameter on the current page
#[cfg(target_arch = "wasm32")]
pub fn param(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let href = window.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params().get(name)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn param(_name: &str) -> Option<String> {
    None
}

/// Whether a query parameter is present, with or without a value
#[cfg(target_arch = "wasm32")]
pub fn has_param(name: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .and_then(|href| web_sys::Url::new(&href).ok())
        .map(|url| url.search_params().has(name))
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn has_param(_name: &str) -> bool {
    false
}

/// Model path override from `?model=`, ignoring blank values
pub fn model_override() -> Option<String> {
    param("model").and_then(|value| non_blank(&value))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
