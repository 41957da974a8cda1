use std::time::Duration;

/// Suspend the current task for `duration`.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    use wasm_bindgen_futures::JsFuture;

    let millis = duration.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        match web_sys::window() {
            Some(window) => {
                if window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .is_err()
                {
                    log::warn!("setTimeout failed, not waiting");
                    resolve_now(&resolve);
                }
            }
            None => {
                log::warn!("No window to schedule a timer on, not waiting");
                resolve_now(&resolve);
            }
        }
    });
    if let Err(e) = JsFuture::from(promise).await {
        log::warn!("Timer promise rejected: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn resolve_now(resolve: &js_sys::Function) {
    if let Err(e) = resolve.call0(&wasm_bindgen::JsValue::NULL) {
        log::warn!("Failed to resolve timer promise: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
