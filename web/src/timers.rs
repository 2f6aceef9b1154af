use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Resolves after `ms` milliseconds via `setTimeout`. Outside a window
/// context it resolves immediately.
pub async fn sleep(ms: u64) -> Result<(), JsValue> {
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve, reject| {
        let scheduled = match web_sys::window() {
            Some(window) => window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
                .map(|_| ()),
            None => resolve.call0(&JsValue::NULL).map(|_| ()),
        };
        if let Err(error) = scheduled {
            let _ = reject.call1(&JsValue::NULL, &error);
        }
    });
    JsFuture::from(promise).await.map(|_| ())
}
