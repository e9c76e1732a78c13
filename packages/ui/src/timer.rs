//! Platform sleep for UI tasks.

use std::time::Duration;

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// A seed for picking suggestions; varies from call to call.
pub(crate) fn seed() -> usize {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 1_000_000.0) as usize
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Utc::now().timestamp_subsec_nanos() as usize
    }
}
