//! Spawning and sleeping on the browser event loop.
//!
//! Off-browser builds (server rendering, host tests) have no executor: spawned
//! work is dropped and sleeps resolve immediately.
use std::future::Future;

#[cfg(target_arch = "wasm32")]
pub fn spawn(task: impl Future<Output = ()> + 'static) {
    wasm_bindgen_futures::spawn_local(task);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn(task: impl Future<Output = ()> + 'static) {
    drop(task);
    log::debug!("task dropped: no browser executor");
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(ms: u32) {
    gloo::timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(clippy::unused_async)]
pub async fn sleep(_ms: u32) {}
