//! Platform task spawning.
//!
//! On native targets work runs on the ambient Tokio runtime. On wasm32 it runs on the
//! browser event loop via `spawn_local`, where futures holding JS values are not `Send`.

use std::future::Future;

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(work: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    drop(tokio::spawn(work));
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(work: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(work);
}
