//! Walkthrough: wire a router to the in-process bridge, register a few
//! detours, and watch the dispatch order.
//!
//! Run with: `RUST_LOG=debug cargo run --example navigation_log`

use std::sync::Arc;

use detour_router::{create_router, get_url_params, glob, listener_fn, path, MemoryBridge};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let bridge = Arc::new(MemoryBridge::new());
    let router = create_router(bridge.clone());

    router
        .on_url_change(
            listener_fn(|snapshot| async move {
                println!("[any    ] {}", snapshot.pathname);
                Ok(())
            }),
            None,
        )
        .on_url_change(
            listener_fn(|snapshot| async move {
                let params = get_url_params(&snapshot.href);
                let page = params.get("page").cloned().unwrap_or_default();
                println!("[inbox  ] page {}", page);
                Ok(())
            }),
            Some(path("/inbox")),
        )
        .on_url_change(
            listener_fn(|snapshot| async move {
                println!("[report ] rendering {}", snapshot.pathname);
                Ok(())
            }),
            Some(glob("/reports/**/*.pdf")),
        );

    router.navigate_to("/inbox?page=2");
    router.navigate_to("/reports/2025/q3/summary.pdf");
    router.navigate_to("/settings");

    // Back button: the host moves the address bar, then announces it.
    bridge.set_current("/inbox?page=2").expect("valid target");
    bridge.fire_pop_state();

    router.settled().await;
}
