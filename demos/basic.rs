//! # Basic Emitter Example
//!
//! Registers two listeners, emits a few events, detaches one listener from a
//! single event and shows that its other registration keeps working.
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use herald::{Emitter, ListenerError, ListenerFn, ListenerRef, RegisterOptions};
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter = Emitter::new(4);
    let hits = Arc::new(AtomicU64::new(0));

    let counter: ListenerRef = {
        let hits = Arc::clone(&hits);
        ListenerFn::arc("counter", move |args| {
            let hits = Arc::clone(&hits);
            async move {
                let n = hits.fetch_add(1, Ordering::Relaxed) + 1;
                println!("[counter] #{n} args={args:?}");
                Ok::<_, ListenerError>(())
            }
        })
    };

    let audit: ListenerRef = ListenerFn::arc("audit", |args| async move {
        println!("[audit] args={args:?}");
        Ok::<_, ListenerError>(())
    });

    emitter.on("saved", counter.clone()).await?;
    emitter.on("deleted", counter.clone()).await?;
    emitter
        .on_with(
            "saved",
            audit,
            RegisterOptions::new()
                .with_args(vec![json!("user-42")])
                .on_done(|| println!("[audit] subscription closed")),
        )
        .await?;

    emitter.emit("saved").await?;
    emitter.emit_with("deleted", json!({"id": 7})).await?;
    emitter.settle().await;

    println!("detaching counter from 'saved'");
    emitter.remove_listener("saved", &counter).await?;
    emitter.emit("saved").await?;
    emitter.emit("deleted").await?;
    emitter.settle().await;

    println!();
    println!("Summary:");
    println!(" ├─► emits:     {}", emitter.event_count());
    println!(" ├─► listeners: {}", emitter.listener_count());
    println!(" └─► counter:   {}", hits.load(Ordering::Relaxed));

    emitter.shutdown().await;
    if let Err(err) = emitter.emit("saved").await {
        println!("after shutdown: {err} ({})", err.as_label());
    }
    Ok(())
}
