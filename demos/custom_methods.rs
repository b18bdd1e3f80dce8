//! A server that answers a custom `PURGE` verb alongside the standard ones.
//!
//! Try it with:
//!
//! ```text
//! MICROROUTE_CUSTOM_HTTP_METHODS="foo, bar" RUST_LOG=debug cargo run --example custom_methods
//! curl -X PURGE http://127.0.0.1:8081/cache
//! curl -X FOO   http://127.0.0.1:8081/things
//! curl -X BAR   http://127.0.0.1:8081/things   # 405, Allow: FOO, GET, OPTIONS
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use microroute_rs::routing::HandlerSet;
use microroute_rs::{HttpResponse, HttpServer, ServerConfig, StatusCode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ServerConfig {
        addr: "127.0.0.1:8081".parse()?,
        ..ServerConfig::from_env()
    }
    .with_custom_methods(["PURGE"]);

    let server = HttpServer::new(config);

    let purges = Arc::new(AtomicUsize::new(0));
    let counter = purges.clone();
    let cache = HandlerSet::new()
        .on("PURGE", move |_req| {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                info!("Cache purged ({n} so far)");
                Ok(HttpResponse::new(StatusCode::Accepted)
                    .with_content_type("text/plain")
                    .with_body_string(format!("purged {n} times")))
            }
        })
        .on("GET", |_req| async {
            Ok(HttpResponse::new(StatusCode::Ok)
                .with_content_type("text/plain")
                .with_body_string("cache is warm"))
        });
    server.add_resource("/cache", &cache).await;

    // FOO is only served when listed in MICROROUTE_CUSTOM_HTTP_METHODS
    let things = HandlerSet::new()
        .on("FOO", |req| async move {
            Ok(HttpResponse::new(StatusCode::Ok)
                .with_content_type("text/plain")
                .with_body_string(format!("{} handled", req.method)))
        })
        .on("GET", |_req| async {
            HttpResponse::new(StatusCode::Ok).with_json(&serde_json::json!({ "things": [] }))
        })
        .placeholder("PATCH", serde_json::json!({ "disabled": true }));
    server.add_resource("/things", &things).await;

    server.start().await?;
    Ok(())
}
