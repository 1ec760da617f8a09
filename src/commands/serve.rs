//! Serve command - expose the API over HTTP

use super::Session;

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use isoaudit::adapters::MemorySummaryCache;

/// Serve the HTTP API until interrupted
#[cfg(feature = "server")]
pub fn serve(session: &Session, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut server = session.config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }

    let address = server.address();
    println!("Serving isoaudit API on http://{address}/api/v1");
    println!("Press Ctrl+C to stop");
    let ctx = session.ctx.clone().with_cache(Arc::new(MemorySummaryCache::new()));
    isoaudit::server::tiny_http::serve(&ctx, &address)
}

/// Serve the HTTP API until interrupted
#[cfg(not(feature = "server"))]
pub fn serve(_session: &Session, _host: Option<String>, _port: Option<u16>) -> anyhow::Result<()> {
    anyhow::bail!("isoaudit was built without the `server` feature; rebuild with --features server")
}
