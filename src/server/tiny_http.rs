//! `tiny_http` server adapter
//!
//! Reads the body, hands the request to [`route`](super::router::route) and
//! writes the JSON reply back. Requests are served one at a time.

use std::io::{Cursor, Read as _};

use anyhow::anyhow;
use ::tiny_http::{Header, Request, Response, Server, StatusCode};

use super::router::{ApiReply, error_reply, route};
use crate::api::{ApiContext, ApiError};

/// Serve the API on `address` until the process is stopped
pub fn serve(ctx: &ApiContext, address: &str) -> anyhow::Result<()> {
    let server = Server::http(address).map_err(|e| anyhow!("Failed to bind {address}: {e}"))?;
    log::info!("Listening on http://{address}/api");

    for mut request in server.incoming_requests() {
        let reply = handle_request(ctx, &mut request);
        log::info!("{} {} -> {}", request.method(), request.url(), reply.status);
        if let Err(e) = request.respond(to_response(reply)) {
            log::warn!("Failed to send response: {e}");
        }
    }
    Ok(())
}

/// Route a `tiny_http` request through the API
pub fn handle_request(ctx: &ApiContext, request: &mut Request) -> ApiReply {
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        return error_reply(&ApiError::bad_request(format!("Failed to read request body: {e}")));
    }
    let method = request.method().to_string();
    let url = request.url().to_string();
    route(ctx, &method, &url, &body)
}

fn to_response(reply: ApiReply) -> Response<Cursor<Vec<u8>>> {
    let response =
        Response::from_data(reply.body.into_bytes()).with_status_code(StatusCode(reply.status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
