//! Simulated requests for tests.
//!
//! [`TestClient`] feeds requests straight into [`HttpServer::dispatch`], so
//! routing can be exercised without binding a socket.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::{HttpRequest, HttpVersion, Method};
use crate::server::{HttpResponse, HttpServer, StatusCode};

/// Drives an [`HttpServer`] with in-memory requests.
pub struct TestClient {
    server: HttpServer,
}

impl TestClient {
    pub fn new(server: HttpServer) -> Self {
        Self { server }
    }

    /// The server under test, e.g. to register more routes.
    pub fn server(&self) -> &HttpServer {
        &self.server
    }

    /// Send a request with the given method token to `path`.
    ///
    /// A method that is not a valid HTTP token is answered with `400`, as it
    /// would be on the wire.
    pub async fn simulate_request(&self, method: &str, path: &str) -> HttpResponse {
        let method = match Method::from_str(method) {
            Ok(method) => method,
            Err(e) => return HttpResponse::error(StatusCode::BadRequest, Some(e.to_string())),
        };

        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "localhost".to_string());
        let request = HttpRequest::new(method, path.to_string(), HttpVersion::Http11, headers);

        self.server.dispatch(request).await
    }

    pub async fn simulate_get(&self, path: &str) -> HttpResponse {
        self.simulate_request("GET", path).await
    }
}
