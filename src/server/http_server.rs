//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinSet;
use log::{debug, error, info, warn};

use crate::parser::{parse_request, HttpRequest, Method};
use crate::routing::{MethodDispatchTable, Resource};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::Route;
use crate::server::response::{HttpResponse, StatusCode};

/// An HTTP server that dispatches on the request method.
///
/// Each path is bound to a [`Resource`]. At registration the server builds
/// the resource's [`MethodDispatchTable`] from the configured recognized
/// methods; requests are then answered from that table alone.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The routes.
    pub routes: Arc<RwLock<Vec<Route>>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            routes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Bind `resource` to `path`, replacing any resource already there.
    pub async fn add_resource<R: Resource + ?Sized>(&self, path: impl Into<String>, resource: &R) {
        self.add_resource_with_suffix(path, resource, None).await;
    }

    /// Bind `resource` to `path`, using the handlers whose slot names carry
    /// `suffix` (`on_get_<suffix>` and so on).
    pub async fn add_resource_with_suffix<R: Resource + ?Sized>(
        &self,
        path: impl Into<String>,
        resource: &R,
        suffix: Option<&str>,
    ) {
        let path = path.into();
        let table = MethodDispatchTable::build_with_suffix(resource, &self.config.recognized_methods, suffix);
        debug!("Route {path} handles {methods:?}", methods = table.allowed_methods());

        let mut routes = self.routes.write().await;
        routes.retain(|route| route.path != path);
        routes.push(Route { path, table });
    }

    /// Answer a single request.
    pub async fn dispatch(&self, request: HttpRequest) -> HttpResponse {
        Self::dispatch_request(&self.routes, request).await
    }

    async fn dispatch_request(routes: &RwLock<Vec<Route>>, request: HttpRequest) -> HttpResponse {
        let lookup = {
            let routes = routes.read().await;
            routes
                .iter()
                .find(|route| route.path == request.route_path())
                .map(|route| {
                    let handler = route.table.get(request.method.as_str()).cloned();
                    let mut allowed: Vec<String> = route.table.allowed_methods().into_iter().map(String::from).collect();
                    if !route.table.contains(Method::OPTIONS.as_str()) {
                        allowed.push(Method::OPTIONS.to_string());
                        allowed.sort();
                    }
                    (handler, allowed)
                })
        };

        let Some((handler, allowed)) = lookup else {
            debug!("No route for {path}", path = request.path);
            return HttpResponse::error(StatusCode::NotFound, Some(format!("Not found: {}", request.route_path())));
        };

        match handler {
            Some(handler) => {
                let method = request.method.clone();
                match handler(request).await {
                    Ok(response) => response,
                    Err(e) => {
                        error!("Handler for {method} failed: {e}");
                        HttpResponse::error(StatusCode::InternalServerError, None)
                    }
                }
            }
            None if request.method == Method::OPTIONS => HttpResponse::new(StatusCode::Ok)
                .with_allow(allowed.iter().map(String::as_str))
                .with_body_bytes(Vec::new()),
            None => {
                debug!("Method {method} not allowed for {path}", method = request.method, path = request.route_path());
                HttpResponse::error(
                    StatusCode::MethodNotAllowed,
                    Some(format!("Method {} not allowed for path: {}", request.method, request.route_path())),
                )
                .with_allow(allowed.iter().map(String::as_str))
            }
        }
    }

    /// Log the recognized methods and registered endpoints.
    async fn display_server_info(&self) {
        let recognized = self.config.recognized_methods.iter().collect::<Vec<_>>().join(", ");
        info!("Recognized methods: {recognized}");

        let routes = self.routes.read().await;
        info!("Registered endpoints:");
        for route in routes.iter() {
            let methods = route.table.allowed_methods().join(", ");
            info!("  {methods} {}", route.path);
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: Arc<mpsc::Sender<()>>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle a new connection.
    async fn handle_new_connection(
        mut socket: tokio::net::TcpStream,
        addr: SocketAddr,
        semaphore: Arc<tokio::sync::Semaphore>,
        routes: Arc<RwLock<Vec<Route>>>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_content_type("text/plain")
                    .with_body_string("Server is at capacity, please try again later");
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, routes, read_buffer_size).await {
                match e {
                    Error::ParseError(e) => debug!("Rejected request from {addr}: {e}"),
                    e => error!("Error handling connection from {addr}: {e}"),
                }
            }
        });
    }

    /// Handle connection errors.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        }).await;

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info().await;

        let listener = self.setup_listener().await?;
        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.config.max_connections));

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shutdown_tx = Arc::new(shutdown_tx);

        let mut tasks = JoinSet::new();
        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.routes.clone(),
                                self.config.read_buffer_size,
                                &mut tasks,
                            ).await;
                        },
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Handle a single connection: read one request, dispatch it, write the
    /// response.
    ///
    /// Returns the parse error after answering `400` when the request is
    /// malformed. `404` and `405` answers are not errors.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        routes: Arc<RwLock<Vec<Route>>>,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&buf[..n]) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::error(StatusCode::BadRequest, Some(format!("Error parsing request: {e}")));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        let response = Self::dispatch_request(&routes, request).await;
        socket.write_all(&response.to_bytes()).await?;

        Ok(())
    }
}
