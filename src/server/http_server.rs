use super::service::AppService;
use crate::router::Router;
use anyhow::{anyhow, Context, Result};
use may::coroutine::JoinHandle;
use may_minihttp::HttpServerWithHeaders;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Request headers parsed per request before the rest are rejected.
pub const MAX_REQUEST_HEADERS: usize = 32;

/// Serves one [`Router`] over `may_minihttp`.
///
/// The router is frozen once it is handed over; every connection coroutine
/// shares it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RouterServer {
    router: Arc<Router>,
}

impl RouterServer {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self::shared(Arc::new(router))
    }

    #[must_use]
    pub fn shared(router: Arc<Router>) -> Self {
        Self { router }
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Bind `addr` and start accepting connections in a background coroutine.
    ///
    /// # Errors
    ///
    /// Returns an error if `addr` does not resolve or cannot be bound.
    pub fn bind<A: ToSocketAddrs>(self, addr: A) -> Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()
            .context("failed to resolve listen address")?
            .next()
            .ok_or_else(|| anyhow!("listen address resolved to nothing"))?;

        let service = AppService::new(Arc::clone(&self.router));
        let handle = HttpServerWithHeaders::<_, MAX_REQUEST_HEADERS>(service)
            .start(addr)
            .with_context(|| format!("failed to bind {addr}"))?;

        info!(
            addr = %addr,
            router = %self.router.name(),
            routes = self.router.len(),
            "Server listening"
        );
        Ok(ServerHandle {
            addr,
            router: self.router,
            handle,
        })
    }
}

/// A running [`RouterServer`].
pub struct ServerHandle {
    addr: SocketAddr,
    router: Arc<Router>,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The router being served.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Block until the listener accepts a TCP connection or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener is still unreachable at the deadline.
    pub fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            match TcpStream::connect(self.addr) {
                Ok(_) => return Ok(()),
                Err(err) if Instant::now() >= deadline => {
                    return Err(err)
                        .with_context(|| format!("{} not reachable after {timeout:?}", self.addr));
                }
                Err(_) => thread::sleep(Duration::from_millis(5)),
            }
        }
    }

    /// Cancel the accept loop and wait for it to unwind.
    pub fn shutdown(self) {
        info!(addr = %self.addr, router = %self.router.name(), "Server stopping");
        // SAFETY: a cancelled may coroutine unwinds at its next yield point; the
        // accept loop holds only the listener and a service clone, both dropped
        // by the unwind, and it is joined right after.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
    }

    /// Serve until the accept loop exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the accept loop panicked.
    pub fn join(self) -> Result<()> {
        self.handle
            .join()
            .map_err(|panic| anyhow!("server coroutine panicked: {panic:?}"))
    }
}
