//! TCP echo server.
//!
//! Every accepted connection is served by its own task,
//! connections share nothing.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use log::{debug, info, warn};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::connection::serve_async;

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Settings of each connection.
    pub config: Config,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            config: Config::default(),
        }
    }
}

/// A bound listener.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    config: Config,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        info!("listening on {}", listener.local_addr()?);
        Ok(Server {
            listener,
            config: config.config,
        })
    }

    #[inline]
    pub fn local_addr(&self) -> io::Result<SocketAddr> { self.listener.local_addr() }

    /// Accept connections forever.
    pub async fn run(self) -> io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` completes.
    /// Connections already accepted keep running.
    pub async fn run_until<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((tcp, addr)) => {
                        debug!("new connection from {}", addr);
                        let config = self.config.clone();
                        tokio::spawn(async move {
                            if let Err(e) = serve_async(tcp, config).await {
                                debug!("connection {} finished: {}", addr, e);
                            }
                        });
                    }
                    // per-connection failures such as EMFILE, keep accepting
                    Err(e) => warn!("accept error: {}", e),
                },
                _ = &mut shutdown => {
                    info!("shutdown");
                    return Ok(());
                }
            }
        }
    }
}
