//! Connection settings.
//!
//! Values are supplied by the embedding program,
//! nothing is loaded from the environment here.

use std::time::Duration;

/// /ws
pub const DEFAULT_PATH: &str = "/ws";

/// 4096
pub const DEFAULT_MAX_REQUEST_LEN: usize = 4096;

/// Per connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The only route which could be upgraded.
    pub path: String,
    /// Max size of the upgrade request, including headers.
    pub max_request_len: usize,
    /// Deadline of the handshake and of each frame read.
    /// `None` waits forever.
    ///
    /// Applied by the async driver, and by
    /// [`serve_tcp`](crate::connection::serve_tcp) as a socket timeout.
    /// Other blocking transports are left as they are.
    pub read_timeout: Option<Duration>,
    /// Deadline of each frame write.
    /// `None` waits forever. Applied like `read_timeout`.
    pub write_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
            max_request_len: DEFAULT_MAX_REQUEST_LEN,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

impl Config {
    /// Same as [`Config::default`].
    #[inline]
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[inline]
    pub fn max_request_len(mut self, len: usize) -> Self {
        self.max_request_len = len;
        self
    }

    #[inline]
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    #[inline]
    pub fn write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.path, "/ws");
        assert_eq!(config.max_request_len, 4096);
        assert!(config.read_timeout.is_none());
        assert!(config.write_timeout.is_none());
    }

    #[test]
    fn chained_setters() {
        let config = Config::new()
            .path("/echo")
            .max_request_len(1024)
            .read_timeout(Some(Duration::from_secs(30)))
            .write_timeout(Some(Duration::from_secs(5)));

        assert_eq!(config.path, "/echo");
        assert_eq!(config.max_request_len, 1024);
        assert_eq!(config.read_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.write_timeout, Some(Duration::from_secs(5)));
    }
}
