use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeError {
    // http error
    HttpPath,

    // websocket error
    Upgrade,

    Connection,

    SecWebSocketKey,

    SecWebSocketVersion,

    // transport error
    UpgradeUnsupported,

    // other error

    // read
    NotEnoughData,

    // write
    NotEnoughCapacity,

    Httparse(httparse::Error),
}

impl HandshakeError {
    /// Http status code sent back to the peer.
    pub const fn status(&self) -> u16 {
        use HandshakeError::*;
        match self {
            HttpPath => 404,
            NotEnoughCapacity => 431,
            UpgradeUnsupported => 500,
            _ => 400,
        }
    }

    /// Plain text body sent back to the peer.
    pub const fn reason(&self) -> &'static str {
        use HandshakeError::*;
        match self {
            HttpPath => "404 page not found",
            Upgrade | Connection => "Not a WebSocket request",
            SecWebSocketVersion => "Unsupported WebSocket version",
            SecWebSocketKey => "Missing WebSocket key",
            UpgradeUnsupported => "Hijacking not supported",
            NotEnoughData | Httparse(_) => "Bad Request",
            NotEnoughCapacity => "Request Header Fields Too Large",
        }
    }
}

impl Display for HandshakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use HandshakeError::*;
        match self {
            // http error
            HttpPath => write!(f, "Unknown request path"),

            // websocket error
            Upgrade => write!(f, "Missing or illegal upgrade header"),

            Connection => write!(f, "Missing or illegal connection header"),

            SecWebSocketKey => {
                write!(f, "Missing sec-websocket-key header")
            }

            SecWebSocketVersion => {
                write!(f, "Missing or illegal sec-websocket-version")
            }

            // transport error
            UpgradeUnsupported => write!(f, "Transport can not yield the raw stream"),

            // other error
            NotEnoughData => write!(f, "Not enough data to parse"),

            NotEnoughCapacity => write!(f, "Not enough space to read to"),

            Httparse(e) => write!(f, "Http parse error: {}", e),
        }
    }
}

impl From<httparse::Error> for HandshakeError {
    fn from(e: httparse::Error) -> Self { HandshakeError::Httparse(e) }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let HandshakeError::Httparse(e) = self {
            Some(e)
        } else {
            None
        }
    }
}
