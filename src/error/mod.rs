#![allow(missing_docs)]
//! Errors

mod frame;
mod handshake;

pub use frame::FrameError;
pub use handshake::HandshakeError;

use std::fmt::{Display, Formatter};

/// Alias with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Frame(FrameError),

    Handshake(HandshakeError),

    /// Read side io error.
    Io(std::io::Error),

    /// The underlying stream rejected a write.
    WriteFailure(std::io::Error),

    /// A read or write deadline expired.
    Timeout,

    /// The handshake was requested on a connection which already ran it.
    AlreadyNegotiated,
}

impl Error {
    /// Peer closed the stream between two frames.
    #[inline]
    pub const fn is_clean_close(&self) -> bool {
        matches!(self, Error::Frame(e) if e.is_frame_boundary())
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self { Error::Frame(e) }
}

impl From<HandshakeError> for Error {
    fn from(e: HandshakeError) -> Self { Error::Handshake(e) }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error { Error::Io(e) }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        use std::io::ErrorKind;
        match e {
            Error::Io(e) | Error::WriteFailure(e) => e,
            Error::Timeout => ErrorKind::TimedOut.into(),
            e @ Error::Frame(FrameError::UnexpectedEnd { .. }) => {
                std::io::Error::new(ErrorKind::UnexpectedEof, e)
            }
            e => std::io::Error::new(ErrorKind::InvalidData, e),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            Frame(e) => write!(f, "Frame error: {}", e),
            Handshake(e) => write!(f, "Handshake error: {}", e),
            Io(e) => write!(f, "Io error: {}", e),
            WriteFailure(e) => write!(f, "Write failure: {}", e),
            Timeout => write!(f, "Deadline expired"),
            AlreadyNegotiated => write!(f, "Connection is already negotiated"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match self {
            Frame(e) => Some(e),
            Handshake(e) => Some(e),
            Io(e) | WriteFailure(e) => Some(e),
            Timeout | AlreadyNegotiated => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn clean_close() {
        let e = Error::from(FrameError::UnexpectedEnd { offset: 0 });
        assert!(e.is_clean_close());

        let e = Error::from(FrameError::UnexpectedEnd { offset: 3 });
        assert!(!e.is_clean_close());

        assert!(!Error::from(FrameError::UnsupportedFrameType).is_clean_close());
    }

    #[test]
    fn into_io_error() {
        let e: std::io::Error = Error::from(FrameError::UnsupportedLength).into();
        assert_eq!(e.kind(), std::io::ErrorKind::InvalidData);

        let inner = e.get_ref().unwrap();
        let inner: &Error = inner.downcast_ref().unwrap();
        let source = inner.source().unwrap();
        assert_eq!(
            source.downcast_ref::<FrameError>(),
            Some(&FrameError::UnsupportedLength)
        );
    }
}
