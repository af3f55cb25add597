use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmbeddedIoError {
    #[error("Unspecified error kind.")]
    Other,
    #[error("An entity was not found.")]
    NotFound,
    #[error("The operation lacked the necessary privileges to complete.")]
    PermissionDenied,
    #[error("The connection was refused by the remote peer.")]
    ConnectionRefused,
    #[error("The connection was reset by the remote peer.")]
    ConnectionReset,
    #[error("The connection was aborted by the remote peer.")]
    ConnectionAborted,
    #[error("The operation failed because it was not connected yet.")]
    NotConnected,
    #[error("The operation failed because a pipe was closed.")]
    BrokenPipe,
    #[error("A parameter was incorrect.")]
    InvalidInput,
    #[error("Data not valid for the operation were encountered.")]
    InvalidData,
    #[error("The I/O operation's timeout expired, causing it to be canceled.")]
    TimedOut,
    #[error("This operation was interrupted.")]
    Interrupted,
    #[error("This operation is unsupported on this platform.")]
    Unsupported,
    #[error("The operation failed to allocate enough memory.")]
    OutOfMemory,
    #[error("An attempted write could not write any data.")]
    WriteZero,
    #[error("The peer closed the stream before a full line arrived.")]
    UnexpectedEof,
}

impl From<embedded_io::ErrorKind> for EmbeddedIoError {
    fn from(value: embedded_io::ErrorKind) -> Self {
        use embedded_io::ErrorKind as E;
        match value {
            E::NotFound => Self::NotFound,
            E::PermissionDenied => Self::PermissionDenied,
            E::ConnectionRefused => Self::ConnectionRefused,
            E::ConnectionReset => Self::ConnectionReset,
            E::ConnectionAborted => Self::ConnectionAborted,
            E::NotConnected => Self::NotConnected,
            E::BrokenPipe => Self::BrokenPipe,
            E::InvalidInput => Self::InvalidInput,
            E::InvalidData => Self::InvalidData,
            E::TimedOut => Self::TimedOut,
            E::Interrupted => Self::Interrupted,
            E::Unsupported => Self::Unsupported,
            E::OutOfMemory => Self::OutOfMemory,
            E::WriteZero => Self::WriteZero,
            _ => Self::Other,
        }
    }
}

impl From<&dyn embedded_io::Error> for EmbeddedIoError {
    fn from(value: &dyn embedded_io::Error) -> Self {
        value.kind().into()
    }
}
