/// Errors from CAN device operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the named CAN interface.
    #[error("failed to open CAN interface {interface}: {source}")]
    Connect {
        interface: String,
        source: std::io::Error,
    },

    /// Failed to write a frame to the bus.
    #[error("failed to write frame to {interface}: {source}")]
    Write {
        interface: String,
        source: std::io::Error,
    },

    /// Failed to read a frame from the bus.
    #[error("failed to read frame from {interface}: {source}")]
    Read {
        interface: String,
        source: std::io::Error,
    },

    /// The frame cannot be represented on the wire.
    #[error("frame not representable on the wire (id {id:#x}, {len} bytes)")]
    Encode { id: u32, len: usize },

    /// No CAN transport backend exists for this platform.
    #[error("CAN transport is not supported on this platform")]
    Unsupported,

    /// An I/O error outside a specific device operation.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
