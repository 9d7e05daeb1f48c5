//! CAN bus device abstraction.
//!
//! Provides a unified interface over the platform CAN stack: open an
//! interface by name, write validated frames, block on reception, and
//! enumerate CAN network interfaces. On Linux this wraps SocketCAN; other
//! platforms get a typed `Unsupported` error.
//!
//! Bus timing, bitrate configuration, and interface bring-up are out of
//! scope — the interface must already exist and be up.

pub mod device;
pub mod error;

#[cfg(target_os = "linux")]
pub mod socketcan;

pub use device::{connect, list_interfaces, CanDevice};
pub use error::{Result, TransportError};

#[cfg(target_os = "linux")]
pub use socketcan::SocketCanDevice;
