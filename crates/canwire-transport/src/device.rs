use std::time::Duration;

use canwire_codec::Frame;

use crate::error::Result;

/// A connected CAN bus device.
///
/// The codec stays fully decoupled from this layer: callers parse a
/// descriptor into a [`Frame`] first, then hand it over for transmission.
/// Ordering guarantees on reception are whatever the underlying bus driver
/// provides.
pub trait CanDevice {
    /// Transmit one frame.
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Wait up to `timeout` for the next frame.
    ///
    /// Returns `Ok(None)` when the timeout elapses or the wait is
    /// interrupted by a signal, so callers can re-check their shutdown
    /// flag between polls. Bus error frames are not surfaced here;
    /// backends log and skip them. Received remote frames carry no
    /// payload, so their requested data length (DLC) is not preserved.
    fn read_frame_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>>;

    /// Name of the interface this device is bound to.
    fn interface(&self) -> &str;
}

/// Open the named CAN interface.
#[cfg(target_os = "linux")]
pub fn connect(interface: &str) -> Result<Box<dyn CanDevice>> {
    Ok(Box::new(crate::socketcan::SocketCanDevice::open(interface)?))
}

/// Open the named CAN interface.
#[cfg(not(target_os = "linux"))]
pub fn connect(_interface: &str) -> Result<Box<dyn CanDevice>> {
    Err(crate::error::TransportError::Unsupported)
}

/// Enumerate CAN network interfaces on this host.
#[cfg(target_os = "linux")]
pub fn list_interfaces() -> Result<Vec<String>> {
    crate::socketcan::list_interfaces()
}

/// Enumerate CAN network interfaces on this host.
#[cfg(not(target_os = "linux"))]
pub fn list_interfaces() -> Result<Vec<String>> {
    Err(crate::error::TransportError::Unsupported)
}
