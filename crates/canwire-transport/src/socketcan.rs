//! SocketCAN backend (Linux).

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use canwire_codec::{Frame, FrameKind};
use socketcan::{
    CanAnyFrame, CanFdFrame, CanFdSocket, CanFrame, EmbeddedFrame, ExtendedId, Id, Socket,
    StandardId,
};
use tracing::{debug, warn};

use crate::device::CanDevice;
use crate::error::{Result, TransportError};

/// Link type reported by sysfs for CAN network devices (ARPHRD_CAN).
const ARPHRD_CAN: &str = "280";

/// A frame in its SocketCAN representation, split by framing so it can be
/// handed to the socket write path (which takes concrete frame types).
#[derive(Debug, Clone, Copy)]
pub(crate) enum WireFrame {
    Classic(CanFrame),
    Fd(CanFdFrame),
}

/// A CAN interface opened through SocketCAN.
///
/// Uses a raw FD-enabled socket so both classic and FD frames can flow
/// through one device. Writing an FD frame to an interface without FD
/// support fails at write time and is surfaced as a [`TransportError::Write`].
pub struct SocketCanDevice {
    socket: CanFdSocket,
    interface: String,
}

impl SocketCanDevice {
    /// Open the named interface (e.g. `can0`, `vcan0`).
    pub fn open(interface: &str) -> Result<Self> {
        let socket = CanFdSocket::open(interface).map_err(|source| TransportError::Connect {
            interface: interface.to_string(),
            source,
        })?;
        debug!(interface, "opened SocketCAN device");
        Ok(Self {
            socket,
            interface: interface.to_string(),
        })
    }
}

impl CanDevice for SocketCanDevice {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let result = match to_wire(frame)? {
            WireFrame::Classic(wire) => self.socket.write_frame(&wire),
            WireFrame::Fd(wire) => self.socket.write_frame(&wire),
        };
        result.map_err(|source| TransportError::Write {
            interface: self.interface.clone(),
            source,
        })
    }

    /// Wait up to `timeout` for one frame.
    ///
    /// A lapsed timeout or a signal interruption yields `Ok(None)` so the
    /// caller can re-check its shutdown flag. Remote frames come back with
    /// an empty payload; SocketCAN does not expose their requested DLC.
    fn read_frame_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>> {
        let any = match self.socket.read_frame_timeout(timeout) {
            Ok(any) => any,
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::TimedOut
                        | io::ErrorKind::WouldBlock
                        | io::ErrorKind::Interrupted
                ) =>
            {
                return Ok(None);
            }
            Err(source) => {
                return Err(TransportError::Read {
                    interface: self.interface.clone(),
                    source,
                });
            }
        };
        match from_wire(&any) {
            Some(frame) => Ok(Some(frame)),
            None => {
                warn!(interface = %self.interface, "skipping bus error frame");
                Ok(None)
            }
        }
    }

    fn interface(&self) -> &str {
        &self.interface
    }
}

fn make_id(frame: &Frame) -> Result<Id> {
    let encode_err = TransportError::Encode {
        id: frame.id,
        len: frame.dlc(),
    };
    if frame.extended {
        ExtendedId::new(frame.id).map(Id::Extended).ok_or(encode_err)
    } else {
        u16::try_from(frame.id)
            .ok()
            .and_then(StandardId::new)
            .map(Id::Standard)
            .ok_or(encode_err)
    }
}

/// Convert a validated frame to its SocketCAN representation.
pub(crate) fn to_wire(frame: &Frame) -> Result<WireFrame> {
    let id = make_id(frame)?;
    let encode_err = || TransportError::Encode {
        id: frame.id,
        len: frame.dlc(),
    };

    match &frame.kind {
        FrameKind::Remote => CanFrame::new_remote(id, 0)
            .map(WireFrame::Classic)
            .ok_or_else(encode_err),
        FrameKind::Data(bytes) if frame.fd => CanFdFrame::new(id, bytes)
            .map(WireFrame::Fd)
            .ok_or_else(encode_err),
        FrameKind::Data(bytes) => CanFrame::new(id, bytes)
            .map(WireFrame::Classic)
            .ok_or_else(encode_err),
    }
}

/// Convert a received SocketCAN frame back to the codec's frame type.
///
/// Returns `None` for bus error frames. Remote frames map to a payloadless
/// [`FrameKind::Remote`]; the DLC the requester put on the wire is dropped.
pub(crate) fn from_wire(any: &CanAnyFrame) -> Option<Frame> {
    match any {
        CanAnyFrame::Normal(frame) => {
            let (id, extended) = split_id(frame.id());
            Some(Frame {
                id,
                extended,
                fd: false,
                kind: FrameKind::Data(frame.data().to_vec().into()),
            })
        }
        CanAnyFrame::Remote(frame) => {
            let (id, extended) = split_id(frame.id());
            Some(Frame {
                id,
                extended,
                fd: false,
                kind: FrameKind::Remote,
            })
        }
        CanAnyFrame::Fd(frame) => {
            let (id, extended) = split_id(frame.id());
            Some(Frame {
                id,
                extended,
                fd: true,
                kind: FrameKind::Data(frame.data().to_vec().into()),
            })
        }
        CanAnyFrame::Error(_) => None,
    }
}

fn split_id(id: Id) -> (u32, bool) {
    match id {
        Id::Standard(standard) => (u32::from(standard.as_raw()), false),
        Id::Extended(extended) => (extended.as_raw(), true),
    }
}

/// Enumerate CAN network interfaces via sysfs.
pub fn list_interfaces() -> Result<Vec<String>> {
    list_interfaces_in(Path::new("/sys/class/net"))
}

fn list_interfaces_in(net_dir: &Path) -> Result<Vec<String>> {
    let mut interfaces = Vec::new();
    for entry in fs::read_dir(net_dir)? {
        let entry = entry?;
        let type_file = entry.path().join("type");
        // Interfaces can disappear between readdir and read; skip quietly.
        let Ok(contents) = fs::read_to_string(&type_file) else {
            continue;
        };
        if is_can_link_type(&contents) {
            interfaces.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    interfaces.sort();
    Ok(interfaces)
}

fn is_can_link_type(contents: &str) -> bool {
    contents.trim() == ARPHRD_CAN
}
