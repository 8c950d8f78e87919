//! Frame sinks for the LCD

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use g13_display::{DisplayError, DisplaySink};
use g13_protocol::{encode_packet, FRAMEBUFFER_SIZE, LCD_PACKET_SIZE};
use log::{debug, info, trace};

/// `ENODEV`: the device was unplugged
const ENODEV: i32 = 19;

/// LCD output through the hidraw node
///
/// Each frame goes out as one 992-byte write: the 32-byte header followed
/// by the framebuffer. After a disconnect the node is reopened on the next
/// frame.
pub struct HidrawDisplay {
    path: PathBuf,
    file: Option<File>,
    packet: [u8; LCD_PACKET_SIZE],
}

impl HidrawDisplay {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().write(true).open(path)?;
        info!("Writing LCD frames to {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            packet: [0; LCD_PACKET_SIZE],
        })
    }

    fn reopen_if_closed(&mut self) -> Result<(), DisplayError> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .write(true)
                .open(&self.path)
                .map_err(|_| DisplayError::Disconnected)?;
            debug!("Reopened {}", self.path.display());
            self.file = Some(file);
        }
        Ok(())
    }
}

impl DisplaySink for HidrawDisplay {
    fn write_frame(&mut self, frame: &[u8; FRAMEBUFFER_SIZE]) -> Result<(), DisplayError> {
        let len = encode_packet(frame, &mut self.packet)?;
        self.reopen_if_closed()?;
        let Some(file) = self.file.as_mut() else {
            return Err(DisplayError::Disconnected);
        };
        if let Err(e) = file.write_all(&self.packet[..len]) {
            if e.raw_os_error() == Some(ENODEV) || e.kind() == io::ErrorKind::NotFound {
                self.file = None;
                return Err(DisplayError::Disconnected);
            }
            return Err(DisplayError::Communication);
        }
        trace!("LCD frame written");
        Ok(())
    }
}

/// Discards frames, used when running without a device
#[derive(Debug, Default)]
pub struct NullDisplay {
    frames: u32,
    last_pixels: usize,
}

impl NullDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames written so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Lit pixels in the last frame
    pub fn last_pixels(&self) -> usize {
        self.last_pixels
    }
}

impl DisplaySink for NullDisplay {
    fn write_frame(&mut self, frame: &[u8; FRAMEBUFFER_SIZE]) -> Result<(), DisplayError> {
        self.frames += 1;
        self.last_pixels = frame.iter().map(|b| b.count_ones() as usize).sum();
        debug!("Frame {} ({} pixels lit)", self.frames, self.last_pixels);
        Ok(())
    }
}
