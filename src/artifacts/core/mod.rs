//! Core utilities and shared types
//!
//! - `error`: typed failures returned by repository operations
//! - `PagerWriter`: `Write` adapter over the minus pager used by `log`

pub mod error;

use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding the minus pager
///
/// Output is forwarded as text; a UTF-8 sequence split across two writes is held
/// back until it is complete.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(error) if error.error_len().is_none() => error.valid_up_to(),
            Err(error) => return Err(io::Error::new(io::ErrorKind::InvalidData, error)),
        };

        let text = String::from_utf8_lossy(&self.pending[..valid_up_to]).into_owned();
        self.pager.push_str(text).map_err(io::Error::other)?;
        self.pending.drain(..valid_up_to);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
