//! Minitel backend
//!
//! A Minitel in 80-column mode is a VT100 on a 7E1 serial line. Keys arrive
//! one byte at a time and slowly, so a multi-byte sequence (an arrow key) can
//! straddle reads. A reader thread pumps raw chunks into a channel; after the
//! first byte of a keystroke, `wait_event` gives the line a moment to settle
//! before decoding everything that arrived.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use log::{debug, info, warn};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use super::Backend;
use crate::error::{Error, Result};
use crate::input::{Event, InputParser};

/// Line speeds the Minitel supports
pub const SUPPORTED_BAUDS: [u32; 3] = [1200, 4800, 9600];

pub const DEFAULT_BAUD: u32 = 4800;

/// Time allowed for the rest of a keystroke to arrive
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

/// Reject anything the terminal cannot be set to
pub fn check_baud(baud: u32) -> Result<()> {
    if SUPPORTED_BAUDS.contains(&baud) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "unsupported baud rate {} (expected one of {:?})",
            baud, SUPPORTED_BAUDS
        )))
    }
}

/// A terminal on a serial line
pub struct Minitel<W = File> {
    writer: W,
    out: BytesMut,
    input: UnboundedReceiver<Bytes>,
    parser: InputParser,
    /// Decoded but not yet handed out
    pending: VecDeque<Event>,
    settle: Duration,
}

impl Minitel {
    /// Open the serial device and configure the line as 7E1 at `baud`
    pub fn open(path: impl AsRef<Path>, baud: u32) -> Result<Self> {
        let path = path.as_ref();
        check_baud(baud)?;

        let device = OpenOptions::new().read(true).write(true).open(path)?;
        configure_line(&device, baud)?;
        let reader = device.try_clone()?;

        info!("minitel on {} at {} baud", path.display(), baud);
        Self::from_stream(reader, device)
    }
}

impl<W: Write> Minitel<W> {
    /// Drive a terminal over any byte stream
    pub fn from_stream<R: Read + Send + 'static>(reader: R, writer: W) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name("minitel-reader".into())
            .spawn(move || pump(reader, tx))?;

        Ok(Self {
            writer,
            out: BytesMut::with_capacity(4096),
            input: rx,
            parser: InputParser::new(),
            pending: VecDeque::new(),
            settle: DEFAULT_SETTLE,
        })
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Drop whatever was typed while nobody was waiting
    fn discard_stale(&mut self) {
        let mut dropped = 0;
        while let Ok(chunk) = self.input.try_recv() {
            dropped += chunk.len();
        }
        if dropped > 0 {
            debug!("discarded {} stale input bytes", dropped);
        }
    }
}

impl<W: Write> Backend for Minitel<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.out.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn wait_event(&mut self) -> Result<Event> {
        self.flush()?;
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }

        self.discard_stale();
        let first = self.input.blocking_recv().ok_or(Error::Disconnected)?;

        thread::sleep(self.settle);
        let mut raw = BytesMut::from(&first[..]);
        loop {
            match self.input.try_recv() {
                Ok(chunk) => raw.extend_from_slice(&chunk),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        self.pending.extend(self.parser.parse(&raw));
        self.pending.extend(self.parser.finish());
        if self.pending.len() > 1 {
            debug!("{} events queued from one read", self.pending.len());
        }
        Ok(self.pending.pop_front().unwrap_or(Event::Unknown))
    }

    fn flush(&mut self) -> Result<()> {
        if self.out.is_empty() {
            return Ok(());
        }
        let chunk = self.out.split();
        self.writer.write_all(&chunk)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Forward raw chunks until the stream ends or the backend goes away
fn pump<R: Read>(mut reader: R, tx: UnboundedSender<Bytes>) {
    let mut buf = [0u8; 64];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(Bytes::copy_from_slice(&buf[..n])).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("serial read error: {}", e);
                break;
            }
        }
    }
    debug!("minitel reader stopped");
}

#[cfg(unix)]
fn baud_constant(baud: u32) -> Result<libc::speed_t> {
    match baud {
        1200 => Ok(libc::B1200),
        4800 => Ok(libc::B4800),
        9600 => Ok(libc::B9600),
        other => {
            check_baud(other)?;
            Err(Error::Config(format!("no line speed for {} baud", other)))
        }
    }
}

/// Raw mode, 7 data bits, even parity, 1 stop bit
#[cfg(unix)]
fn configure_line(device: &File, baud: u32) -> Result<()> {
    use std::os::unix::io::AsRawFd;

    let speed = baud_constant(baud)?;
    let fd = device.as_raw_fd();

    // SAFETY: fd is open for the lifetime of `device`, and `tio` is fully
    // initialised by tcgetattr before use.
    unsafe {
        let mut tio: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut tio) != 0 {
            return Err(io::Error::last_os_error().into());
        }
        libc::cfmakeraw(&mut tio);
        tio.c_cflag &= !(libc::CSIZE | libc::CSTOPB | libc::PARODD);
        tio.c_cflag |= libc::CS7 | libc::PARENB | libc::CREAD | libc::CLOCAL;
        if libc::cfsetispeed(&mut tio, speed) != 0 || libc::cfsetospeed(&mut tio, speed) != 0 {
            return Err(io::Error::last_os_error().into());
        }
        if libc::tcsetattr(fd, libc::TCSANOW, &tio) != 0 {
            return Err(io::Error::last_os_error().into());
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn configure_line(_device: &File, _baud: u32) -> Result<()> {
    Err(Error::Config("serial line setup is only supported on Unix".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Yields each chunk after its delay, then end of stream
    struct Delayed {
        chunks: VecDeque<(Duration, Vec<u8>)>,
    }

    impl Delayed {
        fn new(chunks: &[(u64, &str)]) -> Self {
            Self {
                chunks: chunks
                    .iter()
                    .map(|(ms, text)| (Duration::from_millis(*ms), text.as_bytes().to_vec()))
                    .collect(),
            }
        }
    }

    impl Read for Delayed {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some((delay, bytes)) => {
                    thread::sleep(delay);
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_split_arrow_key_is_one_event() {
        let reader = Delayed::new(&[(30, "\x1b"), (10, "[A")]);
        let mut minitel = Minitel::from_stream(reader, Vec::new()).unwrap();
        assert_eq!(minitel.wait_event().unwrap(), Event::Up);
        assert!(matches!(minitel.wait_event(), Err(Error::Disconnected)));
    }

    #[test]
    fn test_lone_escape_after_settle() {
        let reader = Delayed::new(&[(20, "\x1b")]);
        let mut minitel = Minitel::from_stream(reader, Vec::new())
            .unwrap()
            .with_settle(Duration::from_millis(20));
        assert_eq!(minitel.wait_event().unwrap(), Event::Escape);
    }

    #[test]
    fn test_surplus_events_are_queued() {
        let reader = Delayed::new(&[(20, "ok")]);
        let mut minitel = Minitel::from_stream(reader, Vec::new()).unwrap();
        assert_eq!(minitel.wait_event().unwrap(), Event::char('o'));

        let start = Instant::now();
        assert_eq!(minitel.wait_event().unwrap(), Event::char('k'));
        assert!(start.elapsed() < DEFAULT_SETTLE);
    }

    #[test]
    fn test_output_flushed_before_wait() {
        let reader = Delayed::new(&[(10, "\r")]);
        let mut minitel = Minitel::from_stream(reader, Vec::new()).unwrap();
        minitel.set_cursor_pos(1, 1).unwrap();
        minitel.write("hi").unwrap();
        assert!(minitel.writer().is_empty());
        assert_eq!(minitel.wait_event().unwrap(), Event::Enter);
        assert_eq!(minitel.writer().as_slice(), b"\x1b[2;2Hhi");
    }

    #[test]
    fn test_baud_rates() {
        for baud in SUPPORTED_BAUDS {
            assert!(check_baud(baud).is_ok());
        }
        assert!(matches!(check_baud(2400), Err(Error::Config(_))));
        assert!(matches!(Minitel::open("/nonexistent/tty", 300), Err(Error::Config(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_baud_constants() {
        assert_eq!(baud_constant(1200).unwrap(), libc::B1200);
        assert_eq!(baud_constant(4800).unwrap(), libc::B4800);
        assert_eq!(baud_constant(9600).unwrap(), libc::B9600);
        assert!(baud_constant(19200).is_err());
    }
}
