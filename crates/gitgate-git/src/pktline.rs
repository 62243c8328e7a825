//! Git pkt-line framing.
//!
//! Every packet starts with a 4-digit hex length that counts itself, so a
//! data packet carrying `n` bytes is prefixed with `n + 4`. Lengths 0000,
//! 0001 and 0002 are the flush, delimiter and response-end markers.

use crate::{GitError, Result};
use std::io::{ErrorKind, Read, Write};

/// Largest payload a single data packet can carry (65520 minus the prefix).
pub const MAX_PKT_DATA_LEN: usize = 65516;

const PREFIX_LEN: usize = 4;

/// A pkt-line packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PktLine {
    /// Data line with content.
    Data(Vec<u8>),
    /// Flush packet (0000).
    Flush,
    /// Delimiter packet (0001).
    Delimiter,
    /// Response-end packet (0002).
    ResponseEnd,
}

impl PktLine {
    /// Creates a data packet holding `text` terminated by a newline.
    pub fn line(text: &str) -> Self {
        let mut data = Vec::with_capacity(text.len() + 1);
        data.extend_from_slice(text.as_bytes());
        if !text.ends_with('\n') {
            data.push(b'\n');
        }
        Self::Data(data)
    }

    /// Number of bytes the packet occupies on the wire.
    pub fn wire_len(&self) -> usize {
        PREFIX_LEN + self.data().map_or(0, <[u8]>::len)
    }

    /// Appends the wire form of the packet to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Data(data) => {
                out.extend_from_slice(&length_prefix(data.len() + PREFIX_LEN));
                out.extend_from_slice(data);
            }
            Self::Flush => out.extend_from_slice(b"0000"),
            Self::Delimiter => out.extend_from_slice(b"0001"),
            Self::ResponseEnd => out.extend_from_slice(b"0002"),
        }
    }

    /// Returns the wire form of the packet.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        self.encode_into(&mut out);
        out
    }

    /// Returns the payload, or None for marker packets.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the payload as text with one trailing newline removed.
    pub fn as_str(&self) -> Option<&str> {
        let text = std::str::from_utf8(self.data()?).ok()?;
        Some(text.strip_suffix('\n').unwrap_or(text))
    }
}

fn invalid(reason: String) -> GitError {
    tracing::trace!(%reason, "Rejected pkt-line");
    GitError::InvalidPktLine(reason)
}

fn check_payload_len(len: usize) -> Result<()> {
    if len > MAX_PKT_DATA_LEN {
        return Err(invalid(format!(
            "payload of {len} bytes exceeds {MAX_PKT_DATA_LEN}"
        )));
    }
    Ok(())
}

/// `len` is at most `MAX_PKT_DATA_LEN + 4`, which fits in two bytes.
fn length_prefix(len: usize) -> [u8; PREFIX_LEN] {
    let mut prefix = [0u8; PREFIX_LEN];
    let digits = hex::encode((len as u16).to_be_bytes());
    prefix.copy_from_slice(digits.as_bytes());
    prefix
}

fn parse_length(prefix: &[u8; PREFIX_LEN]) -> Result<usize> {
    let mut raw = [0u8; 2];
    hex::decode_to_slice(prefix, &mut raw).map_err(|_| {
        invalid(format!(
            "invalid length prefix {:?}",
            String::from_utf8_lossy(prefix)
        ))
    })?;
    Ok(usize::from(u16::from_be_bytes(raw)))
}

/// Reads pkt-line packets from a byte source.
pub struct PktLineReader<R> {
    reader: R,
}

impl<R: Read> PktLineReader<R> {
    /// Creates a new pkt-line reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the next packet, or `None` at a clean end of input.
    ///
    /// Input that ends inside a length prefix or a payload is an error.
    pub fn read(&mut self) -> Result<Option<PktLine>> {
        let mut prefix = [0u8; PREFIX_LEN];
        let mut filled = 0;
        while filled < prefix.len() {
            match self.reader.read(&mut prefix[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(invalid("truncated length prefix".to_string())),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        match parse_length(&prefix)? {
            0 => Ok(Some(PktLine::Flush)),
            1 => Ok(Some(PktLine::Delimiter)),
            2 => Ok(Some(PktLine::ResponseEnd)),
            3 => Err(invalid("length 3 is reserved".to_string())),
            len => {
                let data_len = len - PREFIX_LEN;
                check_payload_len(data_len)?;
                let mut data = vec![0u8; data_len];
                self.reader.read_exact(&mut data).map_err(|e| {
                    if e.kind() == ErrorKind::UnexpectedEof {
                        invalid(format!("truncated payload of {data_len} bytes"))
                    } else {
                        e.into()
                    }
                })?;
                Ok(Some(PktLine::Data(data)))
            }
        }
    }

    /// Reads packets up to (not including) the next flush or end of input.
    pub fn read_until_flush(&mut self) -> Result<Vec<PktLine>> {
        let mut packets = Vec::new();
        while let Some(pkt) = self.read()? {
            if pkt == PktLine::Flush {
                break;
            }
            packets.push(pkt);
        }
        Ok(packets)
    }

    /// Consumes the reader and returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Frames payloads as pkt-lines onto a byte sink, counting what it wrote.
pub struct PktLineWriter<W> {
    writer: W,
    written: u64,
}

impl<W: Write> PktLineWriter<W> {
    /// Creates a new pkt-line writer.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Bytes written so far, prefixes included.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Writes `data` as one data packet.
    ///
    /// Payloads over [`MAX_PKT_DATA_LEN`] are rejected before anything is
    /// written.
    pub fn write_data(&mut self, data: &[u8]) -> Result<()> {
        self.write_parts(&[data])
    }

    /// Writes `text` as one data packet, appending a newline if it has none.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        if text.ends_with('\n') {
            self.write_parts(&[text.as_bytes()])
        } else {
            self.write_parts(&[text.as_bytes(), b"\n"])
        }
    }

    /// Writes any packet.
    pub fn write_packet(&mut self, pkt: &PktLine) -> Result<()> {
        match pkt.data() {
            Some(data) => self.write_data(data),
            None => self.write_raw(&pkt.encode()),
        }
    }

    /// Writes a flush packet.
    pub fn flush_pkt(&mut self) -> Result<()> {
        self.write_raw(b"0000")
    }

    /// Writes a delimiter packet.
    pub fn delim_pkt(&mut self) -> Result<()> {
        self.write_raw(b"0001")
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_parts(&mut self, parts: &[&[u8]]) -> Result<()> {
        let len: usize = parts.iter().map(|p| p.len()).sum();
        check_payload_len(len)?;
        self.write_raw(&length_prefix(len + PREFIX_LEN))?;
        for part in parts {
            self.write_raw(part)?;
        }
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}
