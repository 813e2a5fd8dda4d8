//! Minimal ZIP container support: enough to pull one part out of a
//! WordprocessingML package and to write a small package back.
//! ZIP64 and multi-disk archives are not handled.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::document::DocumentError;

pub const LOCAL_HEADER_MAGIC: &[u8] = b"PK\x03\x04";

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;

const LOCAL_HEADER_LEN: usize = 30;
const CENTRAL_HEADER_LEN: usize = 46;
const END_OF_CENTRAL_DIR_LEN: usize = 22;

const METHOD_STORED: u16 = 0;
const METHOD_DEFLATED: u16 = 8;
const VERSION_NEEDED: u16 = 20;
// 1980-01-01, the DOS epoch.
const DOS_DATE: u16 = (1 << 5) | 1;
const DOS_TIME: u16 = 0;
const MAX_PREALLOC_RATIO: usize = 4;

/// Returns the decompressed contents of the entry called `name`.
pub fn read_entry(archive: &[u8], name: &str) -> Result<Vec<u8>, DocumentError> {
    let eocd = find_end_of_central_dir(archive)?;
    let entries = u16_at(archive, eocd + 10)? as usize;
    let mut pos = u32_at(archive, eocd + 16)? as usize;

    for _ in 0..entries {
        if u32_at(archive, pos)? != CENTRAL_HEADER_SIG {
            return Err(DocumentError::Corrupt("bad central directory header"));
        }
        let method = u16_at(archive, pos + 10)?;
        let compressed_len = u32_at(archive, pos + 20)? as usize;
        let uncompressed_len = u32_at(archive, pos + 24)? as usize;
        let name_len = u16_at(archive, pos + 28)? as usize;
        let extra_len = u16_at(archive, pos + 30)? as usize;
        let comment_len = u16_at(archive, pos + 32)? as usize;
        let local_offset = u32_at(archive, pos + 42)? as usize;
        let entry_name = slice(archive, pos + CENTRAL_HEADER_LEN, name_len)?;

        if entry_name == name.as_bytes() {
            let data = local_data(archive, local_offset, compressed_len)?;
            return decompress(name, method, data, uncompressed_len);
        }
        pos += CENTRAL_HEADER_LEN + name_len + extra_len + comment_len;
    }

    Err(DocumentError::MissingEntry(name.to_string()))
}

/// Writes `files` as a deflated archive in the given order.
pub fn write_archive(files: &[(&str, &[u8])]) -> Result<Vec<u8>, DocumentError> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for &(name, data) in files {
        let mut crc = flate2::Crc::new();
        crc.update(data);
        let crc = crc.sum();

        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(data)
            .map_err(|source| DocumentError::Deflate {
                name: name.to_string(),
                source,
            })?;
        let compressed = encoder.finish().map_err(|source| DocumentError::Deflate {
            name: name.to_string(),
            source,
        })?;

        let offset = out.len() as u32;
        put_u32(&mut out, LOCAL_HEADER_SIG);
        put_u16(&mut out, VERSION_NEEDED);
        put_u16(&mut out, 0);
        put_u16(&mut out, METHOD_DEFLATED);
        put_u16(&mut out, DOS_TIME);
        put_u16(&mut out, DOS_DATE);
        put_u32(&mut out, crc);
        put_u32(&mut out, compressed.len() as u32);
        put_u32(&mut out, data.len() as u32);
        put_u16(&mut out, name.len() as u16);
        put_u16(&mut out, 0);
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(&compressed);

        put_u32(&mut central, CENTRAL_HEADER_SIG);
        put_u16(&mut central, VERSION_NEEDED);
        put_u16(&mut central, VERSION_NEEDED);
        put_u16(&mut central, 0);
        put_u16(&mut central, METHOD_DEFLATED);
        put_u16(&mut central, DOS_TIME);
        put_u16(&mut central, DOS_DATE);
        put_u32(&mut central, crc);
        put_u32(&mut central, compressed.len() as u32);
        put_u32(&mut central, data.len() as u32);
        put_u16(&mut central, name.len() as u16);
        put_u16(&mut central, 0);
        put_u16(&mut central, 0);
        put_u16(&mut central, 0);
        put_u16(&mut central, 0);
        put_u32(&mut central, 0);
        put_u32(&mut central, offset);
        central.extend_from_slice(name.as_bytes());
    }

    let central_offset = out.len() as u32;
    out.extend_from_slice(&central);

    put_u32(&mut out, END_OF_CENTRAL_DIR_SIG);
    put_u16(&mut out, 0);
    put_u16(&mut out, 0);
    put_u16(&mut out, files.len() as u16);
    put_u16(&mut out, files.len() as u16);
    put_u32(&mut out, central.len() as u32);
    put_u32(&mut out, central_offset);
    put_u16(&mut out, 0);

    Ok(out)
}

fn find_end_of_central_dir(archive: &[u8]) -> Result<usize, DocumentError> {
    if archive.len() < END_OF_CENTRAL_DIR_LEN {
        return Err(DocumentError::Truncated);
    }
    let last = archive.len() - END_OF_CENTRAL_DIR_LEN;
    // The record may be followed by a comment of up to 64 KiB.
    let first = last.saturating_sub(u16::MAX as usize);
    for pos in (first..=last).rev() {
        if u32_at(archive, pos)? == END_OF_CENTRAL_DIR_SIG {
            return Ok(pos);
        }
    }
    Err(DocumentError::Corrupt("end of central directory not found"))
}

fn local_data(archive: &[u8], offset: usize, len: usize) -> Result<&[u8], DocumentError> {
    if u32_at(archive, offset)? != LOCAL_HEADER_SIG {
        return Err(DocumentError::Corrupt("bad local file header"));
    }
    let name_len = u16_at(archive, offset + 26)? as usize;
    let extra_len = u16_at(archive, offset + 28)? as usize;
    slice(archive, offset + LOCAL_HEADER_LEN + name_len + extra_len, len)
}

fn decompress(
    name: &str,
    method: u16,
    data: &[u8],
    uncompressed_len: usize,
) -> Result<Vec<u8>, DocumentError> {
    match method {
        METHOD_STORED => Ok(data.to_vec()),
        METHOD_DEFLATED => {
            let mut out = Vec::with_capacity(inflate_capacity(uncompressed_len, data.len()));
            DeflateDecoder::new(data)
                .read_to_end(&mut out)
                .map_err(|source| DocumentError::Inflate {
                    name: name.to_string(),
                    source,
                })?;
            Ok(out)
        }
        other => Err(DocumentError::UnsupportedCompression {
            name: name.to_string(),
            method: other,
        }),
    }
}

/// The stored size is untrusted; deflate rarely beats 4:1 on report XML.
fn inflate_capacity(uncompressed_len: usize, compressed_len: usize) -> usize {
    uncompressed_len.min(compressed_len.saturating_mul(MAX_PREALLOC_RATIO))
}

fn slice(buf: &[u8], start: usize, len: usize) -> Result<&[u8], DocumentError> {
    let end = start.checked_add(len).ok_or(DocumentError::Truncated)?;
    buf.get(start..end).ok_or(DocumentError::Truncated)
}

fn u16_at(buf: &[u8], pos: usize) -> Result<u16, DocumentError> {
    let bytes = slice(buf, pos, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn u32_at(buf: &[u8], pos: usize) -> Result<u32, DocumentError> {
    let bytes = slice(buf, pos, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
#[path = "../../tests/src_inline/document/zip.rs"]
mod tests;
