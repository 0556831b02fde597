//! Bounds-checked big-endian field access
//!
//! Every multi-byte header field in this crate is read and written through
//! these helpers. Offsets are validated against the slice length before any
//! byte is touched; a short buffer surfaces as [`Error::Truncated`] instead
//! of an out-of-bounds access.

use crate::{Error, Result};

fn check(buf: &[u8], offset: usize, width: usize) -> Result<()> {
    let needed = offset
        .checked_add(width)
        .ok_or(Error::Truncated {
            needed: usize::MAX,
            got: buf.len(),
        })?;
    if buf.len() < needed {
        return Err(Error::Truncated {
            needed,
            got: buf.len(),
        });
    }
    Ok(())
}

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    check(buf, offset, 1)?;
    Ok(buf[offset])
}

pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    check(buf, offset, 2)?;
    Ok(u16::from_be_bytes([buf[offset], buf[offset + 1]]))
}

pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    check(buf, offset, 4)?;
    Ok(u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

/// Borrow `len` bytes starting at `offset`.
pub fn slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    check(buf, offset, len)?;
    Ok(&buf[offset..offset + len])
}

pub fn write_u8(buf: &mut [u8], offset: usize, value: u8) -> Result<()> {
    check(buf, offset, 1)?;
    buf[offset] = value;
    Ok(())
}

pub fn write_u16(buf: &mut [u8], offset: usize, value: u16) -> Result<()> {
    check(buf, offset, 2)?;
    buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    Ok(())
}

pub fn write_bytes(buf: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
    check(buf, offset, bytes.len())?;
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    Ok(())
}
