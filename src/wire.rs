// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-width integer framing shared by the binary codecs.

use crate::error::{Error, Result};
use bytes::Buf;

const I32_LEN: usize = std::mem::size_of::<i32>();

/// Read one big-endian `i32`, failing instead of panicking on short input.
pub(crate) fn read_i32<B: Buf>(buf: &mut B) -> Result<i32> {
    if buf.remaining() < I32_LEN {
        log::debug!(
            "short binary payload: {} bytes remaining, {I32_LEN} needed",
            buf.remaining()
        );
        return Err(Error::InsufficientData {
            needed: I32_LEN,
            remaining: buf.remaining(),
        });
    }
    Ok(buf.get_i32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian() {
        let mut buf: &[u8] = &[0x00, 0x01, 0x51, 0x80, 0xFF];
        assert_eq!(read_i32(&mut buf).unwrap(), 86_400);
        assert_eq!(buf.remaining(), 1);
    }

    #[test]
    fn short_input_is_an_error() {
        let mut buf: &[u8] = &[0x00, 0x01];
        assert_eq!(
            read_i32(&mut buf),
            Err(Error::InsufficientData {
                needed: 4,
                remaining: 2
            })
        );
    }
}
