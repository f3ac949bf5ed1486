use crate::arena::{Arena, ValueRef};
use crate::error::RlpError;

/// Bound on list nesting when parsing untrusted input.
const MAX_DEPTH: usize = 1024;

impl Arena {
    /// Parses one RLP item from `data` into arena-owned values.
    ///
    /// The whole input must be consumed and must be in canonical form:
    /// a single byte below `0x80` must appear bare, long forms are only
    /// accepted for payloads above 55 bytes, and length-of-length bytes
    /// must not carry leading zeros.
    pub fn parse(&mut self, data: &[u8]) -> Result<ValueRef, RlpError> {
        let (value, rest) = self.parse_item(data, 0)?;
        if !rest.is_empty() {
            return Err(RlpError::TrailingBytes(rest.len()));
        }
        Ok(value)
    }

    fn parse_item<'a>(
        &mut self,
        data: &'a [u8],
        depth: usize,
    ) -> Result<(ValueRef, &'a [u8]), RlpError> {
        if depth > MAX_DEPTH {
            return Err(RlpError::NestingTooDeep);
        }
        let (&first, rest) = data
            .split_first()
            .ok_or(RlpError::UnexpectedEof { needed: 1, remaining: 0 })?;

        match first {
            0x00..=0x7f => Ok((self.new_bytes(&[first]), rest)),
            0x80..=0xb7 => {
                let len = (first - 0x80) as usize;
                let (payload, rest) = take(rest, len)?;
                if len == 1 && payload[0] < 0x80 {
                    return Err(RlpError::NonCanonical(
                        "single byte below 0x80 must be encoded as itself",
                    ));
                }
                Ok((self.new_bytes(payload), rest))
            }
            0xb8..=0xbf => {
                let (len, rest) = read_long_length(rest, (first - 0xb7) as usize)?;
                let (payload, rest) = take(rest, len)?;
                Ok((self.new_bytes(payload), rest))
            }
            0xc0..=0xf7 => {
                let len = (first - 0xc0) as usize;
                let (payload, rest) = take(rest, len)?;
                let list = self.parse_list(payload, depth)?;
                Ok((list, rest))
            }
            0xf8..=0xff => {
                let (len, rest) = read_long_length(rest, (first - 0xf7) as usize)?;
                let (payload, rest) = take(rest, len)?;
                let list = self.parse_list(payload, depth)?;
                Ok((list, rest))
            }
        }
    }

    fn parse_list(&mut self, mut payload: &[u8], depth: usize) -> Result<ValueRef, RlpError> {
        let list = self.new_array();
        while !payload.is_empty() {
            let (child, rest) = self.parse_item(payload, depth + 1)?;
            self.push(list, child)?;
            payload = rest;
        }
        Ok(list)
    }
}

fn take(data: &[u8], len: usize) -> Result<(&[u8], &[u8]), RlpError> {
    if data.len() < len {
        return Err(RlpError::UnexpectedEof {
            needed: len - data.len(),
            remaining: data.len(),
        });
    }
    Ok(data.split_at(len))
}

/// Reads a big-endian payload length of `width` bytes (long form).
fn read_long_length(data: &[u8], width: usize) -> Result<(usize, &[u8]), RlpError> {
    if width > std::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }
    let (length_bytes, rest) = take(data, width)?;
    if length_bytes[0] == 0 {
        return Err(RlpError::NonCanonical("leading zero in length-of-length"));
    }
    let mut len = 0usize;
    for &b in length_bytes {
        len = (len << 8) | b as usize;
    }
    if len <= 55 {
        return Err(RlpError::NonCanonical("long form used for a short payload"));
    }
    Ok((len, rest))
}
