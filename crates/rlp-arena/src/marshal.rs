use crate::arena::{Arena, Node, ValueRef};
use crate::error::RlpError;

/// Bytes needed for the minimal big-endian form of `n` (0 for zero).
fn be_width(n: u64) -> usize {
    ((64 - n.leading_zeros() as usize) + 7) / 8
}

/// Writes a string (`base = 0x80`) or list (`base = 0xc0`) header.
fn write_header(dst: &mut Vec<u8>, base: u8, payload: usize) {
    if payload <= 55 {
        dst.push(base + payload as u8);
    } else {
        let width = be_width(payload as u64);
        dst.push(base + 55 + width as u8);
        dst.extend_from_slice(&(payload as u64).to_be_bytes()[8 - width..]);
    }
}

fn header_len(payload: usize) -> usize {
    if payload <= 55 {
        1
    } else {
        1 + be_width(payload as u64)
    }
}

fn string_encoded_len(payload: &[u8]) -> usize {
    if payload.len() == 1 && payload[0] < 0x80 {
        1
    } else {
        header_len(payload.len()) + payload.len()
    }
}

fn write_string(dst: &mut Vec<u8>, payload: &[u8]) {
    if payload.len() == 1 && payload[0] < 0x80 {
        dst.push(payload[0]);
    } else {
        write_header(dst, 0x80, payload.len());
        dst.extend_from_slice(payload);
    }
}

impl Arena {
    /// Appends the canonical RLP encoding of `v` to `dst`.
    ///
    /// Append semantics let one buffer be reused across calls; `dst` is
    /// untouched on error.
    pub fn marshal_to(&self, v: ValueRef, dst: &mut Vec<u8>) -> Result<(), RlpError> {
        // Validate the whole tree before writing anything.
        self.encoded_len(v)?;
        self.write_value(v, dst);
        Ok(())
    }

    /// Marshals `v` into a fresh buffer.
    pub fn marshal(&self, v: ValueRef) -> Result<Vec<u8>, RlpError> {
        let mut dst = Vec::new();
        self.marshal_to(v, &mut dst)?;
        Ok(dst)
    }

    /// Encoded size of `v`, header included.
    pub fn encoded_len(&self, v: ValueRef) -> Result<usize, RlpError> {
        Ok(match self.node(v)? {
            Node::Null => 1,
            Node::Uint(n) => {
                if *n == 0 || *n < 0x80 {
                    1
                } else {
                    1 + be_width(*n)
                }
            }
            Node::Bytes { start, len } => string_encoded_len(&self.bytes[*start..*start + *len]),
            Node::Array(children) => {
                let mut payload = 0;
                for &child in children {
                    payload += self.encoded_len(child)?;
                }
                header_len(payload) + payload
            }
        })
    }

    // Handles are pre-validated by `encoded_len`, so this pass is
    // infallible.
    fn write_value(&self, v: ValueRef, dst: &mut Vec<u8>) {
        match &self.nodes[v.index as usize] {
            Node::Null => dst.push(0x80),
            Node::Uint(n) => {
                if *n == 0 {
                    dst.push(0x80);
                } else {
                    let be = n.to_be_bytes();
                    write_string(dst, &be[8 - be_width(*n)..]);
                }
            }
            Node::Bytes { start, len } => {
                write_string(dst, &self.bytes[*start..*start + *len]);
            }
            Node::Array(children) => {
                let mut payload = 0;
                for &child in children {
                    payload += self.encoded_len(child).unwrap_or(0);
                }
                write_header(dst, 0xc0, payload);
                for &child in children {
                    self.write_value(child, dst);
                }
            }
        }
    }
}
