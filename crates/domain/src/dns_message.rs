//! Byte-level helpers for the few header fields the probe touches directly.

/// Size of the RFC 1035 §4.2.2 length prefix on stream transports.
pub const TCP_LENGTH_PREFIX_LEN: usize = 2;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;

/// Overwrites the transaction ID of a message starting at `header_offset`.
///
/// Returns `false` when the buffer is too short to hold a header there.
pub fn set_transaction_id(message: &mut [u8], header_offset: usize, id: u16) -> bool {
    if message.len() < header_offset + HEADER_LEN {
        return false;
    }
    message[header_offset..header_offset + 2].copy_from_slice(&id.to_be_bytes());
    true
}

pub fn transaction_id(message: &[u8], header_offset: usize) -> Option<u16> {
    let bytes = message.get(header_offset..header_offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Prepends the big-endian length prefix used over TCP.
pub fn frame_for_stream(message: &[u8]) -> Option<Vec<u8>> {
    let length = u16::try_from(message.len()).ok()?;
    let mut framed = Vec::with_capacity(TCP_LENGTH_PREFIX_LEN + message.len());
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(message);
    Some(framed)
}
