use alloy_rlp::{Decodable, Header};
use headsmith_primitives::U256;

/// Returns the raw bytes of the item at the start of `encoded`, including its
/// prefix.
fn leading_item(encoded: &[u8]) -> Option<&[u8]> {
    let mut buf = encoded;
    let header = Header::decode(&mut buf).ok()?;

    // A single byte below 0x80 has no prefix, in which case the buffer is not
    // advanced.
    let header_length = encoded.len() - buf.len();
    encoded.get(..header_length + header.payload_length)
}

/// Extracts the first item of an RLP list, e.g. the header of an encoded
/// block. The item is returned as-is, prefix included.
///
/// Only the outer length prefix is interpreted. Returns `None` if `encoded` is
/// empty, truncated, or not a list.
pub fn first_list_item(encoded: &[u8]) -> Option<&[u8]> {
    let mut buf = encoded;
    let outer = Header::decode(&mut buf).ok()?;
    if !outer.list {
        return None;
    }

    let payload = buf.get(..outer.payload_length)?;
    leading_item(payload)
}

/// Splits an RLP list into its encoded items.
pub fn list_items(encoded: &[u8]) -> Result<Vec<&[u8]>, alloy_rlp::Error> {
    let mut buf = encoded;
    let outer = Header::decode(&mut buf)?;
    if !outer.list {
        return Err(alloy_rlp::Error::UnexpectedString);
    }

    let mut payload = buf
        .get(..outer.payload_length)
        .ok_or(alloy_rlp::Error::InputTooShort)?;

    let mut items = Vec::new();
    while !payload.is_empty() {
        let item = leading_item(payload).ok_or(alloy_rlp::Error::InputTooShort)?;
        payload = payload.get(item.len()..).unwrap_or_default();
        items.push(item);
    }
    Ok(items)
}

/// Decodes an integer from its RLP encoding.
pub fn decode_int(mut encoded: &[u8]) -> Result<U256, alloy_rlp::Error> {
    U256::decode(&mut encoded)
}

/// Decodes a byte string from its RLP encoding.
pub fn decode_bytes(mut encoded: &[u8]) -> Result<Vec<u8>, alloy_rlp::Error> {
    let header = Header::decode(&mut encoded)?;
    if header.list {
        return Err(alloy_rlp::Error::UnexpectedList);
    }

    encoded
        .get(..header.payload_length)
        .map(<[u8]>::to_vec)
        .ok_or(alloy_rlp::Error::InputTooShort)
}
