//! Canonical RLP encoding of byte strings, integers and lists, plus the
//! minimal decoding needed to split raw header payloads.

mod decode;
mod encode;

pub use alloy_rlp::Error;

pub use self::{
    decode::{decode_bytes, decode_int, first_list_item, list_items},
    encode::{RlpListBuilder, encode_bytes, encode_int, encode_list, to_fixed},
};
