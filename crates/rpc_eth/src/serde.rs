//! Serialization of JSON-RPC parameter lists and lenient decoding of node
//! responses.

use headsmith_primitives::{Bytes, hex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes a method without parameters as `[]`.
pub fn no_params<SerializerT: Serializer>(
    _params: &(),
    serializer: SerializerT,
) -> Result<SerializerT::Ok, SerializerT::Error> {
    [(); 0].serialize(serializer)
}

/// Serializes a method's only parameter as a one-element list.
pub fn single_param<ParamT: Serialize, SerializerT: Serializer>(
    param: &ParamT,
    serializer: SerializerT,
) -> Result<SerializerT::Ok, SerializerT::Error> {
    std::slice::from_ref(param).serialize(serializer)
}

/// Decodes a hex string that may lack its `0x` prefix or have an odd number
/// of digits, e.g. `0x0`.
pub fn decode_lenient_hex(value: &str) -> Result<Bytes, hex::FromHexError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    let bytes = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))?
    } else {
        hex::decode(digits)?
    };
    Ok(bytes.into())
}

/// Deserializes a hex string with [`decode_lenient_hex`].
pub fn lenient_hex<'de, DeserializerT: Deserializer<'de>>(
    deserializer: DeserializerT,
) -> Result<Bytes, DeserializerT::Error> {
    let value = String::deserialize(deserializer)?;
    decode_lenient_hex(&value).map_err(serde::de::Error::custom)
}

/// Deserializes an optional hex string with [`decode_lenient_hex`].
pub fn optional_lenient_hex<'de, DeserializerT: Deserializer<'de>>(
    deserializer: DeserializerT,
) -> Result<Option<Bytes>, DeserializerT::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|value| decode_lenient_hex(&value))
        .transpose()
        .map_err(serde::de::Error::custom)
}
