use serde::{Deserialize, Serialize};

/// Represents a JSON-RPC 2.0 request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Request<MethodT> {
    /// The JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub version: Version,
    /// The request ID
    pub id: Id,
    /// The method and its parameters
    #[serde(flatten)]
    pub method: MethodT,
}

/// A method that is not known at compile time, e.g. a node-specific debug
/// method.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawMethod {
    /// The method's name
    pub method: String,
    /// The method's positional parameters
    pub params: Vec<serde_json::Value>,
}

/// Represents a JSON-RPC 2.0 response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Response<SuccessT> {
    /// The JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub version: Version,
    /// The ID of the request that is being responded to
    pub id: Id,
    /// The result or error
    #[serde(flatten)]
    pub data: ResponseData<SuccessT>,
}

/// The payload of a JSON-RPC response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ResponseData<SuccessT> {
    /// The request failed
    Error {
        /// The error
        error: Error,
    },
    /// The request succeeded
    Success {
        /// The result
        result: SuccessT,
    },
}

impl<SuccessT> ResponseData<SuccessT> {
    /// Converts the payload into a [`Result`].
    pub fn into_result(self) -> Result<SuccessT, Error> {
        match self {
            ResponseData::Success { result } => Ok(result),
            ResponseData::Error { error } => Err(error),
        }
    }
}

/// Represents a JSON-RPC request or response ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric ID
    Num(u64),
    /// String ID
    Str(String),
}

/// The JSON-RPC version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Version {
    /// Version 2.0
    #[serde(rename = "2.0")]
    V2_0,
}

/// A JSON-RPC error object.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, thiserror::Error)]
#[error("The response reported error `{code}`: `{message}`. (optional data: {data:?})")]
pub struct Error {
    /// The error code
    pub code: i64,
    /// The error message
    pub message: String,
    /// Additional data, e.g. revert data of a failed call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
