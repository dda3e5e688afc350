use std::{
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use derive_where::derive_where;
use headsmith_primitives::U64;
use reqwest::{
    Client as HttpClient,
    header::{self, HeaderMap, HeaderValue},
};
use reqwest_middleware::{ClientBuilder as HttpClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::OnceCell;

use crate::{MiddlewareError, ReqwestError, jsonrpc};

// Retry parameters for rate limited requests.
const EXPONENT_BASE: u32 = 2;
const MIN_RETRY_INTERVAL: Duration = Duration::from_secs(1);
const MAX_RETRY_INTERVAL: Duration = Duration::from_secs(32);
const MAX_RETRIES: u32 = 9;

/// Specialized error types
#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    FailedToBuildClient(ReqwestError),

    /// The message could not be sent to the remote node
    #[error(transparent)]
    FailedToSend(MiddlewareError),

    /// The remote node failed to reply with the body of the response
    #[error("The response text was corrupted: {0}.")]
    CorruptedResponse(ReqwestError),

    /// The server returned an error code.
    #[error("The Http server returned error status code: {0}")]
    HttpStatus(ReqwestError),

    /// The request cannot be serialized as JSON.
    #[error(transparent)]
    InvalidJsonRequest(serde_json::Error),

    /// The server returned an invalid JSON-RPC response.
    #[error(
        "Response '{response}' failed to parse with expected type '{expected_type}', due to error: '{error}'"
    )]
    InvalidResponse {
        /// The response text
        response: String,
        /// The expected type of the response
        expected_type: &'static str,
        /// The parse error
        error: serde_json::Error,
    },

    /// The server returned an invalid JSON-RPC id.
    #[error("The server returned an invalid id: '{id:?}' in response: '{response}'")]
    InvalidId {
        /// The response text
        response: String,
        /// The invalid id
        id: jsonrpc::Id,
    },

    /// Invalid URL format
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// The JSON-RPC returned an error.
    #[error("{error}. Request: {request}")]
    JsonRpcError {
        /// The JSON-RPC error
        error: jsonrpc::Error,
        /// The request JSON
        request: String,
    },
}

impl RpcClientError {
    /// Returns the JSON-RPC error object, if the node responded with one.
    pub fn as_json_rpc_error(&self) -> Option<&jsonrpc::Error> {
        match self {
            RpcClientError::JsonRpcError { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Methods that the client needs to construct itself.
pub trait RpcMethod: Serialize {
    /// Constructs a request for `eth_blockNumber`.
    fn block_number_request() -> Self;

    /// Constructs a request for `eth_chainId`.
    fn chain_id_request() -> Self;
}

/// A client for executing JSON-RPC methods on a remote Ethereum node.
#[derive_where(Debug)]
pub struct RpcClient<MethodT: RpcMethod> {
    url: url::Url,
    chain_id: OnceCell<u64>,
    client: ClientWithMiddleware,
    next_id: AtomicU64,
    _phantom: PhantomData<MethodT>,
}

impl<MethodT: RpcMethod> RpcClient<MethodT> {
    /// Create a new instance, given a remote node URL.
    pub fn new(url: &str, extra_headers: Option<HeaderMap>) -> Result<Self, RpcClientError> {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(MIN_RETRY_INTERVAL, MAX_RETRY_INTERVAL)
            .base(EXPONENT_BASE)
            .build_with_max_retries(MAX_RETRIES);

        let mut headers = extra_headers.unwrap_or_default();
        headers.append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.append(
            header::USER_AGENT,
            HeaderValue::from_static(concat!("headsmith ", env!("CARGO_PKG_VERSION"))),
        );

        let client = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|error| RpcClientError::FailedToBuildClient(error.into()))?;

        let client = HttpClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(RpcClient {
            url: url.parse()?,
            chain_id: OnceCell::new(),
            client,
            next_id: AtomicU64::new(0),
            _phantom: PhantomData,
        })
    }

    /// The URL of the remote node.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    fn parse_response_str<SuccessT: DeserializeOwned>(
        response: String,
    ) -> Result<jsonrpc::Response<SuccessT>, RpcClientError> {
        serde_json::from_str(&response).map_err(|error| RpcClientError::InvalidResponse {
            response,
            expected_type: std::any::type_name::<jsonrpc::Response<SuccessT>>(),
            error,
        })
    }

    async fn send_request_and_extract_result<SuccessT: DeserializeOwned>(
        &self,
        request: SerializedRequest,
    ) -> Result<SuccessT, RpcClientError> {
        let response = self.send_request_body(&request).await?;
        let result = self.extract_result(&request, response)?;

        match result {
            Ok(result) => Ok(result),
            Err(error) => self.retry_on_sporadic_failure(error, request).await,
        }
    }

    fn extract_result<SuccessT: DeserializeOwned>(
        &self,
        request: &SerializedRequest,
        response: String,
    ) -> Result<Result<SuccessT, jsonrpc::Error>, RpcClientError> {
        let parsed = Self::parse_response_str::<SuccessT>(response.clone())?;
        if parsed.id != request.id {
            return Err(RpcClientError::InvalidId {
                response,
                id: parsed.id,
            });
        }

        Ok(parsed.data.into_result())
    }

    // Some providers sporadically fail with a missing trie node error that
    // succeeds when retried.
    async fn retry_on_sporadic_failure<SuccessT: DeserializeOwned>(
        &self,
        error: jsonrpc::Error,
        request: SerializedRequest,
    ) -> Result<SuccessT, RpcClientError> {
        let is_missing_trie_node_error =
            error.code == -32000 && error.message.to_lowercase().contains("missing trie node");

        let result = if is_missing_trie_node_error {
            log::debug!("Retrying request after sporadic failure: {}", error.message);

            let response = self.send_request_body(&request).await?;
            self.extract_result(&request, response)?
        } else {
            Err(error)
        };

        result.map_err(|error| RpcClientError::JsonRpcError {
            error,
            request: request.to_json_string(),
        })
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    async fn send_request_body(
        &self,
        request_body: &SerializedRequest,
    ) -> Result<String, RpcClientError> {
        log::trace!("Sending request: {}", request_body.to_json_string());

        self.client
            .post(self.url.clone())
            .body(request_body.to_json_string())
            .send()
            .await
            .map_err(|err| RpcClientError::FailedToSend(err.into()))?
            .error_for_status()
            .map_err(|err| RpcClientError::HttpStatus(err.into()))?
            .text()
            .await
            .map_err(|err| RpcClientError::CorruptedResponse(err.into()))
    }

    fn serialize_request<RequestMethodT: Serialize>(
        &self,
        method: &RequestMethodT,
    ) -> Result<SerializedRequest, RpcClientError> {
        let id = jsonrpc::Id::Num(self.next_id.fetch_add(1, Ordering::Relaxed));

        let body = serde_json::to_value(jsonrpc::Request {
            version: jsonrpc::Version::V2_0,
            id: id.clone(),
            method,
        })
        .map_err(RpcClientError::InvalidJsonRequest)?;

        Ok(SerializedRequest { id, body })
    }

    /// Calls the provided JSON-RPC method and returns the result.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub async fn call<SuccessT: DeserializeOwned>(
        &self,
        method: MethodT,
    ) -> Result<SuccessT, RpcClientError> {
        let request = self.serialize_request(&method)?;
        self.send_request_and_extract_result(request).await
    }

    /// Calls a method that is not part of `MethodT`, e.g. a node-specific
    /// debug method, and returns the raw result.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn call_raw(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcClientError> {
        let request = self.serialize_request(&jsonrpc::RawMethod {
            method: method.to_owned(),
            params,
        })?;
        self.send_request_and_extract_result(request).await
    }

    /// Calls `eth_blockNumber` and returns the block number.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn block_number(&self) -> Result<u64, RpcClientError> {
        self.call::<U64>(MethodT::block_number_request())
            .await
            .map(|block_number| block_number.to::<u64>())
    }

    /// Calls `eth_chainId` and returns the chain ID. The result is cached for
    /// the lifetime of the client.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn chain_id(&self) -> Result<u64, RpcClientError> {
        let chain_id = *self
            .chain_id
            .get_or_try_init(|| async {
                self.call::<U64>(MethodT::chain_id_request())
                    .await
                    .map(|chain_id| chain_id.to::<u64>())
            })
            .await?;
        Ok(chain_id)
    }
}

#[derive(Clone, Debug)]
struct SerializedRequest {
    id: jsonrpc::Id,
    body: serde_json::Value,
}

impl SerializedRequest {
    fn to_json_string(&self) -> String {
        self.body.to_string()
    }
}
