use core::fmt;

/// Boxed [`reqwest_middleware::Error`], keeping [`crate::RpcClientError`]
/// small.
#[derive(Debug)]
pub struct MiddlewareError(Box<reqwest_middleware::Error>);

impl fmt::Display for MiddlewareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for MiddlewareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<reqwest_middleware::Error> for MiddlewareError {
    fn from(value: reqwest_middleware::Error) -> Self {
        Self(Box::new(value))
    }
}

impl From<MiddlewareError> for reqwest_middleware::Error {
    fn from(value: MiddlewareError) -> Self {
        *value.0
    }
}

/// Boxed [`reqwest::Error`], keeping [`crate::RpcClientError`] small.
#[derive(Debug)]
pub struct ReqwestError(Box<reqwest::Error>);

impl fmt::Display for ReqwestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ReqwestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<reqwest::Error> for ReqwestError {
    fn from(value: reqwest::Error) -> Self {
        Self(Box::new(value))
    }
}

impl From<ReqwestError> for reqwest::Error {
    fn from(value: ReqwestError) -> Self {
        *value.0
    }
}
