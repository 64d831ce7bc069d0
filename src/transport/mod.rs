//! HTTP transport
//!
//! Provider-agnostic HTTP layer used by the identity provider and the
//! backend request clients.

pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

use async_trait::async_trait;

pub use transport_fake::{FakeReply, FakeTransport};
pub use transport_reqwest::{ReqwestTransport, DEFAULT_TIMEOUT_SECS};
pub use transport_types::{
    FilePart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, TransportError,
};

/// Concrete transport enum
///
/// Wraps all transport types so clients hold one owned value
/// instead of a trait object.
#[derive(Debug, Clone)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl HttpTransport for Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        match self {
            Transport::Real(t) => t.send(request).await,
            Transport::Fake(t) => t.send(request).await,
        }
    }
}

impl From<FakeTransport> for Transport {
    fn from(fake: FakeTransport) -> Self {
        Transport::Fake(fake)
    }
}
