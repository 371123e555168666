use std::sync::Arc;

use tower::Layer;

use crate::Credentials;
use crate::service::BasicAuthService;

/// Applies HTTP basic authentication to requests.
#[derive(Clone, Debug)]
pub struct BasicAuthLayer {
    credentials: Arc<Credentials>,
    realm: &'static str,
}

impl BasicAuthLayer {
    /// Create a BasicAuthLayer
    pub fn new(credentials: Credentials) -> Self {
        BasicAuthLayer {
            credentials: Arc::new(credentials),
            realm: "Authorization Required",
        }
    }

    /// Set the realm advertised in the `WWW-Authenticate` challenge.
    pub fn with_realm(mut self, realm: &'static str) -> Self {
        self.realm = realm;
        self
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuthService<S>;

    fn layer(&self, service: S) -> Self::Service {
        BasicAuthService::new(service, self.credentials.clone()).with_realm(self.realm)
    }
}
