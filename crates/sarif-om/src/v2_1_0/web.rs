//! HTTP requests and responses.

use indexmap::IndexMap;

use crate::{property_bag::PropertyBag, v2_1_0::ArtifactContent, wire::Sentinel};

sarif_node! {
    /// Describes an HTTP request.
    pub struct WebRequest {
        /// The index within the run.webRequests array of the request object associated with this result.
        pub index: Sentinel,
        /// The request protocol. Example: 'http'.
        pub protocol: Option<String>,
        /// The request version. Example: '1.1'.
        pub version: Option<String>,
        /// The target of the request.
        pub target: Option<String>,
        /// The HTTP method. Well-known values are 'GET', 'PUT', 'POST', 'DELETE', 'PATCH', 'HEAD', 'OPTIONS', 'TRACE', 'CONNECT'.
        pub method: Option<String>,
        /// The request headers.
        pub headers: Option<IndexMap<String, String>>,
        /// The request parameters.
        pub parameters: Option<IndexMap<String, String>>,
        /// The body of the request.
        pub body: Option<ArtifactContent>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Describes the response to an HTTP request.
    pub struct WebResponse {
        /// The index within the run.webResponses array of the response object associated with this result.
        pub index: Sentinel,
        /// The response protocol. Example: 'http'.
        pub protocol: Option<String>,
        /// The response version. Example: '1.1'.
        pub version: Option<String>,
        /// The response status code. Example: 451.
        pub status_code: Option<i64>,
        /// The response reason. Example: 'Not found'.
        pub reason_phrase: Option<String>,
        /// The response headers.
        pub headers: Option<IndexMap<String, String>>,
        /// The body of the response.
        pub body: Option<ArtifactContent>,
        /// Specifies whether a response was received from the server.
        pub no_response_received: Option<bool>,
        pub properties: Option<PropertyBag>,
    }
}

impl WebResponse {
    /// Returns whether a response was received, i.e. `noResponseReceived` is absent or false.
    pub fn received(&self) -> bool {
        !self.no_response_received.unwrap_or(false)
    }
}
