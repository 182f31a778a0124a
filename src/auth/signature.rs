//! MD5 request signing for the Last.fm API.
//!
//! Signed Last.fm methods carry an `api_sig` parameter computed as:
//! ```text
//! md5(k1 v1 k2 v2 ... kn vn secret)
//! ```
//! where the parameter keys are sorted in byte order and concatenated with
//! their raw (unescaped) values, with no separators. The digest is rendered
//! as 32 lowercase hex characters.

use std::collections::BTreeMap;

use crate::auth::Credentials;
use crate::endpoints::FORMAT_JSON;

/// Parameters that Last.fm excludes from the signature base string.
const UNSIGNED_PARAMS: [&str; 3] = ["api_sig", "format", "callback"];

/// Compute the `api_sig` for a set of request parameters.
///
/// Keys are sorted by byte order, so the order in which `params` yields them
/// does not matter. A key given twice keeps its last value. Values are signed
/// raw; URL escaping only happens when they are placed on the wire.
///
/// # Example
///
/// ```rust
/// use lastfm_auth_client::auth::generate_api_sig;
///
/// let sig = generate_api_sig(
///     [("method", "auth.getToken"), ("api_key", "abc123")],
///     "secret1",
/// );
/// assert_eq!(sig, "70ca98856be73f250eae1bd7197dc0e4");
/// ```
pub fn generate_api_sig<'a, I>(params: I, api_secret: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let sorted: BTreeMap<&str, &str> = params.into_iter().collect();

    let mut context = md5::Context::new();
    for (key, value) in &sorted {
        context.consume(key.as_bytes());
        context.consume(value.as_bytes());
    }
    context.consume(api_secret.as_bytes());

    format!("{:x}", context.compute())
}

/// An unsigned Last.fm API call: the method name plus its parameters.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    params: BTreeMap<String, String>,
}

impl ApiRequest {
    /// Start a request for the given API method (e.g. `auth.getToken`).
    pub fn new(method: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert("method".to_string(), method.into());
        Self { params }
    }

    /// Add a parameter, replacing any previous value for the same key.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The API method name.
    pub fn method(&self) -> &str {
        self.params.get("method").map(String::as_str).unwrap_or_default()
    }

    /// Attach the API key and sign the request with the shared secret.
    ///
    /// The secret is only borrowed for the duration of this call.
    pub fn sign(mut self, credentials: &Credentials) -> SignedRequest {
        self.params
            .insert("api_key".to_string(), credentials.api_key.clone());
        for key in UNSIGNED_PARAMS {
            self.params.remove(key);
        }

        let api_sig = generate_api_sig(
            self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            credentials.expose_secret(),
        );

        SignedRequest {
            params: self.params,
            api_sig,
        }
    }
}

/// A request whose parameters have been signed.
///
/// Built per call and dropped once the HTTP round-trip completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: BTreeMap<String, String>,
    api_sig: String,
}

impl SignedRequest {
    /// The API method name.
    pub fn method(&self) -> &str {
        self.params.get("method").map(String::as_str).unwrap_or_default()
    }

    /// The signed parameters, in signing order.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The computed signature.
    pub fn api_sig(&self) -> &str {
        &self.api_sig
    }

    /// Query-string pairs to send: the signed parameters, `api_sig`, and the
    /// JSON format selector.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.push(("api_sig", self.api_sig.as_str()));
        pairs.push(("format", FORMAT_JSON));
        pairs
    }
}
