// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! HTTP GET + JSON decode for the lookup service
//!
//! The platform tree endpoint answers with JSON the strict parser rejects
//! (unquoted keys and the like), so it goes through the tolerant decode path.
//! Every other endpoint is decoded strictly.

use serde_json::Value;

use crate::error::CfnError;

/// Source of decoded JSON documents, one blocking request per call
pub trait JsonSource {
    /// Fetch `url` and decode the body as standard JSON
    ///
    /// # Errors
    /// Returns a transport, status or decode error
    fn fetch_json(&self, url: &str) -> Result<Value, CfnError>;

    /// Fetch `url` and decode the body with the tolerant parser
    ///
    /// # Errors
    /// Returns a transport, status or decode error
    fn fetch_lenient_json(&self, url: &str) -> Result<Value, CfnError>;
}

impl<S: JsonSource + ?Sized> JsonSource for &S {
    fn fetch_json(&self, url: &str) -> Result<Value, CfnError> {
        (**self).fetch_json(url)
    }

    fn fetch_lenient_json(&self, url: &str) -> Result<Value, CfnError> {
        (**self).fetch_lenient_json(url)
    }
}

/// `JsonSource` backed by real HTTP requests
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    insecure: bool,
    verbose: bool,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(insecure: bool, verbose: bool) -> Self {
        Self { insecure, verbose }
    }

    fn get_text(&self, url: &str) -> Result<String, CfnError> {
        if self.verbose {
            eprintln!("Fetching: {url}");
        }

        let user_agent = format!("cfn/{}", env!("CARGO_PKG_VERSION"));
        let resp = attohttpc::get(url)
            .header(attohttpc::header::USER_AGENT, user_agent.as_str())
            .danger_accept_invalid_certs(self.insecure)
            .send()
            .map_err(|e| CfnError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !resp.is_success() {
            return Err(CfnError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().map_err(|e| CfnError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if self.verbose {
            eprintln!("Received {} bytes", body.len());
        }

        Ok(body)
    }
}

impl JsonSource for HttpFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, CfnError> {
        let body = self.get_text(url)?;
        decode_strict(&body).map_err(|e| CfnError::decode(url, e))
    }

    fn fetch_lenient_json(&self, url: &str) -> Result<Value, CfnError> {
        let body = self.get_text(url)?;
        if self.verbose && decode_strict(&body).is_err() {
            eprintln!("Response is not strict JSON, using tolerant decode");
        }
        decode_lenient(&body).map_err(|e| CfnError::decode(url, e))
    }
}

/// Decode a body as standard JSON
///
/// # Errors
/// Returns the parser's message when the body is not valid JSON
pub fn decode_strict(body: &str) -> Result<Value, String> {
    serde_json::from_str(body).map_err(|e| e.to_string())
}

/// Decode a body that may use JavaScript object syntax
///
/// Standard JSON is tried first; on failure the body is parsed as JSON5,
/// which accepts unquoted keys, single-quoted strings and trailing commas.
///
/// # Errors
/// Returns the JSON5 parser's message when neither parse succeeds
///
/// # Examples
/// ```
/// use cfn::fetch::decode_lenient;
/// let value = decode_lenient("{children: [{nid: '7', nvalue: 'ASR 1000',},]}").unwrap();
/// assert_eq!(value["children"][0]["nvalue"], "ASR 1000");
/// ```
pub fn decode_lenient(body: &str) -> Result<Value, String> {
    if let Ok(value) = serde_json::from_str(body) {
        return Ok(value);
    }
    json5::from_str::<Value>(body).map_err(|e| e.to_string())
}
