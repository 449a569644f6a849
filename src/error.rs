// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error types shared by the fetcher, the filter and the session

use thiserror::Error;

/// Everything that can go wrong while talking to the lookup service or the user
#[derive(Debug, Error)]
pub enum CfnError {
    /// The request never produced a response (DNS, connect, TLS, read)
    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// The service answered with a non-success status
    #[error("Failed to fetch {url} ({status})")]
    Status { url: String, status: u16 },

    /// The body was not JSON, or not the shape we expect
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The user typed a filter that is not a valid regular expression
    #[error("invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CfnError {
    /// `true` for network and decode failures, the errors `--keep-going` recovers from
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Decode { .. }
        )
    }

    pub(crate) fn decode(url: &str, message: impl ToString) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}
