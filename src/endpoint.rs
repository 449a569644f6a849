// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! URL building for the Feature Navigator JSON endpoints
//!
//! The service exposes three GET endpoints: a feature search, a platform
//! tree for one feature and an image (license) lookup for a feature and
//! platform pair. This module only builds their URLs.

use url::form_urlencoded;

/// Base URL where the Feature Navigator JSON endpoints are hosted
pub const CFN_BASE: &str = "http://tools.cisco.com/ITDIT/CFN/jsp";

/// The set of endpoint URLs rooted at one base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(CFN_BASE)
    }
}

impl Endpoints {
    /// Create endpoints rooted at `base`; a trailing `/` is ignored
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Build the feature search URL for a free-text word
    ///
    /// # Examples
    /// ```
    /// use cfn::Endpoints;
    /// let endpoints = Endpoints::new("http://example.test/jsp");
    /// assert_eq!(
    ///     endpoints.feature_search_url("ip nat"),
    ///     "http://example.test/jsp/Feature.json?flttxt=ip%20nat"
    /// );
    /// ```
    #[must_use]
    pub fn feature_search_url(&self, word: &str) -> String {
        format!("{}/Feature.json?flttxt={}", self.base, encode(word))
    }

    /// Build the platform tree URL for one vendor feature id
    #[must_use]
    pub fn platform_tree_url(&self, feature_id: &str) -> String {
        format!(
            "{}/PlatformTree.json?featIds={}",
            self.base,
            encode(feature_id)
        )
    }

    /// Build the image lookup URL for a feature and platform pair
    #[must_use]
    pub fn image_url(&self, feature_id: &str, platform_id: u64) -> String {
        format!(
            "{}/Image.json?featIds={}&platformId={platform_id}",
            self.base,
            encode(feature_id)
        )
    }
}

/// Percent-encode a query value, spaces as `%20`
fn encode(value: &str) -> String {
    // form encoding turns spaces into '+' and a literal '+' into %2B
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
