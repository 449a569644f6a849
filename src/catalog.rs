// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Features, platforms and license entries as returned by the lookup service
//!
//! Responses are mapped into ordered indexes keyed by a 1-based sequence
//! number assigned in response order. The sequence number is what the user
//! types at the prompts; vendor ids are only used to build the next request.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// A named capability tracked by the vendor catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Vendor-assigned id, kept as text
    pub id: String,
    pub name: String,
}

/// A product line that may support a feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub id: u64,
    pub name: String,
}

/// Ordering key used when listing an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Numeric(u64),
    Text(&'a str),
}

/// Something that can be listed, filtered and sorted
pub trait Entry {
    /// Text the filter matches against and the listing shows
    fn label(&self) -> &str;

    /// Key the listing is sorted by
    fn sort_key(&self) -> SortKey<'_>;
}

impl Entry for Feature {
    fn label(&self) -> &str {
        &self.name
    }

    // Numeric ids sort numerically, anything else falls back to text order
    fn sort_key(&self) -> SortKey<'_> {
        match self.id.parse::<u64>() {
            Ok(n) => SortKey::Numeric(n),
            Err(_) => SortKey::Text(&self.id),
        }
    }
}

impl Entry for Platform {
    fn label(&self) -> &str {
        &self.name
    }

    fn sort_key(&self) -> SortKey<'_> {
        SortKey::Text(&self.name)
    }
}

/// Ordered mapping from a dense 1-based sequence number to an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index<T> {
    entries: BTreeMap<usize, T>,
}

impl<T> Default for Index<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> Index<T> {
    /// Number entries 1, 2, 3... in iteration order
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| (i + 1, entry))
                .collect(),
        }
    }

    /// Build an index that keeps the given keys (used for filtered subsets)
    pub fn from_keyed(entries: impl IntoIterator<Item = (usize, T)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, key: usize) -> Option<&T> {
        self.entries.get(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }
}

/// License information for one feature on one platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsInfo {
    /// Distinct feature-set labels, sorted
    pub licenses: Vec<String>,
    /// Release of the first image that was not excluded
    pub min_version: Option<String>,
}

// =============================================================================
// Response shapes
// =============================================================================

/// A JSON id that may arrive as a string or as a number
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => match (n.as_u64(), n.as_f64()) {
                (Some(u), _) => u.to_string(),
                // JSON5 may hand integral ids over as floats
                (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 => format!("{f:.0}"),
                _ => n.to_string(),
            },
        }
    }
}

/// A list that collapses to a bare object when it holds a single element
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Deserialize)]
struct FeatureResponse {
    #[serde(rename = "featureList", default)]
    feature_list: Option<FeatureList>,
}

#[derive(Deserialize)]
struct FeatureList {
    #[serde(default)]
    feature: OneOrMany<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    id: Scalar,
    name: String,
}

#[derive(Deserialize)]
struct TreeNode {
    #[serde(default)]
    nid: Option<Scalar>,
    #[serde(default)]
    nvalue: Option<String>,
    #[serde(default)]
    children: Vec<TreeNode>,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(rename = "imageList", default)]
    image_list: Option<ImageList>,
}

#[derive(Deserialize)]
struct ImageList {
    #[serde(default)]
    image: OneOrMany<RawImage>,
}

#[derive(Deserialize)]
struct RawImage {
    #[serde(rename = "featureSet")]
    feature_set: String,
    #[serde(rename = "releaseNumber")]
    release_number: Scalar,
}

/// Map a feature search response to a feature index
///
/// # Errors
/// Returns a message when a feature lacks an `id` or `name`
pub fn feature_index(value: &Value) -> Result<Index<Feature>, String> {
    let response = FeatureResponse::deserialize(value).map_err(|e| e.to_string())?;
    let features = response
        .feature_list
        .map(|list| list.feature.into_vec())
        .unwrap_or_default()
        .into_iter()
        .map(|raw| Feature {
            id: raw.id.into_text(),
            name: raw.name,
        });
    Ok(Index::from_entries(features))
}

/// Flatten the two-level platform tree into a platform index
///
/// Only grandchildren of the root are platforms; the first level groups them
/// into series.
///
/// # Errors
/// Returns a message when a platform node has no usable `nid` or `nvalue`
pub fn platform_index(value: &Value) -> Result<Index<Platform>, String> {
    let root = TreeNode::deserialize(value).map_err(|e| e.to_string())?;
    let mut platforms = Vec::new();
    for series in root.children {
        for node in series.children {
            let nid = node
                .nid
                .map(Scalar::into_text)
                .ok_or("platform node without nid")?;
            let id = nid
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("invalid platform id '{nid}': {e}"))?;
            let name = node.nvalue.ok_or("platform node without nvalue")?;
            platforms.push(Platform { id, name });
        }
    }
    Ok(Index::from_entries(platforms))
}

/// Whether a feature-set label belongs to a product family the report skips
#[must_use]
pub fn is_excluded_feature_set(feature_set: &str) -> bool {
    feature_set.contains("CAT") || feature_set.contains("ISR")
}

/// Reduce an image lookup response to distinct licenses and a minimum version
///
/// # Errors
/// Returns a message when an image lacks `featureSet` or `releaseNumber`
pub fn os_info(value: &Value) -> Result<OsInfo, String> {
    let response = ImageResponse::deserialize(value).map_err(|e| e.to_string())?;
    let images = response
        .image_list
        .map(|list| list.image.into_vec())
        .unwrap_or_default();

    let mut info = OsInfo::default();
    for image in images
        .into_iter()
        .filter(|image| !is_excluded_feature_set(&image.feature_set))
    {
        if info.min_version.is_none() {
            info.min_version = Some(image.release_number.into_text());
        }
        info.licenses.push(image.feature_set);
    }
    info.licenses.sort();
    info.licenses.dedup();
    Ok(info)
}
