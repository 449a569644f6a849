// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Case-insensitive regular expression filtering of an index

use regex::RegexBuilder;

use crate::catalog::{Entry, Index};
use crate::error::CfnError;

/// Keep the entries whose label matches `pattern`, ignoring case
///
/// Keys of the surviving entries are unchanged so the user can keep typing
/// the numbers from the full listing. An empty pattern matches everything.
///
/// # Errors
/// Returns `CfnError::InvalidPattern` when `pattern` is not a valid regex
///
/// # Examples
/// ```
/// use cfn::{Feature, Index, filter_index};
/// let index = Index::from_entries([
///     Feature { id: "101".into(), name: "NAT".into() },
///     Feature { id: "103".into(), name: "NATO-test".into() },
/// ]);
/// let filtered = filter_index("nato", &index).unwrap();
/// assert_eq!(filtered.keys().collect::<Vec<_>>(), vec![2]);
/// ```
pub fn filter_index<T: Entry + Clone>(pattern: &str, index: &Index<T>) -> Result<Index<T>, CfnError> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| CfnError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

    Ok(Index::from_keyed(
        index
            .iter()
            .filter(|(_, entry)| re.is_match(entry.label()))
            .map(|(key, entry)| (key, entry.clone())),
    ))
}
