// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Cisco Feature Navigator Library
//!
//! This library provides the pieces of an interactive lookup client for the
//! Feature Navigator web service: endpoint URLs, JSON fetching (with a
//! tolerant decode for the platform tree), regex filtering, a paginated
//! listing and the fixed-width license report, tied together by a four-state
//! navigation session.

pub mod catalog;
pub mod console;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod pager;
pub mod report;
pub mod session;

// Re-export commonly used items at the crate root for convenience
pub use catalog::{Entry, Feature, Index, OsInfo, Platform, SortKey};
pub use console::{Confirm, Console, KeyReader, LineConfirm};
pub use endpoint::{CFN_BASE, Endpoints};
pub use error::CfnError;
pub use fetch::{HttpFetcher, JsonSource};
pub use filter::filter_index;
pub use pager::{Display, PAGE_ROWS, display};
pub use report::{Report, ReportLayout};
pub use session::{Session, Settings, State, Step};
