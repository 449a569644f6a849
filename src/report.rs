// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Fixed-width license report for one feature across selected platforms
//!
//! ```text
//! ** NAT (101) **
//!
//!
//! Platform Series   Minimum Version  Feature Set/License/Supervisor(NX-OS)
//! ----------------  ---------------  ----------------------------------------
//! ASR 1000          15.2(1)S         ADVANCED ENTERPRISE SERVICES
//!                                    IP BASE
//! ```

use crate::catalog::{Feature, OsInfo, Platform, os_info};
use crate::endpoint::Endpoints;
use crate::error::CfnError;
use crate::fetch::JsonSource;

/// Width of the platform column, truncation marker included
pub const NAME_WIDTH: usize = 16;

/// Width of the minimum version column
pub const VERSION_WIDTH: usize = 15;

/// Width of the dash rule under the license column
pub const LICENSE_RULE_WIDTH: usize = 40;

/// Marks a platform name or version cut to fit its column
pub const TRUNCATION_MARKER: char = '*';

const GAP: &str = "  ";

/// Column choices for a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    pub include_min_version: bool,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            include_min_version: true,
        }
    }
}

impl ReportLayout {
    /// Column at which license text starts
    #[must_use]
    pub fn license_column(self) -> usize {
        let mut column = NAME_WIDTH + GAP.len();
        if self.include_min_version {
            column += VERSION_WIDTH + GAP.len();
        }
        column
    }
}

/// License lookup result for one selected platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLicenses {
    pub platform: Platform,
    pub info: OsInfo,
}

/// Everything needed to render the report, in selection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub feature: Feature,
    pub platforms: Vec<PlatformLicenses>,
}

impl Report {
    /// Look up licenses for `feature` on each platform, one request per platform
    ///
    /// # Errors
    /// Returns the first fetch or decode error; no partial report is built
    pub fn collect<S: JsonSource + ?Sized>(
        source: &S,
        endpoints: &Endpoints,
        feature: &Feature,
        platforms: &[Platform],
    ) -> Result<Self, CfnError> {
        let mut collected = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let url = endpoints.image_url(&feature.id, platform.id);
            let value = source.fetch_json(&url)?;
            let info = os_info(&value).map_err(|e| CfnError::decode(&url, e))?;
            collected.push(PlatformLicenses {
                platform: platform.clone(),
                info,
            });
        }

        Ok(Self {
            feature: feature.clone(),
            platforms: collected,
        })
    }

    /// Render the report text
    #[must_use]
    pub fn render(&self, layout: ReportLayout) -> String {
        let mut out = format!("\n\n\n** {} ({}) **\n", self.feature.name, self.feature.id);

        out.push_str("\n\n");
        out.push_str(&format!("{:<NAME_WIDTH$}{GAP}", "Platform Series"));
        if layout.include_min_version {
            out.push_str(&format!("{:<VERSION_WIDTH$}{GAP}", "Minimum Version"));
        }
        out.push_str("Feature Set/License/Supervisor(NX-OS)\n");

        out.push_str(&"-".repeat(NAME_WIDTH));
        out.push_str(GAP);
        if layout.include_min_version {
            out.push_str(&"-".repeat(VERSION_WIDTH));
            out.push_str(GAP);
        }
        out.push_str(&"-".repeat(LICENSE_RULE_WIDTH));
        out.push('\n');

        let continuation = " ".repeat(layout.license_column());
        let mut wrote_platform = false;

        for entry in &self.platforms {
            for (i, license) in entry.info.licenses.iter().enumerate() {
                if i > 0 {
                    out.push_str(&continuation);
                    out.push_str(license);
                    out.push('\n');
                    continue;
                }

                if wrote_platform {
                    out.push('\n');
                }
                out.push_str(&name_cell(&entry.platform.name));
                out.push_str(GAP);
                if layout.include_min_version {
                    let version = entry.info.min_version.as_deref().unwrap_or("-");
                    out.push_str(&version_cell(version));
                    out.push_str(GAP);
                }
                out.push_str(license);
                out.push('\n');
                wrote_platform = true;
            }
        }

        out
    }
}

/// Fit a platform name into `NAME_WIDTH` columns
///
/// Names that do not fit keep their first `NAME_WIDTH - 1` characters and
/// end with `TRUNCATION_MARKER`; shorter names are padded with spaces.
///
/// # Examples
/// ```
/// use cfn::report::name_cell;
/// assert_eq!(name_cell("ASR 1000"), "ASR 1000        ");
/// assert_eq!(name_cell("Catalyst 6500 Series Switches"), "Catalyst 6500 S*");
/// ```
#[must_use]
pub fn name_cell(name: &str) -> String {
    if name.chars().count() < NAME_WIDTH {
        format!("{name:<NAME_WIDTH$}")
    } else {
        cut(name, NAME_WIDTH)
    }
}

/// Fit a minimum version into `VERSION_WIDTH` columns
///
/// Unlike platform names, a version that fills the column exactly is kept.
#[must_use]
pub fn version_cell(version: &str) -> String {
    if version.chars().count() <= VERSION_WIDTH {
        format!("{version:<VERSION_WIDTH$}")
    } else {
        cut(version, VERSION_WIDTH)
    }
}

fn cut(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width - 1).collect();
    cell.push(TRUNCATION_MARKER);
    cell
}
