// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Sorted, paginated listing of an index
//!
//! Listings stop every `PAGE_ROWS` rows with a `-- More --` prompt, much like
//! `more(1)`: `n` shows the next page and `q` abandons the rest.

use std::io::{self, BufRead, Write};

use crate::catalog::{Entry, Index};
use crate::console::{Confirm, Console};

/// Rows printed before each pause
pub const PAGE_ROWS: usize = 29;

/// How a listing ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Every entry was printed
    Shown,
    /// Nothing to print
    Empty,
    /// The user quit at a `-- More --` prompt
    Aborted,
}

impl Display {
    /// Whether the caller may move on to the next state
    #[must_use]
    pub fn is_shown(self) -> bool {
        self == Self::Shown
    }
}

/// Progress shown at a pause, `floor(pages * 3000 / total)`
///
/// # Examples
/// ```
/// use cfn::pager::progress_percent;
/// assert_eq!(progress_percent(1, 100), 30);
/// assert_eq!(progress_percent(2, 70), 85);
/// ```
#[must_use]
pub fn progress_percent(pages: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    pages * 3000 / total
}

/// Print `index` sorted by `Entry::sort_key`, pausing every `PAGE_ROWS` rows
///
/// Entries with equal sort keys keep their sequence order.
///
/// # Errors
/// Returns an error if writing output or reading an answer fails
pub fn display<T, R, W, C>(index: &Index<T>, console: &mut Console<R, W, C>) -> io::Result<Display>
where
    T: Entry,
    R: BufRead,
    W: Write,
    C: Confirm,
{
    if index.is_empty() {
        writeln!(console.out(), "\nNone. Try again. ")?;
        return Ok(Display::Empty);
    }

    let mut rows: Vec<(usize, &T)> = index.iter().collect();
    rows.sort_by(|a, b| a.1.sort_key().cmp(&b.1.sort_key()));

    let total = rows.len();
    let mut pages = 0;

    writeln!(console.out())?;
    for (shown, (key, entry)) in rows.into_iter().enumerate() {
        if shown > 0 && shown % PAGE_ROWS == 0 {
            pages += 1;
            if !wait_for_next_page(console, progress_percent(pages, total))? {
                return Ok(Display::Aborted);
            }
        }
        writeln!(console.out(), "{key}:\t{}", entry.label())?;
    }

    Ok(Display::Shown)
}

/// Block until the user answers `n` (true) or `q` (false)
fn wait_for_next_page<R, W, C>(console: &mut Console<R, W, C>, percent: usize) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
    C: Confirm,
{
    loop {
        write!(
            console.out(),
            "\n-- More --({percent}%)  (\"n\" : Next, \"q\" : Quit) "
        )?;
        let answer = console.confirm()?;
        writeln!(console.out())?;

        match answer {
            Some('n') => return Ok(true),
            Some('q') | None => return Ok(false),
            Some(_) => {}
        }
    }
}
