// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Interactive navigation: feature search, feature selection, platform
//! selection and the report menu
//!
//! The session owns the current feature and platform indexes. A new search
//! or a new feature selection replaces them wholesale.

use std::io::{BufRead, Write};

use crate::catalog::{Feature, Index, Platform, feature_index, platform_index};
use crate::console::{Confirm, Console};
use crate::endpoint::Endpoints;
use crate::error::CfnError;
use crate::fetch::JsonSource;
use crate::filter::filter_index;
use crate::pager::display;
use crate::report::{Report, ReportLayout};

/// Where the navigation loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    FeatureSearch,
    FeatureSelect,
    PlatformSelect,
    ReportMenu,
}

/// Outcome of handling one prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Goto(State),
    Quit,
}

/// Behaviour switches taken from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub layout: ReportLayout,
    /// Print network/decode errors and re-prompt instead of failing the session
    pub recover_fetch_errors: bool,
}

pub struct Session<S> {
    source: S,
    endpoints: Endpoints,
    settings: Settings,
    features: Index<Feature>,
    platforms: Index<Platform>,
    feature: Option<Feature>,
}

impl<S: JsonSource> Session<S> {
    pub fn new(source: S, endpoints: Endpoints, settings: Settings) -> Self {
        Self {
            source,
            endpoints,
            settings,
            features: Index::default(),
            platforms: Index::default(),
            feature: None,
        }
    }

    #[must_use]
    pub fn features(&self) -> &Index<Feature> {
        &self.features
    }

    #[must_use]
    pub fn platforms(&self) -> &Index<Platform> {
        &self.platforms
    }

    /// The feature whose platforms are currently listed
    #[must_use]
    pub fn selected_feature(&self) -> Option<&Feature> {
        self.feature.as_ref()
    }

    /// Run from the feature search prompt until the user quits
    ///
    /// # Errors
    /// Returns the first fatal error: I/O failures always, network and
    /// decode failures unless `recover_fetch_errors` is set
    pub fn run<R, W, C>(&mut self, console: &mut Console<R, W, C>) -> Result<(), CfnError>
    where
        R: BufRead,
        W: Write,
        C: Confirm,
    {
        let mut state = State::FeatureSearch;
        loop {
            match self.step(state, console)? {
                Step::Goto(next) => state = next,
                Step::Quit => return Ok(()),
            }
        }
    }

    /// Handle one prompt in `state`
    ///
    /// Invalid filter patterns, and fetch failures when recovery is enabled,
    /// are reported and keep the session in `state`.
    ///
    /// # Errors
    /// Returns I/O failures, and network or decode failures unless recovered
    pub fn step<R, W, C>(
        &mut self,
        state: State,
        console: &mut Console<R, W, C>,
    ) -> Result<Step, CfnError>
    where
        R: BufRead,
        W: Write,
        C: Confirm,
    {
        let result = match state {
            State::FeatureSearch => self.feature_search(console),
            State::FeatureSelect => self.feature_select(console),
            State::PlatformSelect => self.platform_select(console),
            State::ReportMenu => report_menu(console),
        };

        match result {
            Err(e @ CfnError::InvalidPattern { .. }) => {
                writeln!(console.out(), "\nError: {e}")?;
                Ok(Step::Goto(state))
            }
            Err(e) if e.is_fetch_failure() && self.settings.recover_fetch_errors => {
                writeln!(console.out(), "\nError: {e}")?;
                Ok(Step::Goto(state))
            }
            other => other,
        }
    }

    fn feature_search<R, W, C>(&mut self, console: &mut Console<R, W, C>) -> Result<Step, CfnError>
    where
        R: BufRead,
        W: Write,
        C: Confirm,
    {
        let Some(word) = console.prompt("\nInput feature word: ")? else {
            return Ok(Step::Quit);
        };

        match word.as_str() {
            "end" | "exit" => return Ok(Step::Quit),
            "" => return Ok(Step::Goto(State::FeatureSearch)),
            _ => {}
        }

        self.features = Index::default();
        self.platforms = Index::default();
        self.feature = None;

        let url = self.endpoints.feature_search_url(&word);
        let value = self.source.fetch_json(&url)?;
        self.features = feature_index(&value).map_err(|e| CfnError::decode(&url, e))?;

        if self.features.is_empty() {
            writeln!(console.out(), "\nNo features. Try again. ")?;
            return Ok(Step::Goto(State::FeatureSearch));
        }

        let question = format!("\n{} features found. Filter? (word) ", self.features.len());
        let Some(pattern) = console.prompt(&question)? else {
            return Ok(Step::Quit);
        };

        let listed = filter_index(&pattern, &self.features)?;
        if display(&listed, console)?.is_shown() {
            Ok(Step::Goto(State::FeatureSelect))
        } else {
            Ok(Step::Goto(State::FeatureSearch))
        }
    }

    fn feature_select<R, W, C>(&mut self, console: &mut Console<R, W, C>) -> Result<Step, CfnError>
    where
        R: BufRead,
        W: Write,
        C: Confirm,
    {
        let Some(input) = console.prompt("\nInput feature number: ")? else {
            return Ok(Step::Quit);
        };

        match input.as_str() {
            "end" => return Ok(Step::Quit),
            "exit" => return Ok(Step::Goto(State::FeatureSearch)),
            "" => return Ok(Step::Goto(State::FeatureSelect)),
            _ => {}
        }

        if !is_number(&input) {
            writeln!(console.out(), "\nError: Only number.")?;
            return Ok(Step::Goto(State::FeatureSelect));
        }

        let Some(feature) = input
            .parse::<usize>()
            .ok()
            .and_then(|key| self.features.get(key))
            .cloned()
        else {
            writeln!(console.out(), "\nError: Input number not listed. Try again.")?;
            return Ok(Step::Goto(State::FeatureSelect));
        };

        self.platforms = Index::default();
        self.feature = Some(feature.clone());

        let url = self.endpoints.platform_tree_url(&feature.id);
        let value = self.source.fetch_lenient_json(&url)?;
        self.platforms = platform_index(&value).map_err(|e| CfnError::decode(&url, e))?;

        let question = format!("\n{} platforms found. Filter? (word) ", self.platforms.len());
        let Some(pattern) = console.prompt(&question)? else {
            return Ok(Step::Quit);
        };

        let listed = filter_index(&pattern, &self.platforms)?;
        if display(&listed, console)?.is_shown() {
            Ok(Step::Goto(State::PlatformSelect))
        } else {
            Ok(Step::Goto(State::FeatureSelect))
        }
    }

    fn platform_select<R, W, C>(&mut self, console: &mut Console<R, W, C>) -> Result<Step, CfnError>
    where
        R: BufRead,
        W: Write,
        C: Confirm,
    {
        let Some(input) = console.prompt("\nInput platform numbers: (CSV format) ")? else {
            return Ok(Step::Quit);
        };

        let entries: Vec<&str> = input.split(',').map(str::trim).collect();
        if entries.contains(&"end") {
            return Ok(Step::Quit);
        }

        // Every entry is checked so all problems are reported at once
        let mut back = false;
        let mut invalid = false;
        let mut selected = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry == "exit" {
                back = true;
            } else if entry.is_empty() {
                writeln!(console.out(), "\nError: Illegal syntax. Try again.")?;
                invalid = true;
            } else if !is_number(entry) {
                writeln!(console.out(), "\nError: Only number.")?;
                invalid = true;
            } else if let Some(platform) = entry
                .parse::<usize>()
                .ok()
                .and_then(|key| self.platforms.get(key))
            {
                selected.push(platform.clone());
            } else {
                writeln!(console.out(), "\nError: Input number not listed. Try again.")?;
                invalid = true;
            }
        }

        if back {
            return Ok(Step::Goto(State::FeatureSelect));
        }
        if invalid {
            return Ok(Step::Goto(State::PlatformSelect));
        }

        let Some(feature) = self.feature.as_ref() else {
            return Ok(Step::Goto(State::FeatureSelect));
        };

        let report = Report::collect(&self.source, &self.endpoints, feature, &selected)?;
        writeln!(console.out(), "{}", report.render(self.settings.layout))?;

        Ok(Step::Goto(State::ReportMenu))
    }
}

fn report_menu<R, W, C>(console: &mut Console<R, W, C>) -> Result<Step, CfnError>
where
    R: BufRead,
    W: Write,
    C: Confirm,
{
    writeln!(
        console.out(),
        "\n\n(1) Feature_word  (2) Feature_number  (3) Platform_number"
    )?;
    let Some(choice) = console.prompt("Select number: ")? else {
        return Ok(Step::Quit);
    };

    Ok(match choice.as_str() {
        "1" => Step::Goto(State::FeatureSearch),
        "2" => Step::Goto(State::FeatureSelect),
        "3" | "exit" => Step::Goto(State::PlatformSelect),
        "end" => Step::Quit,
        _ => Step::Goto(State::ReportMenu),
    })
}

fn is_number(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}
