//! Run-scoped context: which hub page to analyze and how
//!
//! Everything the pipeline needs to know about the current invocation lives in
//! a [`RunContext`], built once from the command line and passed by reference.

use crate::RankerError;
use std::fmt;

/// A `PROJECT/PAGE` locator for the hub page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub project: String,
    pub page: String,
}

impl PageSpec {
    /// Parses `PROJECT/PAGE`, splitting on the first `/`
    ///
    /// The page part may itself contain slashes; both parts must be non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cosense_ranker::config::PageSpec;
    ///
    /// let spec = PageSpec::parse("yasulab/README").unwrap();
    /// assert_eq!(spec.project, "yasulab");
    /// assert_eq!(spec.page, "README");
    /// ```
    pub fn parse(spec: &str) -> Result<Self, RankerError> {
        match spec.split_once('/') {
            Some((project, page)) if !project.is_empty() && !page.is_empty() => Ok(Self {
                project: project.to_string(),
                page: page.to_string(),
            }),
            _ => Err(RankerError::InvalidPageSpec {
                spec: spec.to_string(),
            }),
        }
    }
}

impl fmt::Display for PageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.page)
    }
}

/// Options selected on the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Keep only links whose name or project contains this keyword
    pub keyword: Option<String>,

    /// Break comments down per page for this user instead of ranking
    pub username: Option<String>,

    /// Analyze only the first extracted link
    pub first_only: bool,

    /// Check link validity instead of counting comments
    pub check_links: bool,
}

/// Immutable context for one run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub hub: PageSpec,
    pub options: RunOptions,
}

impl RunContext {
    /// Builds the context from the raw `--page` value
    ///
    /// # Returns
    ///
    /// * `Err(RankerError::MissingPageFlag)` - No page was given
    /// * `Err(RankerError::InvalidPageSpec)` - The value is not `PROJECT/PAGE`
    pub fn new(page: Option<&str>, options: RunOptions) -> Result<Self, RankerError> {
        let page = page.ok_or(RankerError::MissingPageFlag)?;
        Ok(Self {
            hub: PageSpec::parse(page)?,
            options,
        })
    }

    /// Project of the hub page; links without their own project live here
    pub fn project(&self) -> &str {
        &self.hub.project
    }
}
