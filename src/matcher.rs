// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Label predicates used by routing policies.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{alerting::ObjectMatcher, error::Error};

/// Comparison applied between an alert label and the matcher value.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default,)]
pub enum MatchOperator
{
    /// Label equals the value.
    #[default]
    #[serde(rename = "=")]
    Equal,
    /// Label differs from the value.
    #[serde(rename = "!=")]
    NotEqual,
    /// Label matches the value as a regular expression.
    #[serde(rename = "=~")]
    Regex,
    /// Label does not match the value as a regular expression.
    #[serde(rename = "!~")]
    NotRegex,
}

impl MatchOperator
{
    /// Operator symbol used in the wire format.
    pub fn symbol(self,) -> &'static str
    {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Regex => "=~",
            Self::NotRegex => "!~",
        }
    }

    fn is_regex(self,) -> bool
    {
        matches!(self, Self::Regex | Self::NotRegex)
    }
}

/// A single `label <op> value` predicate.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Matcher
{
    label:    String,
    operator: MatchOperator,
    value:    String,
}

impl Matcher
{
    /// Builds a matcher from its parts without validating them.
    ///
    /// Validation happens when the owning [`crate::Manager`] is constructed.
    pub fn new(label: impl Into<String,>, operator: MatchOperator, value: impl Into<String,>,) -> Self
    {
        Self {
            label: label.into(), operator, value: value.into(),
        }
    }

    pub fn label(&self,) -> &str
    {
        &self.label
    }

    pub fn operator(&self,) -> MatchOperator
    {
        self.operator
    }

    pub fn value(&self,) -> &str
    {
        &self.value
    }

    /// Checks the matcher is usable by the alerting backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMatcher`] when the label is blank or when a
    /// regex operator carries a value that does not compile.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        if self.label.trim().is_empty() {
            return Err(Error::invalid_matcher("matcher label cannot be empty",),);
        }
        if self.operator.is_regex()
            && let Err(source,) = Regex::new(&self.value,)
        {
            return Err(Error::invalid_matcher(format!(
                "matcher on '{}' has an invalid pattern: {source}",
                self.label
            ),),);
        }
        Ok((),)
    }

    pub(crate) fn to_object_matcher(&self,) -> ObjectMatcher
    {
        ObjectMatcher(self.label.clone(), self.operator.symbol().to_owned(), self.value.clone(),)
    }
}

/// Matches alerts whose `label` equals `value`.
pub fn tag_eq(label: impl Into<String,>, value: impl Into<String,>,) -> Matcher
{
    Matcher::new(label, MatchOperator::Equal, value,)
}

/// Matches alerts whose `label` differs from `value`.
pub fn tag_neq(label: impl Into<String,>, value: impl Into<String,>,) -> Matcher
{
    Matcher::new(label, MatchOperator::NotEqual, value,)
}

/// Matches alerts whose `label` matches the regular expression `pattern`.
pub fn tag_matches(label: impl Into<String,>, pattern: impl Into<String,>,) -> Matcher
{
    Matcher::new(label, MatchOperator::Regex, pattern,)
}

/// Matches alerts whose `label` does not match the regular expression `pattern`.
pub fn tag_not_matches(label: impl Into<String,>, pattern: impl Into<String,>,) -> Matcher
{
    Matcher::new(label, MatchOperator::NotRegex, pattern,)
}
