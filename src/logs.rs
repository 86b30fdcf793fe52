// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Decoder turning declarative logs panel descriptions into native panels.
//!
//! Decoding is atomic: [`DashboardLogs::to_option`] either returns a fully
//! populated [`RowOption`] or an [`Error`], never a partially built panel.
//! Enumerated fields are resolved through closed, case-sensitive lookup
//! tables, and an unknown value is always reported rather than replaced by
//! the native default.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    dashboard::{DedupStrategy, LogsOptions, LogsPanel, Panel, RowOption, SortOrder, Target},
    error::Error,
};

/// Declarative description of a logs panel.
///
/// # Examples
///
/// ```
/// use grafana_compose::DashboardLogs;
///
/// let yaml = r#"
/// title: API logs
/// targets:
///   - loki:
///       query: '{app="api"}'
/// visualization:
///   order: asc
/// "#;
/// let panel: DashboardLogs = serde_yaml::from_str(yaml,).expect("valid panel",);
/// assert!(panel.to_option().is_ok());
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default,)]
#[serde(deny_unknown_fields)]
pub struct DashboardLogs
{
    #[serde(default)]
    pub title:         String,
    #[serde(default)]
    pub description:   String,
    /// Panel width; `0` keeps the native default.
    #[serde(default)]
    pub span:          f32,
    #[serde(default)]
    pub height:        String,
    #[serde(default)]
    pub transparent:   bool,
    #[serde(default)]
    pub datasource:    String,
    /// Variable the panel is repeated over.
    #[serde(default)]
    pub repeat:        String,
    #[serde(default)]
    pub targets:       Vec<LogsTarget,>,
    #[serde(default)]
    pub visualization: Option<LogsVisualization,>,
}

/// Query target of a logs panel. Exactly one source block must be set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default,)]
#[serde(deny_unknown_fields)]
pub struct LogsTarget
{
    #[serde(default)]
    pub loki: Option<LokiTarget,>,
}

/// Loki query issued by a logs panel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default,)]
#[serde(deny_unknown_fields)]
pub struct LokiTarget
{
    #[serde(default)]
    pub query:     String,
    #[serde(default)]
    pub legend:    String,
    #[serde(default, rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub hidden:    bool,
}

impl LokiTarget
{
    fn is_empty(&self,) -> bool
    {
        self.query.is_empty() && self.legend.is_empty() && self.reference.is_empty() && !self.hidden
    }

    fn to_target(&self,) -> Target
    {
        Target {
            ref_id:        self.reference.clone(),
            expr:          self.query.clone(),
            legend_format: self.legend.clone(),
            hide:          self.hidden,
        }
    }
}

/// Source block attached to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum LogsSource<'target,>
{
    Loki(&'target LokiTarget,),
}

impl LogsSource<'_,>
{
    fn to_target(self,) -> Target
    {
        match self {
            Self::Loki(loki,) => loki.to_target(),
        }
    }
}

impl LogsTarget
{
    /// Returns the source block when exactly one non-empty block is present.
    pub fn source(&self,) -> Option<LogsSource<'_,>,>
    {
        let mut sources = self
            .loki
            .as_ref()
            .filter(|loki| !loki.is_empty(),)
            .map(LogsSource::Loki,)
            .into_iter();

        match (sources.next(), sources.next(),) {
            (Some(source,), None,) => Some(source,),
            _ => None,
        }
    }
}

/// Display toggles of a logs panel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default,)]
#[serde(deny_unknown_fields)]
pub struct LogsVisualization
{
    #[serde(default)]
    pub time:             bool,
    #[serde(default)]
    pub unique_labels:    bool,
    #[serde(default)]
    pub common_labels:    bool,
    #[serde(default)]
    pub wrap_lines:       bool,
    #[serde(default)]
    pub prettify_json:    bool,
    #[serde(default)]
    pub hide_log_details: bool,
    /// `asc` or `desc`; empty keeps the native default.
    #[serde(default)]
    pub order:            String,
    /// `none`, `exact`, `signature` or `numbers`; empty keeps the native
    /// default.
    #[serde(default)]
    pub deduplication:    String,
}

impl LogsVisualization
{
    fn to_options(&self,) -> Result<LogsOptions, Error,>
    {
        let defaults = LogsOptions::default();

        Ok(LogsOptions {
            dedup_strategy:       decode_dedup_strategy(&self.deduplication,)?
                .unwrap_or(defaults.dedup_strategy,),
            wrap_log_message:     self.wrap_lines,
            show_time:            self.time,
            show_labels:          self.unique_labels,
            show_common_labels:   self.common_labels,
            prettify_log_message: self.prettify_json,
            sort_order:           decode_sort_order(&self.order,)?.unwrap_or(defaults.sort_order,),
            enable_log_details:   !self.hide_log_details,
        },)
    }
}

impl DashboardLogs
{
    /// Decodes the panel and wraps it as a row option.
    ///
    /// # Errors
    ///
    /// * [`Error::TargetNotConfigured`] when targets are declared but none of
    ///   them carries a source.
    /// * [`Error::InvalidSortOrder`] / [`Error::InvalidDeduplicationStrategy`]
    ///   when a visualization enum holds an unrecognized value.
    pub fn to_option(&self,) -> Result<RowOption, Error,>
    {
        Ok(RowOption::Panel(self.to_panel()?,),)
    }

    /// Decodes the panel without wrapping it.
    ///
    /// # Errors
    ///
    /// Same as [`DashboardLogs::to_option`].
    pub fn to_panel(&self,) -> Result<Panel, Error,>
    {
        let targets = self.decode_targets()?;
        let options = self
            .visualization
            .as_ref()
            .map(LogsVisualization::to_options,)
            .transpose()?
            .unwrap_or_default();

        debug!("Decoded logs panel '{}' with {} targets", self.title, targets.len());

        let mut panel = Panel::logs(self.title.clone(), LogsPanel {
            targets,
            options,
        },);
        panel.description = non_empty(&self.description,);
        if self.span != 0.0 {
            panel.span = self.span;
        }
        panel.height = non_empty(&self.height,);
        panel.transparent = self.transparent;
        panel.datasource = non_empty(&self.datasource,);
        panel.repeat = non_empty(&self.repeat,);

        Ok(panel,)
    }

    fn decode_targets(&self,) -> Result<Vec<Target,>, Error,>
    {
        let mut targets = Vec::with_capacity(self.targets.len(),);
        for (index, target,) in self.targets.iter().enumerate() {
            match target.source() {
                Some(source,) => targets.push(source.to_target(),),
                None => warn!("Skipping unconfigured target #{index} of panel '{}'", self.title),
            }
        }

        if targets.is_empty() && !self.targets.is_empty() {
            return Err(Error::TargetNotConfigured,);
        }
        Ok(targets,)
    }
}

/// Resolves the visualization sort order.
///
/// # Errors
///
/// Returns [`Error::InvalidSortOrder`] for any non-empty value other than
/// `asc` or `desc`.
pub fn decode_sort_order(value: &str,) -> Result<Option<SortOrder,>, Error,>
{
    match value {
        "" => Ok(None,),
        "asc" => Ok(Some(SortOrder::Ascending,),),
        "desc" => Ok(Some(SortOrder::Descending,),),
        other => Err(Error::InvalidSortOrder {
            value: other.to_owned(),
        },),
    }
}

/// Resolves the visualization deduplication strategy.
///
/// # Errors
///
/// Returns [`Error::InvalidDeduplicationStrategy`] for any non-empty value
/// outside the supported strategies.
pub fn decode_dedup_strategy(value: &str,) -> Result<Option<DedupStrategy,>, Error,>
{
    match value {
        "" => Ok(None,),
        "none" => Ok(Some(DedupStrategy::None,),),
        "exact" => Ok(Some(DedupStrategy::Exact,),),
        "signature" => Ok(Some(DedupStrategy::Signature,),),
        "numbers" => Ok(Some(DedupStrategy::Numbers,),),
        other => Err(Error::InvalidDeduplicationStrategy {
            value: other.to_owned(),
        },),
    }
}

fn non_empty(value: &str,) -> Option<String,>
{
    if value.is_empty() { None } else { Some(value.to_owned(),) }
}
