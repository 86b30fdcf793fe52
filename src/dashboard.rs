// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Native dashboard object model.
//!
//! These types mirror the subset of Grafana's dashboard JSON needed to carry
//! logs panels: a dashboard holds rows, rows hold panels. Panels are added to
//! rows through [`RowOption`] values, which is how decoded panels are folded
//! into a dashboard.

use serde::Serialize;

/// Span given to panels that do not request one.
pub const DEFAULT_PANEL_SPAN: f32 = 6.0;

/// Dashboard made of titled rows.
#[derive(Debug, Serialize, Clone, PartialEq,)]
pub struct Dashboard
{
    pub title: String,
    pub rows:  Vec<Row,>,
}

impl Dashboard
{
    pub fn new<I,>(title: impl Into<String,>, rows: I,) -> Self
    where
        I: IntoIterator<Item = Row,>,
    {
        Self {
            title: title.into(), rows: rows.into_iter().collect(),
        }
    }
}

/// Row of panels.
#[derive(Debug, Serialize, Clone, PartialEq,)]
pub struct Row
{
    pub title:  String,
    pub panels: Vec<Panel,>,
}

impl Row
{
    /// Creates a row and applies `options` in order.
    pub fn new<I,>(title: impl Into<String,>, options: I,) -> Self
    where
        I: IntoIterator<Item = RowOption,>,
    {
        let mut row = Self {
            title: title.into(), panels: Vec::new(),
        };
        for option in options {
            option.apply(&mut row,);
        }
        row
    }
}

/// Composable modification of a [`Row`].
#[derive(Debug, Clone, PartialEq,)]
pub enum RowOption
{
    /// Appends a panel to the row.
    Panel(Panel,),
}

impl RowOption
{
    fn apply(self, row: &mut Row,)
    {
        match self {
            Self::Panel(panel,) => row.panels.push(panel,),
        }
    }
}

/// Single visualization unit of a row.
///
/// Optional fields stay `None` when the author did not set them, so the
/// serialized panel never carries an explicit empty value.
#[derive(Debug, Serialize, Clone, PartialEq,)]
pub struct Panel
{
    pub title:       String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String,>,
    pub span:        f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height:      Option<String,>,
    pub transparent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource:  Option<String,>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat:      Option<String,>,
    #[serde(flatten)]
    pub kind:        PanelKind,
}

impl Panel
{
    /// Creates a logs panel carrying the native defaults.
    pub fn logs(title: impl Into<String,>, logs: LogsPanel,) -> Self
    {
        Self {
            title:       title.into(),
            description: None,
            span:        DEFAULT_PANEL_SPAN,
            height:      None,
            transparent: false,
            datasource:  None,
            repeat:      None,
            kind:        PanelKind::Logs(logs,),
        }
    }

    pub fn logs_panel(&self,) -> Option<&LogsPanel,>
    {
        match &self.kind {
            PanelKind::Logs(logs,) => Some(logs,),
        }
    }
}

/// Panel specific payload, tagged with the Grafana panel type.
#[derive(Debug, Serialize, Clone, PartialEq,)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PanelKind
{
    Logs(LogsPanel,),
}

/// Queries and display options of a logs panel.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default,)]
pub struct LogsPanel
{
    pub targets: Vec<Target,>,
    pub options: LogsOptions,
}

/// Query issued by a panel against its datasource.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default,)]
pub struct Target
{
    #[serde(rename = "refId", skip_serializing_if = "String::is_empty")]
    pub ref_id:        String,
    pub expr:          String,
    #[serde(rename = "legendFormat", skip_serializing_if = "String::is_empty")]
    pub legend_format: String,
    pub hide:          bool,
}

/// Display options of a logs panel.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq,)]
#[serde(rename_all = "camelCase")]
pub struct LogsOptions
{
    pub dedup_strategy:       DedupStrategy,
    pub wrap_log_message:     bool,
    pub show_time:            bool,
    pub show_labels:          bool,
    pub show_common_labels:   bool,
    pub prettify_log_message: bool,
    pub sort_order:           SortOrder,
    pub enable_log_details:   bool,
}

impl Default for LogsOptions
{
    fn default() -> Self
    {
        Self {
            dedup_strategy:       DedupStrategy::None,
            wrap_log_message:     false,
            show_time:            false,
            show_labels:          false,
            show_common_labels:   false,
            prettify_log_message: false,
            sort_order:           SortOrder::Descending,
            enable_log_details:   true,
        }
    }
}

/// Order in which log lines are displayed.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum SortOrder
{
    Ascending,
    Descending,
}

impl SortOrder
{
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }
}

/// Strategy used to collapse repeated log lines.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategy
{
    /// Keep every line.
    None,
    /// Collapse lines that are strictly identical.
    Exact,
    /// Collapse lines differing only by numbers.
    Numbers,
    /// Collapse lines sharing the same whitespace and punctuation signature.
    Signature,
}

impl DedupStrategy
{
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::None => "none",
            Self::Exact => "exact",
            Self::Numbers => "numbers",
            Self::Signature => "signature",
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::{
        Dashboard, DedupStrategy, LogsOptions, LogsPanel, Panel, Row, RowOption, SortOrder, Target,
    };

    #[test]
    fn rows_fold_panel_options_in_order()
    {
        let row = Row::new("logs", [
            RowOption::Panel(Panel::logs("first", LogsPanel::default(),),),
            RowOption::Panel(Panel::logs("second", LogsPanel::default(),),),
        ],);

        let titles: Vec<_,> = row.panels.iter().map(|panel| panel.title.as_str(),).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn logs_panel_defaults()
    {
        let panel = Panel::logs("logs", LogsPanel::default(),);
        let logs = panel.logs_panel().expect("expected logs payload",);

        assert_eq!(panel.span, 6.0);
        assert_eq!(logs.options.sort_order, SortOrder::Descending);
        assert_eq!(logs.options.dedup_strategy, DedupStrategy::None);
        assert!(logs.options.enable_log_details);
    }

    #[test]
    fn panel_serializes_with_type_tag_and_without_unset_fields()
    {
        let panel = Panel::logs("logs", LogsPanel {
            targets: vec![Target {
                ref_id:        "A".to_owned(),
                expr:          "{app=\"api\"}".to_owned(),
                legend_format: String::new(),
                hide:          false,
            }],
            options: LogsOptions::default(),
        },);

        let value = serde_json::to_value(&panel,).expect("expected panel to serialize",);
        assert_eq!(value["type"], "logs");
        assert_eq!(value["targets"][0]["refId"], "A");
        assert!(value["targets"][0].get("legendFormat",).is_none());
        assert!(value.get("description",).is_none());
        assert!(value.get("datasource",).is_none());
        assert_eq!(value["options"]["sortOrder"], "Descending");
        assert_eq!(value["options"]["dedupStrategy"], "none");
        assert_eq!(value["options"]["enableLogDetails"], true);
    }

    #[test]
    fn enum_wire_strings_match_serde()
    {
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let encoded = serde_json::to_value(order,).expect("expected order to serialize",);
            assert_eq!(encoded, order.as_str());
        }
        for strategy in
            [DedupStrategy::None, DedupStrategy::Exact, DedupStrategy::Numbers, DedupStrategy::Signature]
        {
            let encoded = serde_json::to_value(strategy,).expect("expected strategy to serialize",);
            assert_eq!(encoded, strategy.as_str());
        }
    }

    #[test]
    fn dashboard_collects_rows()
    {
        let dashboard = Dashboard::new("board", [Row::new("row", Vec::<RowOption,>::new(),)],);
        assert_eq!(dashboard.rows.len(), 1);
        assert!(dashboard.rows[0].panels.is_empty());
    }
}
