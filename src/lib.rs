//! Compile declarative monitoring descriptions into Grafana configuration.
//!
//! Two independent pipelines are exposed. The routing tree builder
//! ([`Manager`]) assembles contact points and routing policies into an
//! alertmanager payload, resolving the default receiver from declaration
//! order. The logs panel decoder ([`DashboardLogs`]) validates a panel
//! description and produces a native panel ready to be folded into a
//! dashboard row. Both reject malformed input with a typed [`Error`] before
//! anything is serialized.

mod alerting;
mod alertmanager;
mod dashboard;
mod document;
mod error;
mod logs;
mod matcher;

pub use alerting::{
    AlertManager, AlertManagerConfig, NotificationPolicy, ObjectMatcher, Receiver,
    ReceiverIntegration,
};
pub use alertmanager::{
    Channel, ContactPoint, Manager, ManagerOption, RoutingPolicy, contact_point, contact_points,
    default_contact_point, email, opsgenie, policy, routing, slack,
};
pub use dashboard::{
    DEFAULT_PANEL_SPAN, Dashboard, DedupStrategy, LogsOptions, LogsPanel, Panel, PanelKind, Row,
    RowOption, SortOrder, Target,
};
pub use document::{
    AlertingDocument, ContactPointEntry, EmailEntry, LogsPanelDocument, MatcherEntry,
    OpsgenieEntry, PolicyEntry, SlackEntry, load_alerting, load_logs_panel, parse_alerting,
    parse_logs_panel,
};
pub use error::{Error, io_error};
pub use logs::{
    DashboardLogs, LogsSource, LogsTarget, LogsVisualization, LokiTarget, decode_dedup_strategy,
    decode_sort_order,
};
pub use matcher::{MatchOperator, Matcher, tag_eq, tag_matches, tag_neq, tag_not_matches};
