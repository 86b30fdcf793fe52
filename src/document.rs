// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! YAML documents describing alerting configurations and logs panels.
//!
//! The types in this module mirror the structure of the YAML files consumed
//! by the CLI. They carry no behavior of their own: each document is converted
//! into the option values understood by [`Manager`] or decoded through
//! [`DashboardLogs`], so every invariant is enforced by the same code paths
//! used by programmatic callers.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::{
    alertmanager::{
        Channel, ContactPoint, Manager, ManagerOption, RoutingPolicy, contact_point,
        contact_points, default_contact_point, policy, routing,
    },
    dashboard::{Dashboard, Row},
    error::{self, Error},
    logs::DashboardLogs,
    matcher::{MatchOperator, Matcher},
};

/// Alerting configuration document.
///
/// # Examples
///
/// ```
/// use grafana_compose::parse_alerting;
///
/// let yaml = r#"
/// contact_points:
///   - name: team-a
///     email:
///       to: [oncall@example.com]
/// routing:
///   - to: team-a
///     if_labels:
///       - { label: owner, value: team-a }
/// "#;
/// let manager = parse_alerting(yaml,).expect("valid alerting document",);
/// assert_eq!(manager.default_receiver(), Some("team-a"));
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default,)]
#[serde(deny_unknown_fields)]
pub struct AlertingDocument
{
    #[serde(default)]
    pub contact_points:        Vec<ContactPointEntry,>,
    /// Overrides the implicit first-declared default.
    #[serde(default, alias = "default-contact-point", alias = "defaultContactPoint")]
    pub default_contact_point: Option<String,>,
    #[serde(default)]
    pub routing:               Vec<PolicyEntry,>,
}

/// Contact point entry with its optional channels.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct ContactPointEntry
{
    pub name:     String,
    #[serde(default)]
    pub email:    Option<EmailEntry,>,
    #[serde(default)]
    pub slack:    Option<SlackEntry,>,
    #[serde(default)]
    pub opsgenie: Option<OpsgenieEntry,>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct EmailEntry
{
    pub to:           Vec<String,>,
    #[serde(default)]
    pub single_email: bool,
    #[serde(default)]
    pub message:      Option<String,>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct SlackEntry
{
    pub webhook: String,
    #[serde(default)]
    pub title:   Option<String,>,
    #[serde(default)]
    pub text:    Option<String,>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct OpsgenieEntry
{
    pub api_url:    String,
    pub api_key:    String,
    #[serde(default = "default_auto_close")]
    pub auto_close: bool,
}

fn default_auto_close() -> bool
{
    true
}

/// Routing policy entry.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct PolicyEntry
{
    /// Receiving contact point.
    pub to:        String,
    pub if_labels: Vec<MatcherEntry,>,
}

/// Label predicate of a routing policy entry.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct MatcherEntry
{
    pub label: String,
    #[serde(default)]
    pub op:    MatchOperator,
    pub value: String,
}

impl ContactPointEntry
{
    fn to_contact_point(&self,) -> ContactPoint
    {
        let mut contact = contact_point(self.name.clone(),);
        if let Some(email,) = &self.email {
            contact = contact.with(Channel::Email {
                addresses:    email.to.clone(),
                single_email: email.single_email,
                message:      email.message.clone(),
            },);
        }
        if let Some(slack,) = &self.slack {
            contact = contact.with(Channel::Slack {
                webhook_url: slack.webhook.clone(),
                title:       slack.title.clone(),
                text:        slack.text.clone(),
            },);
        }
        if let Some(opsgenie,) = &self.opsgenie {
            contact = contact.with(Channel::Opsgenie {
                api_url:    opsgenie.api_url.clone(),
                api_key:    opsgenie.api_key.clone(),
                auto_close: opsgenie.auto_close,
            },);
        }
        contact
    }
}

impl PolicyEntry
{
    fn to_policy(&self,) -> Result<RoutingPolicy, Error,>
    {
        let mut matchers = self
            .if_labels
            .iter()
            .map(|entry| Matcher::new(entry.label.clone(), entry.op, entry.value.clone(),),);
        let first = matchers.next().ok_or_else(|| {
            Error::invalid_matcher(format!("policy routing to '{}' has no label matchers", self.to),)
        },)?;

        Ok(matchers.fold(policy(self.to.clone(), first,), RoutingPolicy::and,),)
    }
}

impl AlertingDocument
{
    /// Converts the document into manager options, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMatcher`] when a policy declares no matcher.
    pub fn to_options(&self,) -> Result<Vec<ManagerOption,>, Error,>
    {
        let mut options = vec![contact_points(
            self.contact_points.iter().map(ContactPointEntry::to_contact_point,),
        )];
        if let Some(name,) = &self.default_contact_point {
            options.push(default_contact_point(name.clone(),),);
        }
        options.push(routing(
            self.routing.iter().map(PolicyEntry::to_policy,).collect::<Result<Vec<_,>, _,>>()?,
        ),);
        Ok(options,)
    }

    /// Builds and validates the alertmanager configuration.
    ///
    /// # Errors
    ///
    /// Propagates conversion errors from [`AlertingDocument::to_options`] and
    /// validation errors from [`Manager::new`].
    pub fn into_manager(self,) -> Result<Manager, Error,>
    {
        Manager::new(self.to_options()?,)
    }
}

/// Logs panel document placed in a single-row dashboard.
#[derive(Debug, Deserialize, Clone, PartialEq, Default,)]
#[serde(deny_unknown_fields)]
pub struct LogsPanelDocument
{
    /// Dashboard title; falls back to the panel title.
    #[serde(default)]
    pub dashboard: Option<String,>,
    #[serde(default)]
    pub row:       Option<String,>,
    pub panel:     DashboardLogs,
}

impl LogsPanelDocument
{
    /// Decodes the panel and folds it into a one-row dashboard.
    ///
    /// # Errors
    ///
    /// Propagates decoding errors from [`DashboardLogs::to_option`].
    pub fn into_dashboard(self,) -> Result<Dashboard, Error,>
    {
        let option = self.panel.to_option()?;
        let title = self.dashboard.unwrap_or_else(|| self.panel.title.clone(),);
        Ok(Dashboard::new(title, [Row::new(self.row.unwrap_or_default(), [option],)],),)
    }
}

/// Loads and builds an alerting configuration from a YAML file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, plus every error
/// reported by [`parse_alerting`].
pub fn load_alerting(path: &Path,) -> Result<Manager, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_alerting(&contents,)
}

/// Parses and builds an alerting configuration from a YAML string.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the YAML cannot be decoded and the builder's
/// validation errors otherwise.
pub fn parse_alerting(contents: &str,) -> Result<Manager, Error,>
{
    let document: AlertingDocument = serde_yaml::from_str(contents,)?;
    debug!(
        "Parsed alerting document with {} contact points and {} policies",
        document.contact_points.len(),
        document.routing.len()
    );
    document.into_manager()
}

/// Loads and decodes a logs panel document from a YAML file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, plus every error
/// reported by [`parse_logs_panel`].
pub fn load_logs_panel(path: &Path,) -> Result<Dashboard, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_logs_panel(&contents,)
}

/// Parses and decodes a logs panel document from a YAML string.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the YAML cannot be decoded and the decoder's
/// errors otherwise.
pub fn parse_logs_panel(contents: &str,) -> Result<Dashboard, Error,>
{
    let document: LogsPanelDocument = serde_yaml::from_str(contents,)?;
    document.into_dashboard()
}
