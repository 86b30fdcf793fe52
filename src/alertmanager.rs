// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Routing tree builder for Grafana's alertmanager configuration.
//!
//! A [`Manager`] is assembled from an ordered list of [`ManagerOption`]
//! values. Options are applied left to right over a private builder state:
//! receivers and routes only ever accumulate, while scalar settings such as
//! the default contact point are overwritten by later options. Once every
//! option has been applied the state is validated and frozen into the wire
//! payload, so marshaling never fails on a constructed manager and never
//! mutates it.
//!
//! # Examples
//!
//! ```
//! use grafana_compose::{Manager, contact_point, contact_points, policy, routing, tag_eq};
//!
//! let manager = Manager::new([
//!     contact_points([contact_point("team-b",), contact_point("team-a",),],),
//!     routing([policy("team-a", tag_eq("owner", "team-a",),),],),
//! ],)
//! .expect("valid alerting configuration",);
//!
//! assert_eq!(manager.default_receiver(), Some("team-b"));
//! assert_eq!(manager.routes().len(), 1);
//! ```

use std::collections::{BTreeMap, HashSet};

use serde_json::{Value, json};
use tracing::debug;

use crate::{
    alerting::{AlertManager, NotificationPolicy, Receiver, ReceiverIntegration},
    error::Error,
    matcher::Matcher,
};

/// Notification integration attached to a contact point.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum Channel
{
    /// Sends notifications to one or more email addresses.
    Email
    {
        addresses:    Vec<String,>,
        single_email: bool,
        message:      Option<String,>,
    },
    /// Posts notifications to a Slack incoming webhook.
    Slack
    {
        webhook_url: String, title: Option<String,>, text: Option<String,>,
    },
    /// Creates Opsgenie alerts through the Opsgenie API.
    Opsgenie
    {
        api_url: String, api_key: String, auto_close: bool,
    },
}

impl Channel
{
    fn kind(&self,) -> &'static str
    {
        match self {
            Self::Email {
                ..
            } => "email",
            Self::Slack {
                ..
            } => "slack",
            Self::Opsgenie {
                ..
            } => "opsgenie",
        }
    }

    fn settings(&self,) -> BTreeMap<String, Value,>
    {
        let mut settings = BTreeMap::new();
        match self {
            Self::Email {
                addresses,
                single_email,
                message,
            } => {
                settings.insert("addresses".to_owned(), json!(addresses.join(";")),);
                settings.insert("singleEmail".to_owned(), json!(single_email),);
                if let Some(message,) = message {
                    settings.insert("message".to_owned(), json!(message),);
                }
            }
            Self::Slack {
                webhook_url,
                title,
                text,
            } => {
                settings.insert("url".to_owned(), json!(webhook_url),);
                if let Some(title,) = title {
                    settings.insert("title".to_owned(), json!(title),);
                }
                if let Some(text,) = text {
                    settings.insert("text".to_owned(), json!(text),);
                }
            }
            Self::Opsgenie {
                api_url,
                api_key,
                auto_close,
            } => {
                settings.insert("apiUrl".to_owned(), json!(api_url),);
                settings.insert("apiKey".to_owned(), json!(api_key),);
                settings.insert("autoClose".to_owned(), json!(auto_close),);
            }
        }
        settings
    }

    fn to_integration(&self, contact_point: &str,) -> ReceiverIntegration
    {
        ReceiverIntegration {
            name:                    contact_point.to_owned(),
            kind:                    self.kind().to_owned(),
            disable_resolve_message: false,
            settings:                self.settings(),
        }
    }
}

/// Email channel delivering one message per address.
pub fn email<I, S,>(addresses: I,) -> Channel
where
    I: IntoIterator<Item = S,>,
    S: Into<String,>,
{
    Channel::Email {
        addresses:    addresses.into_iter().map(Into::into,).collect(),
        single_email: false,
        message:      None,
    }
}

/// Slack channel posting to the given incoming webhook.
pub fn slack(webhook_url: impl Into<String,>,) -> Channel
{
    Channel::Slack {
        webhook_url: webhook_url.into(), title: None, text: None,
    }
}

/// Opsgenie channel; alerts are closed automatically once resolved.
pub fn opsgenie(api_url: impl Into<String,>, api_key: impl Into<String,>,) -> Channel
{
    Channel::Opsgenie {
        api_url: api_url.into(), api_key: api_key.into(), auto_close: true,
    }
}

/// A named alert destination.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ContactPoint
{
    name:     String,
    channels: Vec<Channel,>,
}

impl ContactPoint
{
    pub fn name(&self,) -> &str
    {
        &self.name
    }

    pub fn channels(&self,) -> &[Channel]
    {
        &self.channels
    }

    /// Attaches a notification channel to the contact point.
    #[must_use]
    pub fn with(mut self, channel: Channel,) -> Self
    {
        self.channels.push(channel,);
        self
    }

    fn to_receiver(&self,) -> Receiver
    {
        Receiver {
            name:                             self.name.clone(),
            grafana_managed_receiver_configs: self
                .channels
                .iter()
                .map(|channel| channel.to_integration(&self.name,),)
                .collect(),
        }
    }
}

/// Declares a contact point with no channels attached yet.
pub fn contact_point(name: impl Into<String,>,) -> ContactPoint
{
    ContactPoint {
        name: name.into(), channels: Vec::new(),
    }
}

/// Routes alerts satisfying every matcher to a receiver.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RoutingPolicy
{
    receiver: String,
    matchers: Vec<Matcher,>,
}

impl RoutingPolicy
{
    pub fn receiver(&self,) -> &str
    {
        &self.receiver
    }

    pub fn matchers(&self,) -> &[Matcher]
    {
        &self.matchers
    }

    /// Requires an additional matcher for the policy to apply.
    #[must_use]
    pub fn and(mut self, matcher: Matcher,) -> Self
    {
        self.matchers.push(matcher,);
        self
    }

    fn to_notification_policy(&self,) -> NotificationPolicy
    {
        NotificationPolicy {
            receiver:        self.receiver.clone(),
            object_matchers: self.matchers.iter().map(Matcher::to_object_matcher,).collect(),
            routes:          Vec::new(),
        }
    }
}

/// Creates a policy sending alerts matched by `matcher` to `receiver`.
pub fn policy(receiver: impl Into<String,>, matcher: Matcher,) -> RoutingPolicy
{
    RoutingPolicy {
        receiver: receiver.into(), matchers: vec![matcher],
    }
}

/// Configuration step applied while building a [`Manager`].
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum ManagerOption
{
    /// Appends contact points, preserving their order.
    ContactPoints(Vec<ContactPoint,>,),
    /// Sets the receiver of the root route.
    DefaultContactPoint(String,),
    /// Appends policies under the root route, preserving their order.
    Routing(Vec<RoutingPolicy,>,),
}

impl ManagerOption
{
    fn apply(self, state: &mut ManagerState,)
    {
        match self {
            Self::ContactPoints(contact_points,) => state.contact_points.extend(contact_points,),
            Self::DefaultContactPoint(name,) => state.default_contact_point = Some(name,),
            Self::Routing(policies,) => state.policies.extend(policies,),
        }
    }
}

/// Declares contact points; the first declared one is the implicit default.
pub fn contact_points<I,>(contact_points: I,) -> ManagerOption
where
    I: IntoIterator<Item = ContactPoint,>,
{
    ManagerOption::ContactPoints(contact_points.into_iter().collect(),)
}

/// Explicitly selects the default contact point.
pub fn default_contact_point(name: impl Into<String,>,) -> ManagerOption
{
    ManagerOption::DefaultContactPoint(name.into(),)
}

/// Declares routing policies evaluated under the root route.
pub fn routing<I,>(policies: I,) -> ManagerOption
where
    I: IntoIterator<Item = RoutingPolicy,>,
{
    ManagerOption::Routing(policies.into_iter().collect(),)
}

#[derive(Debug, Default,)]
struct ManagerState
{
    contact_points:        Vec<ContactPoint,>,
    default_contact_point: Option<String,>,
    policies:              Vec<RoutingPolicy,>,
}

/// Validated, immutable alertmanager configuration.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Manager
{
    contact_points: Vec<ContactPoint,>,
    policies:       Vec<RoutingPolicy,>,
    payload:        AlertManager,
}

impl Manager
{
    /// Applies `options` in order and validates the resulting configuration.
    ///
    /// # Errors
    ///
    /// * [`Error::Validation`] when a contact point name is blank.
    /// * [`Error::DuplicateContactPoint`] when two contact points share a
    ///   name.
    /// * [`Error::InvalidMatcher`] when a policy matcher is malformed.
    /// * [`Error::UnknownContactPoint`] when the default contact point or a
    ///   policy receiver was never declared.
    pub fn new<I,>(options: I,) -> Result<Self, Error,>
    where
        I: IntoIterator<Item = ManagerOption,>,
    {
        let mut state = ManagerState::default();
        for option in options {
            option.apply(&mut state,);
        }

        let declared = validate_contact_points(&state.contact_points,)?;
        for matcher in state.policies.iter().flat_map(|policy| policy.matchers.iter(),) {
            matcher.validate()?;
        }

        let default_receiver = match state.default_contact_point {
            Some(name,) => {
                ensure_declared(&declared, &name,)?;
                Some(name,)
            }
            None => state.contact_points.first().map(|first| first.name.clone(),),
        };

        for policy in &state.policies {
            ensure_declared(&declared, &policy.receiver,)?;
        }

        debug!(
            "Built alertmanager configuration with {} contact points and {} routes (default: {:?})",
            state.contact_points.len(),
            state.policies.len(),
            default_receiver
        );

        let mut payload = AlertManager::default();
        payload.alertmanager_config.receivers =
            state.contact_points.iter().map(ContactPoint::to_receiver,).collect();
        payload.alertmanager_config.route = NotificationPolicy {
            receiver:        default_receiver.unwrap_or_default(),
            object_matchers: Vec::new(),
            routes:          state
                .policies
                .iter()
                .map(RoutingPolicy::to_notification_policy,)
                .collect(),
        };

        Ok(Self {
            contact_points: state.contact_points,
            policies: state.policies,
            payload,
        },)
    }

    /// Receiver of the root route, `None` when no contact point was declared.
    pub fn default_receiver(&self,) -> Option<&str,>
    {
        let receiver = self.payload.alertmanager_config.route.receiver.as_str();
        if receiver.is_empty() { None } else { Some(receiver,) }
    }

    pub fn contact_points(&self,) -> &[ContactPoint]
    {
        &self.contact_points
    }

    pub fn policies(&self,) -> &[RoutingPolicy]
    {
        &self.policies
    }

    /// Receivers as they appear in the wire payload.
    pub fn receivers(&self,) -> &[Receiver]
    {
        &self.payload.alertmanager_config.receivers
    }

    /// Children of the root route as they appear in the wire payload.
    pub fn routes(&self,) -> &[NotificationPolicy]
    {
        &self.payload.alertmanager_config.route.routes
    }

    /// Wire payload sent to Grafana.
    pub fn payload(&self,) -> &AlertManager
    {
        &self.payload
    }

    /// Encodes the configuration as compact JSON.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Serialize`] from the JSON encoder.
    pub fn marshal_json(&self,) -> Result<Vec<u8,>, Error,>
    {
        Ok(serde_json::to_vec(&self.payload,)?,)
    }

    /// Encodes the configuration as JSON indented with two spaces.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Serialize`] from the JSON encoder.
    pub fn marshal_indent_json(&self,) -> Result<Vec<u8,>, Error,>
    {
        Ok(serde_json::to_vec_pretty(&self.payload,)?,)
    }
}

fn validate_contact_points(contact_points: &[ContactPoint],) -> Result<HashSet<&str,>, Error,>
{
    let mut declared = HashSet::with_capacity(contact_points.len(),);
    for contact_point in contact_points {
        if contact_point.name.trim().is_empty() {
            return Err(Error::validation("contact point name cannot be empty",),);
        }
        if !declared.insert(contact_point.name.as_str(),) {
            return Err(Error::DuplicateContactPoint {
                name: contact_point.name.clone(),
            },);
        }
    }
    Ok(declared,)
}

fn ensure_declared(declared: &HashSet<&str,>, name: &str,) -> Result<(), Error,>
{
    if declared.contains(name,) {
        Ok((),)
    } else {
        Err(Error::UnknownContactPoint {
            name: name.to_owned(),
        },)
    }
}
