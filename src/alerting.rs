// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Wire-format structs for Grafana's alertmanager configuration.
//!
//! Field names and nesting follow the provisioning API payload accepted by
//! Grafana, so the serialized output of these types is what gets sent to the
//! backend. Nothing in this module validates: the [`crate::alertmanager`]
//! builder is responsible for only producing well-formed values.

use std::collections::BTreeMap;

use serde::Serialize;

/// Root payload: the alertmanager configuration plus its template files.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default,)]
pub struct AlertManager
{
    /// Notification templates keyed by file name.
    pub template_files:      BTreeMap<String, String,>,
    /// Receivers and routing tree.
    pub alertmanager_config: AlertManagerConfig,
}

/// Receivers and the root notification policy.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default,)]
pub struct AlertManagerConfig
{
    /// Declared contact points in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<Receiver,>,
    /// Root route; its receiver is the default contact point.
    pub route:     NotificationPolicy,
}

/// A named contact point.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct Receiver
{
    /// Unique contact point name.
    pub name:                             String,
    /// Integrations notified when an alert reaches this contact point.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grafana_managed_receiver_configs: Vec<ReceiverIntegration,>,
}

/// One integration (email, Slack, ...) attached to a contact point.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct ReceiverIntegration
{
    /// Integration display name, usually the contact point name.
    pub name:                    String,
    /// Integration type understood by Grafana (`email`, `slack`, ...).
    #[serde(rename = "type")]
    pub kind:                    String,
    #[serde(rename = "disableResolveMessage")]
    pub disable_resolve_message: bool,
    /// Integration specific settings.
    pub settings:                BTreeMap<String, serde_json::Value,>,
}

/// Node of the routing tree.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default,)]
pub struct NotificationPolicy
{
    #[serde(skip_serializing_if = "String::is_empty")]
    pub receiver:        String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub object_matchers: Vec<ObjectMatcher,>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes:          Vec<NotificationPolicy,>,
}

/// Label matcher encoded as a `[label, operator, value]` triple.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct ObjectMatcher(pub String, pub String, pub String,);
