//! Fan-out planning for transition notifications.
//!
//! Once a start/stop attempt completes, its outcome is classified and fanned
//! out to the resolved recipients:
//!
//! - a failed attempt is **critical** and goes to every recipient
//! - a successful attempt is **non-critical** and goes to all emails but
//!   only to phones that opted in via the `!` prefix
//!
//! Planning yields one [`OutboundMessage`] per recipient, each with its own
//! id so deliveries can be tracked and retried independently. This crate
//! plans; actual delivery transports live with the embedding layer.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use snooze_config::PhoneNumber;

use crate::resolve::ResolvedTargets;

/// Which transition was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// The resource was to be started.
    Start,
    /// The resource was to be stopped.
    Stop,
}

impl TransitionKind {
    /// Returns the kind as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the transition attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionOutcome {
    /// The resource reached the desired state.
    Succeeded,
    /// The attempt failed; the resource may be in the wrong state.
    Failed,
}

/// Urgency class of an event, derived from its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventClass {
    /// Failures; delivered to every recipient.
    Critical,
    /// Successes; delivered to emails and opted-in phones only.
    NonCritical,
}

/// A completed transition attempt on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Identifier of the affected resource.
    pub resource: String,
    /// The transition that was attempted.
    pub kind: TransitionKind,
    /// How the attempt ended.
    pub outcome: TransitionOutcome,
}

impl TransitionEvent {
    /// Creates a successful transition event.
    #[must_use]
    pub fn succeeded(resource: impl Into<String>, kind: TransitionKind) -> Self {
        Self {
            resource: resource.into(),
            kind,
            outcome: TransitionOutcome::Succeeded,
        }
    }

    /// Creates a failed transition event.
    #[must_use]
    pub fn failed(resource: impl Into<String>, kind: TransitionKind) -> Self {
        Self {
            resource: resource.into(),
            kind,
            outcome: TransitionOutcome::Failed,
        }
    }

    /// Classifies the event: failures are critical, successes are not.
    #[must_use]
    pub const fn class(&self) -> EventClass {
        match self.outcome {
            TransitionOutcome::Failed => EventClass::Critical,
            TransitionOutcome::Succeeded => EventClass::NonCritical,
        }
    }

    /// Renders a one-line human-readable summary for message bodies.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.outcome {
            TransitionOutcome::Succeeded => {
                format!("resource '{}' {} succeeded", self.resource, self.kind)
            }
            TransitionOutcome::Failed => {
                format!("resource '{}' {} FAILED", self.resource, self.kind)
            }
        }
    }
}

/// A single delivery target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recipient {
    /// Deliver by email.
    Email(String),
    /// Deliver by SMS to the bare number.
    Phone(String),
}

/// One planned notification delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Unique id for tracking this delivery.
    pub id: Uuid,
    /// Who receives it.
    pub recipient: Recipient,
    /// Urgency class the recipient was selected under.
    pub class: EventClass,
    /// The event being reported.
    pub event: TransitionEvent,
}

/// Plans the messages for one event against one set of resolved targets.
///
/// Every email recipient receives every event. Phone recipients always
/// receive critical events; non-critical events reach only phones with the
/// opt-in flag set. Exactly one message per selected recipient.
#[must_use]
pub fn plan_fanout(targets: &ResolvedTargets, event: &TransitionEvent) -> Vec<OutboundMessage> {
    let class = event.class();

    let phone_selected = |phone: &&PhoneNumber| match class {
        EventClass::Critical => true,
        EventClass::NonCritical => phone.receives_non_critical,
    };

    let messages: Vec<OutboundMessage> = targets
        .emails
        .iter()
        .map(|addr| Recipient::Email(addr.clone()))
        .chain(
            targets
                .phones
                .iter()
                .filter(phone_selected)
                .map(|phone| Recipient::Phone(phone.number.clone())),
        )
        .map(|recipient| OutboundMessage {
            id: Uuid::new_v4(),
            recipient,
            class,
            event: event.clone(),
        })
        .collect();

    debug!(
        resource = %event.resource,
        class = ?class,
        count = messages.len(),
        "planned notification fan-out"
    );
    messages
}
