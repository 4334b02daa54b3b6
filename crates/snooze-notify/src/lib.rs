//! Notification inheritance resolution and fan-out planning for Snooze.
//!
//! Two pieces, used in sequence once a transition attempt has run:
//!
//! - [`resolve`] turns a schedule's notification lists (which may contain
//!   the inheritance sentinel) plus the global defaults into a flat,
//!   deduplicated set of recipients
//! - [`plan_fanout`] expands one [`TransitionEvent`] into per-recipient
//!   [`OutboundMessage`]s, honoring the critical/non-critical delivery
//!   rules for phones
//!
//! Delivery itself is out of scope; the embedding layer hands planned
//! messages to whatever transports it wires up.
//!
//! # Example
//!
//! ```rust
//! use snooze_notify::{
//!     TransitionEvent, TransitionKind, plan_fanout, resolve,
//! };
//! use snooze_config::{EmailEntry, PhoneNumber};
//!
//! let targets = resolve(
//!     &[EmailEntry::from("inherited".to_string())],
//!     &[],
//!     &["ops@example.com".to_string()],
//!     &[PhoneNumber::parse("!+15551234567")],
//! );
//! assert_eq!(targets.emails, ["ops@example.com"]);
//!
//! let event = TransitionEvent::failed("vm-1", TransitionKind::Start);
//! let messages = plan_fanout(&targets, &event);
//! assert_eq!(messages.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fanout;
pub mod resolve;

pub use fanout::{
    EventClass, OutboundMessage, Recipient, TransitionEvent, TransitionKind, TransitionOutcome,
    plan_fanout,
};
pub use resolve::{ResolvedTargets, resolve};
