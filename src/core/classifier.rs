//! Attributes each countable message to the account owner or the partner.
//!
//! Two export variants exist. Newer exports carry an `out` flag per message,
//! which is authoritative. Older personal chat exports lack it, so the
//! partner is recognised by `from_id == "user<chat id>"`.

use crate::domain::model::{ChatExport, Message};

const PARTNER_ID_PREFIX: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    OutboundFlag,
    /// Partner's sender id; `None` when the personal chat has no id.
    PartnerId(Option<String>),
    Unavailable,
}

impl Strategy {
    /// Picks the strategy once for the whole export.
    pub fn for_export(export: &ChatExport) -> Self {
        let has_outbound_flag = export.countable_messages().any(|m| m.outbound.is_some());

        if has_outbound_flag {
            Strategy::OutboundFlag
        } else if export.is_personal_chat() {
            Strategy::PartnerId(partner_id(export))
        } else {
            Strategy::Unavailable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Mine,
    Theirs,
}

/// Messages split by sender. A message lands on at most one side.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSet<'a> {
    pub strategy: Strategy,
    pub mine: Vec<&'a Message>,
    pub theirs: Vec<&'a Message>,
}

impl ClassifiedSet<'_> {
    pub fn is_empty(&self) -> bool {
        self.mine.is_empty() && self.theirs.is_empty()
    }
}

pub fn partner_id(export: &ChatExport) -> Option<String> {
    if !export.is_personal_chat() {
        return None;
    }
    export
        .chat_id
        .map(|id| format!("{}{}", PARTNER_ID_PREFIX, id))
}

/// Resolves the side of one message, or `None` when it cannot be attributed.
pub fn side_of(message: &Message, strategy: &Strategy) -> Option<Side> {
    match strategy {
        // Messages without the flag in a flagged export are dropped
        Strategy::OutboundFlag => message
            .outbound
            .map(|out| if out { Side::Mine } else { Side::Theirs }),
        Strategy::PartnerId(partner) => {
            let from_partner = match (message.from_id.as_deref(), partner.as_deref()) {
                (Some(from), Some(partner)) => from.to_lowercase() == partner.to_lowercase(),
                _ => false,
            };
            Some(if from_partner { Side::Theirs } else { Side::Mine })
        }
        Strategy::Unavailable => None,
    }
}

pub fn classify(export: &ChatExport) -> ClassifiedSet<'_> {
    let strategy = Strategy::for_export(export);
    let mut mine = Vec::new();
    let mut theirs = Vec::new();

    for message in export.countable_messages() {
        match side_of(message, &strategy) {
            Some(Side::Mine) => mine.push(message),
            Some(Side::Theirs) => theirs.push(message),
            None => {}
        }
    }

    tracing::debug!(
        "Classified with {:?}: {} mine, {} theirs",
        strategy,
        mine.len(),
        theirs.len()
    );

    ClassifiedSet {
        strategy,
        mine,
        theirs,
    }
}
