//! `ActivationType` sum type (spec §3).

use serde::{Deserialize, Serialize};

/// Maximum length of a topic label (spec §3: "≤63 chars").
pub const MAX_TOPIC_LEN: usize = 63;

/// How an eligible binding may be activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationType {
    SelfApproval,
    PeerApproval(Option<String>),
    ExternalApproval(Option<String>),
    NoActivation,
}

impl ActivationType {
    /// `self` is the parent of `child` iff a user eligible for `self` may
    /// satisfy a request asking for `child` (spec §3 parent relation).
    ///
    /// `PEER_APPROVAL(t)` is the parent of any `PEER_APPROVAL(t)` with an
    /// *exact* topic match; the topic-less variant is the parent of any
    /// topic within its own family. `EXTERNAL_APPROVAL` follows the same
    /// rule independently. `SELF_APPROVAL` and `NO_ACTIVATION` are only
    /// their own parent.
    pub fn is_parent_of(&self, child: &ActivationType) -> bool {
        match (self, child) {
            (ActivationType::SelfApproval, ActivationType::SelfApproval) => true,
            (ActivationType::NoActivation, ActivationType::NoActivation) => true,
            (ActivationType::PeerApproval(parent_topic), ActivationType::PeerApproval(child_topic)) => {
                topic_parent_matches(parent_topic, child_topic)
            }
            (
                ActivationType::ExternalApproval(parent_topic),
                ActivationType::ExternalApproval(child_topic),
            ) => topic_parent_matches(parent_topic, child_topic),
            _ => false,
        }
    }
}

fn topic_parent_matches(parent_topic: &Option<String>, child_topic: &Option<String>) -> bool {
    match parent_topic {
        None => true,
        Some(parent) => child_topic.as_deref() == Some(parent.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topicless_peer_is_parent_of_any_topic() {
        let parent = ActivationType::PeerApproval(None);
        let child = ActivationType::PeerApproval(Some("prod".to_string()));
        assert!(parent.is_parent_of(&child));
    }

    #[test]
    fn topic_must_match_exactly() {
        let parent = ActivationType::PeerApproval(Some("prod".to_string()));
        let other_topic = ActivationType::PeerApproval(Some("dev".to_string()));
        assert!(!parent.is_parent_of(&other_topic));
        let same_topic = ActivationType::PeerApproval(Some("prod".to_string()));
        assert!(parent.is_parent_of(&same_topic));
    }

    #[test]
    fn families_never_cross() {
        let peer = ActivationType::PeerApproval(None);
        let external = ActivationType::ExternalApproval(None);
        assert!(!peer.is_parent_of(&external));
        assert!(!external.is_parent_of(&peer));
    }

    #[test]
    fn self_approval_is_only_its_own_parent() {
        assert!(ActivationType::SelfApproval.is_parent_of(&ActivationType::SelfApproval));
        assert!(!ActivationType::SelfApproval.is_parent_of(&ActivationType::NoActivation));
    }
}
