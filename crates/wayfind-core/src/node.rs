// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node identity and classification.

use serde::{Deserialize, Serialize};

/// Node identifier. Opaque and case-sensitive.
pub type NodeName = String;

/// Classification of a facility graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A visitable unit (shop, kiosk, café) with a storefront.
    Store,
    /// A named corridor junction.
    Junction,
    /// Synthetic stair/escalator segment. Adds hop cost; never shown to callers.
    Transition,
}

impl NodeKind {
    /// `true` only for transition segments, which are stripped from routes.
    pub fn is_synthetic(self) -> bool {
        matches!(self, Self::Transition)
    }
}
