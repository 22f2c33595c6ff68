//! Live Region Support
//!
//! Persistent, visually hidden announcement regions, one per politeness
//! level. The registry only guarantees identity and attachment; writing
//! message text into a region is up to the caller.

use std::collections::HashMap;

use fos_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

use crate::config::FocusConfig;

/// Keeps the region in the accessibility tree while taking no space
pub const VISUALLY_HIDDEN_STYLE: &str = "position:absolute;left:-10000px;top:auto;\
width:0;height:0;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;border:0;padding:0;margin:0";

/// Announcement urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveRegionKind {
    /// Announced when the user is idle
    Polite,
    /// Interrupts the current announcement
    Assertive,
}

impl LiveRegionKind {
    pub const ALL: [LiveRegionKind; 2] = [Self::Polite, Self::Assertive];

    /// `aria-live` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }

    /// Role carrying the same implicit politeness
    pub fn role(&self) -> &'static str {
        match self {
            Self::Polite => "status",
            Self::Assertive => "alert",
        }
    }
}

/// Registry of live regions, created lazily and never removed
///
/// Owned by whoever sets up the page's dialog/toast layer; one registry
/// per document.
#[derive(Debug)]
pub struct LiveRegions {
    prefix: String,
    atomic: bool,
    regions: HashMap<LiveRegionKind, NodeId>,
}

impl LiveRegions {
    pub fn new(config: &FocusConfig) -> Self {
        Self {
            prefix: config.live_region_prefix.clone(),
            atomic: config.live_region_atomic,
            regions: HashMap::new(),
        }
    }

    /// Deterministic element id for a kind
    pub fn region_id(&self, kind: LiveRegionKind) -> String {
        format!("{}-{}", self.prefix, kind.as_str())
    }

    /// Region for `kind`, if one is attached to the document
    pub fn get(&self, doc: &Document, kind: LiveRegionKind) -> Option<NodeId> {
        let id = self.region_id(kind);
        self.regions
            .get(&kind)
            .copied()
            .filter(|&node| doc.tree().is_connected(node) && doc.tree().get_attribute(node, "id") == Some(id.as_str()))
            .or_else(|| doc.get_element_by_id(&id))
    }

    /// Region for `kind`, creating and attaching it on first use
    ///
    /// An element already carrying the region id is adopted rather than
    /// duplicated.
    pub fn get_or_create(&mut self, doc: &mut Document, kind: LiveRegionKind) -> NodeId {
        if let Some(node) = self.get(doc, kind) {
            self.regions.insert(kind, node);
            return node;
        }

        let node = self.create(doc, kind);
        self.regions.insert(kind, node);
        node
    }

    fn create(&self, doc: &mut Document, kind: LiveRegionKind) -> NodeId {
        let id = self.region_id(kind);
        let tree = doc.tree_mut();
        let node = tree.create_element("div");

        let attrs = [
            ("id", id.as_str()),
            ("aria-live", kind.as_str()),
            ("role", kind.role()),
            ("aria-atomic", if self.atomic { "true" } else { "false" }),
            ("style", VISUALLY_HIDDEN_STYLE),
        ];
        for (name, value) in attrs {
            // Fresh element: attribute writes cannot fail.
            tree.set_attribute(node, name, value).ok();
        }

        let parent = [doc.body(), doc.document_element()]
            .into_iter()
            .find(|&p| p.is_valid() && doc.tree().is_connected(p))
            .unwrap_or(NodeId::ROOT);
        if let Err(err) = doc.append_child(parent, node) {
            tracing::warn!("Could not attach live region {}: {}", id, err);
        }

        tracing::debug!("Created {} live region #{}", kind.as_str(), id);
        node
    }
}

impl Default for LiveRegions {
    fn default() -> Self {
        Self::new(&FocusConfig::default())
    }
}
