//! Per-domain credibility ceilings.
//!
//! Corporate evidence is the subject's own statements about itself and is
//! capped at Medium unconditionally. Configured rules can tighten any domain
//! but cannot loosen that cap.

use std::collections::BTreeMap;

use thesis_types::{EvidenceDomain, EvidenceItem, EvidenceQuality};

use crate::config::CeilingRule;

/// Ceiling that always applies to Corporate evidence.
pub const CORPORATE_CEILING: EvidenceQuality = EvidenceQuality::Medium;

/// Resolved ceilings keyed by domain. Domains without an entry are uncapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredibilityPolicy {
    ceilings: BTreeMap<EvidenceDomain, EvidenceQuality>,
}

impl Default for CredibilityPolicy {
    fn default() -> Self {
        Self::from_rules(&[])
    }
}

impl CredibilityPolicy {
    /// Build a policy from configured rules. Where a domain has more than
    /// one rule the tightest wins.
    pub fn from_rules(rules: &[CeilingRule]) -> Self {
        let mut ceilings = BTreeMap::new();
        ceilings.insert(EvidenceDomain::Corporate, CORPORATE_CEILING);
        for rule in rules {
            ceilings
                .entry(rule.domain)
                .and_modify(|q: &mut EvidenceQuality| *q = (*q).min(rule.max_quality))
                .or_insert(rule.max_quality);
        }
        Self { ceilings }
    }

    /// Ceiling for a domain, if one applies.
    pub fn ceiling(&self, domain: EvidenceDomain) -> Option<EvidenceQuality> {
        self.ceilings.get(&domain).copied()
    }

    /// Whether an item's quality is within its domain ceiling.
    pub fn permits(&self, item: &EvidenceItem) -> bool {
        self.ceiling(item.domain)
            .map_or(true, |ceiling| item.quality <= ceiling)
    }
}
