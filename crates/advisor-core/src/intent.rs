//! Conversation Intents
//!
//! The closed set of things the composer knows how to answer. Suggested
//! actions may only reference members of this set.

use serde::{Deserialize, Serialize};

/// What the user (or a suggested-action click) is asking for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    /// AI analysis of the connected wallet
    Analyze,
    /// Ranked yield opportunities across the protocol catalog
    YieldOpportunities,
    /// Beginner DeFi education
    DefiBasics,
    /// Deterministic network/gas status report
    NetworkStatus,
    /// How to fund an empty wallet
    FundingHelp,
    /// Raw natural-language query, no structured post-processing
    FreeForm,
}

/// Intents eligible to appear as follow-up suggestions, in display order
const SUGGESTABLE: [Intent; 5] = [
    Intent::Analyze,
    Intent::YieldOpportunities,
    Intent::DefiBasics,
    Intent::NetworkStatus,
    Intent::FundingHelp,
];

impl Intent {
    /// Wire/action-key form (kebab-case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Analyze => "analyze",
            Intent::YieldOpportunities => "yield-opportunities",
            Intent::DefiBasics => "defi-basics",
            Intent::NetworkStatus => "network-status",
            Intent::FundingHelp => "funding-help",
            Intent::FreeForm => "free-form",
        }
    }

    /// Parse an action key; unknown keys are not intents
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "analyze" => Some(Intent::Analyze),
            "yield-opportunities" => Some(Intent::YieldOpportunities),
            "defi-basics" => Some(Intent::DefiBasics),
            "network-status" => Some(Intent::NetworkStatus),
            "funding-help" => Some(Intent::FundingHelp),
            "free-form" => Some(Intent::FreeForm),
            _ => None,
        }
    }

    /// Button label shown for this intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Analyze => "Analyze my wallet with AI",
            Intent::YieldOpportunities => "Find yield opportunities",
            Intent::DefiBasics => "Explain DeFi basics",
            Intent::NetworkStatus => "Check network status",
            Intent::FundingHelp => "Get funding guidance",
            Intent::FreeForm => "Ask anything",
        }
    }

    /// The four follow-up suggestions attached to a reply for this intent.
    ///
    /// Drawn from the suggestable set in display order, excluding the intent
    /// just answered. Free-form replies exclude nothing and take the first
    /// four, which yields the four standard actions.
    pub fn follow_ups(&self) -> Vec<Intent> {
        SUGGESTABLE
            .iter()
            .copied()
            .filter(|i| i != self)
            .take(4)
            .collect()
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Intent; 6] = [
        Intent::Analyze,
        Intent::YieldOpportunities,
        Intent::DefiBasics,
        Intent::NetworkStatus,
        Intent::FundingHelp,
        Intent::FreeForm,
    ];

    #[test]
    fn test_parse_round_trip() {
        for intent in ALL {
            assert_eq!(Intent::parse(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::parse("execute-trade"), None);
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Intent::YieldOpportunities).unwrap();
        assert_eq!(json, "\"yield-opportunities\"");

        let parsed: Intent = serde_json::from_str("\"network-status\"").unwrap();
        assert_eq!(parsed, Intent::NetworkStatus);
    }

    #[test]
    fn test_follow_ups_never_include_self() {
        for intent in ALL {
            let ups = intent.follow_ups();
            assert_eq!(ups.len(), 4);
            assert!(!ups.contains(&intent));
        }
    }

    #[test]
    fn test_free_form_follow_ups_are_standard_four() {
        assert_eq!(
            Intent::FreeForm.follow_ups(),
            vec![
                Intent::Analyze,
                Intent::YieldOpportunities,
                Intent::DefiBasics,
                Intent::NetworkStatus,
            ]
        );
    }
}
