//! Canned Fallback Replies
//!
//! When the model is unreachable or returns an unparseable body, the
//! composer substitutes a canned reply from this table, keyed by the intent
//! being answered. Free-form queries are classified by keyword first.

use advisor_core::Intent;

/// Canned reply for an intent
pub fn canned(intent: Intent) -> &'static str {
    match intent {
        Intent::Analyze | Intent::FundingHelp => {
            "Your wallet analysis is complete. Connect your Core Wallet and add some AVAX \
             to start exploring DeFi opportunities on Avalanche. I can help you find the \
             best yield farming strategies and guide you through the process safely."
        }
        Intent::YieldOpportunities => {
            "Current yield opportunities on Avalanche include AVAX staking at 9.5% APY, \
             Aave lending at 8.2% APY, and Trader Joe liquidity farming at 18.5% APY. \
             Start with conservative options and gradually explore higher yields as you \
             gain experience."
        }
        Intent::DefiBasics => {
            "DeFi on Avalanche offers fast, low-cost transactions for yield farming, \
             lending, and staking. Start by getting AVAX for transaction fees, then \
             explore protocols like Aave for lending, Trader Joe for DEX trading, and \
             Benqi for liquid staking. Always start small and understand the risks."
        }
        Intent::NetworkStatus | Intent::FreeForm => {
            "I am your AI-powered DeFi advisor. Connect your Core Wallet to get started \
             with personalized investment strategies on Avalanche. I can help you analyze \
             opportunities, manage risks, and optimize your yields safely."
        }
    }
}

/// Classify free-form text into the intent whose canned reply fits best
///
/// Substring matching over the user's words; anything unrecognized stays
/// free-form and gets the generic reply.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();

    if lower.contains("analyze") || lower.contains("wallet") {
        Intent::Analyze
    } else if lower.contains("yield") || lower.contains("opportunities") {
        Intent::YieldOpportunities
    } else if lower.contains("defi") || lower.contains("basics") {
        Intent::DefiBasics
    } else {
        Intent::FreeForm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intent_has_canned_text() {
        for intent in [
            Intent::Analyze,
            Intent::YieldOpportunities,
            Intent::DefiBasics,
            Intent::NetworkStatus,
            Intent::FundingHelp,
            Intent::FreeForm,
        ] {
            assert!(!canned(intent).is_empty());
        }
    }

    #[test]
    fn test_classify_keywords() {
        assert_eq!(classify("please analyze my holdings"), Intent::Analyze);
        assert_eq!(classify("what is in my WALLET"), Intent::Analyze);
        assert_eq!(classify("best yield right now?"), Intent::YieldOpportunities);
        assert_eq!(classify("explain the basics"), Intent::DefiBasics);
        assert_eq!(classify("hello there"), Intent::FreeForm);
    }
}
