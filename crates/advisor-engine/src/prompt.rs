//! Prompt Assembly
//!
//! Builders for the per-intent prompts sent to the language model. Every
//! prompt asks for plain text since replies are rendered without markup.

use advisor_core::ConversationContext;
use advisor_data::{NetworkStatus, ProtocolRecord, Quote, StakingSnapshot};
use rust_decimal::Decimal;

const PLAIN_TEXT_RULE: &str =
    "Do not use markdown formatting - respond in plain text only.";

fn protocol_rates(protocols: &[ProtocolRecord]) -> String {
    protocols
        .iter()
        .map(|p| format!("{} ({}% APY)", p.name, p.apy))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wallet-analysis prompt: identity, balance, valuation, network, protocols
pub fn analysis(
    ctx: &ConversationContext,
    quote: &Quote,
    protocols: &[ProtocolRecord],
    network: &NetworkStatus,
) -> String {
    format!(
        "Analyze this wallet:\n\n\
         Wallet Address: {address}\n\
         AVAX Balance: {balance}\n\
         USD Value: ${usd}\n\
         Real-time AVAX Price: ${price}\n\
         Network: {network_label} (congestion: {congestion})\n\n\
         Available DeFi Protocols: {rates}\n\n\
         Provide comprehensive analysis with specific recommendations for this wallet.\n\
         Focus on practical next steps and real opportunities.\n\
         {rule}",
        address = ctx.address.as_deref().unwrap_or("not connected"),
        balance = ctx.balance,
        usd = ctx.usd_value(quote.price).round_dp(2),
        price = quote.price,
        network_label = ctx.network_label(),
        congestion = network.congestion,
        rates = protocol_rates(protocols),
        rule = PLAIN_TEXT_RULE,
    )
}

/// Yield-strategy prompt: balance, valuation, all protocol rates, staking
pub fn yield_strategy(
    ctx: &ConversationContext,
    usd_value: Decimal,
    protocols: &[ProtocolRecord],
    staking: &StakingSnapshot,
) -> String {
    format!(
        "Find yield opportunities for this wallet:\n\n\
         Available Balance: {balance} AVAX (${usd})\n\
         Available Protocols: {rates}\n\
         AVAX Staking: {staking_apy}% APY\n\n\
         Provide specific, actionable yield strategies using only these protocols \
         and current rates.\n\
         {rule}",
        balance = ctx.balance,
        usd = usd_value.round_dp(2),
        rates = protocol_rates(protocols),
        staking_apy = staking.current_apy,
        rule = PLAIN_TEXT_RULE,
    )
}

/// Beginner-education prompt; no live data involved
pub fn basics() -> String {
    format!(
        "Explain DeFi basics for someone new to decentralized finance.\n\
         Focus on the Avalanche ecosystem and practical getting-started steps.\n\
         Make it beginner-friendly but comprehensive.\n\
         {rule}",
        rule = PLAIN_TEXT_RULE,
    )
}

/// Funding-guidance prompt for an empty or underfunded wallet
pub fn funding(ctx: &ConversationContext, protocols: &[ProtocolRecord]) -> String {
    format!(
        "Guide this user through funding their wallet to start using DeFi:\n\n\
         Wallet Address: {address}\n\
         Current Balance: {balance} AVAX\n\
         Network: {network_label}\n\
         Protocols waiting once funded: {rates}\n\n\
         Cover faucets for testnet, exchanges for mainnet, and sensible starting \
         amounts.\n\
         {rule}",
        address = ctx.short_address(),
        balance = ctx.balance,
        network_label = ctx.network_label(),
        rates = protocol_rates(protocols),
        rule = PLAIN_TEXT_RULE,
    )
}

/// Free-form conversational prompt wrapping the raw user query with context
pub fn free_form(query: &str, ctx: &ConversationContext, usd_value: Decimal) -> String {
    let context_json = serde_json::json!({
        "address": ctx.address,
        "balance": ctx.balance.to_string(),
        "chainId": ctx.chain_id,
        "isConnected": ctx.wallet_connected,
    });

    format!(
        "You are an expert DeFi investment advisor. Respond to this user query in a \
         conversational, helpful manner:\n\n\
         User Query: \"{query}\"\n\
         User Context: {context}\n\
         Portfolio Value: ${usd}\n\n\
         Respond in plain text format without markdown. Be conversational and provide \
         specific, actionable advice.",
        query = query,
        context = context_json,
        usd = usd_value.round_dp(2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_data::{catalog, fallback};
    use rust_decimal_macros::dec;

    fn ctx() -> ConversationContext {
        ConversationContext {
            address: Some("0x71C7656EC7ab88b098defB751B7401B5f6d8976F".into()),
            balance: dec!(2),
            chain_id: Some(43114),
            wallet_connected: true,
        }
    }

    #[test]
    fn test_analysis_prompt_embeds_wallet_fields() {
        let quote = fallback::quote("AVAX/USD");
        let protocols = catalog::catalog();
        let network = fallback::network_status();

        let prompt = analysis(&ctx(), &quote, &protocols, &network);

        assert!(prompt.contains("0x71C7656EC7ab88b098defB751B7401B5f6d8976F"));
        assert!(prompt.contains("AVAX Balance: 2"));
        assert!(prompt.contains("$71.00"));
        assert!(prompt.contains("Avalanche Mainnet"));
        assert!(prompt.contains("Aave V3 (8.2% APY)"));
        assert!(prompt.contains("plain text only"));
    }

    #[test]
    fn test_free_form_prompt_quotes_query() {
        let prompt = free_form("is staking safe?", &ctx(), dec!(71));
        assert!(prompt.contains("\"is staking safe?\""));
        assert!(prompt.contains("\"isConnected\":true"));
    }
}
