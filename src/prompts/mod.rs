//! Deterministic prompt rendering.
//!
//! Every builder returns a fixed system turn (the grounding directive) plus
//! one task-specific user turn. No I/O, no failure paths: well-typed input
//! always renders, and identical input renders byte-identical output.

use std::fmt::Write;

use crate::models::{format_price, ChatTurn, Property, SearchContext, UserProfile};

/// System turn sent with every model call. Forbids the model from asserting
/// facts absent from the supplied context.
pub const GROUNDING_DIRECTIVE: &str = "\
You are a real-estate insight assistant inside a property-browsing app. \
Follow these rules on every reply:
1. Never state a fact about a property that is not present in the data you were given.
2. If asked about something the data does not cover, say exactly what additional data you would need.
3. Keep answers short, decisive, and numbered where a list helps.
4. Tie every claim to a named input field (price, beds, days on market, deal score, flood risk, and so on).";

/// Candidate lists are truncated to this many properties, first-N by input
/// order, to bound prompt size.
pub const MAX_RANKING_CANDIDATES: usize = 10;

/// Word cap requested for message rewrites.
pub const REWRITE_WORD_CAP: usize = 80;

/// Insight prompt: summarize one property and ask for a short verdict.
pub fn insight_prompt(property: &Property) -> Vec<ChatTurn> {
    let mut body = String::from("Property details:\n");
    let _ = writeln!(body, "- Price: {}", property.formatted_price());
    let _ = writeln!(body, "- Location: {}, {}", property.city, property.state);
    let _ = writeln!(
        body,
        "- Beds/Baths: {}/{}",
        property.bedrooms, property.bathrooms
    );
    let _ = writeln!(body, "- Days on Market: {}", property.days_on_market);
    if let Some(score) = property.deal_score {
        let _ = writeln!(body, "- Deal Score: {}/100", score);
    }
    if let Some(amount) = property.price_drop_amount {
        let _ = writeln!(body, "- Price Drop: {}", format_price(amount));
    }
    if let Some(rent) = property.estimated_monthly_rent {
        let _ = writeln!(body, "- Estimated Monthly Rent: {}", format_price(rent));
    }
    let _ = writeln!(body, "- Flood Risk: {}", property.flood_risk);
    if let Some(score) = property.neighborhood_score {
        let _ = writeln!(body, "- Neighborhood Score: {}/100", score);
    }
    body.push_str(
        "\nIn 2-3 sentences: why this is (or is not) a deal, one caveat, \
         and who this home fits.",
    );

    vec![ChatTurn::system(GROUNDING_DIRECTIVE), ChatTurn::user(body)]
}

/// Ranking prompt: serialize up to the first ten candidates plus the buyer
/// profile and request a fixed line format the ranking parser understands.
pub fn ranking_prompt(properties: &[Property], profile: Option<&UserProfile>) -> Vec<ChatTurn> {
    let mut body = String::from("Candidate properties:\n");
    for property in properties.iter().take(MAX_RANKING_CANDIDATES) {
        let _ = writeln!(
            body,
            "ID: {} | Price: {} | City: {} | Beds: {} | Deal Score: {} | Days on Market: {}",
            property.id,
            property.formatted_price(),
            property.city,
            property.bedrooms,
            property
                .deal_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "n/a".to_string()),
            property.days_on_market,
        );
    }

    body.push('\n');
    match profile {
        Some(profile) => {
            let _ = writeln!(body, "Buyer goal: {}", profile.goal);
            let _ = writeln!(body, "Buyer timeline: {}", profile.timeline);
            match (profile.budget_min, profile.budget_max) {
                (Some(min), Some(max)) => {
                    let _ = writeln!(
                        body,
                        "Budget: {} to {}",
                        format_price(min),
                        format_price(max)
                    );
                }
                (None, Some(max)) => {
                    let _ = writeln!(body, "Budget: up to {}", format_price(max));
                }
                (Some(min), None) => {
                    let _ = writeln!(body, "Budget: at least {}", format_price(min));
                }
                (None, None) => {}
            }
        }
        None => {
            body.push_str("Buyer profile: not provided; rank on the property data alone.\n");
        }
    }

    body.push_str(
        "\nPick the top 3 for this buyer. Reply with one line per pick, \
         exactly in this format:\n\
         ID: <id> | Reasons: [<reason 1>, <reason 2>] | Risk: <one risk>\n\
         Give exactly two reasons and one risk per pick.",
    );

    vec![ChatTurn::system(GROUNDING_DIRECTIVE), ChatTurn::user(body)]
}

/// Message-rewrite prompt: professional tone, bounded length, exactly two
/// follow-up questions.
pub fn rewrite_prompt(original_message: &str, property: &Property) -> Vec<ChatTurn> {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "A buyer drafted this message about the property at {}, {} (listed at {}):",
        property.city,
        property.state,
        property.formatted_price()
    );
    let _ = writeln!(body, "\"{}\"", original_message.trim());
    let _ = write!(
        body,
        "\nRewrite it professionally in under {} words. Put the rewritten \
         message on the first line, then exactly two follow-up questions the \
         buyer should ask, each on its own line ending with a question mark.",
        REWRITE_WORD_CAP
    );

    vec![ChatTurn::system(GROUNDING_DIRECTIVE), ChatTurn::user(body)]
}

/// Q&A prompt: free-form question with an optional search-context block.
pub fn question_prompt(question: &str, context: Option<&SearchContext>) -> Vec<ChatTurn> {
    let mut body = String::new();
    if let Some(context) = context {
        body.push_str("User context:\n");
        let _ = writeln!(body, "- Saved properties: {}", context.saved_property_count);
        if !context.recent_searches.is_empty() {
            let _ = writeln!(
                body,
                "- Recent searches: {}",
                context.recent_searches.join(", ")
            );
        }
        if !context.preferred_locations.is_empty() {
            let _ = writeln!(
                body,
                "- Preferred locations: {}",
                context.preferred_locations.join(", ")
            );
        }
        body.push('\n');
    }
    let _ = write!(
        body,
        "Question: {}\n\nAnswer concisely and reference the data above where it applies.",
        question.trim()
    );

    vec![ChatTurn::system(GROUNDING_DIRECTIVE), ChatTurn::user(body)]
}
