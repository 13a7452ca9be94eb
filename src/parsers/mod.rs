//! Tolerant parsers for loosely-structured model output.
//!
//! Both parsers are pure and total: malformed input degrades to a smaller
//! (possibly empty) result, never an error. The model is not trusted to
//! follow the requested format, and never trusted to name property ids the
//! caller did not supply.

use crate::models::{MessageSuggestion, Property, RankedProperty};

/// Maximum picks a ranking may contain.
pub const MAX_TOP_PICKS: usize = 3;

/// Reasons kept per pick; the prompt asks for exactly two.
const MAX_REASONS: usize = 2;

/// Asked of the user when the model produced fewer than three usable picks.
pub const CLARIFYING_QUESTION: &str =
    "Would you prefer newer construction or established neighborhoods?";

/// Parsed ranking result
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProperties {
    pub top_picks: Vec<RankedProperty>,
    /// Present when fewer than three valid picks were found
    pub clarifying_question: Option<String>,
}

/// Parse ranking lines of the form
/// `ID: <id> | Reasons: [r1, r2] | Risk: <text>`.
///
/// Lines whose id is not in `candidates` are silently discarded; ranks are
/// 1-based positions among accepted lines, capped at three.
pub fn parse_ranking(raw: &str, candidates: &[Property]) -> RankedProperties {
    let mut top_picks = Vec::new();

    for line in raw.lines() {
        if top_picks.len() >= MAX_TOP_PICKS {
            break;
        }
        let Some(id) = extract_between(line, "ID:", "|") else {
            continue;
        };
        if id.is_empty() || !candidates.iter().any(|c| c.id == id) {
            continue;
        }

        let reasons = extract_between(line, "Reasons:", "|")
            .map(|section| {
                section
                    .trim_start_matches('[')
                    .trim_end_matches(']')
                    .split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .take(MAX_REASONS)
                    .collect()
            })
            .unwrap_or_default();

        let risk = line
            .split_once("Risk:")
            .map(|(_, rest)| rest.trim().to_string())
            .unwrap_or_default();

        top_picks.push(RankedProperty {
            id,
            rank: top_picks.len() + 1,
            reasons,
            risk,
        });
    }

    let clarifying_question = if top_picks.len() < MAX_TOP_PICKS {
        Some(CLARIFYING_QUESTION.to_string())
    } else {
        None
    };

    RankedProperties {
        top_picks,
        clarifying_question,
    }
}

/// Parse a message rewrite: first non-empty line is the rewritten message,
/// and the first two lines containing "?" become follow-up questions.
pub fn parse_message_suggestion(raw: &str) -> MessageSuggestion {
    let rewritten_message = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string();

    let follow_up_questions = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('?'))
        .take(2)
        .map(str::to_string)
        .collect();

    MessageSuggestion {
        rewritten_message,
        follow_up_questions,
    }
}

/// Text after `start` up to the next `end` marker (or end of line), trimmed.
/// None when `start` is absent.
fn extract_between(line: &str, start: &str, end: &str) -> Option<String> {
    let (_, rest) = line.split_once(start)?;
    let value = match rest.find(end) {
        Some(pos) => &rest[..pos],
        None => rest,
    };
    Some(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FloodRisk;

    fn candidate(id: &str) -> Property {
        Property {
            id: id.to_string(),
            price: 400_000,
            city: "Tampa".to_string(),
            state: "FL".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            days_on_market: 12,
            deal_score: Some(80),
            price_drop_amount: None,
            price_drop_percent: None,
            estimated_monthly_rent: None,
            flood_risk: FloodRisk::Low,
            neighborhood_score: None,
            insight: None,
            insight_generated_at: None,
        }
    }

    fn candidates(ids: &[&str]) -> Vec<Property> {
        ids.iter().map(|id| candidate(id)).collect()
    }

    #[test]
    fn unknown_ids_are_discarded() {
        let raw = "ID: 1 | Reasons: [good price, good schools] | Risk: flood\n\
                   ID: 99 | Reasons: [x, y] | Risk: z";
        let result = parse_ranking(raw, &candidates(&["1", "2", "3"]));

        assert_eq!(result.top_picks.len(), 1);
        assert_eq!(result.top_picks[0].id, "1");
        assert_eq!(result.top_picks[0].rank, 1);
        assert_eq!(result.top_picks[0].reasons, vec!["good price", "good schools"]);
        assert_eq!(result.top_picks[0].risk, "flood");
    }

    #[test]
    fn picks_are_capped_at_three() {
        let raw = "ID: 1 | Reasons: [a, b] | Risk: r\n\
                   ID: 2 | Reasons: [a, b] | Risk: r\n\
                   ID: 3 | Reasons: [a, b] | Risk: r\n\
                   ID: 4 | Reasons: [a, b] | Risk: r";
        let result = parse_ranking(raw, &candidates(&["1", "2", "3", "4"]));

        assert_eq!(result.top_picks.len(), 3);
        let ranks: Vec<usize> = result.top_picks.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(result.clarifying_question, None);
    }

    #[test]
    fn ranks_stay_dense_after_discards() {
        let raw = "ID: 9 | Reasons: [a, b] | Risk: r\n\
                   ID: 1 | Reasons: [a, b] | Risk: r\n\
                   ID: 2 | Reasons: [a, b] | Risk: r";
        let result = parse_ranking(raw, &candidates(&["1", "2"]));

        assert_eq!(result.top_picks[0].id, "1");
        assert_eq!(result.top_picks[0].rank, 1);
        assert_eq!(result.top_picks[1].id, "2");
        assert_eq!(result.top_picks[1].rank, 2);
    }

    #[test]
    fn short_rankings_carry_the_clarifying_question() {
        let raw = "ID: 1 | Reasons: [a, b] | Risk: r";
        let result = parse_ranking(raw, &candidates(&["1", "2", "3"]));

        assert_eq!(result.top_picks.len(), 1);
        assert_eq!(
            result.clarifying_question.as_deref(),
            Some(CLARIFYING_QUESTION)
        );
    }

    #[test]
    fn prose_and_empty_input_yield_no_picks() {
        let result = parse_ranking("", &candidates(&["1"]));
        assert!(result.top_picks.is_empty());
        assert!(result.clarifying_question.is_some());

        let result = parse_ranking(
            "Here are my thoughts on the best properties for you.",
            &candidates(&["1"]),
        );
        assert!(result.top_picks.is_empty());
    }

    #[test]
    fn missing_markers_degrade_per_field() {
        // No Reasons marker, no Risk marker: pick survives with empty fields.
        let raw = "ID: 1 | something else entirely";
        let result = parse_ranking(raw, &candidates(&["1"]));
        assert_eq!(result.top_picks.len(), 1);
        assert!(result.top_picks[0].reasons.is_empty());
        assert_eq!(result.top_picks[0].risk, "");
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let raw = "ID:   2   | Reasons: [  low price ,  big yard  ] | Risk:   busy street  ";
        let result = parse_ranking(raw, &candidates(&["2"]));
        assert_eq!(result.top_picks[0].id, "2");
        assert_eq!(result.top_picks[0].reasons, vec!["low price", "big yard"]);
        assert_eq!(result.top_picks[0].risk, "busy street");
    }

    #[test]
    fn extra_reasons_are_bounded() {
        let raw = "ID: 1 | Reasons: [a, b, c, d] | Risk: r";
        let result = parse_ranking(raw, &candidates(&["1"]));
        assert_eq!(result.top_picks[0].reasons, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_candidate_ids_accept_once_per_line() {
        let raw = "ID: 1 | Reasons: [a, b] | Risk: r\n\
                   ID: 1 | Reasons: [c, d] | Risk: s";
        let result = parse_ranking(raw, &candidates(&["1"]));
        assert_eq!(result.top_picks.len(), 2);
        assert_eq!(result.top_picks[1].rank, 2);
    }

    #[test]
    fn message_first_non_empty_line_is_the_rewrite() {
        let raw = "\n\n  Hello, I am interested in this property.  \n\
                   Is the roof new?\n\
                   What are the HOA fees?\n\
                   When can I tour it?";
        let suggestion = parse_message_suggestion(raw);
        assert_eq!(
            suggestion.rewritten_message,
            "Hello, I am interested in this property."
        );
        assert_eq!(
            suggestion.follow_up_questions,
            vec!["Is the roof new?", "What are the HOA fees?"]
        );
    }

    #[test]
    fn message_without_questions_has_empty_follow_ups() {
        let raw = "Thanks for the details.\nLooking forward to hearing back.";
        let suggestion = parse_message_suggestion(raw);
        assert_eq!(suggestion.rewritten_message, "Thanks for the details.");
        assert!(suggestion.follow_up_questions.is_empty());
    }

    #[test]
    fn empty_message_text_degrades_to_empty_suggestion() {
        let suggestion = parse_message_suggestion("");
        assert_eq!(suggestion.rewritten_message, "");
        assert!(suggestion.follow_up_questions.is_empty());
    }
}
