use std::sync::Arc;

use homelens::gateway::{CredentialStore, GatewayConfig, OpenAiGateway};
use homelens::models::{FloodRisk, Goal, Property, Timeline, UserProfile};
use homelens::service::InsightService;
use tracing::{info, Level};
use tracing_subscriber;

/// Reads the API key from the environment on every call, so a rotated key
/// takes effect without restarting.
struct EnvCredentialStore;

impl CredentialStore for EnvCredentialStore {
    fn api_key(&self) -> String {
        std::env::var("HOMELENS_API_KEY").unwrap_or_default()
    }
}

fn sample_properties() -> Vec<Property> {
    vec![
        Property {
            id: "42".to_string(),
            price: 450_000,
            city: "Tampa".to_string(),
            state: "FL".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            days_on_market: 10,
            deal_score: Some(88),
            price_drop_amount: Some(15_000),
            price_drop_percent: Some(3.2),
            estimated_monthly_rent: Some(2_600),
            flood_risk: FloodRisk::Low,
            neighborhood_score: Some(74),
            insight: None,
            insight_generated_at: None,
        },
        Property {
            id: "57".to_string(),
            price: 389_000,
            city: "St. Petersburg".to_string(),
            state: "FL".to_string(),
            bedrooms: 2,
            bathrooms: 2,
            days_on_market: 41,
            deal_score: Some(71),
            price_drop_amount: None,
            price_drop_percent: None,
            estimated_monthly_rent: Some(2_200),
            flood_risk: FloodRisk::Moderate,
            neighborhood_score: Some(81),
            insight: None,
            insight_generated_at: None,
        },
        Property {
            id: "63".to_string(),
            price: 612_000,
            city: "Clearwater".to_string(),
            state: "FL".to_string(),
            bedrooms: 4,
            bathrooms: 3,
            days_on_market: 5,
            deal_score: Some(64),
            price_drop_amount: None,
            price_drop_percent: None,
            estimated_monthly_rent: Some(3_100),
            flood_risk: FloodRisk::High,
            neighborhood_score: Some(68),
            insight: None,
            insight_generated_at: None,
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Homelens - AI property insights");
    info!("===================================");

    let base_url = std::env::var("HOMELENS_BASE_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
    let model =
        std::env::var("HOMELENS_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    let gateway = OpenAiGateway::new(
        GatewayConfig::new(base_url, model),
        Arc::new(EnvCredentialStore),
    )?;
    let service = InsightService::new(Arc::new(gateway));

    let properties = sample_properties();
    let profile = UserProfile {
        goal: Goal::LiveIn,
        timeline: Timeline::ReadyNow,
        budget_min: Some(350_000),
        budget_max: Some(500_000),
        preferred_locations: vec!["Tampa".to_string()],
        preferred_property_types: vec!["single_family".to_string()],
    };

    info!("Generating insight for {} sample properties...", properties.len());
    for property in &properties {
        let insight = service.generate_property_insight(property).await?;
        println!(
            "{} — {}, {} ({})",
            property.id,
            property.city,
            property.state,
            property.formatted_price()
        );
        println!("   {}", insight);
        println!();
    }

    info!("Ranking sample properties for the demo profile...");
    let ranked = service.rank_properties(&properties, Some(&profile)).await?;
    for pick in &ranked.top_picks {
        println!("#{} — property {}", pick.rank, pick.id);
        println!("   Reasons: {}", pick.reasons.join("; "));
        println!("   Risk: {}", pick.risk);
    }
    if let Some(question) = &ranked.clarifying_question {
        println!("   ❓ {}", question);
    }

    Ok(())
}
