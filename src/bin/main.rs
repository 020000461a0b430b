use credivue::{
    advisor::Advisor,
    client::{AdvisoryClient, GeminiClient, MockAdvisoryClient},
    config::AppConfig,
    models::{FinancialGoal, FinancialSnapshot},
    prompt::LearningScenario,
    store::InMemoryDocumentStore,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;

    info!("CrediVue demo session starting");

    // Real model when a key is configured, canned text otherwise
    let client: Arc<dyn AdvisoryClient> = if config.gemini.api_key.is_empty() {
        Arc::new(MockAdvisoryClient::replying(
            "1. **Vue Verdict**: Safe to proceed.\n2. **Strategy**: Keep utilization under 30%, pay in full, wait 6 months.\n3. **Context**: RBI guidelines; CIBIL above 750 helps.",
        ))
    } else {
        Arc::new(GeminiClient::new(config.gemini.clone())?)
    };

    let advisor = Advisor::new(Arc::new(InMemoryDocumentStore::new()), client);

    advisor.credentials().register("demo", "demo-password").await?;
    let ctx = advisor.credentials().login("demo", "demo-password").await?;

    advisor
        .portfolio()
        .add_card(&ctx, "HDFC Millennia", 50_000, "5% cashback on Amazon/Flipkart")
        .await?;
    advisor
        .portfolio()
        .add_card(&ctx, "Axis Atlas", 20_000, "Travel miles")
        .await?;

    println!("\n=== CARD PORTFOLIO ===");
    for view in advisor.card_views(&ctx).await? {
        println!(
            "{} (Limit: ₹{}) - {} [{}]",
            view.card.name, view.card.limit, view.insight.health_message, view.insight.band
        );
        println!("  Suggestion: {}", view.insight.offer_message);
    }

    let analysis = advisor.spend_analysis(&ctx).await?;
    println!("\n=== SPEND ANALYSIS ===");
    println!("Overall utilization: {:.1}% ({})", analysis.utilization, analysis.band);
    for category in &analysis.categories {
        println!("  {}: ₹{} ({:.0}%)", category.category, category.amount, category.share_pct);
    }

    let snapshot = FinancialSnapshot {
        income: 20_000,
        cibil_score: 750,
        debt: 5_000,
        goal: FinancialGoal::PremiumCard,
    };

    let consultation = advisor
        .consult(&ctx, snapshot, "I want to apply for HDFC Millennia. Do I qualify?")
        .await?;
    println!("\n=== ADVISOR ===\n{}", consultation.response);

    let lesson = advisor
        .coach_scenario(LearningScenario::BuildingCibilScore)
        .await?;
    println!("\n=== CAMPUS SENSE ===\n{}", lesson);

    println!("\n=== HISTORY ===");
    for record in advisor.history(&ctx).await? {
        println!("{} - {}", record.timestamp.format("%d-%b"), record.query);
    }

    Ok(())
}
