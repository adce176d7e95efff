use chrono::Utc;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::AssumptionOverrides;
use core_types::{PropertySnapshot, StrategyId};
use engine::VerdictEngine;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Dealscope analysis application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = configuration::load_config()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Verdict(args) => handle_verdict(args, config),
        Commands::Analyze(args) => handle_analyze(args, config),
        Commands::Schedule(args) => handle_schedule(args),
        Commands::Serve(args) => {
            let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
            web_server::run_server(addr, config).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Deal-analysis and pricing engine for real-estate investing.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all six strategies against a property and print the verdict.
    Verdict(VerdictArgs),
    /// Evaluate a single strategy at a purchase price.
    Analyze(AnalyzeArgs),
    /// Print the amortization schedule for a fixed-rate loan.
    Schedule(ScheduleArgs),
    /// Serve the engine over HTTP.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct PropertyArgs {
    /// Asking price, $.
    #[arg(long)]
    list_price: Decimal,

    /// Estimated market rent, $/month.
    #[arg(long)]
    rent: Option<Decimal>,

    /// Annual property taxes, $.
    #[arg(long)]
    taxes: Option<Decimal>,

    /// Annual insurance premium, $.
    #[arg(long)]
    insurance: Option<Decimal>,

    /// After-repair value, $.
    #[arg(long)]
    arv: Option<Decimal>,

    /// Short-term rental average daily rate, $/night.
    #[arg(long)]
    adr: Option<Decimal>,

    /// Short-term rental occupancy as a fraction (e.g. 0.65).
    #[arg(long)]
    occupancy: Option<Decimal>,

    #[arg(long)]
    bedrooms: Option<u32>,

    #[arg(long)]
    days_on_market: Option<u32>,

    /// The listing has had at least one price reduction.
    #[arg(long)]
    price_drop: bool,

    /// Conventional down payment as a fraction (e.g. 0.20).
    #[arg(long)]
    down_payment_rate: Option<Decimal>,

    /// Interest rate as a fraction (e.g. 0.07).
    #[arg(long)]
    interest_rate: Option<Decimal>,

    /// Rehab budget, $.
    #[arg(long)]
    rehab_budget: Option<Decimal>,

    /// Holding period for rehab strategies, months.
    #[arg(long)]
    holding_months: Option<u32>,
}

impl PropertyArgs {
    fn snapshot(&self) -> PropertySnapshot {
        let mut property = PropertySnapshot::from_list_price(self.list_price);
        property.monthly_rent = self.rent;
        property.property_taxes = self.taxes;
        property.insurance = self.insurance;
        property.arv = self.arv;
        property.average_daily_rate = self.adr;
        property.occupancy_rate = self.occupancy;
        property.bedrooms = self.bedrooms;
        property.days_on_market = self.days_on_market;
        property.price_drop = self.price_drop;
        property
    }

    fn overrides(&self) -> AssumptionOverrides {
        AssumptionOverrides {
            down_payment_rate: self.down_payment_rate,
            interest_rate: self.interest_rate,
            rehab_budget: self.rehab_budget,
            holding_months: self.holding_months,
            ..Default::default()
        }
    }
}

#[derive(Parser)]
struct VerdictArgs {
    #[command(flatten)]
    property: PropertyArgs,

    /// Print the raw verdict as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Strategy to evaluate (e.g. long_term_rental, brrrr, flip).
    #[arg(long)]
    strategy: StrategyId,

    /// Purchase price to evaluate at, $.
    #[arg(long)]
    price: Decimal,

    #[command(flatten)]
    property: PropertyArgs,
}

#[derive(Parser)]
struct ScheduleArgs {
    /// Loan principal, $.
    #[arg(long)]
    principal: Decimal,

    /// Annual interest rate as a fraction (e.g. 0.07).
    #[arg(long)]
    rate: Decimal,

    /// Term in years.
    #[arg(long)]
    term_years: u32,

    /// Number of leading periods to print.
    #[arg(long, default_value_t = 12)]
    months: usize,
}

#[derive(Parser)]
struct ServeArgs {
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_verdict(args: VerdictArgs, config: configuration::EngineConfig) -> anyhow::Result<()> {
    let engine = VerdictEngine::new(config);
    let verdict = engine.run(&args.property.snapshot(), &args.property.overrides(), Utc::now())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    println!(
        "Deal Score: {} ({}) — {}",
        verdict.deal_score.score.round_dp(1),
        verdict.deal_score.grade,
        verdict.deal_score.label
    );
    if let Some(primary) = verdict.primary_strategy {
        println!("Primary strategy: {}", primary.display_name());
    }
    println!("List price:      {}", money(verdict.list_price));
    if let Some(breakeven) = verdict.breakeven_price {
        println!("Breakeven price: {}", money(breakeven));
    }
    if let Some(target) = verdict.purchase_price {
        println!("Target buy:      {}", money(target));
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Rank", "Strategy", "Cash Flow/mo", "CoC", "Cap Rate", "DSCR", "Target Buy", "Breakeven",
    ]);
    for outcome in &verdict.strategies {
        let result = outcome.at_list_price.as_ref();
        table.add_row(vec![
            outcome.rank.to_string(),
            outcome.strategy.display_name().to_string(),
            result
                .and_then(|r| r.monthly_cash_flow())
                .map(money)
                .unwrap_or_else(|| "-".to_string()),
            result
                .and_then(|r| r.cash_on_cash().or(r.roi()))
                .map(percent)
                .unwrap_or_else(|| "-".to_string()),
            result
                .and_then(|r| r.cap_rate())
                .map(percent)
                .unwrap_or_else(|| "-".to_string()),
            result
                .and_then(|r| r.dscr())
                .map(|d| d.round_dp(2).to_string())
                .unwrap_or_else(|| "-".to_string()),
            outcome
                .targets
                .as_ref()
                .and_then(|t| t.target_buy_price)
                .map(money)
                .unwrap_or_else(|| "-".to_string()),
            outcome
                .targets
                .as_ref()
                .and_then(|t| t.breakeven_price)
                .map(money)
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");

    if !verdict.opportunity_factors.is_empty() {
        println!("\nOpportunity factors:");
        for factor in &verdict.opportunity_factors {
            println!("  - {factor}");
        }
    }
    if !verdict.return_factors.is_empty() {
        println!("\nReturn factors:");
        for factor in &verdict.return_factors {
            println!("  - {factor}");
        }
    }

    Ok(())
}

fn handle_analyze(args: AnalyzeArgs, config: configuration::EngineConfig) -> anyhow::Result<()> {
    let engine = VerdictEngine::new(config);
    let analysis = engine.analyze(
        args.strategy,
        args.price,
        &args.property.snapshot(),
        &args.property.overrides(),
    )?;

    println!(
        "{} at {}: score {} ({})",
        args.strategy.display_name(),
        money(args.price),
        analysis.deal_score.score.round_dp(1),
        analysis.deal_score.grade
    );
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn handle_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let loan = amortization::Loan::new(args.principal, args.rate, args.term_years)?;
    println!(
        "Monthly payment: {}",
        money(loan.monthly_payment().round_dp(2))
    );

    let mut table = Table::new();
    table.set_header(vec!["Period", "Payment", "Principal", "Interest", "Balance"]);
    for row in loan.schedule().take(args.months) {
        table.add_row(vec![
            row.period.to_string(),
            money(row.payment.round_dp(2)),
            money(row.principal.round_dp(2)),
            money(row.interest.round_dp(2)),
            money(row.balance.round_dp(2)),
        ]);
    }
    println!("{table}");

    println!(
        "Balance after {} payments: {}",
        args.months,
        money(loan.remaining_balance(args.months as u32).round_dp(2))
    );
    let total_interest: Decimal = loan.schedule().map(|r| r.interest).sum();
    println!("Total interest over the term: {}", money(total_interest.round_dp(2)));
    Ok(())
}

fn money(value: Decimal) -> String {
    format!("${}", value.round_dp(2))
}

fn percent(fraction: Decimal) -> String {
    format!("{}%", (fraction * Decimal::from(100)).round_dp(1))
}
