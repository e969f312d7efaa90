use std::{env, path::PathBuf, process};

use colored::Colorize;
use wallet_core::{
    config::{Config, ConfigManager},
    core::services::AlertLevel,
    init,
    WalletSession,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "help".to_string());

    match command.as_str() {
        "summary" => {
            let session = open_session()?;
            print_summary(&session);
        }
        "history" => {
            let session = open_session()?;
            print_history(&session);
        }
        "budget" => {
            let limit = args.next().unwrap_or_else(|| usage_exit());
            let mut session = open_session()?;
            let status = session.set_budget_limit(&limit)?;
            let codec = session.codec();
            println!(
                "Budget: {} | Spent: {} | Remaining: {}",
                codec.format_balance(status.limit),
                codec.format_balance(status.spent),
                codec.format_balance(status.remaining)
            );
            println!("Used {}% in {}", status.percent.round_dp(1), status.period_key);
            let message = status.level.message();
            let line = match status.level {
                AlertLevel::Exceeded | AlertLevel::Critical90 => message.red(),
                AlertLevel::Notice75 | AlertLevel::HalfUsed => message.yellow(),
                AlertLevel::OnTrack | AlertLevel::Unset => message.green(),
            };
            println!("{line}");
        }
        "export" => {
            let path = args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| usage_exit());
            let session = open_session()?;
            let written = session.export_to_path(&path)?;
            println!("Exported {written} transactions to {}", path.display());
        }
        "parse" => {
            let text = args.next().unwrap_or_else(|| usage_exit());
            let codec = load_config()?.codec();
            let amount = codec.parse(&text)?;
            println!("{} ({})", codec.format(amount), amount);
        }
        "categories" => {
            let config = load_config()?;
            println!("Income:  {}", config.income_categories.join(", "));
            println!("Expense: {}", config.expense_categories.join(", "));
        }
        "version" => {
            println!("Wallet Core {}", env!("CARGO_PKG_VERSION"));
        }
        "help" | "--help" | "-h" => print_usage(),
        _ => usage_exit(),
    }

    Ok(())
}

fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    Ok(ConfigManager::new()?.load()?)
}

fn open_session() -> Result<WalletSession, Box<dyn std::error::Error>> {
    let config = load_config()?;
    Ok(WalletSession::new(&config)?)
}

fn print_summary(session: &WalletSession) {
    let codec = session.codec();
    let summary = session.summary();
    println!(
        "Current Balance: {}",
        codec.format_balance(session.balance()).bold()
    );
    println!(
        "Total Income: {}",
        codec.format_balance(summary.total_income).green()
    );
    println!(
        "Total Expenses: {}",
        codec.format_balance(summary.total_expense).red()
    );
    println!("Net Savings: {}", codec.format_balance(summary.net_savings));
    println!("Transactions: {}", summary.transaction_count);
    println!(
        "Avg Monthly Expense: {}",
        codec.format_balance(summary.average_monthly_expense)
    );
    println!(
        "Largest Expense: {}",
        codec.format_balance(summary.largest_expense)
    );

    if !summary.expense_by_category.is_empty() {
        println!();
        println!("Expenses by category:");
        for (category, amount) in &summary.expense_by_category {
            println!("  {:<16} {}", category, codec.format_balance(*amount));
        }
    }

    if !summary.monthly_series.is_empty() {
        println!();
        println!("Income vs Expense:");
        for month in &summary.monthly_series {
            println!(
                "  {}  {:>14}  {:>14}",
                month.month,
                codec.format_balance(month.income),
                codec.format_balance(month.expense)
            );
        }
    }
}

fn print_history(session: &WalletSession) {
    let codec = session.codec();
    if session.ledger().is_empty() {
        println!("No transactions recorded.");
        return;
    }
    for txn in session.ledger().history() {
        let amount = codec.format(txn.amount());
        let amount = if txn.is_expense() {
            amount.red()
        } else {
            amount.green()
        };
        println!(
            "{:>4}  {:>14}  {:<8} {:<14} {:<20} {}",
            txn.id(),
            amount,
            txn.direction().to_string(),
            txn.category(),
            txn.description(),
            txn.timestamp_label()
        );
    }
}

fn usage_exit() -> ! {
    print_usage();
    process::exit(1);
}

fn print_usage() {
    println!("Wallet Core CLI");
    println!("Usage:");
    println!("  wallet_cli summary          # show balance and analytics");
    println!("  wallet_cli history          # list transactions, newest first");
    println!("  wallet_cli budget <limit>   # evaluate this month's budget");
    println!("  wallet_cli export <path>    # write transactions as CSV");
    println!("  wallet_cli parse <amount>   # parse and reformat an amount");
    println!("  wallet_cli categories       # list configured categories");
    println!("  wallet_cli version          # print version information");
}
