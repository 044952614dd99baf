use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use fortress_level::{
    CategoryName, FinancialProfile, Transaction, TransactionKind, compute_financial_data,
    create_custom_category, create_transaction, format_currency, get_all_transactions,
    initialize_db, save_profile,
};

/// A utility for creating a test database for the JSON API server of fortress_level.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Saving financial profile...");
    let profile = FinancialProfile::default();
    save_profile(&profile, &conn)?;

    println!("Creating transactions...");
    let today = OffsetDateTime::now_utc().date();
    let last_month = today - Duration::days(31);

    let ledger = [
        (5000.0, today, TransactionKind::Income, "Salary", Some("monthly pay")),
        (800.0, today, TransactionKind::Income, "Freelance", None),
        (1200.0, today, TransactionKind::Expense, "Housing", Some("rent")),
        (350.0, today, TransactionKind::Expense, "Food", Some("groceries")),
        (90.0, today, TransactionKind::Expense, "Transport", None),
        (60.0, today, TransactionKind::Expense, "Entertainment", None),
        (1000.0, today, TransactionKind::Investment, "Stocks", None),
        (5000.0, last_month, TransactionKind::Income, "Salary", Some("monthly pay")),
        (2100.0, last_month, TransactionKind::Expense, "Housing", None),
        (500.0, last_month, TransactionKind::Investment, "Fixed Income", None),
    ];

    for (amount, date, kind, category, description) in ledger {
        let transaction = Transaction::build(amount, date, kind, CategoryName::new(category)?)
            .description(description);
        create_transaction(transaction, &conn)?;
    }

    println!("Creating custom categories...");
    create_custom_category(TransactionKind::Expense, CategoryName::new("Pets")?, &conn)?;

    let transactions = get_all_transactions(&conn)?;
    let financial_data = compute_financial_data(&transactions, &profile, today);

    println!("Monthly income:    {}", format_currency(financial_data.monthly_income));
    println!("Monthly expenses:  {}", format_currency(financial_data.monthly_expenses));
    println!("Current balance:   {}", format_currency(financial_data.current_balance));
    println!("Total investments: {}", format_currency(financial_data.total_investments));
    println!("Fortress level:    {:.1}", financial_data.fortress_level);

    println!("Success!");

    Ok(())
}
