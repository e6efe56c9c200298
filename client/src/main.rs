//! # MinerX Command Line
//!
//! Every command dispatches on the [`Store`], waits for the requests to
//! settle and prints the resulting state. The session is persisted between
//! invocations, so `minerx login` once and the other commands reuse it.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use shared::{
    format_usd, short_id, BalanceType, ContactRequest, ProcessAction, RegisterRequest, Transaction,
    TransactionStatus, WithdrawalQuery,
};

use client::app::{NotificationLevel, PurchaseFlow, Store};
use client::config::ClientConfig;
use client::core::Result;

#[derive(Parser, Debug)]
#[command(name = "minerx", version, about = "MinerX mining hardware storefront")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and keep the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MINERX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// End the session
    Logout,
    /// Show the logged-in user
    Me,
    /// List the machine catalog
    Machines,
    /// List machines assigned to you
    MyMachines,
    /// Your transaction history
    Transactions {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Your total profit per machine
    Profit,
    /// The share-based machine and your shares
    Shares,
    /// Buy catalog machines
    BuyMachine {
        /// Machine id or name slug (e.g. antminer-s19)
        machine: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Submit without showing the quote first
        #[arg(long)]
        yes: bool,
    },
    /// Buy shares of the share-based machine
    BuyShares {
        quantity: u32,
        #[arg(long)]
        yes: bool,
    },
    /// Show your balance
    Balance,
    /// Request a withdrawal of mining profit
    Withdraw { amount: f64 },
    /// Your withdrawal history
    Withdrawals {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Send a message to support
    Contact(ContactArgs),
    /// Administration
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "MINERX_PASSWORD", hide_env_values = true)]
    password: String,
    /// International format, e.g. +44 7911 123456
    #[arg(long)]
    phone: String,
    #[arg(long)]
    country: String,
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    country: Option<String>,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Withdrawals awaiting review
    Pending {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Approve or reject a withdrawal
    Process {
        transaction_id: String,
        #[arg(long, value_enum)]
        action: Decision,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Withdrawal totals by status
    Stats,
    /// Registered users
    Users,
    /// Every withdrawal, filtered
    AllWithdrawals {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
        /// YYYY-MM-DD
        #[arg(long)]
        start_date: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Credit profit to a user's balance
    UpdateBalance {
        user_id: String,
        amount: f64,
        #[arg(long, value_enum, default_value_t = Bucket::Mining)]
        balance_type: Bucket,
    },
    /// Distribute the monthly share profits
    UpdateShareProfits,
    /// Contact form inbox
    Contacts,
    /// Profit accrual schedule of one user machine
    ProfitStatus { user_machine_id: String },
    /// Pending withdrawals, stats, users and assignments at once
    Dashboard,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for ProcessAction {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approve => ProcessAction::Approved,
            Decision::Reject => ProcessAction::Rejected,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusFilter {
    Pending,
    Approved,
    Rejected,
}

impl From<StatusFilter> for TransactionStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Pending => TransactionStatus::Pending,
            StatusFilter::Approved => TransactionStatus::Approved,
            StatusFilter::Rejected => TransactionStatus::Rejected,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Bucket {
    Admin,
    Mining,
}

impl From<Bucket> for BalanceType {
    fn from(bucket: Bucket) -> Self {
        match bucket {
            Bucket::Admin => BalanceType::Admin,
            Bucket::Mining => BalanceType::Mining,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let _guard = client::debug::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting minerx");

    let store = match ClientConfig::from_env().and_then(|config| Store::from_config(&config)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&store, cli.command).await {
        Ok(()) => report(&store),
        Err(e) => {
            tracing::warn!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(store: &Store, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            store.login(email, password)?;
            store.settle().await;
            if let Some(user) = &store.state.read().auth.user {
                println!("Logged in as {} <{}>", user.full_name(), user.email);
            }
        }
        Command::Register(args) => {
            store.register(RegisterRequest {
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
                password: args.password,
                phone: Some(args.phone),
                country: Some(args.country),
            })?;
            store.settle().await;
        }
        Command::Logout => {
            store.logout();
            store.settle().await;
            println!("Logged out");
        }
        Command::Me => {
            store.require_user()?;
            store.fetch_current_user();
            store.settle().await;
            let state = store.state.read();
            if let Some(user) = &state.auth.user {
                println!("{} <{}>", user.full_name(), user.email);
                println!("  id:      {}", user.id);
                println!("  role:    {}", if user.is_admin() { "admin" } else { "user" });
                if let Some(phone) = &user.phone {
                    println!("  phone:   {}", phone);
                }
                if let Some(country) = &user.country {
                    println!("  country: {}", country);
                }
            }
        }
        Command::Machines => {
            store.fetch_machines();
            store.settle().await;
            let state = store.state.read();
            for machine in &state.catalog.machines {
                println!(
                    "{:<28} {:>12}  {:>10}  {:>8.0} W  {}/mo  [{}]",
                    machine.machine_name,
                    format_usd(machine.price_range),
                    machine.hashrate,
                    machine.power_consumption,
                    format_usd(machine.monthly_profit),
                    machine.slug()
                );
            }
        }
        Command::MyMachines => {
            let user = store.require_user()?;
            store.fetch_user_machines(&user.id);
            store.settle().await;
            let state = store.state.read();
            for um in &state.user_machine.user_machines {
                println!(
                    "{}  {:<28} {:?}  accumulated {}",
                    short_id(&um.id, 6),
                    um.machine.name().unwrap_or(um.machine.id()),
                    um.status,
                    format_usd(um.monthly_profit_accumulated)
                );
            }
        }
        Command::Transactions { page } => {
            let user = store.require_user()?;
            store.fetch_user_transactions(&user.email, page);
            store.settle().await;
            let state = store.state.read();
            print_transactions(&state.user_machine.transactions);
            let cursor = state.user_machine.transactions_page;
            println!("page {}/{} ({} total)", cursor.current_page, cursor.total_pages, cursor.total_items);
        }
        Command::Profit => {
            let user = store.require_user()?;
            store.fetch_total_profit(&user.id);
            store.settle().await;
            if let Some(summary) = &store.state.read().profit.total_profit {
                for machine in &summary.machines {
                    println!("{:<28} {}", machine.machine_name, format_usd(machine.profit));
                }
                println!(
                    "Total: {} across {} machines",
                    format_usd(summary.total_profit),
                    summary.total_machines
                );
            }
        }
        Command::Shares => {
            store.fetch_special_machine();
            if let Ok(user) = store.require_user() {
                store.fetch_user_shares(&user.id);
            }
            store.settle().await;
            let state = store.state.read();
            if let Some(machine) = &state.shares.special_machine {
                println!(
                    "{}: {} per share, {}/{} available, {} profit per share",
                    machine.machine_name,
                    format_usd(machine.share_price),
                    machine.available_shares,
                    machine.total_shares,
                    format_usd(machine.profit_per_share)
                );
            }
            if let Some(holdings) = &state.shares.user_shares {
                for share in &holdings.shares {
                    println!(
                        "  {} shares of {} ({} invested)",
                        share.number_of_shares,
                        share.machine_name,
                        format_usd(share.total_investment)
                    );
                }
                println!(
                    "Expected monthly profit: {}",
                    format_usd(holdings.summary.expected_monthly_profit)
                );
            }
        }
        Command::BuyMachine { machine, quantity, yes } => {
            let user = store.require_user()?;
            store.fetch_machines();
            store.fetch_balance(&user.id);
            store.settle().await;
            store.open_machine_purchase(&machine, quantity)?;
            purchase(store, yes).await?;
        }
        Command::BuyShares { quantity, yes } => {
            let user = store.require_user()?;
            store.fetch_special_machine();
            store.fetch_balance(&user.id);
            store.settle().await;
            store.open_share_purchase(quantity)?;
            purchase(store, yes).await?;
        }
        Command::Balance => {
            let user = store.require_user()?;
            store.fetch_balance(&user.id);
            store.settle().await;
            if let Some(balance) = &store.state.read().balance.balance {
                println!("Admin added: {}", format_usd(balance.balances.admin_add));
                println!("Mining:      {}", format_usd(balance.balances.mining));
                println!("Total:       {}", format_usd(balance.balances.total));
            }
        }
        Command::Withdraw { amount } => {
            store.request_withdrawal(amount)?;
            store.settle().await;
            if let Some(response) = &store.state.read().withdrawal.last_response {
                if let Some(left) = response.available_profit {
                    println!("Remaining profit: {}", format_usd(left));
                }
            }
        }
        Command::Withdrawals { page } => {
            let user = store.require_user()?;
            store.fetch_user_withdrawals(&user.email, page);
            store.settle().await;
            let state = store.state.read();
            print_transactions(&state.withdrawal.withdrawals);
            let cursor = state.withdrawal.pagination;
            println!("page {}/{} ({} total)", cursor.current_page, cursor.total_pages, cursor.total_items);
        }
        Command::Contact(args) => {
            store.submit_contact(ContactRequest {
                name: args.name,
                email: args.email,
                phone: args.phone,
                country: args.country,
                message: args.message,
            })?;
            store.settle().await;
        }
        Command::Admin(command) => run_admin(store, command).await?,
    }
    Ok(())
}

async fn run_admin(store: &Store, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Pending { page } => {
            store.fetch_pending_withdrawals(page);
            store.settle().await;
            let state = store.state.read();
            print_transactions(&state.withdrawal.pending_withdrawals);
            let cursor = state.withdrawal.pending_pagination;
            println!("page {}/{} ({} pending)", cursor.current_page, cursor.total_pages, cursor.total_items);
        }
        AdminCommand::Process {
            transaction_id,
            action,
            comment,
        } => {
            store.process_withdrawal(transaction_id, action.into(), comment);
            store.settle().await;
        }
        AdminCommand::Stats => {
            store.fetch_withdrawal_stats();
            store.settle().await;
            if let Some(stats) = &store.state.read().withdrawal.stats {
                for (label, bucket) in [
                    ("pending", stats.pending),
                    ("approved", stats.approved),
                    ("rejected", stats.rejected),
                ] {
                    println!("{:<9} {:>5}  {}", label, bucket.count, format_usd(bucket.amount));
                }
            }
        }
        AdminCommand::Users => {
            store.fetch_users();
            store.settle().await;
            for user in &store.state.read().admin.users {
                println!("{}  {:<24} {}", short_id(&user.id, 6), user.full_name(), user.email);
            }
        }
        AdminCommand::AllWithdrawals {
            page,
            status,
            start_date,
            end_date,
        } => {
            store.fetch_all_withdrawals(WithdrawalQuery {
                page: Some(page),
                status: status.map(Into::into),
                start_date,
                end_date,
                ..Default::default()
            });
            store.settle().await;
            let state = store.state.read();
            print_transactions(&state.withdrawal.all_withdrawals);
            let cursor = state.withdrawal.all_pagination;
            println!("page {}/{} ({} total)", cursor.current_page, cursor.total_pages, cursor.total_items);
        }
        AdminCommand::UpdateBalance {
            user_id,
            amount,
            balance_type,
        } => {
            store.update_balance(user_id, amount, balance_type.into())?;
            store.settle().await;
        }
        AdminCommand::UpdateShareProfits => {
            store.update_all_share_profits();
            store.settle().await;
        }
        AdminCommand::Contacts => {
            store.fetch_contacts();
            store.settle().await;
            for contact in &store.state.read().contacts.messages {
                println!("{}  {} <{}>", short_id(&contact.id, 6), contact.name, contact.email);
                println!("    {}", contact.message);
            }
        }
        AdminCommand::ProfitStatus { user_machine_id } => {
            store.fetch_profit_status(user_machine_id.clone());
            store.settle().await;
            if let Some(status) = store.state.read().profit.update_status.get(&user_machine_id) {
                println!("{} ({})", status.machine_name, status.user_name);
                println!(
                    "accumulated {}, {} days since last update, next in {} days",
                    format_usd(status.current_accumulated_profit),
                    status.days_since_last_update,
                    status.days_until_next_update
                );
            }
        }
        AdminCommand::Dashboard => {
            store.load_admin_dashboard();
            store.settle().await;
            let state = store.state.read();
            println!(
                "{} pending withdrawals, {} users, {} assigned machines",
                state.withdrawal.pending_pagination.total_items,
                state.admin.users.len(),
                state.user_machine.all_user_machines.len()
            );
            if let Some(stats) = &state.withdrawal.stats {
                println!(
                    "approved {}, rejected {}",
                    format_usd(stats.approved.amount),
                    format_usd(stats.rejected.amount)
                );
            }
        }
    }
    Ok(())
}

/// Show the open quote; submit it when `submit` is set.
async fn purchase(store: &Store, submit: bool) -> Result<()> {
    {
        let state = store.state.read();
        if let PurchaseFlow::Confirming(quote) = &state.purchase {
            println!(
                "{} x {} at {} = {}",
                quote.quantity,
                quote.target.name(),
                format_usd(quote.unit_price),
                format_usd(quote.total())
            );
            println!("Balance: {}", format_usd(state.balance.total()));
        }
    }
    if !submit {
        println!("Re-run with --yes to confirm");
        store.cancel_purchase();
        return Ok(());
    }
    store.confirm_purchase()?;
    store.settle().await;
    Ok(())
}

fn print_transactions(transactions: &[Transaction]) {
    for tx in transactions {
        let date = tx
            .transaction_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "{}  {:<10} {:>12}  {:<8}  {}",
            short_id(&tx.id, 6),
            date,
            format_usd(tx.amount),
            tx.status.as_str(),
            tx.user.email().unwrap_or_default()
        );
    }
}

/// Print queued notifications and slice errors. Fails when any slice
/// recorded an error.
fn report(store: &Store) -> ExitCode {
    let mut state = store.state.write();
    for notification in state.drain_notifications() {
        // Failures are printed from the slice errors below
        if notification.level != NotificationLevel::Error {
            println!("{}", notification.message);
        }
    }
    let errors = state.errors();
    if errors.is_empty() {
        return ExitCode::SUCCESS;
    }
    for error in errors {
        eprintln!("error: {}", error);
    }
    ExitCode::FAILURE
}
