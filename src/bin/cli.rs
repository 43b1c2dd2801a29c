//! PayClone CLI
//!
//! Command-line front end for the payments dashboard:
//! - Sign in, register and sign out
//! - Dashboard, transactions, analytics
//! - Notifications and money requests
//! - Wallet top-ups, transfers and profile changes

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use payclone::config::generate_default_config;
use payclone::filter::{NotificationFilter, TransactionFilter, TypeFilter};
use payclone::format::{currency, percent, relative_time, signed_currency};
use payclone::model::Direction;
use payclone::pages::{AnalyticsPage, DashboardPage, NotificationsPage, ProfilePage, RequestsPage, TransactionQuery, TransactionsPage};
use payclone::{
    export, logging, ApiClient, AuthFlow, Config, DataSource, FileSessionStore, Id, PageError,
    PageScope, PageState, Transaction, TransactionStatus,
};

#[derive(Parser)]
#[command(name = "payclone")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Peer-to-peer payments from the terminal")]
#[command(long_about = "PayClone talks to the payments REST API.\nSign in once with `payclone login`; the session is kept until `payclone logout`.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: user config dir, then ./payclone.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Show generated demo data when the API cannot be reached
    #[arg(long, global = true)]
    pub placeholders: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Create an account, sign in and open a wallet
    Register {
        name: String,
        email: String,
        #[arg(short, long)]
        password: Option<String>,
        /// Defaults to the password
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Balance, summary, weekly activity and recent items
    Dashboard,

    /// Transaction history
    Transactions {
        /// Time range (all, today, week, month, quarter, year)
        #[arg(short, long, default_value = "all")]
        range: String,
        /// Match description, amount or id
        #[arg(short, long)]
        search: Option<String>,
        /// Direction (all, sent, received)
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: String,
        /// Status keyword, e.g. COMPLETED
        #[arg(long)]
        status: Option<String>,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Write every matching row to a CSV file instead of printing a page
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Spending analytics
    Analytics {
        #[arg(short, long, default_value = "month")]
        range: String,
    },

    /// Notification center
    Notifications {
        #[command(subcommand)]
        action: Option<NotificationAction>,
        /// all, unread, read, transaction, request, system
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Money requests
    Requests {
        #[command(subcommand)]
        action: Option<RequestAction>,
    },

    /// Wallet balance and top-ups
    Wallet {
        #[command(subcommand)]
        action: Option<WalletAction>,
    },

    /// Send money to another user
    Send {
        email: String,
        amount: f64,
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Account details
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Print a default config file
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum NotificationAction {
    List,
    /// Mark one notification read
    Read { id: Id },
    ReadAll,
    Delete { id: Id },
}

#[derive(Subcommand)]
pub enum RequestAction {
    List,
    /// Ask someone for money
    Create {
        email: String,
        amount: f64,
        #[arg(short, long)]
        message: String,
    },
    Approve { id: Id },
    Reject { id: Id },
    /// Withdraw one of your own pending requests
    Cancel { id: Id },
}

#[derive(Subcommand)]
pub enum WalletAction {
    Show,
    Add { amount: f64 },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Password {
        #[arg(long)]
        current: Option<String>,
        #[arg(long)]
        new: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Invalid format: {}. Use: table, json, csv", other)),
        }
    }
}

struct App {
    config: Config,
    client: ApiClient,
    auth: AuthFlow<FileSessionStore>,
    scope: PageScope,
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if cli.placeholders {
        config.pages.placeholder_on_error = true;
    }

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Logging disabled: {}", e);
    }

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let format: OutputFormat = match cli.format.parse() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut client = ApiClient::new(&config.api)?;
    let auth = AuthFlow::restore(FileSessionStore::new(&config.session.file));
    auth.attach(&mut client);

    let mut app = App {
        config,
        client,
        auth,
        scope: PageScope::new(),
        format,
    };

    if let Err(e) = app.run(cli.command).await {
        match e.downcast_ref::<PageError>() {
            Some(PageError::Unauthenticated) => {
                eprintln!("Not signed in (or the session expired).");
                eprintln!("  payclone login <email>");
            }
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

impl App {
    async fn run(&mut self, command: Commands) -> anyhow::Result<()> {
        let policy = self.config.pages.fallback_policy();

        match command {
            Commands::Login { email, password } => {
                let password = read_secret("Password", password)?;
                let session = self.auth.login(&mut self.client, &email, &password).await?;
                println!("Signed in as {} <{}>", session.name, session.email);
            }

            Commands::Logout => {
                self.auth.logout(&mut self.client)?;
                println!("Signed out");
            }

            Commands::Register {
                name,
                email,
                password,
                confirm,
            } => {
                let password = read_secret("Password", password)?;
                let confirm = confirm.unwrap_or_else(|| password.clone());
                let session = self
                    .auth
                    .register(&mut self.client, &name, &email, &password, &confirm)
                    .await?;
                println!("Welcome, {}! Your wallet is ready.", session.name);
            }

            Commands::Dashboard => self.dashboard().await?,

            Commands::Transactions {
                range,
                search,
                kind,
                status,
                page,
                export,
            } => {
                let mut filter = TransactionFilter::default().kind(parse_arg::<TypeFilter>(&kind)?);
                if let Some(search) = search {
                    filter = filter.search(search);
                }
                if let Some(status) = status {
                    filter = filter.status(TransactionStatus::parse_lenient(&status));
                }
                let query = TransactionQuery {
                    range: parse_arg(&range)?,
                    filter,
                    page: page.saturating_sub(1),
                };
                self.transactions(query, export).await?;
            }

            Commands::Analytics { range } => {
                let mut page = AnalyticsPage::new(policy, self.config.pages.activity_days)
                    .with_range(parse_arg(&range)?);
                page.load(&self.client, &self.scope).await;
                let now = Utc::now();
                let report = match page.report(now) {
                    Some(report) => report,
                    None => return Err(state_error(&page.state).into()),
                };
                note_source(&page.state);

                match self.format {
                    OutputFormat::Json => print_json(&report)?,
                    OutputFormat::Csv => print_csv(&report.daily)?,
                    OutputFormat::Table => {
                        let s = &report.summary;
                        println!("Analytics ({})", page.range.label());
                        println!("{}", "-".repeat(60));
                        println!("{:<20} {}", "Total sent", currency(s.total_sent));
                        println!("{:<20} {}", "Total received", currency(s.total_received));
                        println!("{:<20} {}", "Net flow", signed_currency(s.net_flow));
                        println!("{:<20} {}", "Average", currency(s.average_amount));
                        println!("{:<20} {}", "Success rate", percent(s.success_rate));
                        println!("{:<20} {}", "Trend", percent(s.trend_percent));
                        println!();

                        println!("{:<10} {:>14} {:>14}", "Month", "Sent", "Received");
                        println!("{}", "-".repeat(40));
                        for m in &report.monthly {
                            println!("{:<10} {:>14} {:>14}", m.label, currency(m.sent), currency(m.received));
                        }
                        println!();

                        let i = &report.insights;
                        println!("Insights:");
                        println!("  Largest transaction: {}", currency(i.largest));
                        println!("  Most active day:     {}", i.weekday_label());
                        println!("  Peak hour:           {}", i.peak_hour_label());
                        println!("  Average per week:    {}", currency(i.average_per_week));
                        println!("  Frequency:           {}", i.frequency_label);
                    }
                }
            }

            Commands::Notifications { action, filter } => {
                let mut page = NotificationsPage::new(policy);
                page.filter = parse_arg::<NotificationFilter>(&filter)?;
                page.load(&self.client, &self.scope).await;
                if let PageState::Error(e) = &page.state {
                    return Err(e.clone().into());
                }

                match action.unwrap_or(NotificationAction::List) {
                    NotificationAction::List => {
                        note_source(&page.state);
                        let visible: Vec<_> = page.visible().into_iter().cloned().collect();
                        match self.format {
                            OutputFormat::Json => print_json(&visible)?,
                            OutputFormat::Csv => print_csv(&visible)?,
                            OutputFormat::Table => {
                                if visible.is_empty() {
                                    println!("No notifications");
                                    return Ok(());
                                }
                                let now = Utc::now();
                                println!("{:<6} {:<3} {:<12} {:<12} {}", "ID", "", "Category", "When", "Message");
                                println!("{}", "-".repeat(60));
                                for n in &visible {
                                    println!(
                                        "{:<6} {:<3} {:<12} {:<12} {}",
                                        n.id,
                                        if n.read { "" } else { "*" },
                                        n.effective_category().as_str(),
                                        relative_time(n.timestamp, now),
                                        n.message
                                    );
                                }
                                println!();
                                println!("{} unread", page.unread_count());
                            }
                        }
                    }
                    NotificationAction::Read { id } => {
                        page.mark_read(&self.client, &self.scope, id).await?;
                        println!("Marked {} as read", id);
                    }
                    NotificationAction::ReadAll => {
                        page.mark_all_read(&self.client, &self.scope).await?;
                        println!("All notifications marked as read");
                    }
                    NotificationAction::Delete { id } => {
                        page.delete(&self.client, &self.scope, id).await?;
                        println!("Deleted notification {}", id);
                    }
                }
            }

            Commands::Requests { action } => {
                let mut page = RequestsPage::new(policy);
                match action.unwrap_or(RequestAction::List) {
                    RequestAction::List => {
                        page.load(&self.client, &self.scope).await;
                        let view = page.state.require().map_err(|_| state_error(&page.state))?;
                        note_source(&page.state);
                        let all: Vec<_> = view.incoming.iter().chain(&view.outgoing).cloned().collect();

                        match self.format {
                            OutputFormat::Json => print_json(&all)?,
                            OutputFormat::Csv => print_csv(&all)?,
                            OutputFormat::Table => {
                                println!("{:<6} {:<9} {:>12} {:<10} {}", "ID", "Way", "Amount", "Status", "Message");
                                println!("{}", "-".repeat(60));
                                for (way, list) in [("incoming", &view.incoming), ("outgoing", &view.outgoing)] {
                                    for r in list {
                                        println!(
                                            "{:<6} {:<9} {:>12} {:<10} {}",
                                            r.id,
                                            way,
                                            currency(r.amount),
                                            r.status,
                                            r.message
                                        );
                                    }
                                }
                                println!();
                                println!("{} pending for you", view.pending_incoming());
                            }
                        }
                    }
                    RequestAction::Create { email, amount, message } => {
                        let created = page
                            .create(&self.client, &self.scope, &email, amount, &message)
                            .await?;
                        println!("Requested {} from {} (request {})", currency(created.amount), email, created.id);
                    }
                    RequestAction::Approve { id } => {
                        page.load(&self.client, &self.scope).await;
                        page.approve(&self.client, &self.scope, id).await?;
                        println!("Approved request {}", id);
                    }
                    RequestAction::Reject { id } => {
                        page.load(&self.client, &self.scope).await;
                        page.reject(&self.client, &self.scope, id).await?;
                        println!("Rejected request {}", id);
                    }
                    RequestAction::Cancel { id } => {
                        page.load(&self.client, &self.scope).await;
                        page.cancel(&self.client, &self.scope, id).await?;
                        println!("Cancelled request {}", id);
                    }
                }
            }

            Commands::Wallet { action } => {
                let mut page = DashboardPage::new(policy, self.config.pages.activity_days);
                let wallet = match action.unwrap_or(WalletAction::Show) {
                    WalletAction::Show => {
                        page.load(&self.client, &self.scope).await;
                        page.state
                            .require()
                            .map_err(|_| state_error(&page.state))?
                            .wallet
                            .clone()
                    }
                    WalletAction::Add { amount } => {
                        let wallet = page.add_money(&self.client, &self.scope, amount).await?;
                        println!("Added {}", currency(amount));
                        wallet
                    }
                };

                match self.format {
                    OutputFormat::Json => print_json(&wallet)?,
                    OutputFormat::Csv => print_csv(std::slice::from_ref(&wallet))?,
                    OutputFormat::Table => {
                        println!("{:<20} {}", "Balance", currency(wallet.balance));
                        println!("{:<20} {}", "Currency", wallet.currency);
                    }
                }
            }

            Commands::Send { email, amount, note } => {
                let mut page = DashboardPage::new(policy, self.config.pages.activity_days);
                let tx = page
                    .send_money(&self.client, &self.scope, &email, amount, note.as_deref())
                    .await?;
                println!("Sent {} to {} ({})", currency(tx.amount), email, tx.status);
                if let Some(view) = page.state.data() {
                    println!("New balance: {}", currency(view.wallet.balance));
                }
            }

            Commands::Profile { action } => {
                let mut page = ProfilePage::new(policy);
                match action.unwrap_or(ProfileAction::Show) {
                    ProfileAction::Show => {
                        page.load(&self.client, &self.scope).await;
                        let user = page.state.require().map_err(|_| state_error(&page.state))?;
                        match self.format {
                            OutputFormat::Json => print_json(user)?,
                            OutputFormat::Csv => print_csv(std::slice::from_ref(user))?,
                            OutputFormat::Table => {
                                println!("{:<20} {}", "Name", user.name);
                                println!("{:<20} {}", "Email", user.email);
                                println!("{:<20} {}", "Initials", user.initials());
                                if let Some(joined) = user.join_date {
                                    println!("{:<20} {}", "Member since", joined.format("%B %Y"));
                                }
                            }
                        }
                    }
                    ProfileAction::Update { name, email } => {
                        let user = page
                            .update_profile(&self.client, &self.scope, name.as_deref(), email.as_deref())
                            .await?;
                        println!("Profile updated: {} <{}>", user.name, user.email);
                    }
                    ProfileAction::Password { current, new } => {
                        let current = read_secret("Current password", current)?;
                        let new = read_secret("New password", new)?;
                        page.change_password(&self.client, &self.scope, &current, &new, &new)
                            .await?;
                        println!("Password changed");
                    }
                }
            }

            Commands::Config { .. } => unreachable!("handled before the client is built"),
        }

        Ok(())
    }

    async fn dashboard(&mut self) -> anyhow::Result<()> {
        let mut page = DashboardPage::new(
            self.config.pages.fallback_policy(),
            self.config.pages.activity_days,
        );
        page.load(&self.client, &self.scope).await;
        let view = page.state.require().map_err(|_| state_error(&page.state))?;
        note_source(&page.state);

        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "user": view.user,
                "wallet": view.wallet,
                "summary": view.summary,
                "activity": view.activity,
                "totals": view.totals,
                "unread_notifications": view.notifications.unread_count(),
                "recent": view.recent(),
            }))?,
            OutputFormat::Csv => print_csv(&view.activity)?,
            OutputFormat::Table => {
                let s = &view.summary;
                println!("Hello, {}", view.user.name);
                println!();
                println!("{:<20} {}", "Balance", currency(view.wallet.balance));
                println!("{:<20} {}", "Sent", currency(s.total_sent));
                println!("{:<20} {}", "Received", currency(s.total_received));
                println!("{:<20} {}", "Net flow", signed_currency(s.net_flow));
                println!("{:<20} {}", "Unread", view.notifications.unread_count());
                println!();

                println!("Last {} days:", view.activity.len());
                println!("{:<8} {:>12} {:>12}", "Day", "Sent", "Received");
                println!("{}", "-".repeat(34));
                for day in &view.activity {
                    println!("{:<8} {:>12} {:>12}", day.label, currency(day.sent), currency(day.received));
                }
                println!("Trend: {}", percent(view.totals.trend_percent));
                println!();

                println!("Recent transactions:");
                print_transactions(view.user.id, view.recent().into_iter());
            }
        }
        Ok(())
    }

    async fn transactions(&mut self, query: TransactionQuery, export_path: Option<PathBuf>) -> anyhow::Result<()> {
        let mut page = TransactionsPage::new(self.config.pages.fallback_policy(), self.config.pages.page_size);
        page.set_query(query.clone());
        page.set_page(query.page);
        page.load(&self.client, &self.scope).await;
        if let PageState::Error(e) = &page.state {
            return Err(e.clone().into());
        }
        note_source(&page.state);
        let now = Utc::now();

        if let Some(path) = export_path {
            let file = std::fs::File::create(&path)?;
            let rows = page.export_to(file, now)?;
            println!("Exported {} transactions to {:?}", rows, path);
            return Ok(());
        }

        let viewer = page.state.require()?.viewer;
        let slice = page.current_page(now);
        match self.format {
            OutputFormat::Json => print_json(&slice.rows)?,
            OutputFormat::Csv => {
                let stdout = io::stdout();
                export::write_csv(stdout.lock(), &slice.rows, viewer)?;
            }
            OutputFormat::Table => {
                if slice.rows.is_empty() {
                    println!("No transactions for the selected filters");
                    return Ok(());
                }
                print_transactions(viewer, slice.rows.iter());
                println!();
                println!(
                    "Page {} of {} ({} matching)",
                    slice.page + 1,
                    slice.total_pages,
                    slice.matching
                );
            }
        }
        Ok(())
    }
}

fn parse_arg<T>(value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse().map_err(anyhow::Error::msg)
}

/// Error to report for a page that did not load
fn state_error<T>(state: &PageState<T>) -> PageError {
    state
        .error()
        .cloned()
        .unwrap_or_else(|| PageError::Failed("Page is not loaded".to_string()))
}

fn note_source<T>(state: &PageState<T>) {
    if state.source() == Some(DataSource::Placeholder) {
        eprintln!("API unavailable; showing demo data");
    }
}

/// Flag value, or one line read from stdin
fn read_secret(prompt: &str, value: Option<String>) -> io::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    eprint!("{}: ", prompt);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_transactions<'a>(viewer: Id, rows: impl Iterator<Item = &'a Transaction>) {
    println!(
        "{:<12} {:<9} {:>12} {:<12} {}",
        "Date", "Type", "Amount", "Status", "Description"
    );
    println!("{}", "-".repeat(60));

    for t in rows {
        let amount = match t.direction_for(viewer) {
            Some(Direction::Debit) => -t.amount,
            _ => t.amount,
        };
        println!(
            "{:<12} {:<9} {:>12} {:<12} {}",
            t.timestamp.format("%Y-%m-%d"),
            t.label_for(viewer),
            signed_currency(amount),
            t.status.keyword(),
            t.description.as_deref().unwrap_or("-")
        );
    }
}
