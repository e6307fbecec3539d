#![forbid(unsafe_code)]

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use console::style;
use std::path::PathBuf;
use suvidha_api::{ComplaintApi, ComplaintClient};
use suvidha_core::i18n;
use suvidha_core::{ComplaintStatus, Department, KioskConfig, Language, Token};
use suvidha_kiosk::admin::{
    self, AdminDepartment, AdminIdentity, FileSessionStore, RecordFilter, SessionStore,
};
use suvidha_kiosk::{Announcer, EspeakBackend, KioskApp};

mod wizard;

#[derive(Debug, Parser)]
#[command(name = "suvidha", version, about = "SUVIDHA public service kiosk")]
struct Cli {
    /// Path to a suvidha.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Complaint API base URL (override)
    #[arg(long)]
    api_url: Option<String>,
    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the citizen kiosk wizard
    Kiosk {
        /// Start language code (en, hi, bn, te, mr, ta, gu)
        #[arg(long)]
        lang: Option<String>,
        /// Run without the speech announcer even when available
        #[arg(long)]
        no_speech: bool,
    },
    /// Look up a complaint by token, e.g. "#5"
    Track { token: String },
    /// Official dashboard commands
    Admin {
        #[command(subcommand)]
        action: AdminCmd,
    },
    /// Config helpers
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Debug, Subcommand)]
enum AdminCmd {
    /// Log in and persist the session marker
    Login {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        password: String,
        /// Electricity, Water, Gas, Municipal, or All
        #[arg(long)]
        department: String,
    },
    /// Headline counts and per-department breakdown
    Dashboard,
    /// List complaints, optionally filtered
    List {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// ISO date, e.g. 2026-02-08
        #[arg(long)]
        date: Option<String>,
    },
    /// Record a status update for a complaint
    UpdateStatus {
        id: u64,
        #[arg(long)]
        status: String,
        #[arg(long)]
        remark: Option<String>,
    },
    /// Remove the session marker
    Logout,
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
    /// Show the effective configuration (resolved from file/env/flags)
    Show,
    /// Write a suvidha.toml template
    WriteTemplate {
        /// Destination path (default: ./suvidha.toml)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite if the file exists
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // A translation gap is a deployment defect; refuse to boot with one.
    i18n::verify_catalogs().context("localization catalogs failed verification")?;

    let mut cfg = match &cli.config {
        Some(path) => KioskConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => KioskConfig::from_env()?,
    };
    if let Some(url) = cli.api_url {
        cfg.api_base_url = url;
    }
    if let Some(timeout) = cli.timeout_ms {
        cfg.request_timeout_ms = timeout;
    }
    cfg.validate()?;

    match cli.command {
        Commands::Kiosk { lang, no_speech } => run_kiosk(&cfg, lang, no_speech).await,
        Commands::Track { token } => run_track(&cfg, &token).await,
        Commands::Admin { action } => run_admin(&cfg, action).await,
        Commands::Config { action } => run_config(&cfg, action),
    }
}

async fn run_kiosk(cfg: &KioskConfig, lang: Option<String>, no_speech: bool) -> anyhow::Result<()> {
    let announcer = if no_speech {
        Announcer::disabled()
    } else {
        match EspeakBackend::probe(&cfg.speech_command) {
            Ok(backend) => Announcer::new(Box::new(backend)),
            Err(_) => {
                tracing::warn!(command = %cfg.speech_command, "speech command unavailable");
                Announcer::disabled()
            }
        }
    };

    let client = ComplaintClient::new(cfg)?;
    let mut app = KioskApp::new(client, cfg, announcer);

    if let Some(code) = lang {
        let language = Language::from_code(&code)
            .with_context(|| format!("unknown language code: {code}"))?;
        app.flow_mut().start()?;
        app.flow_mut().choose_language(language)?;
    }

    wizard::run(app).await
}

async fn run_track(cfg: &KioskConfig, input: &str) -> anyhow::Result<()> {
    let token = Token::parse(input)
        .map_err(|_| anyhow::anyhow!("{}", i18n::text(Language::En, i18n::key::ENTER_VALID_TOKEN)))?;
    let client = ComplaintClient::new(cfg)?;
    match client.get_complaint(token.id()).await {
        Ok(complaint) => {
            wizard::print_complaint(Language::En, &complaint);
            Ok(())
        }
        Err(e) => {
            tracing::debug!("lookup failed: {e}");
            anyhow::bail!("{}", i18n::text(Language::En, i18n::key::INVALID_TOKEN))
        }
    }
}

async fn run_admin(cfg: &KioskConfig, action: AdminCmd) -> anyhow::Result<()> {
    let store = FileSessionStore::new(FileSessionStore::default_path());
    match action {
        AdminCmd::Login { employee_id, password, department } => {
            let department = AdminDepartment::parse(&department)
                .with_context(|| format!("unknown department: {department}"))?;
            let identity = admin::authenticate(&employee_id, &password, department)?;
            store.save(&identity)?;
            println!("Welcome, {} ({})", identity.name, identity.department);
            Ok(())
        }
        AdminCmd::Dashboard => {
            let identity = require_login(&store)?;
            let records = admin::demo_records();
            let visible: Vec<_> =
                admin::visible_to(&records, &identity).into_iter().cloned().collect();
            let today = chrono::Local::now().date_naive();
            let stats = admin::dashboard_stats(&visible, today);

            println!("{} — {}", style("Dashboard").bold(), identity.department);
            let mut table = Table::new();
            table.set_header(["Total", "Pending", "In Progress", "Resolved", "Today"]);
            table.add_row([
                stats.total.to_string(),
                stats.pending.to_string(),
                stats.in_progress.to_string(),
                stats.resolved.to_string(),
                stats.today.to_string(),
            ]);
            println!("{table}");

            if identity.department == AdminDepartment::All {
                let mut breakdown = Table::new();
                breakdown.set_header(["Department", "Total", "Pending", "In Progress", "Resolved"]);
                for row in admin::department_breakdown(&visible) {
                    breakdown.add_row([
                        row.department.wire_label().to_string(),
                        row.total.to_string(),
                        row.pending.to_string(),
                        row.in_progress.to_string(),
                        row.resolved.to_string(),
                    ]);
                }
                println!("{breakdown}");
            }
            Ok(())
        }
        AdminCmd::List { department, status, date } => {
            let identity = require_login(&store)?;
            let filter = RecordFilter {
                department: department.as_deref().map(parse_department).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let records = admin::demo_records();
            let visible: Vec<_> =
                admin::visible_to(&records, &identity).into_iter().cloned().collect();
            let mut table = Table::new();
            table.set_header(["Id", "Name", "Department", "Service", "Problem", "Date", "Status"]);
            for row in admin::filter_records(&visible, &filter) {
                table.add_row([
                    format!("#{}", row.id),
                    row.name.clone(),
                    row.department.wire_label().to_string(),
                    row.service.wire_label().to_string(),
                    row.problem.clone(),
                    row.date.to_string(),
                    row.status.to_string(),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        AdminCmd::UpdateStatus { id, status, remark } => {
            let identity = require_login(&store)?;
            let status = parse_status(&status)?;
            let update = admin::build_status_update(&identity, status, remark)?;
            let client = ComplaintClient::new(cfg)?;
            let complaint = client
                .update_status(id, &update)
                .await
                .with_context(|| format!("updating complaint #{id}"))?;
            println!(
                "Complaint #{} is now {} ({})",
                complaint.id, complaint.status, update.remark
            );
            Ok(())
        }
        AdminCmd::Logout => {
            store.clear()?;
            println!("Logged out");
            Ok(())
        }
    }
}

fn run_config(cfg: &KioskConfig, action: ConfigCmd) -> anyhow::Result<()> {
    match action {
        ConfigCmd::Show => {
            print!("{}", toml::to_string_pretty(cfg)?);
            Ok(())
        }
        ConfigCmd::WriteTemplate { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from("suvidha.toml"));
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            std::fs::write(&path, toml::to_string_pretty(&KioskConfig::default())?)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn require_login(store: &FileSessionStore) -> anyhow::Result<AdminIdentity> {
    store
        .load()?
        .context("not logged in (run `suvidha admin login` first)")
}

fn parse_department(s: &str) -> anyhow::Result<Department> {
    Department::ALL
        .into_iter()
        .find(|d| {
            d.wire_label().eq_ignore_ascii_case(s.trim())
                || AdminDepartment::Department(*d).label().eq_ignore_ascii_case(s.trim())
        })
        .with_context(|| format!("unknown department: {s}"))
}

fn parse_status(s: &str) -> anyhow::Result<ComplaintStatus> {
    let normalized: String = s
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    Ok(match normalized.as_str() {
        "pending" => ComplaintStatus::Pending,
        "received" => ComplaintStatus::Received,
        "underreview" => ComplaintStatus::UnderReview,
        "teamassigned" => ComplaintStatus::TeamAssigned,
        "inprogress" => ComplaintStatus::InProgress,
        "resolved" => ComplaintStatus::Resolved,
        "rejected" => ComplaintStatus::Rejected,
        _ => anyhow::bail!("unknown status: {s}"),
    })
}

fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {s}"))
}
