//! CLI commands

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use folha_core::models::{
    ImportKind, LoginRequest, OrgChartCommand, OrgChartOutcome, PasswordChange, Period, ReportKind,
    ReportRequest, UserFilter, net_total,
};
use folha_core::session;
use folha_http::{FileTokenStore, FolhaClient, TokenStore};
use tracing::{debug, info};

use crate::config::{self, Settings};
use crate::output::{self, money, print_json, table};
use crate::state_dir::StateDir;

/// Everything a command needs, resolved once from the global flags
pub struct Context {
    pub settings: Settings,
    pub state_dir: StateDir,
    pub config_path: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    pub fn token_store(&self) -> Arc<FileTokenStore> {
        Arc::new(FileTokenStore::new(self.settings.token_file(&self.state_dir)))
    }

    /// API client backed by the persisted session
    pub fn client(&self) -> Result<FolhaClient> {
        let mut builder = FolhaClient::builder()
            .base_url(&self.settings.api.base_url)
            .token_store(self.token_store() as Arc<dyn TokenStore>)
            .refresh_skew(self.settings.refresh_skew());
        if let Some(timeout) = self.settings.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = &self.settings.api.user_agent {
            builder = builder.user_agent(agent);
        }
        Ok(builder.build()?)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// User login
        login: String,

        /// Password (read from stdin when omitted)
        #[arg(long, env = "FOLHA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Revoke the session and forget the stored tokens
    Logout,

    /// Show the stored session
    Status,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Org chart structure and associations
    Org {
        #[command(subcommand)]
        command: OrgCommands,
    },

    Employees {
        #[command(subcommand)]
        command: EmployeeCommands,
    },

    Payroll {
        #[command(subcommand)]
        command: PayrollCommands,
    },

    Benefits {
        #[command(subcommand)]
        command: BenefitCommands,
    },

    CostCenters {
        #[command(subcommand)]
        command: ListCommand,
    },

    BusinessLines {
        #[command(subcommand)]
        command: ListCommand,
    },

    JobRoles {
        #[command(subcommand)]
        command: ListCommand,
    },

    Rubrics {
        #[command(subcommand)]
        command: ListCommand,
    },

    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Headline payroll figures
    Dashboard,

    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Upload a spreadsheet to the backend
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with the default settings
    Init {
        /// Output file path (defaults to the platform config directory)
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective settings
    Show,
}

#[derive(Subcommand)]
pub enum OrgCommands {
    /// Print the org chart
    Tree {
        /// List the employees attached to each node
        #[arg(long)]
        employees: bool,
    },

    AttachEmployee { node: i64, employee: i64 },

    DetachEmployee { node: i64, employee: i64 },

    AttachCostCenter { node: i64, cost_center: i64 },

    DetachCostCenter { node: i64, cost_center: i64 },

    /// Move a node under a new parent
    Move {
        node: i64,

        /// New parent (omit to make the node a root)
        #[arg(long)]
        parent: Option<i64>,

        /// Position among the new siblings
        #[arg(long)]
        position: Option<i32>,
    },

    /// Make the tree under `root` the active org chart
    Activate { root: i64 },

    Deactivate,

    /// Employees not attached to any node
    Unassigned,
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    List,
    Show { id: i64 },
}

/// Optional date range; both ends must be given together
#[derive(Args)]
pub struct PeriodArgs {
    /// Period start (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Period end (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

impl PeriodArgs {
    fn period(&self) -> Result<Option<Period>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(Some(Period::new(from, to)?)),
            _ => Ok(None),
        }
    }

    fn required(&self) -> Result<Period> {
        self.period()?
            .context("--from and --to are required for this query")
    }
}

#[derive(Subcommand)]
pub enum PayrollCommands {
    /// Payroll entries with their net total
    List {
        #[command(flatten)]
        period: PeriodArgs,

        /// Only entries of this employee
        #[arg(long, conflicts_with = "cost_center")]
        employee: Option<i64>,

        /// Only entries of this cost center
        #[arg(long)]
        cost_center: Option<i64>,
    },

    /// Imported payroll summaries
    Summary {
        #[command(flatten)]
        period: PeriodArgs,

        /// Only the most recent imports
        #[arg(long, conflicts_with_all = ["from", "to"])]
        latest: bool,
    },
}

#[derive(Subcommand)]
pub enum BenefitCommands {
    List {
        /// Only benefits of this employee
        #[arg(long, conflicts_with = "cost_center")]
        employee: Option<i64>,

        /// Only benefits of this cost center (by description)
        #[arg(long)]
        cost_center: Option<String>,

        /// Reference date for --employee/--cost-center (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum ListCommand {
    List,
}

#[derive(Subcommand)]
pub enum UserCommands {
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        login: Option<String>,
    },

    /// Permissions known to the backend
    Permissions,

    /// Change a user's password
    ChangePassword {
        /// User id (defaults to the logged-in user)
        #[arg(long)]
        id: Option<i64>,

        #[arg(long, env = "FOLHA_PASSWORD", hide_env_values = true)]
        current: Option<String>,

        #[arg(long, env = "FOLHA_NEW_PASSWORD", hide_env_values = true)]
        new: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFamily {
    Payroll,
    Benefit,
}

impl From<ReportFamily> for ReportKind {
    fn from(family: ReportFamily) -> Self {
        match family {
            ReportFamily::Payroll => ReportKind::Payroll,
            ReportFamily::Benefit => ReportKind::Benefit,
        }
    }
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Generate a monthly report
    Generate {
        kind: ReportFamily,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
    },

    List { kind: ReportFamily },

    /// Save a generated report file
    Download {
        kind: ReportFamily,
        id: i64,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Generic payroll spreadsheet
    Folha { file: PathBuf },

    /// Payroll export from ADP
    FolhaAdp { file: PathBuf },

    Beneficios { file: PathBuf },
}

impl ImportCommands {
    fn split(self) -> (ImportKind, PathBuf) {
        match self {
            Self::Folha { file } => (ImportKind::Payroll, file),
            Self::FolhaAdp { file } => (ImportKind::PayrollAdp, file),
            Self::Beneficios { file } => (ImportKind::Benefits, file),
        }
    }
}

impl Commands {
    /// Commands that only touch local state
    pub fn is_local(&self) -> bool {
        matches!(self, Commands::Status | Commands::Config { .. })
    }

    pub async fn execute(self, ctx: &Context, client: &FolhaClient) -> Result<()> {
        match self {
            Commands::Login { login, password } => {
                let password = match password {
                    Some(password) => password,
                    None => read_secret("Password: ")?,
                };
                let tokens = client.login(&LoginRequest { login, password }).await?;
                info!(login = %tokens.login, "Logged in");
                println!("Logged in as {}", tokens.login);
                Ok(())
            }
            Commands::Logout => {
                client.logout().await?;
                println!("Logged out");
                Ok(())
            }
            Commands::Status => status(ctx, client),
            Commands::Config { command } => command.execute(ctx),
            Commands::Org { command } => command.execute(ctx, client).await,
            Commands::Employees { command } => command.execute(ctx, client).await,
            Commands::Payroll { command } => command.execute(ctx, client).await,
            Commands::Benefits { command } => command.execute(ctx, client).await,
            Commands::CostCenters { command: ListCommand::List } => {
                let items = client.list_cost_centers().await?;
                if ctx.json {
                    return print_json(&items);
                }
                let rows = items
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.description.clone(),
                            c.business_line_id.map(|id| id.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect::<Vec<_>>();
                println!("{}", table(&["ID", "Description", "Business line"], &rows));
                Ok(())
            }
            Commands::BusinessLines { command: ListCommand::List } => {
                let items = client.list_business_lines().await?;
                if ctx.json {
                    return print_json(&items);
                }
                let rows = items
                    .iter()
                    .map(|b| vec![b.id.to_string(), b.description.clone()])
                    .collect::<Vec<_>>();
                println!("{}", table(&["ID", "Description"], &rows));
                Ok(())
            }
            Commands::JobRoles { command: ListCommand::List } => {
                let items = client.list_job_roles().await?;
                if ctx.json {
                    return print_json(&items);
                }
                let rows = items
                    .iter()
                    .map(|r| vec![r.id.to_string(), r.description.clone()])
                    .collect::<Vec<_>>();
                println!("{}", table(&["ID", "Description"], &rows));
                Ok(())
            }
            Commands::Rubrics { command: ListCommand::List } => {
                let items = client.list_rubrics().await?;
                if ctx.json {
                    return print_json(&items);
                }
                let rows = items
                    .iter()
                    .map(|r| {
                        vec![
                            r.id.to_string(),
                            r.code.clone(),
                            r.description.clone(),
                            r.kind.to_string(),
                        ]
                    })
                    .collect::<Vec<_>>();
                println!("{}", table(&["ID", "Code", "Description", "Kind"], &rows));
                Ok(())
            }
            Commands::Users { command } => command.execute(ctx, client).await,
            Commands::Dashboard => dashboard(ctx, client).await,
            Commands::Reports { command } => command.execute(ctx, client).await,
            Commands::Import { command } => {
                let (kind, file) = command.split();
                let contents = tokio::fs::read(&file)
                    .await
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let file_name = file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .context("import file needs a UTF-8 file name")?;
                let outcome = client.import_file(kind, file_name, contents).await?;
                if ctx.json {
                    return print_json(&outcome);
                }
                if !outcome.success {
                    bail!(
                        "{kind} import rejected: {}",
                        outcome.message.as_deref().unwrap_or("no details")
                    );
                }
                println!(
                    "{kind} import accepted: {} record(s) processed",
                    outcome.records_processed
                );
                if let Some(message) = outcome.message {
                    println!("{message}");
                }
                Ok(())
            }
        }
    }
}

/// Prompt on the terminal without echoing the input
fn read_secret(prompt: &str) -> Result<String> {
    Ok(rpassword::prompt_password(prompt)?)
}

fn status(ctx: &Context, client: &FolhaClient) -> Result<()> {
    let tokens = client.session().tokens()?;
    let now = session::now();
    let skew = ctx.settings.refresh_skew();
    if ctx.json {
        return print_json(&serde_json::json!({
            "baseUrl": client.base_url(),
            "status": session::session_status(tokens.as_ref(), now, skew).to_string(),
            "login": tokens.as_ref().map(|t| &t.login),
            "tokenExpiration": tokens.as_ref().map(|t| t.token_expiration),
            "refreshExpiration": tokens.as_ref().map(|t| t.refresh_expiration),
        }));
    }
    println!(
        "{}",
        output::render_status(client.base_url(), tokens.as_ref(), now, skew)
    );
    Ok(())
}

impl ConfigCommands {
    fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            ConfigCommands::Init { output, force } => {
                let path = output
                    .or_else(|| ctx.config_path.clone())
                    .unwrap_or_else(|| ctx.state_dir.config_file());
                config::generate_default_config(&path, force)?;
                println!("Configuration written to {}", path.display());
                Ok(())
            }
            ConfigCommands::Show => {
                if ctx.json {
                    return print_json(&ctx.settings);
                }
                print!("{}", toml::to_string_pretty(&ctx.settings)?);
                Ok(())
            }
        }
    }
}

fn describe_outcome(outcome: &OrgChartOutcome) -> String {
    match outcome {
        OrgChartOutcome::EmployeeAttached(a) => {
            format!("Employee {} attached to node {}", a.employee_id, a.node_id)
        }
        OrgChartOutcome::CostCenterAttached(a) => {
            format!("Cost center {} attached to node {}", a.cost_center_id, a.node_id)
        }
        OrgChartOutcome::Detached => "Detached".to_string(),
        OrgChartOutcome::Moved(node) => match node.parent_id {
            Some(parent) => format!("Node {} moved under {parent}", node.id),
            None => format!("Node {} is now a root", node.id),
        },
    }
}

impl OrgCommands {
    fn command(&self) -> Option<OrgChartCommand> {
        Some(match *self {
            OrgCommands::AttachEmployee { node, employee } => OrgChartCommand::AttachEmployee {
                node_id: node,
                employee_id: employee,
            },
            OrgCommands::DetachEmployee { node, employee } => OrgChartCommand::DetachEmployee {
                node_id: node,
                employee_id: employee,
            },
            OrgCommands::AttachCostCenter { node, cost_center } => {
                OrgChartCommand::AttachCostCenter {
                    node_id: node,
                    cost_center_id: cost_center,
                }
            }
            OrgCommands::DetachCostCenter { node, cost_center } => {
                OrgChartCommand::DetachCostCenter {
                    node_id: node,
                    cost_center_id: cost_center,
                }
            }
            OrgCommands::Move {
                node,
                parent,
                position,
            } => OrgChartCommand::MoveNode {
                node_id: node,
                new_parent_id: parent,
                new_position: position,
            },
            _ => return None,
        })
    }

    async fn execute(self, ctx: &Context, client: &FolhaClient) -> Result<()> {
        if let Some(command) = self.command() {
            let tree = client.org_tree().await?;
            debug!(nodes = tree.len(), ?command, "Applying org chart command");
            let outcome = client.apply_checked(&tree, command).await?;
            println!("{}", describe_outcome(&outcome));
            return Ok(());
        }

        match self {
            OrgCommands::Tree { employees } => {
                let tree = client.org_tree().await?;
                if ctx.json {
                    return print_json(&tree.to_nested());
                }
                let all = if employees {
                    Some(client.list_employees().await?)
                } else {
                    None
                };
                println!("{}", output::render_tree(&tree, all.as_deref()));
                Ok(())
            }
            OrgCommands::Activate { root } => {
                client.activate_org_chart(root).await?;
                println!("Org chart rooted at {root} is now active");
                Ok(())
            }
            OrgCommands::Deactivate => {
                client.deactivate_org_chart().await?;
                println!("Org chart deactivated");
                Ok(())
            }
            OrgCommands::Unassigned => {
                let (tree, all) = tokio::try_join!(client.org_tree(), client.list_employees())?;
                let unassigned = tree.unassigned_employees(&all);
                if ctx.json {
                    return print_json(&unassigned);
                }
                let rows = unassigned
                    .iter()
                    .map(|e| vec![e.id.to_string(), e.name.clone()])
                    .collect::<Vec<_>>();
                println!("{}", table(&["ID", "Name"], &rows));
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl EmployeeCommands {
    async fn execute(self, ctx: &Context, client: &FolhaClient) -> Result<()> {
        match self {
            EmployeeCommands::List => {
                let employees = client.list_employees().await?;
                if ctx.json {
                    return print_json(&employees);
                }
                let rows = employees
                    .iter()
                    .map(|e| {
                        vec![
                            e.id.to_string(),
                            e.name.clone(),
                            e.job_role.clone().unwrap_or_default(),
                            e.cost_center.clone().unwrap_or_default(),
                        ]
                    })
                    .collect::<Vec<_>>();
                println!("{}", table(&["ID", "Name", "Job role", "Cost center"], &rows));
                Ok(())
            }
            EmployeeCommands::Show { id } => {
                let employee = client.get_employee(id).await?;
                if ctx.json {
                    return print_json(&employee);
                }
                let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".into());
                println!("{} [{}]", employee.name, employee.id);
                println!("  Job role:      {}", field(&employee.job_role));
                println!("  Cost center:   {}", field(&employee.cost_center));
                println!("  Business line: {}", field(&employee.business_line));
                println!(
                    "  Hired on:      {}",
                    employee
                        .hired_on
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".into())
                );
                Ok(())
            }
        }
    }
}

impl PayrollCommands {
    async fn execute(self, ctx: &Context, client: &FolhaClient) -> Result<()> {
        match self {
            PayrollCommands::List {
                period,
                employee,
                cost_center,
            } => {
                let entries = match (employee, cost_center) {
                    (Some(id), _) => client.payroll_by_employee(id, period.required()?).await?,
                    (_, Some(id)) => client.payroll_by_cost_center(id, period.required()?).await?,
                    _ => client.list_payroll(period.period()?).await?,
                };
                if ctx.json {
                    return print_json(&entries);
                }
                let rows = entries
                    .iter()
                    .map(|e| {
                        vec![
                            e.employee_name.clone().unwrap_or_else(|| e.employee_id.to_string()),
                            e.rubric_code.clone().unwrap_or_else(|| e.rubric_id.to_string()),
                            format!("{}..{}", e.period_start, e.period_end),
                            money(e.amount),
                        ]
                    })
                    .collect::<Vec<_>>();
                println!("{}", table(&["Employee", "Rubric", "Period", "Amount"], &rows));

                let kinds = client.rubric_kinds().await?;
                let (net, unknown) = net_total(&entries, &kinds);
                println!("\nNet total: {}", money(net));
                if unknown > 0 {
                    println!("({unknown} entries with unknown rubrics left out)");
                }
                Ok(())
            }
            PayrollCommands::Summary { period, latest } => {
                let summaries = if latest {
                    client.latest_payroll_summaries().await?
                } else {
                    match period.period()? {
                        Some(period) => client.payroll_summaries_in(period).await?,
                        None => client.list_payroll_summaries().await?,
                    }
                };
                if ctx.json {
                    return print_json(&summaries);
                }
                let rows = summaries
                    .iter()
                    .map(|s| {
                        vec![
                            format!("{}..{}", s.competence_start, s.competence_end),
                            s.total_employees.to_string(),
                            money(s.total_payments),
                            money(s.total_deductions),
                            money(s.total_net),
                        ]
                    })
                    .collect::<Vec<_>>();
                println!(
                    "{}",
                    table(
                        &["Competence", "Employees", "Payments", "Deductions", "Net"],
                        &rows
                    )
                );
                Ok(())
            }
        }
    }
}

impl BenefitCommands {
    async fn execute(self, ctx: &Context, client: &FolhaClient) -> Result<()> {
        let BenefitCommands::List {
            employee,
            cost_center,
            date,
        } = self;
        let date = date.unwrap_or_else(|| session::now().date());
        let benefits = match (employee, cost_center) {
            (Some(id), _) => client.benefits_by_employee(id, date).await?,
            (_, Some(cc)) => client.benefits_by_cost_center(&cc, date).await?,
            _ => client.list_benefits().await?,
        };
        if ctx.json {
            return print_json(&benefits);
        }
        let rows = benefits
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.employee_name.clone().unwrap_or_else(|| b.employee_id.to_string()),
                    b.description.clone(),
                    money(b.amount),
                    b.starts_on.to_string(),
                    b.ends_on.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect::<Vec<_>>();
        println!(
            "{}",
            table(&["ID", "Employee", "Description", "Amount", "From", "Until"], &rows)
        );
        Ok(())
    }
}

impl UserCommands {
    async fn execute(self, ctx: &Context, client: &FolhaClient) -> Result<()> {
        match self {
            UserCommands::List { name, login } => {
                let users = client
                    .list_users(&UserFilter {
                        name,
                        login,
                        employee_id: None,
                    })
                    .await?;
                if ctx.json {
                    return print_json(&users);
                }
                let rows = users
                    .iter()
                    .map(|u| {
                        vec![
                            u.id.to_string(),
                            u.login.clone(),
                            u.name.clone().unwrap_or_default(),
                            u.permissions.join(","),
                        ]
                    })
                    .collect::<Vec<_>>();
                println!("{}", table(&["ID", "Login", "Name", "Permissions"], &rows));
                Ok(())
            }
            UserCommands::Permissions => {
                let permissions = client.list_permissions().await?;
                if ctx.json {
                    return print_json(&permissions);
                }
                for permission in permissions {
                    println!("{permission}");
                }
                Ok(())
            }
            UserCommands::ChangePassword { id, current, new } => {
                let id = match id {
                    Some(id) => id,
                    None => {
                        let tokens = client
                            .session()
                            .tokens()?
                            .context("not logged in; run `folha login` first")?;
                        client
                            .find_user_by_login(&tokens.login)
                            .await?
                            .with_context(|| format!("no user with login {}", tokens.login))?
                            .id
                    }
                };
                let current = match current {
                    Some(current) => current,
                    None => read_secret("Current password: ")?,
                };
                let new = match new {
                    Some(new) => new,
                    None => read_secret("New password: ")?,
                };
                client
                    .change_password(id, &PasswordChange { current, new })
                    .await?;
                println!("Password changed");
                Ok(())
            }
        }
    }
}

async fn dashboard(ctx: &Context, client: &FolhaClient) -> Result<()> {
    let stats = client.dashboard_stats().await?;
    if ctx.json {
        return print_json(&stats);
    }
    println!("Employees:        {}", stats.total_employees);
    println!("Active benefits:  {}", stats.active_benefits);
    println!("Monthly cost:     {}", money(stats.monthly_payroll_cost));
    println!("Earnings:         {}", money(stats.total_earnings));
    println!("Deductions:       {}", money(stats.total_deductions));
    println!("Net:              {}", money(stats.net_total()));

    if !stats.by_cost_center.is_empty() {
        let rows = stats
            .by_cost_center
            .iter()
            .map(|u| {
                vec![
                    u.description.clone(),
                    u.employee_count.to_string(),
                    money(u.total),
                ]
            })
            .collect::<Vec<_>>();
        println!("\n{}", table(&["Cost center", "Employees", "Total"], &rows));
    }

    if !stats.monthly_trend.is_empty() {
        let rows = stats
            .monthly_trend
            .iter()
            .map(|m| vec![m.month.clone(), m.employee_count.to_string(), money(m.total)])
            .collect::<Vec<_>>();
        println!("\n{}", table(&["Month", "Employees", "Total"], &rows));
    }
    Ok(())
}

impl ReportCommands {
    async fn execute(self, ctx: &Context, client: &FolhaClient) -> Result<()> {
        match self {
            ReportCommands::Generate { kind, month, year } => {
                let report = client
                    .generate_report(kind.into(), &ReportRequest { month, year })
                    .await?;
                if ctx.json {
                    return print_json(&report);
                }
                println!(
                    "Report {} for {:02}/{} is {:?}",
                    report.id, report.month, report.year, report.status
                );
                Ok(())
            }
            ReportCommands::List { kind } => {
                let reports = client.list_reports(kind.into()).await?;
                if ctx.json {
                    return print_json(&reports);
                }
                let rows = reports
                    .iter()
                    .map(|r| {
                        let total = r.total_amount.or(r.total_payroll);
                        vec![
                            r.id.to_string(),
                            format!("{:02}/{}", r.month, r.year),
                            format!("{:?}", r.status),
                            total.map(money).unwrap_or_default(),
                            r.error.clone().unwrap_or_default(),
                        ]
                    })
                    .collect::<Vec<_>>();
                println!(
                    "{}",
                    table(&["ID", "Month", "Status", "Total", "Error"], &rows)
                );
                Ok(())
            }
            ReportCommands::Download { kind, id, output } => {
                let bytes = client.download_report(kind.into(), id).await?;
                tokio::fs::write(&output, &bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("Saved {} bytes to {}", bytes.len(), output.display());
                Ok(())
            }
        }
    }
}
