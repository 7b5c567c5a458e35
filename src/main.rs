//! Command-line shell for the console.
//!
//! Each screen is a subcommand. Every screen except `login` requires a stored
//! session; without one the command is redirected to the login hint, the same
//! way the route table sends anonymous visitors to `/login`.

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use opsconsole::api::reports::{CumulativeSalary, DepartmentAnalysis, EmployeeRanking, Report};
use opsconsole::api::{ApiClient, Departments, Employees, Locations, Resource, Tiers};
use opsconsole::app::{
    resolve, AuditLogController, CrudController, OverviewController, ReportController, Route, NAV_ITEMS,
};
use opsconsole::domain::audit::parse_bound;
use opsconsole::domain::form::parse_assignment;
use opsconsole::domain::HttpMethod;
use opsconsole::session::{JsonSessionStorage, LoginOutcome, SessionStore};
use opsconsole::ui::viewmodel::{self, Tabular};
use opsconsole::ui::{render_form, render_nav, render_table};
use opsconsole::{Config, Result, Theme, ENV_API_URL, ENV_DATA_DIR};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Instrument;

#[derive(Debug, Parser)]
#[command(name = "opsconsole", version, about = "Administrative console for the records service")]
struct Cli {
    /// Config file (default: ~/.config/opsconsole/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true, env = ENV_API_URL)]
    api_url: Option<String>,

    /// Directory for the session file and trace log
    #[arg(long, global = true, env = ENV_DATA_DIR)]
    data_dir: Option<PathBuf>,

    /// Also print log events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage employees
    #[command(subcommand)]
    Employees(EntityCommand),
    /// Manage departments
    #[command(subcommand)]
    Departments(EntityCommand),
    /// Manage locations
    #[command(subcommand)]
    Locations(EntityCommand),
    /// Manage tiers
    #[command(subcommand)]
    Tiers(EntityCommand),
    /// Show an analytics report
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
    },
    /// Browse the API audit log
    Logs(LogArgs),
    /// Show entity totals
    Overview,
    /// Sign in and store the session
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user and the screens available
    Whoami,
}

#[derive(Debug, Subcommand)]
enum EntityCommand {
    /// List one page
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show one record
    Show { id: String },
    /// Create a record from field=value pairs
    Create {
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Update a record with field=value pairs
    Update {
        id: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Delete a record
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportKind {
    CumulativeSalary,
    DepartmentAnalysis,
    EmployeeRanking,
}

#[derive(Debug, Args)]
struct LogArgs {
    /// Window start, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS` (default: a week ago)
    #[arg(long)]
    start: Option<String>,
    /// Window end (default: now)
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    user: Option<String>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    method: Option<HttpMethod>,
    #[arg(long)]
    status: Option<u16>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    page_size: Option<u32>,
}

/// Everything a command needs.
struct Shell {
    config: Config,
    theme: Theme,
    session: Arc<SessionStore>,
    client: ApiClient,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if cli.no_color {
        config.color = false;
    }

    opsconsole::observability::init_tracing(&config, cli.verbose);
    let span = tracing::info_span!("command", name = command_name(&cli.command));

    let session = if cli.ephemeral {
        SessionStore::ephemeral()
    } else {
        SessionStore::bootstrap(Box::new(JsonSessionStorage::in_dir(&config.data_dir())?))
    };
    let session = Arc::new(session);
    let client = ApiClient::new(&config.api_url, config.request_timeout(), Arc::clone(&session))?;
    let shell = Shell {
        theme: config.theme(),
        config,
        session,
        client,
    };

    let was_authenticated = shell.session.is_authenticated();
    let signing = matches!(cli.command, Command::Login { .. } | Command::Logout);
    let code = shell.dispatch(cli.command).instrument(span).await?;

    if was_authenticated && !signing && !shell.session.is_authenticated() {
        eprintln!("Session expired. Sign in again with `opsconsole login <email>`.");
    }
    Ok(code)
}

const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Employees(_) => "employees",
        Command::Departments(_) => "departments",
        Command::Locations(_) => "locations",
        Command::Tiers(_) => "tiers",
        Command::Report { .. } => "report",
        Command::Logs(_) => "logs",
        Command::Overview => "overview",
        Command::Login { .. } => "login",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
    }
}

impl Shell {
    async fn dispatch(&self, command: Command) -> Result<ExitCode> {
        match command {
            Command::Login { email, password } => self.login(&email, password).await,
            Command::Logout => {
                self.session.logout(&self.client).await;
                println!("Signed out.");
                Ok(ExitCode::SUCCESS)
            }
            Command::Whoami => Ok(self.whoami()),
            Command::Overview => {
                if !self.enter(Route::Index) {
                    return Ok(ExitCode::from(2));
                }
                self.overview().await
            }
            Command::Employees(cmd) => self.entity::<Employees>(Route::Employees, cmd).await,
            Command::Departments(cmd) => self.entity::<Departments>(Route::Departments, cmd).await,
            Command::Locations(cmd) => self.entity::<Locations>(Route::Locations, cmd).await,
            Command::Tiers(cmd) => self.entity::<Tiers>(Route::Tiers, cmd).await,
            Command::Report { kind } => match kind {
                ReportKind::CumulativeSalary => self.report::<CumulativeSalary>(Route::CumulativeSalary).await,
                ReportKind::DepartmentAnalysis => {
                    self.report::<DepartmentAnalysis>(Route::DepartmentAnalysis).await
                }
                ReportKind::EmployeeRanking => self.report::<EmployeeRanking>(Route::EmployeeRanking).await,
            },
            Command::Logs(args) => self.logs(args).await,
        }
    }

    /// Applies session gating. Prints the login hint and returns `false` when
    /// the route resolves to the login screen.
    fn enter(&self, route: Route) -> bool {
        let resolved = resolve(route, self.session.is_authenticated());
        tracing::debug!(requested = %route, resolved = %resolved, "route resolved");
        if resolved == Route::Login {
            eprintln!("Not signed in. Run `opsconsole login <email>` first.");
            return false;
        }
        true
    }

    async fn login(&self, email: &str, password: Option<String>) -> Result<ExitCode> {
        let password = match password {
            Some(password) => password,
            None => prompt("Password: ")?,
        };

        match self.session.login(&self.client, email, &password).await {
            LoginOutcome::Success(identity) => {
                println!("Signed in as {} <{}>", identity.employee_name, identity.email);
                Ok(ExitCode::SUCCESS)
            }
            LoginOutcome::Failure { reason } => {
                eprintln!("{reason}");
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn whoami(&self) -> ExitCode {
        let Some(identity) = self.session.identity() else {
            println!("Not signed in.");
            return ExitCode::from(2);
        };
        println!(
            "{} <{}> ({})",
            identity.employee_name, identity.email, identity.employee_number
        );
        print!("{}", render_nav(&NAV_ITEMS, Route::HOME, &self.theme));
        ExitCode::SUCCESS
    }

    async fn overview(&self) -> Result<ExitCode> {
        let mut screen = OverviewController::new(self.client.clone());
        screen.refresh().await;
        let view = viewmodel::overview_view(screen.counts(), screen.error_message());
        print!("{}", render_table(&view, &self.theme));
        Ok(exit_for(screen.error_message()))
    }

    async fn entity<R>(&self, route: Route, command: EntityCommand) -> Result<ExitCode>
    where
        R: Resource,
        R::Record: Tabular,
    {
        if !self.enter(route) {
            return Ok(ExitCode::from(2));
        }

        let mut screen = CrudController::<R>::new(self.client.clone(), self.config.page_size);

        match command {
            EntityCommand::List { page, page_size } => {
                let page_size = page_size.unwrap_or(self.config.page_size);
                screen.refresh_page(page.saturating_sub(1), page_size).await;
            }
            EntityCommand::Show { id } => {
                let Some(record) = screen.load(&id).await else {
                    return Ok(self.show_failed_form(&screen));
                };
                let title = format!("{} {id}", viewmodel::title_case(R::NOUN));
                print!("{}", render_table(&viewmodel::detail_view(&title, &record), &self.theme));
                return Ok(ExitCode::SUCCESS);
            }
            EntityCommand::Create { fields } => {
                screen.open_create_dialog();
                fill(&mut screen, &fields)?;
                if !screen.submit().await {
                    return Ok(self.show_failed_form(&screen));
                }
            }
            EntityCommand::Update { id, fields } => {
                let Some(record) = screen.load(&id).await else {
                    return Ok(self.show_failed_form(&screen));
                };
                screen.open_edit_dialog(&record);
                fill(&mut screen, &fields)?;
                if !screen.submit().await {
                    return Ok(self.show_failed_form(&screen));
                }
            }
            EntityCommand::Delete { id, yes } => {
                let confirmed = if yes {
                    screen.remove(&id, &|_: &str| true).await
                } else {
                    screen.remove(&id, &confirm_on_stdin).await
                };
                if !confirmed && screen.error_message().is_none() {
                    println!("Cancelled.");
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }

        print!("{}", render_table(&viewmodel::crud_view(&screen), &self.theme));
        Ok(exit_for(screen.error_message()))
    }

    fn show_failed_form<R: Resource>(&self, screen: &CrudController<R>) -> ExitCode {
        if let Some(banner) = screen.error_message() {
            eprintln!("{}", self.theme.paint(banner, opsconsole::ui::format::Tone::Error));
        }
        if let Some(form) = viewmodel::form_view(screen) {
            eprint!("{}", render_form(&form, &self.theme));
        }
        ExitCode::FAILURE
    }

    async fn report<K>(&self, route: Route) -> Result<ExitCode>
    where
        K: Report,
        K::Row: Tabular,
    {
        if !self.enter(route) {
            return Ok(ExitCode::from(2));
        }

        let mut screen = ReportController::<K>::new(self.client.clone());
        screen.mount().await;
        print!("{}", render_table(&viewmodel::report_view(&screen), &self.theme));
        Ok(exit_for(screen.error_message()))
    }

    async fn logs(&self, args: LogArgs) -> Result<ExitCode> {
        if !self.enter(Route::Logs) {
            return Ok(ExitCode::from(2));
        }

        let page_size = args.page_size.unwrap_or(self.config.audit_page_size);
        let mut screen = AuditLogController::new(self.client.clone(), page_size, Local::now().naive_local());

        if let Some(start) = args.start.as_deref() {
            screen.set_start(parse_bound(start)?);
        }
        if let Some(end) = args.end.as_deref() {
            screen.set_end(parse_bound(end)?);
        }
        if let Some(user) = args.user {
            screen.set_user_identifier(user);
        }
        if let Some(endpoint) = args.endpoint {
            screen.set_endpoint(endpoint);
        }
        screen.set_method(args.method);
        screen.set_status(args.status);

        screen.apply_filters_at(args.page.saturating_sub(1)).await;

        print!("{}", render_table(&viewmodel::audit_view(&screen), &self.theme));
        Ok(exit_for(screen.error_message()))
    }
}

fn fill<R: Resource>(screen: &mut CrudController<R>, fields: &[String]) -> Result<()> {
    for entry in fields {
        let (field, value) = parse_assignment(entry)?;
        screen.set_field(field, value)?;
    }
    Ok(())
}

fn exit_for(banner: Option<&str>) -> ExitCode {
    if banner.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn prompt(label: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm_on_stdin(question: &str) -> bool {
    prompt(&format!("{question} [y/N] "))
        .map(|answer| matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
        .unwrap_or(false)
}
