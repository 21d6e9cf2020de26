use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use homecare::config::AppConfig;
use homecare::db;
use homecare::handlers::{self, bookings::BookingInput, Output};
use homecare::models::{FieldOfWork, Session};
use homecare::services::auth::{self, EmployeeRegistration};
use homecare::services::backend::http::HttpBackend;
use homecare::state::AppState;

#[derive(Parser)]
#[command(name = "homecare", version, about = "Home-services booking client")]
struct Cli {
    /// Backend base URL (overrides API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Local store path (overrides DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as an end user
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOMECARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an end-user account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOMECARE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// List service categories
    Categories,
    /// List workers in a category
    Workers { field: FieldOfWork },
    /// Book a worker
    Book(BookArgs),
    /// Show the user's bookings
    Bookings {
        #[arg(long, env = "HOMECARE_USER_EMAIL")]
        email: String,
    },
    /// Show the configured backend and the signed-in employee
    Status,
    /// Employee screens
    #[command(subcommand)]
    Employee(EmployeeCommands),
}

#[derive(Args)]
struct BookArgs {
    #[arg(long, env = "HOMECARE_USER_EMAIL")]
    email: String,
    #[arg(long)]
    field: FieldOfWork,
    #[arg(long)]
    employee_id: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    pincode: String,
    /// YYYY-MM-DD HH:MM
    #[arg(long, default_value = "")]
    date_time: String,
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Subcommand)]
enum EmployeeCommands {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOMECARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Signup(EmployeeSignupArgs),
    /// Show assigned orders (defaults to the signed-in employee)
    Orders {
        #[arg(long)]
        email: Option<String>,
    },
    Accept {
        booking_id: String,
        #[arg(long)]
        email: Option<String>,
    },
    Reject {
        booking_id: String,
        #[arg(long)]
        email: Option<String>,
    },
    ValidateOtp {
        booking_id: String,
        #[arg(long)]
        otp: String,
        #[arg(long)]
        email: Option<String>,
    },
    Logout,
}

#[derive(Args)]
struct EmployeeSignupArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    aadhar: String,
    #[arg(long)]
    bank_account: String,
    #[arg(long, env = "HOMECARE_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long)]
    field: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(path) = cli.database_url.clone() {
        config = config.with_database_url(path);
    }

    let conn = db::init_db(&config.database_url)?;
    let backend = HttpBackend::from_config(&config)?;
    tracing::debug!(api_url = %config.api_url, "using backend");

    let state = AppState {
        config,
        backend: Arc::new(backend),
        store: Arc::new(Mutex::new(conn)),
    };

    let output = run(&state, cli.command).await;
    print!("{output}");

    Ok(if output.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn run(state: &AppState, command: Commands) -> Output {
    match command {
        Commands::Login { email, password } => {
            handlers::auth::user_login(state, &email, &password).await
        }
        Commands::Signup {
            email,
            password,
            confirm_password,
        } => handlers::auth::user_signup(state, &email, &password, &confirm_password).await,
        Commands::Categories => handlers::catalog::categories(state),
        Commands::Workers { field } => handlers::catalog::workers(state, field).await,
        Commands::Book(args) => {
            let session = Session::new(args.email);
            let input = BookingInput {
                phone: args.phone,
                address: args.address,
                city: args.city,
                pincode: args.pincode,
                date_time: args.date_time,
                description: args.description,
            };
            let today = chrono::Local::now().date_naive();
            handlers::bookings::book(state, &session, args.field, &args.employee_id, input, today)
                .await
        }
        Commands::Bookings { email } => {
            handlers::bookings::my_bookings(state, &Session::new(email)).await
        }
        Commands::Status => handlers::auth::status(state),
        Commands::Employee(command) => run_employee(state, command).await,
    }
}

async fn run_employee(state: &AppState, command: EmployeeCommands) -> Output {
    match command {
        EmployeeCommands::Login { email, password } => {
            handlers::auth::employee_login(state, &email, &password).await
        }
        EmployeeCommands::Signup(args) => {
            let registration = EmployeeRegistration {
                name: args.name,
                email: args.email,
                phone: args.phone,
                aadhar: args.aadhar,
                bank_account: args.bank_account,
                password: args.password,
                confirm_password: args.confirm_password,
                field_of_work: args.field,
            };
            handlers::auth::employee_signup(state, &registration).await
        }
        EmployeeCommands::Orders { email } => {
            let email = employee_email(state, email);
            handlers::employee::orders(state, email.as_deref()).await
        }
        EmployeeCommands::Accept { booking_id, email } => {
            let email = employee_email(state, email);
            handlers::employee::accept(state, email.as_deref(), &booking_id).await
        }
        EmployeeCommands::Reject { booking_id, email } => {
            let email = employee_email(state, email);
            handlers::employee::reject(state, email.as_deref(), &booking_id).await
        }
        EmployeeCommands::ValidateOtp {
            booking_id,
            otp,
            email,
        } => {
            let email = employee_email(state, email);
            handlers::employee::validate_otp(state, email.as_deref(), &booking_id, &otp).await
        }
        EmployeeCommands::Logout => handlers::auth::employee_logout(state),
    }
}

/// Explicit `--email` wins; otherwise the employee signed in on this device.
fn employee_email(state: &AppState, explicit: Option<String>) -> Option<String> {
    explicit.or_else(|| match auth::logged_in_employee(&state.store) {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!(error = %e, "could not read employee marker");
            None
        }
    })
}
