use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "navalha")]
#[command(bin_name = "navalha")]
#[command(version)]
#[command(about = "Terminal client for the Navalha barbershop management API")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Write a diagnostics log for this run under the config directory.
    #[arg(long, global = true)]
    pub diagnostics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Open the interactive booking and agenda UI")]
    Book,
    #[command(about = "Log in and store the API session token")]
    Login(LoginArgs),
    #[command(about = "Discard the stored API session token")]
    Logout,
    #[command(about = "Show the logged-in user")]
    Whoami,
    #[command(subcommand, about = "List and update appointments")]
    Appointments(AppointmentsCommand),
    #[command(subcommand, about = "Manage the client registry")]
    Clients(ClientsCommand),
    #[command(subcommand, about = "Manage the service catalog")]
    Services(ServicesCommand),
    #[command(subcommand, about = "Record and inspect point-of-sale sales")]
    Sales(SalesCommand),
    #[command(subcommand, about = "Track the cash register")]
    Cash(CashCommand),
    #[command(subcommand, about = "List staff users")]
    Staff(StaffCommand),
    #[command(about = "Show today's dashboard numbers")]
    Dashboard,
    #[command(about = "Show quick stats for a period")]
    Stats(StatsArgs),
    #[command(about = "Run environment and configuration checks")]
    Doctor,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    /// Falls back to the NAVALHA_PASSWORD environment variable.
    #[arg(long, env = "NAVALHA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum AppointmentsCommand {
    #[command(about = "List appointments, optionally filtered by date and barber")]
    List(AgendaArgs),
    #[command(about = "Book an appointment for a registered client")]
    Add {
        #[arg(long)]
        client_id: i64,
        #[arg(long)]
        barber_id: i64,
        #[arg(long)]
        service_id: i64,
        /// Start time, e.g. 2026-02-01T09:00:00.
        #[arg(long)]
        at: String,
        #[arg(long)]
        notes: Option<String>,
    },
    #[command(about = "Update an appointment's status")]
    SetStatus {
        id: i64,
        /// One of: agendado, confirmado, em_andamento, concluido, cancelado.
        status: String,
    },
}

#[derive(Debug, Args)]
pub struct AgendaArgs {
    /// Day to list, YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub barber_id: Option<i64>,
}

#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    #[command(about = "List registered clients")]
    List,
    #[command(about = "Register a new client")]
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        /// Record the client's LGPD consent.
        #[arg(long)]
        lgpd_consent: bool,
    },
    #[command(about = "Update a client's contact details")]
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    #[command(about = "Deactivate a client")]
    Remove { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    #[command(about = "List services")]
    List {
        /// Include inactive services.
        #[arg(long)]
        all: bool,
    },
    #[command(about = "Add a service to the catalog")]
    Add {
        #[arg(long)]
        name: String,
        /// Price in reais, e.g. 45.00.
        #[arg(long)]
        price: f64,
        /// Duration in minutes.
        #[arg(long)]
        duration: i64,
        #[arg(long)]
        description: Option<String>,
    },
    #[command(about = "Update a service")]
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Price in reais, e.g. 45.00.
        #[arg(long)]
        price: Option<f64>,
        /// Duration in minutes.
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SalesCommand {
    #[command(about = "List accepted payment methods")]
    Methods,
    #[command(about = "Record a sale")]
    Record {
        /// Sale item as SERVICE_ID or SERVICE_ID:QUANTITY; repeatable.
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        #[arg(long, default_value = "dinheiro")]
        method: String,
        /// Discount in reais.
        #[arg(long, default_value_t = 0.0)]
        discount: f64,
        #[arg(long)]
        client_id: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    #[command(about = "List sales, optionally within a date range")]
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CashCommand {
    #[command(about = "Show whether a register is open")]
    Status,
    #[command(about = "Open the cash register")]
    Open {
        /// Opening amount in reais.
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    #[command(about = "Close the open cash register")]
    Close {
        /// Counted closing amount in reais.
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    #[command(about = "List past cash registers")]
    History,
}

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    #[command(about = "List all staff users")]
    List,
    #[command(about = "List active barbers")]
    Barbers,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// One of: week, month, quarter, year.
    #[arg(long, default_value = "month")]
    pub period: String,
}
