use anyhow::{Context, Result, bail};
use comfy_table::{Cell, ContentArrangement, Table};
use navalha_app::App;
use navalha_core::doctor::{CheckState, DoctorReport};
use navalha_core::models::{
    AppointmentDraft, CashRegister, ClientDraft, ClientUpdate, SaleDraft, SaleItemDraft,
    ServiceDraft, ServiceUpdate, format_brl,
};

use crate::cli::{
    AppointmentsCommand, CashCommand, Cli, ClientsCommand, Command, SalesCommand,
    ServicesCommand, StaffCommand,
};
use crate::diagnostics::DiagnosticsSession;

pub fn run_with_deps(cli: Cli, app: &App<'_>, diagnostics: &DiagnosticsSession) -> Result<()> {
    match cli.command {
        Command::Book => run_book(app, diagnostics),
        Command::Login(args) => {
            let result = app.login(&args.email, &args.password)?;
            diagnostics.record("login succeeded");
            println!("Logged in as {}.", result.email);
            Ok(())
        }
        Command::Logout => {
            match app.logout()? {
                Some(email) => println!("Logged out {email}."),
                None => println!("No stored session."),
            }
            Ok(())
        }
        Command::Whoami => {
            let user = app.current_user()?;
            println!("{} <{}> ({})", user.name, user.email, user.role);
            Ok(())
        }
        Command::Appointments(command) => run_appointments(app, command),
        Command::Clients(command) => run_clients(app, command),
        Command::Services(command) => run_services(app, command),
        Command::Sales(command) => run_sales(app, command),
        Command::Cash(command) => run_cash(app, command),
        Command::Staff(command) => run_staff(app, command),
        Command::Dashboard => run_dashboard(app),
        Command::Stats(args) => run_stats(app, &args.period),
        Command::Doctor => run_doctor_command(app),
    }
}

fn run_book(app: &App<'_>, diagnostics: &DiagnosticsSession) -> Result<()> {
    let config = app.ensure_config_ready()?;
    diagnostics.record("opening booking ui");

    let _ = navalha_tui::run_root(app, config.api.base_url.trim())?;
    Ok(())
}

fn run_appointments(app: &App<'_>, command: AppointmentsCommand) -> Result<()> {
    match command {
        AppointmentsCommand::List(args) => {
            let rows = app.agenda(args.date.as_deref(), args.barber_id)?;
            if rows.is_empty() {
                println!("No appointments found.");
                return Ok(());
            }

            let mut table = new_table(vec!["Id", "When", "Client", "Barber", "Service", "Status"]);
            for row in rows {
                table.add_row(vec![
                    Cell::new(row.id),
                    Cell::new(row.date_time),
                    Cell::new(row.client),
                    Cell::new(row.barber),
                    Cell::new(row.service),
                    Cell::new(row.status),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        AppointmentsCommand::Add {
            client_id,
            barber_id,
            service_id,
            at,
            notes,
        } => {
            let created = app.book_for_client(AppointmentDraft {
                client_id,
                barber_id,
                service_id,
                date_time: at,
                notes,
            })?;
            println!(
                "Created appointment {} at {} [{}].",
                created.id, created.date_time, created.status
            );
            Ok(())
        }
        AppointmentsCommand::SetStatus { id, status } => {
            let updated = app.set_appointment_status(id, &status)?;
            println!("Appointment {} is now '{}'.", updated.id, updated.status);
            Ok(())
        }
    }
}

fn run_clients(app: &App<'_>, command: ClientsCommand) -> Result<()> {
    match command {
        ClientsCommand::List => {
            let clients = app.list_clients()?;
            if clients.is_empty() {
                println!("No clients registered.");
                return Ok(());
            }

            let mut table = new_table(vec!["Id", "Name", "Phone", "Email", "Active", "LGPD"]);
            for client in clients {
                table.add_row(vec![
                    Cell::new(client.id),
                    Cell::new(client.name),
                    Cell::new(client.phone),
                    Cell::new(client.email.unwrap_or_default()),
                    Cell::new(yes_no(client.active)),
                    Cell::new(yes_no(client.lgpd_consent)),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        ClientsCommand::Add {
            name,
            phone,
            email,
            lgpd_consent,
        } => {
            let created = app.add_client(ClientDraft {
                name,
                email,
                phone,
                lgpd_consent,
            })?;
            println!("Created client {} ({}).", created.name, created.id);
            Ok(())
        }
        ClientsCommand::Update {
            id,
            name,
            phone,
            email,
            active,
        } => {
            let updated = app.update_client(
                id,
                ClientUpdate {
                    name,
                    email,
                    phone,
                    active,
                },
            )?;
            println!("Updated client {} ({}).", updated.name, updated.id);
            Ok(())
        }
        ClientsCommand::Remove { id } => {
            app.deactivate_client(id)?;
            println!("Deactivated client {id}.");
            Ok(())
        }
    }
}

fn run_services(app: &App<'_>, command: ServicesCommand) -> Result<()> {
    match command {
        ServicesCommand::List { all } => {
            let services = app.list_services(!all)?;
            if services.is_empty() {
                println!("No services in the catalog.");
                return Ok(());
            }

            let mut table = new_table(vec!["Id", "Name", "Price", "Duration", "Active"]);
            for service in services {
                table.add_row(vec![
                    Cell::new(service.id),
                    Cell::new(service.name),
                    Cell::new(format_brl(service.price_centavos)),
                    Cell::new(format!("{} min", service.duration_minutes)),
                    Cell::new(yes_no(service.active)),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        ServicesCommand::Add {
            name,
            price,
            duration,
            description,
        } => {
            let created = app.add_service(ServiceDraft {
                name,
                description,
                price_centavos: reais_to_centavos(price),
                duration_minutes: duration,
            })?;
            println!("Created service {} ({}).", created.name, created.id);
            Ok(())
        }
        ServicesCommand::Update {
            id,
            name,
            price,
            duration,
            description,
            active,
        } => {
            let updated = app.update_service(
                id,
                ServiceUpdate {
                    name,
                    description,
                    price_centavos: price.map(reais_to_centavos),
                    duration_minutes: duration,
                    active,
                },
            )?;
            println!("Updated service {} ({}).", updated.name, updated.id);
            Ok(())
        }
    }
}

fn run_sales(app: &App<'_>, command: SalesCommand) -> Result<()> {
    match command {
        SalesCommand::Methods => {
            let methods = app.payment_methods()?;
            let mut table = new_table(vec!["Value", "Label"]);
            for method in methods {
                table.add_row(vec![Cell::new(method.value), Cell::new(method.label)]);
            }
            println!("{table}");
            Ok(())
        }
        SalesCommand::Record {
            items,
            method,
            discount,
            client_id,
            notes,
        } => {
            // Unit prices come from the current catalog, like the POS page.
            let services = app.list_services(true)?;
            let mut sale_items = Vec::new();
            for spec in &items {
                let (service_id, quantity) = parse_item_spec(spec)?;
                let service = services
                    .iter()
                    .find(|service| service.id == service_id)
                    .with_context(|| {
                        format!("service {service_id} is not in the active catalog")
                    })?;
                sale_items.push(SaleItemDraft {
                    service_id,
                    quantity,
                    unit_price_centavos: service.price_centavos,
                });
            }

            let sale = app.record_sale(SaleDraft {
                client_id,
                items: sale_items,
                discount_centavos: reais_to_centavos(discount),
                payment_method: method,
                notes,
            })?;
            println!(
                "Recorded sale {} for {} ({}).",
                sale.id,
                format_brl(sale.total_centavos),
                sale.payment_method
            );
            Ok(())
        }
        SalesCommand::List { from, to } => {
            let sales = app.sales_between(from.as_deref(), to.as_deref())?;
            if sales.is_empty() {
                println!("No sales in this range.");
                return Ok(());
            }

            let mut table = new_table(vec!["Id", "When", "Total", "Discount", "Method", "Items"]);
            for sale in sales {
                table.add_row(vec![
                    Cell::new(sale.id),
                    Cell::new(sale.created_at),
                    Cell::new(format_brl(sale.total_centavos)),
                    Cell::new(format_brl(sale.discount_centavos)),
                    Cell::new(sale.payment_method),
                    Cell::new(sale.items.len()),
                ]);
            }
            println!("{table}");
            Ok(())
        }
    }
}

fn run_cash(app: &App<'_>, command: CashCommand) -> Result<()> {
    match command {
        CashCommand::Status => {
            let status = app.cash_status()?;
            if status.has_open_cash {
                let register = app.current_cash_register()?;
                println!("Cash register {} is open.", register.id);
                print_register_summary(&register);
            } else {
                println!("No cash register is open.");
            }
            Ok(())
        }
        CashCommand::Open { amount, notes } => {
            let register = app.open_cash_register(reais_to_centavos(amount), notes)?;
            println!(
                "Opened cash register {} with {}.",
                register.id,
                format_brl(register.opening_centavos)
            );
            Ok(())
        }
        CashCommand::Close { amount, notes } => {
            let register = app.close_cash_register(reais_to_centavos(amount), notes)?;
            println!(
                "Closed cash register {} with {}.",
                register.id,
                format_brl(register.closing_centavos.unwrap_or(0))
            );
            print_register_summary(&register);
            Ok(())
        }
        CashCommand::History => {
            let registers = app.cash_history()?;
            if registers.is_empty() {
                println!("No cash registers recorded.");
                return Ok(());
            }

            let mut table = new_table(vec![
                "Id", "Status", "Opened", "Opening", "Sales", "Closing",
            ]);
            for register in registers {
                table.add_row(vec![
                    Cell::new(register.id),
                    Cell::new(register.status.clone()),
                    Cell::new(register.opened_at.clone()),
                    Cell::new(format_brl(register.opening_centavos)),
                    Cell::new(format_brl(register.sales_total_centavos())),
                    Cell::new(
                        register
                            .closing_centavos
                            .map(format_brl)
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ]);
            }
            println!("{table}");
            Ok(())
        }
    }
}

fn run_staff(app: &App<'_>, command: StaffCommand) -> Result<()> {
    let users = match command {
        StaffCommand::List => app.list_staff()?,
        StaffCommand::Barbers => app.list_staff_barbers()?,
    };

    if users.is_empty() {
        println!("No staff users found.");
        return Ok(());
    }

    let mut table = new_table(vec!["Id", "Name", "Email", "Role", "Active"]);
    for user in users {
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(user.name),
            Cell::new(user.email),
            Cell::new(user.role),
            Cell::new(yes_no(user.active)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn run_dashboard(app: &App<'_>) -> Result<()> {
    let overview = app.dashboard_overview()?;

    println!("Appointments today:   {}", overview.stats.appointments_today);
    println!("Pending appointments: {}", overview.stats.pending_appointments);
    println!(
        "Month revenue:        {}",
        format_brl(overview.stats.month_revenue_centavos)
    );
    println!("Total clients:        {}", overview.stats.total_clients);

    if !overview.recent.is_empty() {
        println!();
        println!("Latest appointments:");
        for appointment in overview.recent {
            println!(
                "  #{} {} [{}]",
                appointment.id, appointment.date_time, appointment.status
            );
        }
    }
    Ok(())
}

fn run_stats(app: &App<'_>, period: &str) -> Result<()> {
    let stats = app.quick_stats(period)?;

    println!(
        "Period: {} ({} to {})",
        stats.period, stats.start_date, stats.end_date
    );
    println!("Total sales:        {}", format_brl(stats.total_sales_centavos));
    println!("Total appointments: {}", stats.total_appointments);
    println!("New clients:        {}", stats.new_clients);
    println!("Sales trend:        {:+.1}%", stats.sales_trend);
    println!("Average ticket:     {}", format_brl(stats.avg_ticket_centavos));
    Ok(())
}

fn run_doctor_command(app: &App<'_>) -> Result<()> {
    let report = app.doctor()?;
    print_doctor_report(&report);
    Ok(())
}

fn print_doctor_report(report: &DoctorReport) {
    let mut table = new_table(vec!["Check", "Status", "Details"]);

    for check in &report.checks {
        let status = match check.state {
            CheckState::Pass => "PASS",
            CheckState::Fail => "FAIL",
        };

        table.add_row(vec![
            Cell::new(check.name.as_str()),
            Cell::new(status),
            Cell::new(check.details.as_str()),
        ]);
    }

    println!("{table}");
    println!("{}", report.summary());
}

fn print_register_summary(register: &CashRegister) {
    println!(
        "  opening {} | cash sales {} | card sales {} | pix sales {} | expected {}",
        format_brl(register.opening_centavos),
        format_brl(register.cash_sales_centavos.unwrap_or(0)),
        format_brl(register.card_sales_centavos.unwrap_or(0)),
        format_brl(register.pix_sales_centavos.unwrap_or(0)),
        format_brl(register.expected_closing_centavos()),
    );
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn reais_to_centavos(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Sale items arrive as "SERVICE_ID" or "SERVICE_ID:QUANTITY".
fn parse_item_spec(spec: &str) -> Result<(i64, i64)> {
    let mut parts = spec.splitn(2, ':');
    let service_part = parts.next().unwrap_or_default().trim();
    let service_id: i64 = service_part
        .parse()
        .with_context(|| format!("invalid sale item '{spec}': bad service id"))?;

    let quantity = match parts.next() {
        Some(quantity_part) => quantity_part
            .trim()
            .parse()
            .with_context(|| format!("invalid sale item '{spec}': bad quantity"))?,
        None => 1,
    };

    if quantity < 1 {
        bail!("invalid sale item '{spec}': quantity must be at least 1");
    }

    Ok((service_id, quantity))
}
