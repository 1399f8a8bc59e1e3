
use std::path::PathBuf;
use std::sync::Arc;

use booking_client::net::types::{
    AdminSettingsParams, AppointmentType, CreateAppointmentTypeParams, DaysHoursMinutes, ForgotParams, LoginParams,
    MagicLinkParams, RegisterParams, ResetParams, UpdateAppointmentTypeParams, Weekday, WeeklyAvailabilityByWeekday,
    WeeklyAvailabilityParams,
};
use booking_client::notify::{Notifier, TracingNotifier};
use booking_client::resources::client_facing::ClientFacingApi;
use booking_client::state::admin_settings::AdminSettingsStore;
use booking_client::state::appointment_types::AppointmentTypesStore;
use booking_client::state::auth::UserStore;
use booking_client::state::weekly_availability::WeeklyAvailabilityStore;
use booking_client::util::auth::MemoryNavigator;
use booking_client::util::conversions::{days_hours_minutes_to_minutes, minutes_to_days_hours_minutes};
use booking_client::util::format::{
    DurationFormat, FormatError, WindowInput, availability_time, date_label, format_duration, window_calculator,
};
use booking_client::{ApiClient, ClientConfig, ClientError};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

const MINUTES_PER_DAY: f64 = 1440.0;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("invalid time `{0}`; expected H:MM or minutes")]
    InvalidTime(String),
    #[error("{0}")]
    InvalidWeekday(String),
    #[error("nothing to update; pass at least one field")]
    EmptyUpdate,
}

#[derive(Parser, Debug)]
#[command(name = "booking-cli", about = "Booking API client CLI")]
struct Cli {
    #[arg(long, env = "BOOKING_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "BOOKING_TIMEZONE")]
    timezone: Option<String>,

    #[arg(long, env = "BOOKING_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    /// Print raw JSON instead of text summaries.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the signed-in user.
    Whoami,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    MagicLink(MagicLinkCommand),
    Password(PasswordCommand),
    AppointmentTypes(AppointmentTypesCommand),
    Availability(AvailabilityCommand),
    Settings(SettingsCommand),
    /// Offline duration conversions.
    Convert(ConvertCommand),
}

#[derive(Args, Debug)]
struct MagicLinkCommand {
    #[command(subcommand)]
    command: MagicLinkSubcommand,
}

#[derive(Subcommand, Debug)]
enum MagicLinkSubcommand {
    Request {
        #[arg(long)]
        email: String,
    },
    Verify {
        token: String,
    },
}

#[derive(Args, Debug)]
struct PasswordCommand {
    #[command(subcommand)]
    command: PasswordSubcommand,
}

#[derive(Subcommand, Debug)]
enum PasswordSubcommand {
    Forgot {
        #[arg(long)]
        email: String,
    },
    Reset {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Args, Debug)]
struct AppointmentTypesCommand {
    #[command(subcommand)]
    command: AppointmentTypesSubcommand,
}

#[derive(Subcommand, Debug)]
enum AppointmentTypesSubcommand {
    List,
    Get {
        id: i32,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        duration: i32,
    },
    Update {
        id: i32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        duration: i32,
    },
    Delete {
        id: i32,
    },
    /// Public listing for a business; no login required.
    Public {
        business_id: i32,
    },
}

#[derive(Args, Debug)]
struct AvailabilityCommand {
    #[command(subcommand)]
    command: AvailabilitySubcommand,
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// Weekday name, e.g. `monday` or `mon`.
    #[arg(long)]
    weekday: String,
    /// Start time as H:MM or minutes from midnight.
    #[arg(long)]
    from: String,
    /// End time as H:MM or minutes from midnight.
    #[arg(long)]
    to: String,
}

#[derive(Subcommand, Debug)]
enum AvailabilitySubcommand {
    List,
    Create(WindowArgs),
    Update {
        id: i32,
        #[command(flatten)]
        window: WindowArgs,
    },
    Delete {
        id: i32,
    },
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show,
    Update {
        #[arg(long)]
        allow_new_registrations: Option<bool>,
        #[arg(long)]
        google_cloud_api_key: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ConvertCommand {
    #[command(subcommand)]
    command: ConvertSubcommand,
}

#[derive(Subcommand, Debug)]
enum ConvertSubcommand {
    ToMinutes {
        #[arg(long, default_value_t = 0)]
        days: i64,
        #[arg(long, default_value_t = 0)]
        hours: i64,
        #[arg(long, default_value_t = 0)]
        minutes: i64,
    },
    FromMinutes {
        minutes: i64,
        #[arg(long, default_value_t = false)]
        long: bool,
    },
}

struct CliContext {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    json: bool,
}

impl CliContext {
    fn user_store(&self) -> UserStore {
        UserStore::new(self.client.clone(), self.notifier.clone(), Arc::new(MemoryNavigator::default()))
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(convert) => run_convert(convert, cli.json),
        command => {
            let ctx = connect(cli.base_url.as_deref(), cli.timezone, cli.storage_path, cli.json)?;
            run(&ctx, command).await
        }
    }
}

fn connect(
    base_url: Option<&str>,
    timezone: Option<String>,
    storage_path: Option<PathBuf>,
    json: bool,
) -> Result<CliContext, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(timezone) = timezone {
        config.timezone = timezone;
    }
    if let Some(storage_path) = storage_path {
        config.storage_path = storage_path;
    }
    tracing::debug!(base_url = %config.base_url, timezone = %config.timezone, "client configured");

    Ok(CliContext { client: ApiClient::from_config(&config)?, notifier: Arc::new(TracingNotifier), json })
}

async fn run(ctx: &CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Whoami => {
            let users = ctx.user_store();
            users.fetch_current_user().await?;
            print_json(&users.user())
        }
        Command::Login { email, password } => {
            let user = ctx.user_store().login(&LoginParams { email, password }).await?;
            print_json(&user)
        }
        Command::Register { email, password, name } => {
            let user = ctx.user_store().register(&RegisterParams { email, password, name }).await?;
            print_json(&user)
        }
        Command::Logout => {
            ctx.user_store().logout().await?;
            println!("signed out");
            Ok(())
        }
        Command::MagicLink(command) => run_magic_link(ctx, command).await,
        Command::Password(command) => run_password(ctx, command).await,
        Command::AppointmentTypes(command) => run_appointment_types(ctx, command).await,
        Command::Availability(command) => run_availability(ctx, command).await,
        Command::Settings(command) => run_settings(ctx, command).await,
        Command::Convert(command) => run_convert(command, ctx.json),
    }
}

async fn run_magic_link(ctx: &CliContext, command: MagicLinkCommand) -> Result<(), CliError> {
    match command.command {
        MagicLinkSubcommand::Request { email } => {
            ctx.user_store().request_magic_link(&MagicLinkParams { email }).await.into_result()?;
            println!("magic link sent");
            Ok(())
        }
        MagicLinkSubcommand::Verify { token } => {
            let user = ctx.user_store().verify_magic_link(&token).await?;
            print_json(&user)
        }
    }
}

async fn run_password(ctx: &CliContext, command: PasswordCommand) -> Result<(), CliError> {
    let users = ctx.user_store();
    match command.command {
        PasswordSubcommand::Forgot { email } => {
            users.request_password_reset(&ForgotParams { email }).await?;
            println!("password reset email sent");
        }
        PasswordSubcommand::Reset { token, password } => {
            users.change_password(&ResetParams { token, password }).await?;
            println!("password changed");
        }
    }
    Ok(())
}

async fn run_appointment_types(ctx: &CliContext, command: AppointmentTypesCommand) -> Result<(), CliError> {
    let store = AppointmentTypesStore::new(ctx.client.clone(), ctx.notifier.clone());
    match command.command {
        AppointmentTypesSubcommand::List => {
            store.fetch_all().await?;
            print_appointment_types(ctx, &store.list())
        }
        AppointmentTypesSubcommand::Get { id } => {
            let item = store.fetch_one(id).await?;
            print_appointment_types(ctx, &[item])
        }
        AppointmentTypesSubcommand::Create { name, duration } => {
            let params = CreateAppointmentTypeParams { duration_in_minutes: duration, display_name: name };
            let item = store.create(&params).await?;
            print_appointment_types(ctx, &[item])
        }
        AppointmentTypesSubcommand::Update { id, name, duration } => {
            let params = UpdateAppointmentTypeParams { duration_in_minutes: duration, display_name: name };
            let item = store.update(id, &params).await?;
            print_appointment_types(ctx, &[item])
        }
        AppointmentTypesSubcommand::Delete { id } => {
            store.delete(id).await?;
            println!("deleted appointment type {id}");
            Ok(())
        }
        AppointmentTypesSubcommand::Public { business_id } => {
            let items = ClientFacingApi::new(ctx.client.clone()).appointment_types(business_id).await?;
            print_appointment_types(ctx, &items)
        }
    }
}

async fn run_availability(ctx: &CliContext, command: AvailabilityCommand) -> Result<(), CliError> {
    let store = WeeklyAvailabilityStore::new(ctx.client.clone(), ctx.notifier.clone());
    match command.command {
        AvailabilitySubcommand::List => store.fetch().await?,
        AvailabilitySubcommand::Create(window) => {
            store.create(&window_params(&window)?).await?;
        }
        AvailabilitySubcommand::Update { id, window } => {
            store.update(id, &window_params(&window)?).await?;
        }
        AvailabilitySubcommand::Delete { id } => store.remove(id).await?,
    }
    let week = store.state().availability.unwrap_or_default();
    print_week(ctx, &week)
}

async fn run_settings(ctx: &CliContext, command: SettingsCommand) -> Result<(), CliError> {
    let store = AdminSettingsStore::new(ctx.client.clone(), ctx.notifier.clone());
    match command.command {
        SettingsSubcommand::Show => store.fetch().await?,
        SettingsSubcommand::Update { allow_new_registrations, google_cloud_api_key } => {
            if allow_new_registrations.is_none() && google_cloud_api_key.is_none() {
                return Err(CliError::EmptyUpdate);
            }
            let params = AdminSettingsParams { allow_new_registrations, google_cloud_api_key };
            store.update(&params).await?;
        }
    }
    print_json(&store.state().settings)
}

fn run_convert(command: ConvertCommand, json: bool) -> Result<(), CliError> {
    match command.command {
        ConvertSubcommand::ToMinutes { days, hours, minutes } => {
            let total = days_hours_minutes_to_minutes(DaysHoursMinutes { days, hours, minutes });
            println!("{total}");
            Ok(())
        }
        ConvertSubcommand::FromMinutes { minutes, long } => {
            let split = minutes_to_days_hours_minutes(minutes);
            if json {
                return print_json(&split);
            }
            let format = if long { DurationFormat::Long } else { DurationFormat::Short };
            println!("{}d {}h {}m ({})", split.days, split.hours, split.minutes, format_duration(minutes, format));
            Ok(())
        }
    }
}

/// Parse `H:MM` or bare minutes, then clamp to the day and snap to the
/// 5-minute grid the dashboard slider uses.
fn parse_time(raw: &str) -> Result<i32, CliError> {
    let invalid = || CliError::InvalidTime(raw.to_owned());
    let minutes = match raw.split_once(':') {
        Some((hours, minutes)) => {
            let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
            let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
            if minutes >= 60 {
                return Err(invalid());
            }
            let total = hours.checked_mul(60).and_then(|h| h.checked_add(minutes)).ok_or_else(invalid)?;
            i32::try_from(total).map_err(|_| invalid())?
        }
        None => raw.trim().parse().map_err(|_| invalid())?,
    };
    let snapped = window_calculator(WindowInput::new(f64::from(minutes), 0.0, MINUTES_PER_DAY));
    i32::try_from(snapped).map_err(|_| invalid())
}

fn window_params(window: &WindowArgs) -> Result<WeeklyAvailabilityParams, CliError> {
    let weekday: Weekday = window.weekday.parse().map_err(CliError::InvalidWeekday)?;
    Ok(WeeklyAvailabilityParams::new(weekday, parse_time(&window.from)?, parse_time(&window.to)?))
}

fn print_appointment_types(ctx: &CliContext, items: &[AppointmentType]) -> Result<(), CliError> {
    if ctx.json {
        return print_json(&items);
    }
    for item in items {
        println!(
            "#{:<4} {:<30} {:>10}  created {}",
            item.id,
            item.display_name,
            format_duration(i64::from(item.duration_in_minutes), DurationFormat::Short),
            date_label(item.created_at)?,
        );
    }
    Ok(())
}

fn print_week(ctx: &CliContext, week: &WeeklyAvailabilityByWeekday) -> Result<(), CliError> {
    if ctx.json {
        return print_json(week);
    }
    for weekday in Weekday::ALL {
        let windows: Vec<String> = week
            .day(weekday)
            .iter()
            .map(|w| {
                format!(
                    "{}-{} (#{})",
                    availability_time(w.normalized.from),
                    availability_time(w.normalized.to),
                    w.model.id
                )
            })
            .collect();
        let summary = if windows.is_empty() { "-".to_owned() } else { windows.join(", ") };
        println!("{:<10} {summary}", weekday.name());
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
