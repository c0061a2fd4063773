// File: services/tarot_client/src/main.rs
mod cli;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use cli::{Cli, Command};
use reqwest::Url;
use tarot_auth::{AuthError, FileSessionStore, MemorySessionStore, SessionContext, SessionStore};
use tarot_booking::pricing::format_price;
use tarot_booking::{
    BookingDraft, BookingError, BookingFlow, BookingOrchestrator, Navigator, Notifier,
    RestBookingClient, SlotLoader, ToastLevel,
};
use tarot_common::logging::parse_level;
use tarot_common::services::CatalogService;
use tarot_common::{config_error, init_with_level, log_error, log_result, Context, TarotError};
use tarot_config::{load_config, AppConfig};
use tracing::{error, info, warn};

/// Prints the payment page instead of driving a browser.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, url: &Url) {
        info!(host = url.host_str().unwrap_or(""), "Handing off to payment page");
        println!("Open this page to complete your payment:\n  {}", url);
    }
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn toast(&self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Success => info!("{}", message),
            ToastLevel::Warning => warn!("{}", message),
            ToastLevel::Error => error!("{}", message),
        }
        eprintln!("{}", message);
    }
}

fn today(config: &AppConfig) -> Result<NaiveDate, TarotError> {
    let tz = config.booking.time_zone().map_err(config_error)?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

fn booking_flow(client: &Arc<RestBookingClient>) -> BookingFlow {
    BookingFlow::new(
        BookingOrchestrator::new(client.clone(), client.clone(), Arc::new(ConsoleNavigator)),
        SlotLoader::new(client.clone()),
        Arc::new(ConsoleNotifier),
    )
}

async fn run(command: Command) -> Result<(), TarotError> {
    let config = load_config().map_err(config_error)?;
    init_with_level(parse_level(&config.logging.level));

    let store: Arc<dyn SessionStore> = match &config.session.store_path {
        Some(path) => Arc::new(FileSessionStore::new(path)),
        None => Arc::new(MemorySessionStore::new()),
    };
    let mut session = SessionContext::new(store);
    session
        .rehydrate()
        .context("Failed to restore the stored session")?;

    let client = Arc::new(
        RestBookingClient::new(&config.api).with_token(session.token().map(str::to_string)),
    );

    let result = dispatch(command, &config, &mut session, &client).await;
    forget_expired_session(&mut session, result)
}

/// Clears the stored session when any API call reported the token as expired.
fn forget_expired_session(
    session: &mut SessionContext,
    result: Result<(), TarotError>,
) -> Result<(), TarotError> {
    if let Err(e) = &result {
        if e.is_token_expired() {
            session.handle_token_expired()?;
        }
    }
    result
}

/// The user a booking is made for. Checked before anything is fetched.
fn booking_user(session: &SessionContext, notifier: &dyn Notifier) -> Result<String, TarotError> {
    let Some(user_id) = session.user_id() else {
        let err = BookingError::AuthRequired;
        notifier.toast(err.toast_level(), &err.user_message());
        return Err(err.into());
    };
    if let Some(role) = session.role().filter(|r| !r.can_book()) {
        return Err(AuthError::Forbidden { role }.into());
    }
    Ok(user_id.to_string())
}

async fn dispatch(
    command: Command,
    config: &AppConfig,
    session: &mut SessionContext,
    client: &Arc<RestBookingClient>,
) -> Result<(), TarotError> {
    match command {
        Command::Login { token } => {
            let current = session.login(&token)?;
            println!(
                "Logged in as {} ({}), home: {}",
                current.user_id,
                current.role.label(),
                current.role.home_path()
            );
        }
        Command::Logout => {
            log_result(session.logout(), "Session cleared", "Logout failed")?;
            println!("Logged out");
        }
        Command::Whoami => match session.session() {
            Some(current) => {
                println!("{} ({})", current.user_id, current.role);
                for path in current.role.dashboard_paths() {
                    println!("  {}", path);
                }
            }
            None => println!("Not logged in"),
        },
        Command::Topics => {
            for topic in client.topics().await? {
                println!("{:<12} {}", topic.id, topic.name);
            }
        }
        Command::Reader { reader_id } => {
            let profile = client.reader(&reader_id).await?;
            println!("{}", profile.reader.name);
            println!("  ${} per hour", format_price(profile.reader.price));
            if let Some(rating) = profile.reader.rating {
                println!("  rating {:.1}", rating);
            }
            if let Some(description) = &profile.reader.description {
                println!("  {}", description);
            }
            if let Some(avatar) = profile.avatar_url() {
                println!("  {}", avatar);
            }
        }
        Command::Slots {
            reader_id,
            date,
            minutes,
        } => {
            let mut draft = BookingDraft::from_config(reader_id, None, &config.booking);
            draft.set_date(date, today(config)?, &config.booking)?;
            if let Some(minutes) = minutes {
                draft.set_duration(minutes, &config.booking)?;
            }
            let slots = booking_flow(client).try_refresh_slots(&draft).await?;
            if slots.is_empty() {
                println!("No slots available");
            }
            for slot in slots {
                println!("{}", slot.label);
            }
        }
        Command::Book {
            reader_id,
            date,
            minutes,
            slot_label,
            topic_ids,
            note,
        } => {
            let user_id = booking_user(session, &ConsoleNotifier)?;

            let profile = client.reader(&reader_id).await?;
            let topics = client.topics().await?;

            let mut draft = BookingDraft::from_config(reader_id, Some(user_id), &config.booking);
            draft.set_topics(topic_ids);
            draft.set_note(note);
            draft.set_date(date, today(config)?, &config.booking)?;
            draft.set_duration(minutes, &config.booking)?;

            let flow = booking_flow(client);
            let slots = flow.try_refresh_slots(&draft).await?;
            if !draft.select_slot_by_label(&slot_label, &slots) {
                warn!(label = %slot_label, "Requested slot is not offered");
                let offered: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
                println!("Available slots: {}", offered.join(" | "));
            }

            println!("{}", draft.summary(&profile.reader, &topics));
            let record = flow.confirm(&draft).await?;
            println!("Booking {} created", record.id);
        }
        Command::Pay { booking_id } => {
            booking_flow(client).retry_payment(&booking_id).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        log_error(&e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
