use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use uuid::Uuid;

use calorie_tracker::auth::{LoginForm, SignupForm};
use calorie_tracker::config::ClientConfig;
use calorie_tracker::error::Result;
use calorie_tracker::format;
use calorie_tracker::generations::GenerationRequest;
use calorie_tracker::meals::{MealCategory, NewMeal};
use calorie_tracker::preferences::Theme;
use calorie_tracker::storage::FileStore;
use calorie_tracker::CalorieTracker;

#[derive(Parser)]
#[clap(name = "calorie-cli", version, about = "Track meals and calories from the terminal")]
struct Cli {
    /// Base URL of the calorie tracker API
    #[clap(long, env = "CALORIE_API_URL")]
    api_url: Option<String>,

    /// Directory holding the saved session and preferences
    #[clap(long, env = "CALORIE_STATE_DIR", default_value = ".calorie-tracker")]
    state_dir: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[clap(long)]
        email: String,
        #[clap(long, env = "CALORIE_PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        #[clap(long)]
        email: String,
        #[clap(long, env = "CALORIE_PASSWORD")]
        password: String,
    },
    /// Sign out and forget the session
    Logout,
    /// Daily progress, newest first
    Dashboard {
        /// Number of pages to load
        #[clap(long, default_value = "1")]
        pages: u32,
    },
    /// Progress and meals of one day (YYYY-MM-DD)
    Day { date: NaiveDate },
    /// Log a meal
    AddMeal {
        #[clap(long)]
        description: String,
        #[clap(long)]
        calories: i32,
        #[clap(long, default_value = "other", parse(try_from_str = parse_category))]
        category: MealCategory,
        /// RFC 3339 timestamp; defaults to now
        #[clap(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Delete a meal and show the updated day
    DeleteMeal { date: NaiveDate, id: Uuid },
    /// Estimate calories of a described meal
    Estimate {
        description: String,
        /// Log the estimate as a meal in this category
        #[clap(long, parse(try_from_str = parse_category))]
        save_as: Option<MealCategory>,
    },
    /// Show or change the daily calorie goal
    Goal {
        #[clap(long)]
        set: Option<i32>,
    },
    /// Show or change the colour theme
    Theme { value: Option<Theme> },
}

fn parse_category(value: &str) -> std::result::Result<MealCategory, String> {
    MealCategory::parse(value).ok_or_else(|| format!("unknown category: {}", value))
}

fn open_tracker(cli: &Cli) -> Result<CalorieTracker> {
    let config = match &cli.api_url {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::from_env()?,
    };
    let store = FileStore::open(cli.state_dir.join("state.json"))?;
    CalorieTracker::with_store(config, Arc::new(store))
}

fn print_day(state: &calorie_tracker::controllers::DayDetailsState) {
    let today = Local::now().date_naive();
    println!("{}", format::day_label(state.date, today));
    if let Some(progress) = &state.progress {
        println!(
            "  {} / {}  {}",
            format::calories(progress.total_calories),
            format::calories(progress.calorie_goal),
            format::status_label(progress.status)
        );
    }
    for meal in &state.meals {
        println!(
            "  {}  {:<10} {:>10}  {}  [{}]",
            format::time_of_day(&meal.meal_timestamp.with_timezone(&Local)),
            format::category_label(meal.category),
            format::calories(meal.calories),
            meal.description,
            meal.id
        );
    }
    if state.meals.is_empty() {
        println!("  Brak posiłków");
    }
}

/// A controller already turned the error into its user message.
fn failed(message: &str) -> ExitCode {
    eprintln!("{}", message);
    ExitCode::FAILURE
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let tracker = open_tracker(&cli)?;

    match cli.command {
        Command::Login { email, password } => {
            let user = tracker.auth().login(&LoginForm::new(&email, &password)).await?;
            println!("Zalogowano jako {}", user.email.unwrap_or(email));
        }
        Command::Signup { email, password } => {
            let form = SignupForm::new(&email, &password, &password);
            let response = tracker.auth().signup(&form).await?;
            if response.session.is_some() {
                println!("Konto utworzone, zalogowano.");
            } else {
                println!("Konto utworzone. Potwierdź adres email, aby się zalogować.");
            }
        }
        Command::Logout => {
            let route = tracker.settings().logout().await;
            println!("Wylogowano ({})", route.path());
        }
        Command::Dashboard { pages } => {
            let dashboard = tracker.dashboard();
            dashboard.load_initial().await;
            for _ in 1..pages {
                dashboard.load_more().await;
            }
            let state = dashboard.state();
            if let Some(message) = state.entries.error {
                return Ok(failed(&message));
            }

            let today = Local::now().date_naive();
            for entry in &state.entries.items {
                println!(
                    "{:<28} {:>10} / {:<10} {}",
                    format::day_label(entry.date, today),
                    format::calories(entry.total_calories),
                    format::calories(entry.calorie_goal),
                    format::status_label(entry.status)
                );
            }
            let week = dashboard.week_summary(today);
            println!(
                "\nOstatnie 7 dni: {} dni, średnio {}, {} powyżej celu",
                week.days_logged,
                format::calories(week.average_calories),
                week.days_over
            );
            if state.entries.has_more {
                println!("(więcej: --pages {})", pages + 1);
            }
        }
        Command::Day { date } => {
            let details = tracker.day_details(date);
            details.load_day_data().await;
            let state = details.state();
            if let Some(message) = state.error {
                return Ok(failed(&message));
            }
            print_day(&state);
        }
        Command::AddMeal {
            description,
            calories,
            category,
            at,
        } => {
            let meal = NewMeal::manual(&description, calories, category, at.unwrap_or_else(Utc::now));
            let created = tracker.meals().create(&meal).await?;
            println!("Dodano posiłek {} ({})", created.id, format::calories(created.calories));
        }
        Command::DeleteMeal { date, id } => {
            let details = tracker.day_details(date);
            details.load_day_data().await;
            details.delete_meal(id).await;
            let state = details.state();
            if let Some(message) = state.error {
                return Ok(failed(&message));
            }
            print_day(&state);
        }
        Command::Estimate {
            description,
            save_as,
        } => {
            let generation = tracker
                .generations()
                .estimate(&GenerationRequest::new(&description))
                .await?;
            match generation.generated_calories {
                Some(kcal) => println!("Szacunek: {}", format::calories(kcal)),
                None => println!("Nie udało się oszacować kalorii"),
            }
            if let Some(assumptions) = &generation.assumptions {
                println!("Założenia: {}", assumptions);
            }
            if let Some(category) = save_as {
                if let Some(draft) = generation.to_meal_draft(category, Utc::now()) {
                    let created = tracker.meals().create(&draft).await?;
                    println!("Zapisano jako posiłek {}", created.id);
                }
            }
        }
        Command::Goal { set } => {
            let settings = tracker.settings();
            if let Some(daily_goal) = set {
                settings.save_goal(daily_goal).await;
            } else {
                settings.load().await;
            }
            let state = settings.state();
            if let Some(message) = state.error {
                return Ok(failed(&message));
            }
            match (&state.current_goal, &state.scheduled_goal) {
                (_, Some(next)) => println!(
                    "Nowy cel {} od {}",
                    format::calories(next.daily_goal),
                    format::short_date(next.effective_from)
                ),
                (Some(goal), None) => println!("Cel: {}", format::calories(goal.daily_goal)),
                (None, None) => println!("Nie ustawiono celu kalorycznego"),
            }
        }
        Command::Theme { value } => {
            let mut preferences = tracker.preferences()?;
            if let Some(theme) = value {
                preferences.set_theme(theme)?;
            }
            println!("Motyw: {}", preferences.theme());
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
