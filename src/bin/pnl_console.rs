//! Console front end for the ledger
//!
//! Prompts on stdin, prints on stdout. All decisions are made by the
//! tracking session and the store; this file only asks and tells.
//!
//! Usage: cargo run --bin pnl-console

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use pnl::config::Config;
use pnl::db::{self, Database};
use pnl::models::{FoodDraft, FoodRecord, RawFoodEntry};
use pnl::report::saved_notice;
use pnl::session::{SessionRequest, SessionResponse, TrackingSession, STOP_SENTINEL};
use pnl::store::{FoodStore, SqliteFoodStore};

struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    /// One trimmed line, or None at end of input
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{}>> ", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{} Type 'y' or 'n'", label))?;
        Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y")))
    }

    /// Macro prompts for `name`; None at end of input
    fn macros(&mut self, name: &str) -> io::Result<Option<RawFoodEntry>> {
        let mut fields = Vec::with_capacity(5);
        for label in [
            "calories (blank to derive from macros)",
            "protein amount",
            "carbohydrate amount",
            "fat amount",
            "fiber amount",
        ] {
            match self.ask(&format!("Please enter in the food's {}", label))? {
                Some(value) => fields.push(value),
                None => return Ok(None),
            }
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(Some(RawFoodEntry {
            name: name.to_string(),
            calories: next(),
            protein: next(),
            carbohydrate: next(),
            fat: next(),
            fiber: next(),
        }))
    }
}

fn show(record: &FoodRecord) {
    let n = record.nutrition();
    println!(
        "\nFood: {}\nCalories: {:.2}\nProtein: {:.2}\nCarbohydrates: {:.2}\nFiber: {:.2}\nFat: {:.2}",
        record.name(),
        n.calories,
        n.protein,
        n.carbohydrate,
        n.fiber,
        n.fat
    );
}

/// Ask until a valid, confirmed food is entered; None if the user gives up
fn enter_food<R: BufRead>(
    prompter: &mut Prompter<R>,
    name: Option<&str>,
    tolerance: f64,
) -> io::Result<Option<FoodRecord>> {
    loop {
        let name = match name {
            Some(name) => name.to_string(),
            None => match prompter.ask("Please enter in the food's name (blank to cancel)")? {
                Some(name) if !name.is_empty() => name,
                _ => return Ok(None),
            },
        };

        let Some(raw) = prompter.macros(&name)? else {
            return Ok(None);
        };

        let record = match raw.parse().and_then(|draft| FoodRecord::from_draft(&draft, tolerance)) {
            Ok(record) => record,
            Err(e) => {
                println!("{}. Disregarding this entry and restarting...\n", e);
                continue;
            }
        };

        show(&record);
        if prompter.confirm("Is this the correct information?")? {
            return Ok(Some(record));
        }
        println!("Disregarding this entry and restarting...\n");
    }
}

fn add_food<R: BufRead>(prompter: &mut Prompter<R>, store: &SqliteFoodStore, tolerance: f64) -> io::Result<()> {
    let Some(record) = enter_food(prompter, None, tolerance)? else {
        return Ok(());
    };

    match store.put(&record) {
        Ok(()) => println!("{}", saved_notice(record.name())),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn delete_food<R: BufRead>(prompter: &mut Prompter<R>, store: &SqliteFoodStore) -> io::Result<()> {
    let Some(name) = prompter.ask("Which food should be deleted?")? else {
        return Ok(());
    };

    match store.delete(&name) {
        Ok(()) => println!("Deleted {}.", pnl::models::normalize_name(&name)),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn track<R: BufRead>(prompter: &mut Prompter<R>, store: &SqliteFoodStore, tolerance: f64) -> io::Result<()> {
    let mut session = TrackingSession::new(store.clone(), tolerance);
    let mut request = None;

    loop {
        let next = match request.take() {
            Some(request) => request,
            None => match prompter.ask(&format!("What did you eat? Type '{}' when done", STOP_SENTINEL))? {
                Some(name) => SessionRequest::from_name(&name),
                None => SessionRequest::Stop,
            },
        };

        match session.handle(next) {
            Ok(SessionResponse::Added { name }) => println!("Added {}.", name),
            Ok(SessionResponse::UnknownFood { name }) => {
                let register = prompter.confirm(&format!(
                    "{} isn't in the database. Would you like to add it?",
                    name
                ))?;
                request = Some(if register {
                    match enter_food(prompter, Some(&name), tolerance)? {
                        Some(record) => SessionRequest::Register(FoodDraft::from(&record)),
                        None => SessionRequest::Skip,
                    }
                } else {
                    SessionRequest::Skip
                });
            }
            Ok(SessionResponse::Registered { name }) => {
                println!("{}", saved_notice(&name));
                println!("Added {}.", name);
            }
            Ok(SessionResponse::Skipped { name }) => println!("Skipped {}.", name),
            Ok(SessionResponse::Finished(summary)) => {
                println!("\n{}", summary.render());
                return Ok(());
            }
            Err(e) => println!("{}", e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pnl=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(db::run_migrations)?;
    let store = SqliteFoodStore::new(database);

    let mut prompter = Prompter {
        input: io::stdin().lock(),
    };

    loop {
        let choice = prompter.ask("\n[a]dd a food, [d]elete a food, [t]rack a day, [q]uit")?;
        match choice.as_deref().map(str::to_lowercase).as_deref() {
            Some("a") => add_food(&mut prompter, &store, config.calorie_tolerance)?,
            Some("d") => delete_food(&mut prompter, &store)?,
            Some("t") => track(&mut prompter, &store, config.calorie_tolerance)?,
            Some("q") | None => break,
            Some(other) => println!("Unknown choice {:?}", other),
        }
    }

    Ok(())
}
