use crate::commands::{confirm, format_numbers};
use bolao_core::{Bolao, Number, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Subcommand)]
pub enum ResultCommands {
    /// Record the official result of a contest
    Add {
        /// Contest number
        contest: u32,
        /// The six drawn numbers
        #[arg(required = true, num_args = 1..)]
        numbers: Vec<Number>,
    },
    /// Correct a recorded result
    Edit {
        /// Result ID
        id: String,
        /// Contest number
        contest: u32,
        /// The six drawn numbers
        #[arg(required = true, num_args = 1..)]
        numbers: Vec<Number>,
    },
    /// Delete a recorded result
    Delete {
        /// Result ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// List recorded results, most recent first
    List,
    /// Show the latest recorded result
    Latest,
    /// Import the latest result from the official feed
    Fetch,
}

pub async fn handle_result_command(cmd: ResultCommands, app: &Bolao) -> Result<()> {
    match cmd {
        ResultCommands::Add { contest, numbers } => {
            let result = app.results().record_result(contest, &numbers).await?;
            println!("Result saved successfully!");
            println!("  ID: {}", result.id);
            println!("  Contest: {}", result.contest);
            println!("  Numbers: {}", format_numbers(&result.numbers, &[]));
        }

        ResultCommands::Edit {
            id,
            contest,
            numbers,
        } => {
            let result = app.results().update_result(&id, contest, &numbers).await?;
            println!("Result {} updated.", result.id);
            println!("  Contest: {}", result.contest);
            println!("  Numbers: {}", format_numbers(&result.numbers, &[]));
        }

        ResultCommands::Delete { id, force } => {
            let result = app.results().get_result(&id).await?;
            if !confirm(
                format!("Delete the result of contest {}?", result.contest),
                force,
            )? {
                println!("Deletion cancelled.");
                return Ok(());
            }

            app.results().delete_result(&id).await?;
            println!("Result deleted.");
        }

        ResultCommands::List => {
            let results = app.results().list_results().await?;

            if results.is_empty() {
                println!("No results recorded.");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Contest", "Date", "Numbers"]);

            for result in results {
                table.add_row(vec![
                    result.id.clone(),
                    result.contest.to_string(),
                    result.date.format("%d/%m/%Y").to_string(),
                    format_numbers(&result.numbers, &[]),
                ]);
            }

            println!("{}", table);
        }

        ResultCommands::Latest => match app.results().latest_result().await? {
            Some(result) => {
                println!("Contest {}", result.contest);
                println!("  Numbers: {}", format_numbers(&result.numbers, &[]));
                println!("  Recorded: {}", result.date.format("%d/%m/%Y %H:%M"));
            }
            None => println!("No results recorded."),
        },

        ResultCommands::Fetch => {
            let feed = app.feed()?;
            println!("Fetching latest result from {}...", feed.url());

            let (result, created) = app.results().import_latest(&feed).await?;
            if created {
                println!("Imported contest {}.", result.contest);
            } else {
                println!("Contest {} is already recorded.", result.contest);
            }
            println!("  Numbers: {}", format_numbers(&result.numbers, &[]));
        }
    }

    Ok(())
}
