use crate::commands::{confirm, format_numbers};
use bolao_core::{Bolao, GameKind, Number, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Subcommand)]
pub enum GameCommands {
    /// Save a new game
    New {
        /// Chosen numbers (6 to 20, from 1 to 60)
        #[arg(required = true, num_args = 1..)]
        numbers: Vec<Number>,
        /// Mark as a pool game
        #[arg(short, long)]
        group: bool,
    },
    /// Pick random numbers ("Surpresinha")
    Quick {
        /// Save the picked numbers as a new game
        #[arg(short, long)]
        save: bool,
        /// Mark as a pool game when saving
        #[arg(short, long)]
        group: bool,
    },
    /// Replace the numbers of a game
    Edit {
        /// Game ID
        id: String,
        /// New numbers
        #[arg(required = true, num_args = 1..)]
        numbers: Vec<Number>,
    },
    /// Delete a game
    Delete {
        /// Game ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// List your games checked against the latest result
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn kind(group: bool) -> GameKind {
    if group {
        GameKind::Group
    } else {
        GameKind::Individual
    }
}

pub async fn handle_game_command(cmd: GameCommands, app: &Bolao) -> Result<()> {
    match cmd {
        GameCommands::New { numbers, group } => {
            let game = app.games().create_game(&numbers, kind(group)).await?;

            println!("Game saved successfully!");
            println!("  ID: {}", game.id);
            println!("  Type: {}", game.kind.display_name());
            println!("  Numbers: {}", format_numbers(&game.numbers, &[]));
        }

        GameCommands::Quick { save, group } => {
            let numbers = app.games().quick_pick();
            println!("Surpresinha: {}", format_numbers(&numbers, &[]));

            if save {
                let game = app.games().create_game(&numbers, kind(group)).await?;
                println!("Game saved with ID: {}", game.id);
            }
        }

        GameCommands::Edit { id, numbers } => {
            let game = app.games().update_numbers(&id, &numbers).await?;
            println!("Game {} updated.", game.id);
            println!("  Numbers: {}", format_numbers(&game.numbers, &[]));
        }

        GameCommands::Delete { id, force } => {
            if !confirm(format!("Delete game {}?", id), force)? {
                println!("Deletion cancelled.");
                return Ok(());
            }

            app.games().delete_game(&id).await?;
            println!("Game deleted successfully.");
        }

        GameCommands::List { json } => {
            let entries = app.games().list_games().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("You have no games yet.");
                println!("Create one with: bolao game new <numbers...>");
                return Ok(());
            }

            let latest = app.results().latest_result().await?;
            match &latest {
                Some(result) => println!(
                    "Checked against contest {}: {}",
                    result.contest,
                    format_numbers(&result.numbers, &[])
                ),
                None => println!("No official result recorded yet."),
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Type", "Date", "Numbers", "Status"]);

            for entry in &entries {
                let status = if entry.status.is_winner {
                    format!("* {}", entry.status.label)
                } else {
                    entry.status.label.clone()
                };

                table.add_row(vec![
                    entry.game.id.clone(),
                    entry.game.kind.display_name().to_string(),
                    entry.game.date.format("%d/%m/%Y").to_string(),
                    format_numbers(&entry.game.numbers, &entry.status.hits),
                    status,
                ]);
            }

            println!("{}", table);
        }
    }

    Ok(())
}
