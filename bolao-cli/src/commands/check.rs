use crate::commands::format_numbers;
use bolao_core::{evaluate, Number, Result};
use clap::Args;

#[derive(Args)]
pub struct CheckArgs {
    /// Selected numbers
    #[arg(required = true, num_args = 1..)]
    numbers: Vec<Number>,

    /// Drawn numbers to compare against, comma separated
    #[arg(short, long, required = true, value_delimiter = ',')]
    result: Vec<Number>,
}

pub fn handle_check(args: CheckArgs) -> Result<()> {
    let c = evaluate(&args.numbers, &args.result);

    println!("Selection: {}", format_numbers(&args.numbers, &c.hits));
    println!("Drawn:     {}", format_numbers(&args.result, &c.hits));
    println!("Hits: {}", c.hit_count);
    println!("Tier: {}", c.tier);
    if c.is_winner {
        println!("Winner!");
    }

    Ok(())
}
