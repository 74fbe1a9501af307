use crate::commands::confirm;
use bolao_core::pool::PaymentSummary;
use bolao_core::{Bolao, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Subcommand)]
pub enum PoolCommands {
    /// Create a pool and become its admin
    Create {
        /// Pool name
        name: String,
        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Join a pool with its 6-character code
    Join {
        /// Join code
        code: String,
    },
    /// List the pools you belong to
    List,
    /// Show members and payments of a pool
    Show {
        /// Pool ID
        id: String,
    },
    /// Edit name and description (admin only)
    Edit {
        /// Pool ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Set a member's payment flag (admin only)
    Pay {
        /// Pool ID
        id: String,
        /// Member user ID
        member: String,
        /// Mark as not paid instead
        #[arg(long)]
        unpaid: bool,
    },
    /// Flip a member's payment flag (admin only)
    Toggle {
        /// Pool ID
        id: String,
        /// Member user ID
        member: String,
    },
    /// Remove a member (admin only)
    Remove {
        /// Pool ID
        id: String,
        /// Member user ID
        member: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Delete a pool (admin only)
    Delete {
        /// Pool ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn handle_pool_command(cmd: PoolCommands, app: &Bolao) -> Result<()> {
    match cmd {
        PoolCommands::Create { name, description } => {
            let pool = app.pools().create_pool(&name, &description).await?;
            println!("Pool created! Code: {}", pool.code);
            println!("  ID: {}", pool.id);
            println!("Share the code so others can join with: bolao pool join {}", pool.code);
        }

        PoolCommands::Join { code } => {
            let pool = app.pools().join_pool(&code).await?;
            println!("You joined '{}'!", pool.name);
            println!("  Members: {}", pool.members.len());
        }

        PoolCommands::List => {
            let pools = app.pools().my_pools().await?;

            if pools.is_empty() {
                println!("You are not part of any pool yet.");
                println!("Create one with: bolao pool create <name>");
                return Ok(());
            }

            let user = app.session().require_user()?;
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Name", "Code", "Members", "Paid", "Role"]);

            for pool in pools {
                let summary = PaymentSummary::for_pool(&pool);
                let role = if pool.is_admin(&user.uid) {
                    "Admin"
                } else {
                    "Member"
                };

                table.add_row(vec![
                    pool.id.clone(),
                    pool.name.clone(),
                    pool.code.clone(),
                    pool.members.len().to_string(),
                    format!("{}/{}", summary.paid, summary.total),
                    role.to_string(),
                ]);
            }

            println!("{}", table);
        }

        PoolCommands::Show { id } => {
            let pool = app.pools().get_pool(&id).await?;
            let summary = PaymentSummary::for_pool(&pool);

            println!("Pool: {}", pool.name);
            if !pool.description.is_empty() {
                println!("  {}", pool.description);
            }
            println!("  Code: {}", pool.code);
            println!("  Created: {}", pool.created_at.format("%d/%m/%Y"));
            println!(
                "  Payments: {}/{}{}",
                summary.paid,
                summary.total,
                if summary.complete { " (complete)" } else { "" }
            );
            println!();

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["User ID", "Name", "Email", "Paid", "Role"]);

            for member in &pool.members {
                let (name, email) = pool
                    .member_details(member)
                    .map(|d| (d.display_name.clone(), d.email.clone()))
                    .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
                let paid = if pool.has_paid(member) { "Yes" } else { "No" };
                let role = if pool.is_admin(member) { "Admin" } else { "" };

                table.add_row(vec![
                    member.clone(),
                    name,
                    email,
                    paid.to_string(),
                    role.to_string(),
                ]);
            }

            println!("{}", table);
        }

        PoolCommands::Edit {
            id,
            name,
            description,
        } => {
            let current = app.pools().get_pool(&id).await?;
            let name = name.unwrap_or(current.name);
            let description = description.unwrap_or(current.description);

            let pool = app.pools().update_pool(&id, &name, &description).await?;
            println!("Pool '{}' updated.", pool.name);
        }

        PoolCommands::Pay { id, member, unpaid } => {
            let pool = app.pools().set_payment(&id, &member, !unpaid).await?;
            let summary = PaymentSummary::for_pool(&pool);
            println!(
                "{} marked as {}. Payments: {}/{}",
                member,
                if unpaid { "not paid" } else { "paid" },
                summary.paid,
                summary.total
            );
        }

        PoolCommands::Toggle { id, member } => {
            let pool = app.pools().toggle_payment(&id, &member).await?;
            let summary = PaymentSummary::for_pool(&pool);
            println!(
                "{} is now {}. Payments: {}/{}",
                member,
                if pool.has_paid(&member) { "paid" } else { "not paid" },
                summary.paid,
                summary.total
            );
        }

        PoolCommands::Remove { id, member, force } => {
            if !confirm(format!("Remove {} from the pool?", member), force)? {
                println!("Removal cancelled.");
                return Ok(());
            }

            let pool = app.pools().remove_member(&id, &member).await?;
            println!("{} removed from '{}'.", member, pool.name);
        }

        PoolCommands::Delete { id, force } => {
            let pool = app.pools().get_pool(&id).await?;
            if !confirm(
                format!(
                    "Are you sure you want to delete pool '{}'? This action cannot be undone.",
                    pool.name
                ),
                force,
            )? {
                println!("Deletion cancelled.");
                return Ok(());
            }

            app.pools().delete_pool(&id).await?;
            println!("Pool '{}' deleted successfully.", pool.name);
        }
    }

    Ok(())
}
