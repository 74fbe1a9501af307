use bolao_core::{Bolao, Identity, Result};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with an account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// User id (defaults to the lowercased email)
        #[arg(short, long)]
        uid: Option<String>,
        /// Display name shown to pool members
        #[arg(short, long)]
        name: Option<String>,
        /// Avatar URL
        #[arg(long)]
        photo_url: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

pub async fn handle_auth_command(cmd: AuthCommands, app: &Bolao) -> Result<()> {
    match cmd {
        AuthCommands::Login {
            email,
            uid,
            name,
            photo_url,
        } => {
            let email = email.trim().to_string();
            let uid = uid.unwrap_or_else(|| email.to_lowercase());

            let mut identity = Identity::new(uid, email);
            if let Some(name) = name {
                identity = identity.with_display_name(name);
            }
            if let Some(url) = photo_url {
                identity = identity.with_photo_url(url);
            }

            app.sign_in(identity.clone()).await?;
            println!(
                "Signed in as {} <{}>",
                identity.display_name_or_default(),
                identity.email
            );
        }

        AuthCommands::Logout => {
            if app.session().current().is_none() {
                println!("Not signed in.");
                return Ok(());
            }
            app.sign_out().await?;
            println!("Signed out successfully.");
        }

        AuthCommands::Whoami => match app.session().current() {
            Some(identity) => {
                println!("User: {}", identity.display_name_or_default());
                println!("  ID: {}", identity.uid);
                println!("  Email: {}", identity.email);
                if let Some(url) = &identity.photo_url {
                    println!("  Photo: {}", url);
                }
            }
            None => {
                println!("Not signed in.");
                println!("Sign in with: bolao auth login --email <email>");
            }
        },
    }

    Ok(())
}
