use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dto::LoginRequestDto;
use crate::features::auth::{AuthClient, SessionStore};
use crate::features::citizens::dto::{RegisterCitizenDto, UpdateCitizenDto};
use crate::features::citizens::model::Citizen;
use crate::features::citizens::CitizenService;
use crate::features::signalements::dto::{
    CreateSignalementDto, SignalementFilter, UpdateSignalementDto,
};
use crate::features::signalements::model::{Categorie, Gravite, Signalement, Status};
use crate::features::signalements::SignalementService;

#[derive(Parser, Debug)]
#[command(
    name = "signalement",
    about = "Client for the signalement citizen-incident API",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login(LoginArgs),
    /// Clear the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Browse and manage signalements
    #[command(subcommand)]
    Signalements(SignalementCommand),
    /// Browse and manage citizen accounts
    #[command(subcommand)]
    Citizens(CitizenCommand),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum SignalementCommand {
    /// List signalements; any filter routes through the search endpoint
    List(ListSignalementsArgs),
    /// Show one signalement
    Show { id: i64 },
    /// Submit a new signalement as the logged-in citizen
    Create(CreateSignalementArgs),
    /// Update fields of an existing signalement
    Update(UpdateSignalementArgs),
    /// Delete a signalement
    Delete { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct ListSignalementsArgs {
    #[arg(long)]
    pub titre: Option<String>,
    #[arg(long)]
    pub ville: Option<String>,
    #[arg(long, value_enum)]
    pub categorie: Option<Categorie>,
    #[arg(long, value_enum)]
    pub gravite: Option<Gravite>,
    #[arg(long, value_enum)]
    pub status: Option<Status>,
    /// Author id; ignored when it is not a number
    #[arg(long)]
    pub citizen_id: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateSignalementArgs {
    #[arg(long)]
    pub titre: String,
    #[arg(long)]
    pub localisation: String,
    #[arg(long)]
    pub ville: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, value_enum)]
    pub categorie: Categorie,
    #[arg(long, value_enum)]
    pub gravite: Gravite,
    #[arg(long)]
    pub commentaire: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateSignalementArgs {
    pub id: i64,
    #[arg(long)]
    pub titre: Option<String>,
    #[arg(long)]
    pub localisation: Option<String>,
    #[arg(long)]
    pub ville: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_enum)]
    pub categorie: Option<Categorie>,
    #[arg(long, value_enum)]
    pub gravite: Option<Gravite>,
    #[arg(long, value_enum)]
    pub status: Option<Status>,
    #[arg(long)]
    pub commentaire: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CitizenCommand {
    /// List all accounts
    List,
    /// Show one account
    Show { id: i64 },
    /// Create a new account (no session required)
    Register(RegisterCitizenArgs),
    /// Update an account
    Update(UpdateCitizenArgs),
    /// Delete an account
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct RegisterCitizenArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub telephone: Option<String>,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Args, Debug)]
pub struct UpdateCitizenArgs {
    pub id: i64,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telephone: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
}

/// Everything a command handler may need, wired once at startup.
pub struct App {
    pub auth: AuthClient,
    pub session: Arc<SessionStore>,
    pub signalements: SignalementService,
    pub citizens: CitizenService,
}

pub async fn run(command: Command, app: &App) -> Result<()> {
    match command {
        Command::Login(args) => login(app, args).await,
        Command::Logout => logout(app),
        Command::Whoami => {
            whoami(app);
            Ok(())
        }
        Command::Signalements(command) => run_signalements(command, app).await,
        Command::Citizens(command) => run_citizens(command, app).await,
    }
}

async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let session = app
        .auth
        .login(&LoginRequestDto {
            email: args.email,
            password: args.password,
        })
        .await?;
    println!(
        "Logged in as {} (id {}, role {})",
        session.email, session.user_id, session.role
    );
    Ok(())
}

fn logout(app: &App) -> Result<()> {
    app.auth.logout()?;
    println!("Logged out.");
    Ok(())
}

fn whoami(app: &App) {
    match app.session.current() {
        Some(session) => println!(
            "{} (id {}, role {})",
            session.email, session.user_id, session.role
        ),
        None => println!("Not logged in."),
    }
}

async fn run_signalements(command: SignalementCommand, app: &App) -> Result<()> {
    match command {
        SignalementCommand::List(args) => {
            let filter = SignalementFilter {
                titre: args.titre,
                ville: args.ville,
                categorie: args.categorie,
                gravite: args.gravite,
                status: args.status,
                citizen_id: args.citizen_id,
                description: args.description,
            };
            eprintln!("Loading signalements...");
            let signalements = app.signalements.list(&filter).await?;
            render_signalements(&signalements);
            Ok(())
        }
        SignalementCommand::Show { id } => {
            eprintln!("Loading signalement {id}...");
            let signalement = app.signalements.get(id).await?;
            render_signalement(&signalement);
            Ok(())
        }
        SignalementCommand::Create(args) => {
            let form = CreateSignalementDto {
                titre: args.titre,
                localisation: args.localisation,
                ville: args.ville,
                description: args.description,
                categorie: args.categorie,
                gravite: args.gravite,
                commentaire: args.commentaire,
            };
            eprintln!("Submitting signalement...");
            let created = app.signalements.create(form).await?;
            println!("Created signalement #{} (status {})", created.id, created.status);
            Ok(())
        }
        SignalementCommand::Update(args) => {
            let changes = UpdateSignalementDto {
                titre: args.titre,
                localisation: args.localisation,
                ville: args.ville,
                description: args.description,
                categorie: args.categorie,
                gravite: args.gravite,
                status: args.status,
                commentaire: args.commentaire,
            };
            eprintln!("Updating signalement {}...", args.id);
            let updated = app.signalements.update(args.id, changes).await?;
            println!("Updated signalement #{} (status {})", updated.id, updated.status);
            Ok(())
        }
        SignalementCommand::Delete { id } => {
            eprintln!("Deleting signalement {id}...");
            app.signalements.delete(id).await?;
            println!("Deleted signalement #{id}.");
            Ok(())
        }
    }
}

async fn run_citizens(command: CitizenCommand, app: &App) -> Result<()> {
    match command {
        CitizenCommand::List => {
            eprintln!("Loading accounts...");
            let citizens = app.citizens.list().await?;
            render_citizens(&citizens);
            Ok(())
        }
        CitizenCommand::Show { id } => {
            eprintln!("Loading account {id}...");
            let citizen = app.citizens.get(id).await?;
            render_citizen(&citizen);
            Ok(())
        }
        CitizenCommand::Register(args) => {
            let form = RegisterCitizenDto {
                email: args.email,
                numero_telephone: args.telephone,
                password: args.password,
            };
            eprintln!("Creating account...");
            let created = app.citizens.register(form, &args.confirm_password).await?;
            println!("Created account #{} ({})", created.id, created.email);
            Ok(())
        }
        CitizenCommand::Update(args) => {
            let changes = UpdateCitizenDto {
                email: args.email,
                numero_telephone: args.telephone,
                password: args.password,
            };
            eprintln!("Updating account {}...", args.id);
            let updated = app.citizens.update(args.id, changes).await?;
            println!("Updated account #{} ({})", updated.id, updated.email);
            Ok(())
        }
        CitizenCommand::Delete { id } => {
            eprintln!("Deleting account {id}...");
            app.citizens.delete(id).await?;
            println!("Deleted account #{id}.");
            Ok(())
        }
    }
}

fn render_signalements(signalements: &[Signalement]) {
    if signalements.is_empty() {
        println!("No signalements found.");
        return;
    }
    for signalement in signalements {
        render_signalement(signalement);
    }
    println!("{} signalement(s).", signalements.len());
}

fn render_signalement(s: &Signalement) {
    println!(
        "#{} [{}/{}] {} — {} ({}) — citizen {}",
        s.id, s.gravite, s.status, s.titre, s.ville, s.localisation, s.citizen_id
    );
    println!("    {} | {}", s.categorie, s.description);
    if let Some(commentaire) = &s.commentaire {
        println!("    commentaire: {commentaire}");
    }
}

fn render_citizens(citizens: &[Citizen]) {
    if citizens.is_empty() {
        println!("No accounts found.");
        return;
    }
    for citizen in citizens {
        render_citizen(citizen);
    }
    println!("{} account(s).", citizens.len());
}

fn render_citizen(c: &Citizen) {
    let role = c
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let phone = c.numero_telephone.as_deref().unwrap_or("-");
    println!("#{} {} | {} | role {}", c.id, c.email, phone, role);
}

/// Page-level error banner. Expired sessions get their own wording because
/// the store has already been invalidated by the time this runs.
pub fn render_error(error: &AppError) {
    match error {
        AppError::AuthExpired(_) => {
            eprintln!("Error: session expired (HTTP 401). You have been logged out; run `signalement login` again.")
        }
        other => eprintln!("Error: {other}"),
    }
}
