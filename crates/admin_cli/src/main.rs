use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::users;
use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter,
};

#[derive(Parser, Debug)]
#[command(name = "listings_admin")]
#[command(about = "Admin utilities for listings (bootstrap users)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./listings.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user; the password is prompted for.
    Create(UserCreateArgs),
    /// Print every user id and username.
    List,
    /// Remove a user. Their transactions keep the dangling reference.
    Delete(UserDeleteArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

#[derive(Args, Debug)]
struct UserDeleteArgs {
    #[arg(long)]
    username: String,
}

/// Attempts allowed before `user create` gives up on a password.
const PASSWORD_ATTEMPTS: usize = 3;

/// Keeps the terminal in raw mode while a password is typed.
struct HiddenInput;

impl HiddenInput {
    fn start() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }

    /// Read one line without echoing it. `Esc` or `Ctrl-C` aborts,
    /// `Ctrl-U` clears what was typed so far.
    fn read_line(&self, label: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let mut err = std::io::stderr();
        write_line_start(&mut err, label)?;

        let mut secret = String::new();
        loop {
            let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event::read()?
            else {
                continue;
            };
            let ctrl = modifiers.contains(KeyModifiers::CONTROL);

            match code {
                KeyCode::Enter => break,
                KeyCode::Esc => return Err("aborted".into()),
                KeyCode::Char('c') if ctrl => return Err("aborted".into()),
                KeyCode::Char('u') if ctrl => secret.clear(),
                KeyCode::Backspace => {
                    secret.pop();
                }
                KeyCode::Char(ch) if !ctrl => secret.push(ch),
                _ => {}
            }
        }

        execute!(err, Print("\r\n"))?;
        Ok(secret)
    }
}

impl Drop for HiddenInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn write_line_start(out: &mut impl Write, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(text)
    )?;
    out.flush()?;
    Ok(())
}

/// Ask for the new user's password and its confirmation.
fn new_password(username: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let input = HiddenInput::start()?;
    let mut err = std::io::stderr();

    for _ in 0..PASSWORD_ATTEMPTS {
        let password = input.read_line(&format!("Password for {username}: "))?;
        if password.is_empty() {
            write_line_start(&mut err, "A listing agent needs a non-empty password.\r\n")?;
            continue;
        }

        if input.read_line("Repeat password: ")? == password {
            return Ok(password);
        }
        write_line_start(&mut err, "The two entries differ.\r\n")?;
    }

    Err(format!("no password set after {PASSWORD_ATTEMPTS} attempts").into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn find_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, Box<dyn Error + Send + Sync>> {
    Ok(users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    let Command::User(User { command }) = cli.command;
    match command {
        UserCommand::Create(args) => {
            if find_user(&db, &args.username).await?.is_some() {
                eprintln!("user already exists: {}", args.username);
                std::process::exit(1);
            }

            let password = new_password(&args.username)?;
            let user = users::new_user(
                &args.username,
                &password,
                args.name,
                args.email,
                users::DEFAULT_COST,
            )?
            .insert(&db)
            .await?;

            println!("created user: {} ({})", user.username, user.id);
        }
        UserCommand::List => {
            for user in users::Entity::find().all(&db).await? {
                println!("{}\t{}", user.id, user.username);
            }
        }
        UserCommand::Delete(args) => {
            let Some(user) = find_user(&db, &args.username).await? else {
                eprintln!("user not found: {}", args.username);
                std::process::exit(1);
            };
            users::Entity::delete_by_id(user.id.clone()).exec(&db).await?;
            println!("deleted user: {} ({})", user.username, user.id);
        }
    }

    Ok(())
}
