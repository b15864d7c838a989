use log::{error, info};
use mindkids::auth::{AccessDenied, AccessGate, Credentials, Redirect};
use mindkids::cli::{Args, Command};
use mindkids::database::Database;
use mindkids::database_factory::{DatabaseConfig, DatabaseFactory};
use mindkids::game::{FeedbackDelays, GameType};
use mindkids::play_service::{PlayError, PlayService};
use mindkids::profile_store::ProfileStore;
use mindkids::report_export;
use mindkids::terminal::{self, Terminal};
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

fn access_message(denied: AccessDenied) -> &'static str {
    match denied.redirect() {
        Redirect::Login => "Faça login primeiro: mindkids login --email <email>",
        Redirect::Pricing => "Ative o acesso premium: mindkids upgrade",
    }
}

fn show_disclaimer_once(db: &Database, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    if !db.has_seen_disclaimer()? {
        terminal::render_disclaimer(out)?;
        db.mark_disclaimer_seen()?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let override_date = args.validate_override_date()?;

    let mut builder = DatabaseConfig::builder();
    if args.test {
        builder = builder.test_mode();
    }
    if let Some(path) = &args.db_path {
        builder = builder.path(path.to_string_lossy());
    }
    if let Some(date) = override_date {
        builder = builder.override_date(date);
    }
    let db_config = builder.build();
    info!("Using database at {}", db_config.get_path());

    let db = Arc::new(DatabaseFactory::create(db_config)?);
    let mut gate = AccessGate::load(db.clone())?;
    let mut store = ProfileStore::load(db.clone())?;
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Login { email, password } => {
            let user = gate.login(&Credentials { email, password })?;
            println!("Bem-vindo(a), {}!", user.name);
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let user = gate.register(&name, &email, &password)?;
            println!("Conta criada. Bem-vindo(a), {}!", user.name);
        }
        Command::Logout => {
            gate.logout()?;
            println!("Até logo!");
        }
        Command::Upgrade => {
            if gate.current_user().is_none() {
                return Err(access_message(AccessDenied::LoginRequired).into());
            }
            terminal::render_pricing(&mut stdout)?;
            gate.activate_premium()?;
            println!("🎉 Acesso Premium ativado!");
        }
        Command::Whoami => match gate.current_user() {
            Some(user) => println!(
                "{} <{}> - {}",
                user.name,
                user.email,
                if user.has_premium { "Premium" } else { "Gratuito" }
            ),
            None => println!("Nenhum usuário conectado."),
        },
        Command::Profiles => {
            terminal::render_profiles(&mut stdout, store.list_profiles(), db.get_current_time())?;
        }
        Command::CreateProfile { name } => {
            let profile = store.create_profile(&name)?;
            println!("Perfil criado: {}", profile.name);
        }
        Command::Games => terminal::render_catalogue(&mut stdout)?,
        Command::Play {
            game,
            profile,
            fast,
        } => {
            let game_type =
                GameType::from_slug(&game).ok_or_else(|| format!("Jogo desconhecido: {}", game))?;
            let profile_id = store
                .find_by_name(&profile)
                .map(|p| p.id)
                .ok_or_else(|| format!("Perfil '{}' não encontrado", profile))?;
            let delays = if fast {
                FeedbackDelays::immediate()
            } else {
                FeedbackDelays::default()
            };

            let service = PlayService::new(db.date_provider(), delays);
            let mut play = match service.begin(&gate, &store, Some(profile_id), game_type) {
                Ok(play) => play,
                Err(PlayError::AccessDenied(denied)) => return Err(access_message(denied).into()),
                Err(e) => return Err(e.into()),
            };
            show_disclaimer_once(&db, &mut stdout)?;

            let mut terminal = Terminal::new(io::stdin().lock(), &mut stdout, db.date_provider());
            if let Some(result) = terminal.play(&mut play)? {
                service.record(&mut store, &play, result)?;
                println!("Resultado salvo no perfil de {}.", play.profile_name);
            }
        }
        Command::Report { profile, html } => {
            let child = store
                .find_by_name(&profile)
                .ok_or_else(|| format!("Perfil '{}' não encontrado", profile))?;
            let service = PlayService::new(db.date_provider(), FeedbackDelays::default());
            let report = match service.report(&gate, &store, child.id) {
                Ok(report) => report,
                Err(PlayError::AccessDenied(denied)) => return Err(access_message(denied).into()),
                Err(e) => return Err(e.into()),
            };
            show_disclaimer_once(&db, &mut stdout)?;
            terminal::render_report(&mut stdout, child, &report)?;

            if let Some(path) = html {
                if report_export::export_to_file(child, db.get_current_time(), &path)? {
                    println!("Relatório para impressão salvo em {}", path.display());
                } else {
                    println!("Nenhum jogo realizado; nada para imprimir.");
                }
            }
        }
        Command::Chat => {
            Terminal::new(io::stdin().lock(), &mut stdout, db.date_provider()).chat()?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse_args();
    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Erro: {}", e);
        std::process::exit(1);
    }
}
