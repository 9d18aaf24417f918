use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use database::{connect, DatabaseConfig, SqliteStore, TrackerStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracker::{
    render, search_sources, ActionError, GameTimer, Mutation, Outcome, TrackerConfig,
    TrackerSession,
};
use types::{GameType, PlayerNames, Round, VpSource};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "dune_tracker", about = "Track victory points for Dune: Imperium games")]
struct Params {
    /// Database URL, overrides DATABASE_URL and the config file
    #[arg(long, global = true)]
    database: Option<String>,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a game and seed one VP per player
    New {
        #[arg(long)]
        game_type: Option<GameType>,
        /// Up to four names, blanks fall back to the configured defaults
        #[arg(short, long)]
        player: Vec<String>,
    },
    /// Show a player's track and the Landsraad status
    Show {
        game_id: Uuid,
        #[arg(long)]
        player: Option<String>,
        #[arg(long, value_parser = parse_round)]
        round: Option<Round>,
        /// Print the whole game as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Every round's VPs for one player
    Breakdown {
        game_id: Uuid,
        #[arg(long)]
        player: String,
    },
    AddVp {
        game_id: Uuid,
        player: String,
        source: VpSource,
        #[arg(value_parser = parse_round)]
        round: Round,
    },
    EditVp {
        vp_id: Uuid,
        source: VpSource,
    },
    RemoveVp {
        vp_id: Uuid,
    },
    #[command(subcommand)]
    HighCouncil(HighCouncilCommand),
    #[command(subcommand)]
    Swordmaster(SwordmasterCommand),
    /// List the VP sources a variant offers
    Sources {
        game_type: GameType,
        #[arg(long)]
        search: Option<String>,
    },
    /// Run the table clock. Enter starts a new turn, `s` stops, `q` quits
    Timer,
}

#[derive(Subcommand, Debug)]
enum HighCouncilCommand {
    Add {
        game_id: Uuid,
        player: String,
        #[arg(value_parser = parse_round)]
        round: Round,
    },
    Remove {
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
enum SwordmasterCommand {
    Add {
        game_id: Uuid,
        player: String,
        #[arg(value_parser = parse_round)]
        round: Round,
        cost: u8,
    },
    Remove {
        id: Uuid,
    },
}

fn parse_round(value: &str) -> Result<Round, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a round number"))?;
    Round::try_from(number)
}

fn report<T>(result: Result<Outcome<T>, ActionError>, describe: impl Fn(&T) -> String) -> bool {
    match result {
        Ok(outcome) => {
            println!("{}", describe(&outcome.value));
            if let Some(revalidation) = outcome.revalidation {
                log::info!("{revalidation}");
            }
            true
        }
        Err(err) => {
            eprintln!("{err}");
            false
        }
    }
}

async fn run_timer(turn_duration: Duration) -> std::io::Result<()> {
    let mut timer = GameTimer::new(turn_duration);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut announced = false;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                timer.tick(Duration::from_secs(1));
                if timer.is_running() {
                    println!("game {}  turn {}", timer.format_game_time(), timer.format_turn_time());
                    if timer.turn_over() && !announced {
                        println!("Turn over");
                        announced = true;
                    }
                }
            }
            line = lines.next_line() => {
                match line?.as_deref().map(str::trim) {
                    None | Some("q") => break,
                    Some("s") => timer.stop(),
                    Some(_) => {
                        timer.resume();
                        announced = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    if timer.has_started() {
        println!("Game time {}", timer.format_game_time());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Params::parse();
    log::debug!("args: {args:?}");

    let config = TrackerConfig::load(args.config.as_deref())?;

    if let Command::Sources { game_type, search } = &args.command {
        let sources = search_sources(*game_type, search.as_deref().unwrap_or(""), None);
        print!("{}", render::render_sources(*game_type, &sources));
        return Ok(());
    }
    if let Command::Timer = &args.command {
        run_timer(config.turn_duration()).await?;
        return Ok(());
    }

    let db_config =
        DatabaseConfig::from_cli_or_env_or_yaml(args.database.clone(), config.database_url.clone());
    if db_config.is_in_memory() {
        log::warn!("Using an in-memory database, nothing will be kept after exit");
    }
    let store: SqliteStore = connect(&db_config).await?;

    let ok = match args.command {
        Command::New { game_type, player } => {
            let players = PlayerNames::with_defaults(&player, &config.default_players);
            let game_type = game_type.unwrap_or(config.default_game_type);
            report(
                tracker::create_game(&store, game_type, players).await,
                |id| id.to_string(),
            )
        }
        Command::Show {
            game_id,
            player,
            round,
            json,
        } => match tracker::load_game_data(&store, game_id).await {
            Some(data) if json => {
                println!("{}", serde_json::to_string_pretty(&data)?);
                true
            }
            Some(data) => {
                let mut session = TrackerSession::new(data);
                if let Some(name) = player {
                    session.select_player(&name);
                }
                if let Some(round) = round {
                    session.rounds_mut().set(round);
                }
                println!(
                    "{} game, {} at round {}",
                    session.data().game.game_type,
                    session.selected_player(),
                    session.round()
                );
                print!("{}", render::render_grid(&session.grid()));
                println!();
                print!("{}", render::render_landsraad(session.data()));
                true
            }
            None => {
                eprintln!("Game {game_id} not found");
                false
            }
        },
        Command::Breakdown { game_id, player } => {
            match tracker::load_game_data(&store, game_id).await {
                Some(data) => {
                    let mut session = TrackerSession::new(data);
                    session.select_player(&player);
                    print!("{}", render::render_breakdown(&session.breakdown()));
                    true
                }
                None => {
                    eprintln!("Game {game_id} not found");
                    false
                }
            }
        }
        Command::AddVp {
            game_id,
            player,
            source,
            round,
        } => {
            let result =
                match tracker::ensure_offered(&store, Mutation::AddVictoryPoint, game_id, source)
                    .await
                {
                    Ok(()) => {
                        tracker::add_victory_point(&store, game_id, &player, source, round, true)
                            .await
                    }
                    Err(err) => Err(err),
                };
            report(result, |vp| {
                format!("Added {} for {} as {}", vp.source, vp.player_name, vp.id)
            })
        }
        Command::EditVp { vp_id, source } => {
            let checked = match store.find_victory_point(vp_id).await? {
                Some(vp) => {
                    tracker::ensure_offered(&store, Mutation::EditVictoryPoint, vp.game_id, source)
                        .await
                }
                None => Ok(()),
            };
            let result = match checked {
                Ok(()) => tracker::edit_victory_point(&store, vp_id, source).await,
                Err(err) => Err(err),
            };
            report(result, |vp| format!("VP {} is now {}", vp.id, vp.source))
        }
        Command::RemoveVp { vp_id } => report(
            tracker::remove_victory_point(&store, vp_id).await,
            |deleted| format!("Removed VP {}", deleted.id),
        ),
        Command::HighCouncil(HighCouncilCommand::Add {
            game_id,
            player,
            round,
        }) => report(
            tracker::add_high_council(&store, game_id, &player, round, true).await,
            |record| format!("{} joined the high council as {}", record.player_name, record.id),
        ),
        Command::HighCouncil(HighCouncilCommand::Remove { id }) => report(
            tracker::remove_high_council(&store, id).await,
            |deleted| format!("Removed high council seat {}", deleted.id),
        ),
        Command::Swordmaster(SwordmasterCommand::Add {
            game_id,
            player,
            round,
            cost,
        }) => report(
            tracker::add_swordmaster(&store, game_id, &player, round, cost, true).await,
            |record| {
                format!(
                    "{} bought the swordmaster for {} as {}",
                    record.player_name, record.cost, record.id
                )
            },
        ),
        Command::Swordmaster(SwordmasterCommand::Remove { id }) => report(
            tracker::remove_swordmaster(&store, id).await,
            |deleted| format!("Removed swordmaster {}", deleted.id),
        ),
        Command::Sources { .. } | Command::Timer => true,
    };

    store.pool().close().await;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
