//! Grounds the actions of a game described in a settings file
use clap::{Parser, Subcommand};
use env_logger::fmt::Formatter;
use log::Record;
use rand::Rng;
use sgaction_rs::sgaction::configured::{GameSettings, ObjectState};
use sgaction_rs::sgaction::{ActionSet, GroundedAction, GroundedActionRecord, JointAction};
use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::{fs, process, thread};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every legal grounding per agent
    Enumerate {
        #[arg()]
        config_file: String,
    },
    /// Parse an `agent:action param...` rendering
    Parse {
        #[arg()]
        config_file: String,
        #[arg()]
        rendering: String,
    },
    /// Pick a random legal joint action
    Sample {
        #[arg()]
        config_file: String,
        #[arg(short, long, default_value = None)]
        reports_folder: Option<String>,
    },
}

fn load(config_file: &str) -> Result<(GameSettings, ActionSet<ObjectState>), Box<dyn Error>> {
    let settings = GameSettings::from_file(config_file)?;
    let actions = settings.action_set()?;
    log::info!(
        "Loaded {} actions for {} agents",
        actions.len(),
        settings.agents.len()
    );
    Ok((settings, actions))
}

fn enumerate(config_file: &str) -> Result<(), Box<dyn Error>> {
    let (settings, actions) = load(config_file)?;
    let state = settings.state();
    for agent in &settings.agents {
        println!("{}:", agent);
        for grounding in actions.all_groundings(&state, agent) {
            println!("\t{}", grounding.just_action_string());
        }
    }
    let agents: Vec<(&str, &ActionSet<ObjectState>)> = settings
        .agents
        .iter()
        .map(|agent| (agent.as_str(), &actions))
        .collect();
    println!(
        "{} joint actions",
        JointAction::all_joint_actions(&state, &agents).len()
    );
    Ok(())
}

fn parse(config_file: &str, rendering: &str) -> Result<(), Box<dyn Error>> {
    let (settings, actions) = load(config_file)?;
    let grounding = actions.parse(rendering)?;
    println!("{}", grounding);
    println!("{}", serde_json::to_string(&grounding.to_record())?);
    println!(
        "applicable: {}",
        grounding.applicable_in_state(&settings.state())
    );
    Ok(())
}

fn sample(config_file: &str, reports_folder: Option<&str>) -> Result<(), Box<dyn Error>> {
    let (settings, actions) = load(config_file)?;
    let state = settings.state();
    let mut rng = rand::thread_rng();
    let mut joint = JointAction::new();
    for agent in &settings.agents {
        let mut legal: Vec<GroundedAction<ObjectState>> =
            actions.all_groundings(&state, agent).collect();
        if legal.is_empty() {
            log::warn!("No legal actions for {}", agent);
            continue;
        }
        let picked = legal.swap_remove(rng.gen_range(0..legal.len()));
        log::debug!("Agent {} plays {}", agent, picked);
        joint.add_action(picked);
    }
    println!("{}", joint);

    if let Some(folder) = reports_folder {
        let records: Vec<GroundedActionRecord> =
            joint.actions().map(GroundedAction::to_record).collect();
        let filename = Path::new(folder).join(format!(
            "sample-{}.json",
            chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
        ));
        fs::write(&filename, serde_json::to_string_pretty(&records)?)?;
        log::info!("Wrote {}", filename.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .format(|buf: &mut Formatter, record: &Record| {
            let thread_id = thread::current().id();
            let timestamp = buf.timestamp_millis();
            writeln!(
                buf,
                "[{}] [Thread: {:?}] [{}] - {}",
                timestamp,
                thread_id,
                record.level(),
                record.args()
            )
        })
        .filter_level(args.verbose.log_level_filter())
        .init();

    let result = match &args.command {
        Command::Enumerate { config_file } => enumerate(config_file),
        Command::Parse {
            config_file,
            rendering,
        } => parse(config_file, rendering),
        Command::Sample {
            config_file,
            reports_folder,
        } => sample(config_file, reports_folder.as_deref()),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}
