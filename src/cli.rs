//! CLI interface for learn-unknown

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::host::local::{LocalEngine, StdoutSpeaker};
use crate::skill::LearnSkill;
use crate::types::Message;

#[derive(Parser)]
#[command(name = "learn-unknown")]
#[command(about = "Fallback skill that learns unanswered utterances into new intents", long_about = None)]
#[command(version)]
struct Cli {
    /// Language tag to use instead of the configured default
    #[arg(short, long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch one utterance: answer it if learned, record it otherwise
    Ask {
        /// Utterance to dispatch
        utterance: String,
    },
    /// Simulate the host fallback for an unmatched utterance
    Fallback {
        /// Utterance no other skill matched
        utterance: String,
    },
    /// Teach with a statement like "the answer to X is Y"
    Teach {
        /// Teach statement
        statement: String,
    },
    /// Attach an answer to an utterance directly
    Answer {
        /// Utterance to answer
        utterance: String,
        /// Answer to speak for it
        answer: String,
    },
    /// Manage learned entities
    Entity {
        #[command(subcommand)]
        command: EntityCommands,
    },
    /// Write intent/entity/dialog files and register them
    Materialize,
    /// List recorded utterances
    Review {
        /// Filter: unanswered, answered, all
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Show store statistics
    Stats,
    /// Interactive session: ask, get asked back, teach
    Interactive,
    /// Configure the skill
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the default language
        #[arg(long)]
        set_lang: Option<String>,
        /// Set the fallback priority
        #[arg(long)]
        set_priority: Option<u8>,
        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
enum EntityCommands {
    /// Declare an entity, or add a value to it
    Add {
        /// Entity name (also its trigger word)
        name: String,
        /// Value to record
        value: Option<String>,
    },
    /// List entities and their values
    List,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let lang = cli.lang;

    // Default to the interactive session if no command given
    match cli.command {
        None | Some(Commands::Interactive) => interactive(config, lang),
        Some(Commands::Ask { utterance }) => ask(config, &utterance, lang),
        Some(Commands::Fallback { utterance }) => fallback(config, &utterance, lang),
        Some(Commands::Teach { statement }) => teach(config, &statement, lang),
        Some(Commands::Answer { utterance, answer }) => {
            answer_direct(config, &utterance, &answer, lang)
        }
        Some(Commands::Entity { command }) => match command {
            EntityCommands::Add { name, value } => entity_add(config, &name, value, lang),
            EntityCommands::List => entity_list(config, lang),
        },
        Some(Commands::Materialize) => materialize(config, lang),
        Some(Commands::Review { filter }) => review(config, &filter, lang),
        Some(Commands::Stats) => stats(config, lang),
        Some(Commands::Config {
            show,
            set_lang,
            set_priority,
            reset,
        }) => {
            if let Some(new_lang) = set_lang {
                config::set_default_lang(&new_lang)?;
            } else if let Some(priority) = set_priority {
                config::set_fallback_priority(priority)?;
            } else if reset {
                config::reset_config()?;
            } else if show {
                config::show_config()?;
            } else {
                println!("Configuration options:");
                println!("  --show                 Display current configuration");
                println!("  --set-lang <tag>       Set the default language");
                println!("  --set-priority <n>     Set the fallback priority");
                println!("  --reset                Reset configuration to defaults");
            }
            Ok(())
        }
    }
}

/// Dispatch an utterance the way the host would: learned intent first,
/// fallback otherwise.
fn ask(config: Config, utterance: &str, lang: Option<String>) -> Result<()> {
    let mut skill = LearnSkill::open(config)?;
    let mut engine = LocalEngine::new();
    skill.initialize(&mut engine)?;
    let mut speaker = StdoutSpeaker::new(skill.dialog_dir());

    match engine.match_utterance(utterance) {
        Some(name) => skill.handle_learned(name, lang.as_deref(), &mut speaker),
        None => {
            let message = Message {
                utterance: utterance.to_string(),
                lang,
            };
            skill.handle_fallback(&message)?;
            println!("I do not know that one yet. Teach me with:");
            println!("  learn-unknown teach \"the answer to {} is ...\"", utterance);
            Ok(())
        }
    }
}

fn fallback(config: Config, utterance: &str, lang: Option<String>) -> Result<()> {
    let mut skill = LearnSkill::open(config)?;
    let message = Message {
        utterance: utterance.to_string(),
        lang,
    };
    skill.handle_fallback(&message)?;
    println!("Recorded. {} utterance(s) waiting for an answer.", {
        let lang = message.lang.as_deref().unwrap_or(skill.lang());
        skill.settings().db.unanswered(lang).len()
    });
    Ok(())
}

fn teach(config: Config, statement: &str, lang: Option<String>) -> Result<()> {
    let mut skill = LearnSkill::open(config)?;
    match skill.teach_statement(statement, lang.as_deref())? {
        Some((utterance, answer)) => {
            let mut engine = LocalEngine::new();
            skill.materialize(&mut engine)?;
            println!("Learned: \"{}\" -> \"{}\"", utterance, answer);
        }
        None => {
            println!("Could not parse that. Expected: the answer to <utterance> is <answer>");
        }
    }
    Ok(())
}

fn answer_direct(config: Config, utterance: &str, answer: &str, lang: Option<String>) -> Result<()> {
    let mut skill = LearnSkill::open(config)?;
    let added = skill.teach_answer(utterance, answer, lang.as_deref())?;
    let mut engine = LocalEngine::new();
    skill.materialize(&mut engine)?;

    if added {
        println!("Learned: \"{}\" -> \"{}\"", utterance, answer);
    } else {
        println!("Already knew that answer.");
    }
    Ok(())
}

fn entity_add(config: Config, name: &str, value: Option<String>, lang: Option<String>) -> Result<()> {
    let mut skill = LearnSkill::open(config)?;
    let changed = skill.add_entity_value(name, value.as_deref(), lang.as_deref())?;

    match (changed, value) {
        (true, Some(value)) => println!("Added '{}' to entity '{}'.", value, name),
        (false, Some(value)) => println!("Entity '{}' already knows '{}'.", name, value),
        (true, None) => println!("Declared entity '{}'.", name),
        (false, None) => println!("Entity '{}' was already declared.", name),
    }
    Ok(())
}

fn entity_list(config: Config, lang: Option<String>) -> Result<()> {
    let skill = LearnSkill::open(config)?;
    let lang = skill.lang_or(lang.as_deref());
    let entities = skill.settings().entities.entities(lang);

    if entities.is_empty() {
        println!("No entities declared for {}.", lang);
        return Ok(());
    }

    println!("Entities ({}):", lang);
    for (entity, values) in entities {
        if values.is_empty() {
            println!("  {} (no values yet)", entity);
        } else {
            println!("  {}: {}", entity, values.join(", "));
        }
    }
    Ok(())
}

fn materialize(config: Config, lang: Option<String>) -> Result<()> {
    let skill = LearnSkill::open(config)?;
    let lang = skill.lang_or(lang.as_deref()).to_string();
    let mut engine = LocalEngine::new();
    let report = skill.materialize_lang(&lang, &mut engine)?;

    println!(
        "Materialized {} intent(s) and {} entity file(s) for {}.",
        report.intents, report.entities, lang
    );
    if report.skipped > 0 {
        println!(
            "{} utterance(s) have no answer yet. See: learn-unknown review --filter unanswered",
            report.skipped
        );
    }
    println!("Files under: {}", skill.vocab_dir().display());
    Ok(())
}

fn review(config: Config, filter: &str, lang: Option<String>) -> Result<()> {
    let skill = LearnSkill::open(config)?;
    let lang = skill.lang_or(lang.as_deref());
    let db = &skill.settings().db;

    if filter == "unanswered" || filter == "all" {
        let unanswered = db.unanswered(lang);
        println!("Unanswered ({}):", unanswered.len());
        for utterance in unanswered {
            println!("  {}", utterance);
        }
    }

    if filter == "answered" || filter == "all" {
        let answered = db.answered(lang);
        println!("Answered ({}):", answered.len());
        for (utterance, answers) in answered {
            println!("  {}", utterance);
            for answer in answers {
                println!("    -> {}", answer);
            }
        }
    }
    Ok(())
}

fn stats(config: Config, lang: Option<String>) -> Result<()> {
    let skill = LearnSkill::open(config)?;
    let lang = skill.lang_or(lang.as_deref());
    let settings = skill.settings();

    println!("Store Statistics");
    println!("================");
    println!("Language:    {}", lang);
    println!("Utterances:  {}", settings.db.len());
    println!("  answered:  {}", settings.db.answered(lang).len());
    println!("  waiting:   {}", settings.db.unanswered(lang).len());
    println!("Entities:    {}", settings.entities.len());
    println!("Priority:    {}", skill.fallback_priority());
    println!();
    println!("Data: {}", skill.data_dir().display());
    Ok(())
}

/// Interactive session: dispatch what the user types, elicit answers
/// for misses, accept teach statements inline.
fn interactive(config: Config, lang: Option<String>) -> Result<()> {
    let mut skill = LearnSkill::open(config)?;
    let mut engine = LocalEngine::new();
    let report = skill.initialize(&mut engine)?;
    let mut speaker = StdoutSpeaker::new(skill.dialog_dir());

    println!("{}", crate::info());
    println!(
        "{} learned intent(s) loaded. Say something, or teach me: \"the answer to X is Y\". Ctrl-D to exit.",
        report.intents
    );

    let mut rl = rustyline::DefaultEditor::new()?;
    loop {
        let line = match rl.readline("you> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        // teach statements take precedence over dispatch
        if let Some((utterance, answer)) = skill.teach_statement(&line, lang.as_deref())? {
            skill.materialize(&mut engine)?;
            println!("Got it. \"{}\" -> \"{}\"", utterance, answer);
            continue;
        }

        match engine.match_utterance(&line) {
            Some(name) => {
                let name = name.to_string();
                skill.handle_learned(&name, lang.as_deref(), &mut speaker)?;
            }
            None => {
                let message = Message {
                    utterance: line.clone(),
                    lang: lang.clone(),
                };
                skill.handle_fallback(&message)?;

                if !skill.elicit_answers() {
                    println!("I do not know that one yet.");
                    continue;
                }

                let reply = match rl.readline("what should I say? > ") {
                    Ok(reply) => reply,
                    Err(rustyline::error::ReadlineError::Interrupted)
                    | Err(rustyline::error::ReadlineError::Eof) => {
                        println!("Kept it for later.");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };
                let reply = reply.trim();
                if reply.is_empty() {
                    println!("Kept it for later.");
                    continue;
                }

                skill.teach_answer(&line, reply, lang.as_deref())?;
                skill.materialize(&mut engine)?;
                println!("Learned it.");
            }
        }
    }

    Ok(())
}
