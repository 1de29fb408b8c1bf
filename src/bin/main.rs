use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{style, Stylize};
use crossterm::terminal::{Clear, ClearType};
use env_logger::{Builder, Target, TimestampPrecision};
use imposter_core::{GameConfig, GameEngine, GameError, Reveal, RoleView, RoundStage, TopicStore};
use log::{error, info, LevelFilter};
use std::fs::File;
use std::io::{self, stdin, stdout, Write};
use std::path::Path;

fn init_logger(path: &Path) {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .format_timestamp(Some(TimestampPrecision::Millis))
        .format_target(true);
    // The screen is shared by everyone, so logs go to a file.
    match File::create(path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("[WARN] Could not open log file {}: {}", path.display(), e);
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> io::Result<()> {
    let config = GameConfig::default();
    init_logger(&config.log_path);
    info!("--- Imposter game starting ---");

    let mut engine = match GameEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("could not load topics: {}", e);
            println!("[ERROR] Could not load topics: {}", e);
            println!("Continuing with an empty library. Changes will NOT be saved.");
            GameEngine::new(TopicStore::in_memory())
        }
    };

    clear_screen()?;
    println!("{}", "Imposter Game".bold());
    println!("---------------------------------------------------------------");
    print_help();

    loop {
        let Some(input) = prompt("\n> ")? else { break };
        let (cmd, arg) = match input.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input.as_str(), ""),
        };

        match cmd {
            "" => {}
            "exit" | "quit" => break,
            "help" => print_help(),
            "add" => report(engine.add_player(arg).map(|_| format!("Added player '{}'.", arg))),
            "remove" => report(engine.remove_player(arg).map(|_| format!("Removed player '{}'.", arg))),
            "players" | "status" => print_status(&engine),
            "addword" => add_word(&mut engine)?,
            "delword" => remove_word(&mut engine)?,
            "topics" => print_topics(&engine),
            "words" => print_words(&engine, arg),
            "toggle" => toggle(&mut engine, arg),
            "settings" => print_settings(&engine),
            "start" => start_round(&mut engine)?,
            "reveal" => reveal_flow(&mut engine, arg)?,
            _ => println!("Unknown command '{}'. Type 'help'.", cmd),
        }
    }

    info!("--- Imposter game shutting down ---");
    Ok(())
}

fn print_help() {
    println!("Players:  add <name> | remove <name> | players");
    println!("Words:    addword | delword | topics | words <topic>");
    println!("Settings: toggle topic | toggle hint | settings");
    println!("Game:     start | reveal <name or number> | status");
    println!("          help | exit");
}

/// Prints `label`, reads one line. `None` on end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    stdout().flush()?;
    let mut line = String::new();
    if stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn clear_screen() -> io::Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))
}

fn report(result: Result<String, GameError>) {
    match result {
        Ok(msg) => println!("{}", msg),
        Err(e) => println!("{} {}", "[ERROR]".red(), e),
    }
}

fn print_status(engine: &GameEngine) {
    if engine.players().is_empty() {
        println!("No players yet. Use 'add <name>'.");
    }
    for (i, player) in engine.players().iter().enumerate() {
        let mark = if engine.has_viewed(&player.name) { " ✔" } else { "" };
        println!("  {}. {}{}", i + 1, player.name, mark.green());
    }
    match engine.stage() {
        RoundStage::NotStarted => println!("No round in progress."),
        RoundStage::InProgress { viewed, total } => println!("Round in progress: {}/{} have seen their role.", viewed, total),
        RoundStage::AllRevealed => {
            let starter = engine.round().map(|r| r.starter()).unwrap_or_default();
            println!("Everyone has seen their role. {} goes first!", starter);
        }
    }
}

fn add_word(engine: &mut GameEngine) -> io::Result<()> {
    let Some(topic) = prompt("Topic name: ")? else { return Ok(()) };
    if topic.is_empty() {
        return Ok(());
    }
    let Some(word) = prompt("Word: ")? else { return Ok(()) };
    let Some(hint) = prompt("Vague hint (association, NOT definition): ")? else { return Ok(()) };
    report(engine.add_word(&topic, &word, &hint).map(|_| format!("Saved '{}' under '{}'.", word, topic)));
    Ok(())
}

fn remove_word(engine: &mut GameEngine) -> io::Result<()> {
    let Some(topic) = prompt("Topic: ")? else { return Ok(()) };
    let Some(word) = prompt("Word: ")? else { return Ok(()) };
    report(engine.remove_word(&topic, &word).map(|removed| {
        if removed {
            format!("Removed '{}' from '{}'.", word, topic)
        } else {
            "Nothing to remove.".to_string()
        }
    }));
    Ok(())
}

fn print_topics(engine: &GameEngine) {
    if engine.topics.is_empty() {
        println!("No topics yet. Use 'addword'.");
        return;
    }
    for topic in engine.topics.list_topics() {
        let count = engine.topics.words_of(topic).map(|w| w.len()).unwrap_or(0);
        println!("  {} ({} words)", topic, count);
    }
}

fn print_words(engine: &GameEngine, topic: &str) {
    match engine.topics.words_of(topic) {
        Ok(words) if words.is_empty() => println!("'{}' has no words.", topic),
        Ok(words) => {
            for (word, hint) in words {
                println!("  {} -> {}", word, hint);
            }
        }
        Err(e) => println!("{} {}", "[ERROR]".red(), e),
    }
}

fn on_off(value: bool) -> String {
    if value {
        "ON".green().to_string()
    } else {
        "OFF".dark_grey().to_string()
    }
}

fn print_settings(engine: &GameEngine) {
    let settings = engine.settings();
    println!("Show Topic to Players: {}", on_off(settings.show_topic_to_all));
    println!("Imposter sees Hint:    {}", on_off(settings.show_hint_to_imposter));
}

fn toggle(engine: &mut GameEngine, what: &str) {
    match what {
        "topic" => {
            engine.toggle_show_topic();
        }
        "hint" => {
            engine.toggle_show_hint_to_imposter();
        }
        _ => {
            println!("Use 'toggle topic' or 'toggle hint'.");
            return;
        }
    }
    print_settings(engine);
}

fn start_round(engine: &mut GameEngine) -> io::Result<()> {
    let max = engine.players().len().saturating_sub(1);
    let Some(answer) = prompt(&format!("How many imposters? (1-{}): ", max.max(1)))? else { return Ok(()) };
    if answer.is_empty() {
        return Ok(());
    }
    let Ok(count) = answer.parse::<usize>() else {
        println!("{} '{}' is not a number.", "[ERROR]".red(), answer);
        return Ok(());
    };
    match engine.start_round(count) {
        Ok(()) => {
            clear_screen()?;
            println!("{}", "Game ready!".green().bold());
            println!("\nPass the device.\nType 'reveal <your name>' to see your role.\n");
            print_status(engine);
        }
        Err(e) => println!("{} {}", "[ERROR]".red(), e),
    }
    Ok(())
}

/// Accepts a player name or a 1-based position in the roster.
fn resolve_player(engine: &GameEngine, target: &str) -> Option<String> {
    if let Ok(n) = target.parse::<usize>() {
        if let Some(player) = n.checked_sub(1).and_then(|i| engine.players().get(i)) {
            return Some(player.name.clone());
        }
    }
    engine
        .players()
        .iter()
        .find(|p| p.name == target)
        .map(|p| p.name.clone())
}

fn reveal_flow(engine: &mut GameEngine, target: &str) -> io::Result<()> {
    let Some(name) = resolve_player(engine, target) else {
        println!("{} {}", "[ERROR]".red(), GameError::UnknownPlayer(target.to_string()));
        return Ok(());
    };
    if engine.stage() == RoundStage::NotStarted {
        println!("{} {}", "[ERROR]".red(), GameError::NoActiveRound);
        return Ok(());
    }
    if engine.has_viewed(&name) {
        println!("{} has already seen their role.", name);
        return Ok(());
    }

    clear_screen()?;
    println!("\n\n{}\n", style(&name).bold());
    println!("Is this you?\nMake sure no one else is looking 👀\n");
    let Some(answer) = prompt("[y] YES, SHOW MY ROLE / [n] NO, GO BACK: ")? else { return Ok(()) };
    if !answer.eq_ignore_ascii_case("y") && !answer.eq_ignore_ascii_case("yes") {
        clear_screen()?;
        return Ok(());
    }

    let reveal = match engine.reveal_role(&name) {
        Ok(Some(reveal)) => reveal,
        Ok(None) => return Ok(()),
        Err(e) => {
            println!("{} {}", "[ERROR]".red(), e);
            return Ok(());
        }
    };

    clear_screen()?;
    print_role(&reveal);
    prompt("\n[Enter] DONE (PASS THE DEVICE)")?;
    clear_screen()?;

    if let Some(discussion) = reveal.discussion {
        println!("{}", "Discussion Start".bold());
        println!("{} goes first!", style(&discussion.starter).green().bold());
    } else {
        print_status(engine);
    }
    Ok(())
}

fn print_role(reveal: &Reveal) {
    println!("\n{}\n", style(&reveal.player).bold());
    match &reveal.view {
        RoleView::Crewmate { topic, word } => {
            if let Some(topic) = topic {
                println!("Topic:\n{}\n", topic);
            }
            println!("WORD:\n{}", style(word).bold());
        }
        RoleView::Imposter { topic, hint } => {
            println!("{}\n", "YOU ARE THE IMPOSTER".red().bold());
            if let Some(topic) = topic {
                println!("Topic: {}\n", topic);
            }
            if let Some(hint) = hint {
                println!("Hint:\n{}", hint);
            }
        }
        RoleView::ImposterNoInfo => {
            println!("{}\n", "YOU ARE THE IMPOSTER".red().bold());
            println!("No extra info.\nBlend in 😈");
        }
    }
}
