use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sketchboard::draw::Shape;
use sketchboard::{Command, Config, InputState};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(version, about = "Whiteboard drawing engine: replays command scripts")]
struct Cli {
    /// Config file to use instead of ~/.config/sketchboard/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pretty-print the resulting JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Write a documented default config (to --config, or the default location) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,

    /// Include SVG path data for brush outlines
    #[arg(long, action = ArgAction::SetTrue)]
    svg: bool,

    /// JSON-lines file with one command per line
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let Some(script) = cli.script.as_deref() else {
        // No script: show usage
        println!("sketchboard: Whiteboard drawing engine");
        println!();
        println!("Usage:");
        println!("  sketchboard [--config PATH] [--pretty] [--svg] SCRIPT");
        println!("  sketchboard --init-config [--config PATH]");
        println!("  sketchboard --help      Show help");
        println!();
        println!("SCRIPT holds one JSON command per line, e.g.:");
        println!(r#"  {{"command": "set_active_tool", "tool": "rectangle"}}"#);
        println!(r#"  {{"command": "pointer_down", "x": 0, "y": 0}}"#);
        println!(r#"  {{"command": "pointer_move", "x": 10, "y": 10}}"#);
        println!(r#"  {{"command": "pointer_up", "x": 10, "y": 10}}"#);
        println!();
        println!("Blank lines and lines starting with '#' are skipped.");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut board = InputState::from_config(&config)?;

    let commands = read_script(script)?;
    log::info!("Replaying {} command(s) from {}", commands.len(), script.display());
    for (line, command) in commands {
        board
            .apply(command)
            .with_context(|| format!("{}:{}: command failed", script.display(), line))?;
    }

    let output = render_output(&board, cli.svg)?;
    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", text);

    Ok(())
}

/// Parses a JSON-lines script, keeping each command's 1-based line number.
fn read_script(path: &Path) -> Result<Vec<(usize, Command)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    let mut commands = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command: Command = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid command", path.display(), index + 1))?;
        commands.push((index + 1, command));
    }
    Ok(commands)
}

/// Committed elements plus history flags, as handed to a renderer.
fn render_output(board: &InputState, svg: bool) -> Result<serde_json::Value> {
    let mut elements = Vec::with_capacity(board.elements().len());
    for element in board.canvas().iter() {
        let mut value = serde_json::to_value(element)?;
        if svg {
            if let (Shape::Brush(stroke), Some(fields)) = (&element.shape, value.as_object_mut()) {
                fields.insert("svg_path".to_string(), stroke.svg_path().into());
            }
        }
        elements.push(value);
    }

    Ok(serde_json::json!({
        "elements": elements,
        "can_undo": board.can_undo(),
        "can_redo": board.can_redo(),
    }))
}
