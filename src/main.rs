// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Context, Result};
use keywheel::chords::{
    normalize_search_query, transpose_progression, try_parse_chord, ChordLibrary,
};
use keywheel::config::AppConfig;
use keywheel::music::tables::{key_info, CIRCLE_OF_FIFTHS};
use keywheel::music::{build_minor_pack, build_mode_pack, build_pack, MinorVariant};
use std::env;
use std::path::Path;

fn print_usage() {
    println!("Keywheel - Key and chord explorer");
    println!();
    println!("Usage: keywheel [--config FILE] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --keys                         List major keys around the circle of fifths");
    println!("  --pack [KEY] [VIEW]            Triad pack for KEY (default from config)");
    println!("                                 VIEW: major, relative_minor, natural, harmonic or melodic");
    println!("  --minor <TONIC> [VARIANT]      Triad pack for a minor tonic");
    println!("  --mode <ROOT> <INDEX> [NAME]   Triad pack for a mode (0 Ionian .. 6 Locrian)");
    println!("  --scale <ROOT> <NAME>          Spell a named or custom scale");
    println!("  --parse <TOKEN>                Parse a chord token");
    println!("  --search <TEXT>                Normalize search text");
    println!("  --transpose <FROM> <TO> <CHORDS>...  Transpose a progression");
    println!("  --help                         Show this help message");
}

fn list_keys() -> Result<()> {
    for key in CIRCLE_OF_FIFTHS {
        let info = key_info(key)?;
        println!(
            "{:>3}  {:+}  {:<4} {}",
            info.circle_position,
            info.signature,
            info.tonic,
            info.scale.join(" ")
        );
    }
    Ok(())
}

fn show_pack(config: &AppConfig, key: Option<&str>, view: Option<&str>) -> Result<()> {
    let key = key.unwrap_or(config.theory.default_key.as_str());
    let (view, variant) = config
        .theory
        .resolve_view(view)
        .ok_or_else(|| anyhow!("Unknown view: {}", view.unwrap_or_default()))?;
    let pack = build_pack(key, view, variant);
    print!("{}", serde_yaml::to_string(&pack)?);
    Ok(())
}

fn show_minor(tonic: &str, variant: Option<&str>) -> Result<()> {
    let variant = match variant {
        Some(name) => MinorVariant::parse(name)
            .ok_or_else(|| anyhow!("Unknown minor variant: {}", name))?,
        None => MinorVariant::default(),
    };
    print!("{}", serde_yaml::to_string(&build_minor_pack(tonic, variant))?);
    Ok(())
}

fn show_mode(root: &str, index: &str, name: Option<&str>) -> Result<()> {
    let index: usize = index
        .parse()
        .map_err(|_| anyhow!("Invalid mode index: {}", index))?;
    let pack = build_mode_pack(root, index, name.unwrap_or(""));
    print!("{}", serde_yaml::to_string(&pack)?);
    Ok(())
}

fn show_scale(config: &AppConfig, root: &str, name: &str) -> Result<()> {
    let registry = config.scale_registry();
    match registry.spell(root, name) {
        Some(notes) => println!("{}", notes?.join(" ")),
        None => {
            return Err(anyhow!(
                "Unknown scale: {} (available: {})",
                name,
                registry.available_scales().join(", ")
            ))
        }
    }
    Ok(())
}

fn show_transpose(library: &ChordLibrary, from: &str, to: &str, chords: &[String]) -> Result<()> {
    let text = chords.join(" ");
    for chord in transpose_progression(&text, from, to, library) {
        if chord.notes.is_empty() {
            println!("{}", chord.name);
        } else if chord.show_alternate() {
            let alt = chord.alt_notes.as_deref().unwrap_or_default();
            println!("{:<8} {}  ({})", chord.name, chord.notes.join(" "), alt.join(" "));
        } else {
            println!("{:<8} {}", chord.name, chord.notes.join(" "));
        }
    }
    Ok(())
}

fn require<'a>(args: &'a [String], index: usize, what: &str) -> &'a str {
    match args.get(index) {
        Some(arg) => arg.as_str(),
        None => {
            eprintln!("Error: {} requires {}", args[0], what);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let (config, config_dir) = if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            eprintln!("Error: --config requires a file path");
            std::process::exit(1);
        }
        let path = args[1].clone();
        args.drain(..2);
        let config = AppConfig::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?;
        let dir = Path::new(&path).parent().map(Path::to_path_buf);
        (config, dir)
    } else {
        (AppConfig::default(), None)
    };

    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level())
        .with_writer(std::io::stderr)
        .init();

    if args.is_empty() {
        println!("Keywheel - Key and chord explorer");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[0].as_str() {
        "--keys" => list_keys()?,
        "--pack" => show_pack(
            &config,
            args.get(1).map(String::as_str),
            args.get(2).map(String::as_str),
        )?,
        "--minor" => show_minor(
            require(&args, 1, "a minor tonic"),
            args.get(2).map(String::as_str),
        )?,
        "--mode" => show_mode(
            require(&args, 1, "a root"),
            require(&args, 2, "a mode index"),
            args.get(3).map(String::as_str),
        )?,
        "--scale" => show_scale(
            &config,
            require(&args, 1, "a root"),
            require(&args, 2, "a scale name"),
        )?,
        "--parse" => {
            let chord = try_parse_chord(require(&args, 1, "a chord token"))?;
            println!("root: {}", chord.root);
            println!("quality: {}", chord.quality);
        }
        "--search" => {
            let text = args[1..].join(" ");
            println!("{}", normalize_search_query(&text));
        }
        "--transpose" => {
            let from = require(&args, 1, "a source key");
            let to = require(&args, 2, "a destination key");
            let library = config.chord_library(config_dir.as_deref())?;
            show_transpose(&library, from, to, &args[3..])?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
