// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switcher driven from the command line.
//!
//! Loads a configuration the way a page would (from a URL fragment), replays a
//! list of key presses and clicks, and prints the segments and the resolved
//! image after each step.
//!
//! Run:
//! - `cargo run -p imgswitch_demos --example switcher_cli -- --scheme dark 'http://localhost/#config-sources.json' right left`
//! - `RUST_LOG=imgswitch=debug cargo run -p imgswitch_demos --example switcher_cli -- 'http://localhost/#config-local.json' 2 end`

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use imgswitch::{FileConfigSource, FixedScheme, InputEvent, SegmentFlags, Switcher};
use imgswitch_select::types::Key;
use imgswitch_source::env::ColorScheme;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Replay input against a segmented image switcher")]
struct Args {
    /// Page URL whose fragment names the configuration.
    url: String,
    /// Steps: `left`, `right`, `home`, `end`, or a segment index to click.
    steps: Vec<String>,
    /// Color scheme preference: dark, light, or no-preference.
    #[arg(long, default_value = "no-preference")]
    scheme: ColorScheme,
    /// Directory configurations are read from.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/config"))]
    root: PathBuf,
}

fn parse_step(step: &str) -> Result<InputEvent> {
    let event = match step.to_ascii_lowercase().as_str() {
        "left" => InputEvent::Key(Key::ArrowLeft),
        "right" => InputEvent::Key(Key::ArrowRight),
        "home" => InputEvent::Key(Key::Home),
        "end" => InputEvent::Key(Key::End),
        other => InputEvent::Click(
            other
                .parse()
                .with_context(|| format!("unknown step {other:?}"))?,
        ),
    };
    Ok(event)
}

fn print_state(switcher: &Switcher<FixedScheme>) {
    let row: Vec<String> = switcher
        .segments()
        .iter()
        .map(|s| {
            if s.flags.contains(SegmentFlags::SELECTED) {
                format!("[{}]", s.label)
            } else {
                format!(" {} ", s.label)
            }
        })
        .collect();
    println!("  {}", row.join("|"));
    match switcher.current_asset() {
        Some(Ok(image)) => println!("  image: {} ({:?})", image.asset_url, image.origin),
        Some(Err(err)) => println!("  image: <none for {:?}: {err}>", err.label()),
        None => println!("  image: <none>"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let source = FileConfigSource::new(&args.root);
    let mut switcher = Switcher::new(FixedScheme(args.scheme));
    switcher.load_from_url(&source, &args.url);
    if let Some(message) = switcher.status_message() {
        bail!("{message}");
    }
    info!(
        scheme = %args.scheme,
        root = %source.base().display(),
        "loaded {}",
        args.url
    );

    println!("== initial ==");
    print_state(&switcher);
    for step in &args.steps {
        let outcome = switcher.handle(parse_step(step)?);
        println!("== {step} ({}) ==", if outcome.changed() { "changed" } else { "unchanged" });
        print_state(&switcher);
    }
    Ok(())
}
