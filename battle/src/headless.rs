//! Headless mode for the battle game.
//!
//! A line-oriented text protocol over stdin/stdout for scripted play and
//! automated testing. Game output is printed as-is; protocol messages are
//! tagged `[STATUS]`, `[ERROR]` and so on.

use std::io::{self, BufRead, Write};

use battle_core::headless::{HeadlessConfig, HeadlessGame};
use battle_core::HeroClass;

const HELP: &[&str] = &[
    "  #recruit <class> - Add a warrior, mage, cleric or rogue to the party",
    "  #fight           - Start the next battle",
    "  use <ability> <n> - Use an ability on target number n (see #status)",
    "  #status          - Show the party, the battle and the streak",
    "  #new             - Start a new run",
    "  #help            - Show this help",
    "  #quit            - Exit",
];

/// Run the game in headless mode until `#quit` or end of input.
pub fn run_headless(config: HeadlessConfig) -> anyhow::Result<()> {
    let mut game = HeadlessGame::new(config)?;

    println!("=== Party Battle Headless Mode ===");
    for line in game.status() {
        println!("{line}");
    }
    println!();
    println!("Commands:");
    for line in HELP {
        println!("{line}");
    }
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let result = match parts.as_slice() {
            ["#quit"] | ["#exit"] => {
                println!("Goodbye!");
                break;
            }
            ["#help"] => {
                println!("[HELP]");
                for line in HELP {
                    println!("{line}");
                }
                Ok(Vec::new())
            }
            ["#status"] => {
                println!("[STATUS]");
                Ok(game.status())
            }
            ["#recruit", class] => match HeroClass::from_name(class) {
                Some(class) => game.recruit(class),
                None => {
                    println!("[ERROR] Unknown class '{class}'");
                    continue;
                }
            },
            ["#fight"] => game.fight(),
            ["#new"] => game.new_run(),
            ["use", ability, target] => match target.parse::<usize>() {
                Ok(target) => game.use_ability(ability, target),
                Err(_) => {
                    println!("[ERROR] Target must be a number, got '{target}'");
                    continue;
                }
            },
            _ => {
                println!("[ERROR] Unknown command. Type #help for help.");
                continue;
            }
        };

        match result {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(e) => {
                tracing::debug!(command = line, error = %e, "headless command failed");
                println!("[ERROR] {e}");
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

/// Build a headless config from the classes given with `--party`.
pub fn config_from_party(
    party: &[String],
    seed: Option<u64>,
    party_size: usize,
) -> anyhow::Result<HeadlessConfig> {
    let classes = party
        .iter()
        .map(|name| {
            HeroClass::from_name(name).ok_or_else(|| anyhow::anyhow!("unknown class '{name}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut config = HeadlessConfig::new()
        .with_party_size(party_size)
        .with_party(classes);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}
