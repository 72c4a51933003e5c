//! Console demo: one wild battle against a random species from the bundled dex.
//!
//! Usage: `creature-battle [config.ron]`. Set `RUST_LOG=creature_battle=debug` to
//! trace the engine.

use async_trait::async_trait;
use creature_battle::{
    input_channel, BattleConfig, BattleInput, BattlePhase, BattlePlayer, BattleResult,
    BattleSession, Cue, Dex, Party, PresentationPort, Side, TurnRng,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Prints everything to stdout and sleeps through the pauses.
struct ConsolePresenter;

#[async_trait]
impl PresentationPort for ConsolePresenter {
    async fn show_message(&self, text: &str) {
        println!("{}", text);
    }

    async fn play_cue(&self, cue: Cue, side: Side) {
        tracing::debug!(?cue, %side, "cue");
    }

    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn update_hp(&self, side: Side, hp: u16, max_hp: u16) {
        println!("  [{} HP {}/{}]", side, hp, max_hp);
    }

    fn phase_changed(&self, phase: BattlePhase) {
        let prompt = match phase {
            BattlePhase::ActionSelection => "> fight | bag | party | run",
            BattlePhase::MoveSelection => "> move <n> | back",
            BattlePhase::PartyScreen => "> member <n> | back",
            BattlePhase::AboutToUseSwitch => "> yes | no",
            BattlePhase::MoveToForget => "> forget <n> | keep",
            _ => return,
        };
        println!("{}", prompt);
    }
}

fn parse_command(line: &str) -> Option<BattleInput> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_lowercase();
    let index = words.next().and_then(|word| word.parse::<usize>().ok());

    match (command.as_str(), index) {
        ("fight" | "f", _) => Some(BattleInput::Fight),
        ("bag" | "ball" | "b", _) => Some(BattleInput::Bag),
        ("party" | "p", _) => Some(BattleInput::Party),
        ("run" | "r", _) => Some(BattleInput::Run),
        ("move" | "m", Some(n)) => Some(BattleInput::SelectMove(n)),
        ("member", Some(n)) => Some(BattleInput::SelectMember(n)),
        ("back", _) => Some(BattleInput::Back),
        ("yes" | "y", _) => Some(BattleInput::Confirm(true)),
        ("no" | "n", _) => Some(BattleInput::Confirm(false)),
        ("forget", Some(n)) => Some(BattleInput::ForgetMove(Some(n))),
        ("keep", _) => Some(BattleInput::ForgetMove(None)),
        _ => None,
    }
}

fn print_party(party: &Party) {
    println!("Your party:");
    for (i, pokemon) in party.members().iter().enumerate() {
        println!(
            "  {}: {} Lv{} ({}/{} HP)",
            i,
            pokemon.name(),
            pokemon.level,
            pokemon.current_hp(),
            pokemon.max_hp()
        );
        for (slot, m) in pokemon.moves.iter().enumerate() {
            println!("      move {}: {} ({}/{} PP)", slot, m.name(), m.pp, m.max_pp());
        }
    }
}

#[tokio::main]
async fn main() -> BattleResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    let dex = Dex::bundled()?;

    let party = Party::new(vec![
        dex.create_pokemon("Charmander", 12)?,
        dex.create_pokemon("Pikachu", 10)?,
    ])?;
    print_party(&party);
    let player = BattlePlayer::new("Red", Side::Player, party)?;
    let wild = dex.random_pokemon(3..=7, &mut TurnRng::new_random())?;

    let (sender, receiver) = input_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Some(input) => {
                    if sender.send(input).is_err() {
                        break;
                    }
                }
                None => println!("Unknown command: {}", line.trim()),
            }
        }
    });

    let session = BattleSession::wild(player, wild, ConsolePresenter, receiver)?.with_config(config);
    let report = session.run().await?;

    println!();
    println!("{} after {} turn(s).", report.outcome, report.turns);
    print_party(&report.player);
    Ok(())
}
