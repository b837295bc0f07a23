//! Kabaddi Sim CLI
//!
//! Auto-plays full matches against the engine and streams the match log to
//! stdout. The engine's own decision brain stands in for the human raider,
//! and a seeded rng stands in for the mini-game input surface, so a given
//! `--seed` always replays the same match.

use anyhow::{bail, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ks_core::engine::ai::{self, AiAction, AiContext};
use ks_core::{
    FeintDirection, GamePhase, GamePlan, GameSim, MultiKillDecision, QteInput, RaidAction,
    RaidConfig, TeamSide,
};

#[derive(Parser)]
#[command(name = "ks_cli")]
#[command(about = "Run kabaddi raid simulations", long_about = None)]
struct Cli {
    /// Simulation seed; each extra game adds one.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of matches to play back to back.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Dump the final state snapshot of each match as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Suppress the play-by-play log, print results only.
    #[arg(long, default_value_t = false)]
    quiet: bool,

    /// Enable engine debug tracing (RUST_LOG overrides).
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut tally = (0u32, 0u32, 0u32);
    for game in 0..cli.games {
        let seed = cli.seed + game as u64;
        let sim = run_game(seed, cli.quiet)?;
        println!(
            "Match {} (seed {}): Player {} - {} AI after {} raids",
            game + 1,
            seed,
            sim.score(TeamSide::Player),
            sim.score(TeamSide::Ai),
            sim.raid_count()
        );
        match sim.winner() {
            Some(ks_core::MatchWinner::Player) => tally.0 += 1,
            Some(ks_core::MatchWinner::Ai) => tally.1 += 1,
            Some(ks_core::MatchWinner::Draw) | None => tally.2 += 1,
        }
        if cli.json {
            println!("{}", sim.snapshot_json()?);
        }
    }
    if cli.games > 1 {
        println!(
            "Totals: {} player wins, {} AI wins, {} draws",
            tally.0, tally.1, tally.2
        );
    }
    Ok(())
}

fn run_game(seed: u64, quiet: bool) -> Result<GameSim> {
    let mut sim = GameSim::new(GamePlan { seed, config: RaidConfig::default() })?;
    // Independent stream for stand-in mini-game results and raid decisions.
    let mut driver = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(7));
    sim.start_game();

    let mut printed = 0usize;
    let mut steps: u64 = 0;
    while sim.phase() != GamePhase::GameOver {
        steps += 1;
        if steps >= 500_000 {
            bail!("match did not terminate (seed {})", seed);
        }
        match sim.phase() {
            GamePhase::SelectRaider => {
                match ai::select_raider(sim.player_squad()) {
                    Some(raider) => sim.start_player_raid(raider),
                    None => bail!("no raider available in SELECT_RAIDER"),
                }
            }
            GamePhase::PlayerRaid => {
                // The stand-in human thinks at the same cadence as the AI.
                if steps % 3 == 0 {
                    act_for_player(&mut sim, &mut driver);
                } else {
                    sim.tick();
                }
            }
            GamePhase::AiRaid => sim.tick(),
            GamePhase::QteActive => {
                let success = resolve_qte(&sim, &mut driver);
                sim.handle_qte_outcome(success);
            }
            GamePhase::RaidDecision => {
                let decision = if driver.gen_bool(0.5) {
                    MultiKillDecision::Press
                } else {
                    MultiKillDecision::Retreat
                };
                sim.resolve_multi_kill(decision);
            }
            GamePhase::RaidEnd => sim.next_turn(),
            GamePhase::PreGame | GamePhase::GameOver => break,
        }
        if !quiet {
            flush_log(&sim, &mut printed);
        }
    }
    if !quiet {
        flush_log(&sim, &mut printed);
    }
    Ok(sim)
}

/// Play the human raider with the engine's own decision brain.
fn act_for_player(sim: &mut GameSim, driver: &mut ChaCha8Rng) {
    let Some(raid) = sim.raid() else {
        return;
    };
    let view = AiContext {
        stamina: raid.stamina,
        clock_remaining: raid.clock_remaining,
        is_do_or_die: sim.is_do_or_die(),
        points_scored: raid.points,
        must_retreat: raid.must_retreat,
        active_defenders: sim.ai_squad().active_count(),
    };
    let lane = raid.lane;
    match ai::choose_action(&view, sim.config(), driver) {
        AiAction::Feint => {
            let direction = if driver.gen_bool(0.5) {
                FeintDirection::Up
            } else {
                FeintDirection::Down
            };
            sim.feint(direction);
        }
        AiAction::Touch => match ai::select_target(sim.ai_squad(), lane) {
            Some(target) => sim.handle_raid_action(RaidAction::Touch, Some(target)),
            None => sim.handle_raid_action(RaidAction::Retreat, None),
        },
        AiAction::Bonus => sim.handle_raid_action(RaidAction::Bonus, None),
        AiAction::Retreat => sim.handle_raid_action(RaidAction::Retreat, None),
    }
}

/// Stand in for the mini-game input surface: one boolean per dispatch.
fn resolve_qte(sim: &GameSim, driver: &mut ChaCha8Rng) -> bool {
    match sim.raid().and_then(|r| r.active_qte).map(|q| q.input) {
        Some(QteInput::Mash { .. }) => driver.gen_bool(0.6),
        Some(QteInput::Timing { success_zone }) => driver.gen_bool(f64::from(success_zone)),
        None => false,
    }
}

fn flush_log(sim: &GameSim, printed: &mut usize) {
    let entries = sim.log().entries();
    for entry in &entries[*printed..] {
        println!("  [{:>3}] {}", entry.seq, entry.message);
    }
    *printed = entries.len();
}
