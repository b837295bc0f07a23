//! End-to-end raid scenarios across the flow controller, the raid engine,
//! and the timers. Randomness is pinned through the config (forcing a
//! branch by setting its probability to 0 or 1) rather than by fishing for
//! lucky seeds.

use crate::config::RaidConfig;
use crate::engine::game::GamePhase;
use crate::engine::qte::{QteContext, QteInput};
use crate::engine::raid::{MultiKillDecision, RaidAction};
use crate::engine::test_support::{set_side_stats, set_stats, sim_with};
use crate::formation::FeintDirection;
use crate::models::{PlayerId, TeamSide};

fn p(i: u8) -> PlayerId {
    PlayerId::new(TeamSide::Player, i)
}

fn a(i: u8) -> PlayerId {
    PlayerId::new(TeamSide::Ai, i)
}

#[test]
fn test_touch_with_agility_edge_dispatches_timing_tackle_score() {
    let mut sim = sim_with(RaidConfig::default(), 5);
    set_stats(&mut sim, p(0), 5, 7, 5);
    set_stats(&mut sim, a(0), 5, 5, 3);
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Touch, Some(a(0)));

    assert_eq!(sim.phase(), GamePhase::QteActive);
    let qte = sim.raid().unwrap().active_qte.unwrap();
    assert!(matches!(qte.input, QteInput::Timing { .. }));
    assert_eq!(qte.context, QteContext::TackleScore { defender: a(0) });
}

#[test]
fn test_touch_without_edge_dispatches_mash_escape() {
    let mut sim = sim_with(RaidConfig::default(), 5);
    set_stats(&mut sim, p(0), 5, 4, 5);
    set_stats(&mut sim, a(0), 5, 5, 6);
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Touch, Some(a(0)));

    let qte = sim.raid().unwrap().active_qte.unwrap();
    assert!(matches!(qte.input, QteInput::Mash { .. }));
    assert_eq!(qte.context, QteContext::TackleEscape { defender: a(0) });
}

#[test]
fn test_stamina_depletion_ends_raid_as_failure() {
    let mut sim = sim_with(RaidConfig::default(), 5);
    sim.start_player_raid(p(0));
    sim.raid.as_mut().unwrap().stamina = 1;
    sim.tick();
    sim.tick(); // one full second: the drain fires

    assert!(sim.raid().is_none());
    assert!(sim.player_squad().get(p(0)).unwrap().is_out);
    assert!(sim.out_queue(TeamSide::Player).contains(p(0)));
    assert!(sim.log().contains("Stamina depleted"));
    assert_eq!(sim.empty_raids(TeamSide::Player), 1);
    assert_eq!(sim.phase(), GamePhase::RaidEnd);
    assert_eq!(sim.raid_count(), 1);

    // No timer may fire after raid end: further ticks change nothing.
    let log_len = sim.log().len();
    for _ in 0..10 {
        sim.tick();
    }
    assert_eq!(sim.log().len(), log_len);
    assert_eq!(sim.raid_count(), 1);
}

#[test]
fn test_clock_expiry_matches_stamina_depletion() {
    let mut sim = sim_with(RaidConfig::default(), 5);
    sim.start_player_raid(p(0));
    sim.raid.as_mut().unwrap().clock_remaining = 1;
    sim.tick();
    sim.tick();

    assert!(sim.raid().is_none());
    assert!(sim.log().contains("Raid clock expired"));
    assert_eq!(sim.empty_raids(TeamSide::Player), 1);
}

#[test]
fn test_qte_suspends_both_raid_timers() {
    let mut sim = sim_with(RaidConfig::default(), 5);
    set_stats(&mut sim, p(0), 5, 7, 5);
    set_stats(&mut sim, a(0), 5, 5, 3);
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Touch, Some(a(0)));
    assert_eq!(sim.phase(), GamePhase::QteActive);

    let stamina = sim.raid().unwrap().stamina;
    let clock = sim.raid().unwrap().clock_remaining;
    for _ in 0..20 {
        sim.tick();
    }
    assert_eq!(sim.raid().unwrap().stamina, stamina);
    assert_eq!(sim.raid().unwrap().clock_remaining, clock);
}

#[test]
fn test_do_or_die_scoreless_retreat_bypasses_block_roll() {
    let mut config = RaidConfig::default();
    config.retreat_block_chance = 1.0; // a roll would always block
    let mut sim = sim_with(config, 5);
    sim.player_empty_raids = 3;
    sim.start_player_raid(p(0));
    assert!(sim.is_do_or_die());

    sim.handle_raid_action(RaidAction::Retreat, None);

    assert_ne!(sim.phase(), GamePhase::QteActive);
    assert!(sim.player_squad().get(p(0)).unwrap().is_out);
    assert!(sim.log().contains("Failed do-or-die"));
    assert_eq!(sim.empty_raids(TeamSide::Player), 4);
}

#[test]
fn test_breaking_free_scoreless_in_do_or_die_still_eliminates() {
    let mut sim = sim_with(RaidConfig::default(), 5);
    sim.player_empty_raids = 3;
    set_stats(&mut sim, p(0), 5, 4, 5);
    set_stats(&mut sim, a(0), 5, 5, 6);
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Touch, Some(a(0)));
    assert_eq!(sim.phase(), GamePhase::QteActive);

    sim.handle_qte_outcome(true); // escape succeeds, raid is still scoreless

    assert!(sim.player_squad().get(p(0)).unwrap().is_out);
    assert!(sim.raid().is_none());
    assert_eq!(sim.empty_raids(TeamSide::Player), 4);
}

#[test]
fn test_multi_kill_chain_caps_at_three() {
    let mut config = RaidConfig::default();
    config.multi_kill_chain_p2 = 1.0;
    config.multi_kill_chain_p3 = 1.0;
    config.retreat_block_chance = 0.0;
    let mut sim = sim_with(config, 5);
    set_stats(&mut sim, p(0), 5, 7, 5);
    set_side_stats(&mut sim, TeamSide::Ai, 5, 5, 1); // the raider always has the edge
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Touch, Some(a(0)));

    for _ in 0..3 {
        assert_eq!(sim.phase(), GamePhase::QteActive);
        sim.handle_qte_outcome(true);
    }

    // Third point reached the hard cap: no fourth offer, retreat is forced.
    assert_eq!(sim.phase(), GamePhase::PlayerRaid);
    let raid = sim.raid().unwrap();
    assert_eq!(raid.multi_kill_count, 3);
    assert_eq!(raid.points, 3);
    assert!(raid.must_retreat);
    assert!(raid.active_qte.is_none());

    // Touch is refused while committed to retreating.
    sim.handle_raid_action(RaidAction::Touch, Some(a(5)));
    assert_eq!(sim.phase(), GamePhase::PlayerRaid);

    sim.handle_raid_action(RaidAction::Retreat, None);
    assert_eq!(sim.phase(), GamePhase::RaidEnd);
    assert_eq!(sim.score(TeamSide::Player), 3);
    assert_eq!(sim.out_queue(TeamSide::Ai).len(), 3);
}

#[test]
fn test_feint_bait_press_chain_and_revival() {
    let mut config = RaidConfig::default();
    config.bait_base_chance = 1.0;
    config.feint_escalate_chance = 1.0;
    config.multi_struggle_escalate_chance = 1.0;
    config.retreat_block_chance = 0.0;
    let mut sim = sim_with(config, 5);
    sim.mark_out(p(5), "Tackled");
    sim.mark_out(p(6), "Tackled");
    sim.start_player_raid(p(0));

    sim.feint(FeintDirection::Up);
    assert_eq!(sim.raid().unwrap().lane.to_string(), "top");
    assert_eq!(sim.phase(), GamePhase::QteActive);
    let first = sim.raid().unwrap().active_qte.unwrap();
    assert!(matches!(first.context, QteContext::FeintStruggle { .. }));

    sim.handle_qte_outcome(true);
    assert_eq!(sim.phase(), GamePhase::RaidDecision);

    sim.resolve_multi_kill(MultiKillDecision::Press);
    let second = sim.raid().unwrap().active_qte.unwrap();
    assert!(matches!(second.context, QteContext::MultiStruggle2 { .. }));

    sim.handle_qte_outcome(true);
    assert_eq!(sim.phase(), GamePhase::RaidDecision);

    sim.resolve_multi_kill(MultiKillDecision::Press);
    let third = sim.raid().unwrap().active_qte.unwrap();
    assert!(matches!(third.context, QteContext::MultiStruggle3 { .. }));

    sim.handle_qte_outcome(true);
    assert_eq!(sim.phase(), GamePhase::PlayerRaid);
    assert_eq!(sim.raid().unwrap().points, 3);
    assert!(sim.raid().unwrap().must_retreat);

    sim.handle_raid_action(RaidAction::Retreat, None);
    assert_eq!(sim.phase(), GamePhase::RaidEnd);
    assert_eq!(sim.score(TeamSide::Player), 3);
    // Three points revive both waiting teammates, oldest first.
    assert!(sim.out_queue(TeamSide::Player).is_empty());
    assert_eq!(sim.player_squad().active_count(), 7);
}

#[test]
fn test_decision_retreat_returns_to_raid_with_forced_retreat() {
    let mut config = RaidConfig::default();
    config.bait_base_chance = 1.0;
    config.feint_escalate_chance = 1.0;
    let mut sim = sim_with(config, 5);
    sim.start_player_raid(p(0));
    sim.feint(FeintDirection::Down);
    sim.handle_qte_outcome(true);
    assert_eq!(sim.phase(), GamePhase::RaidDecision);

    sim.resolve_multi_kill(MultiKillDecision::Retreat);
    assert_eq!(sim.phase(), GamePhase::PlayerRaid);
    assert!(sim.raid().unwrap().must_retreat);
}

#[test]
fn test_three_scoreless_raids_arm_do_or_die() {
    let mut config = RaidConfig::default();
    config.retreat_block_chance = 0.0;
    config.ai_low_stamina = 101; // the opponent retreats on its first thought
    let mut sim = sim_with(config, 5);

    for _ in 0..3 {
        let raider = sim.player_squad().first_active().unwrap();
        sim.start_player_raid(raider);
        assert!(!sim.is_do_or_die());
        sim.handle_raid_action(RaidAction::Retreat, None);
        assert_eq!(sim.phase(), GamePhase::RaidEnd);
        sim.next_turn();
        assert_eq!(sim.phase(), GamePhase::AiRaid);
        let mut guard = 0;
        while sim.phase() == GamePhase::AiRaid {
            sim.tick();
            guard += 1;
            assert!(guard < 100, "AI raid failed to resolve");
        }
        assert_eq!(sim.phase(), GamePhase::RaidEnd);
        sim.next_turn();
        assert_eq!(sim.phase(), GamePhase::SelectRaider);
    }

    assert_eq!(sim.empty_raids(TeamSide::Player), 3);
    let raider = sim.player_squad().first_active().unwrap();
    sim.start_player_raid(raider);
    assert!(sim.is_do_or_die());
}

#[test]
fn test_scoring_resets_empty_raid_counter() {
    let mut config = RaidConfig::default();
    config.retreat_block_chance = 0.0;
    config.multi_kill_chain_p2 = 0.0;
    let mut sim = sim_with(config, 5);
    sim.player_empty_raids = 3;
    set_stats(&mut sim, p(0), 5, 7, 5);
    set_stats(&mut sim, a(0), 5, 5, 3);
    sim.start_player_raid(p(0));
    assert!(sim.is_do_or_die());

    sim.handle_raid_action(RaidAction::Touch, Some(a(0)));
    sim.handle_qte_outcome(true); // point banked, chain declined
    assert_eq!(sim.phase(), GamePhase::PlayerRaid);
    sim.handle_raid_action(RaidAction::Retreat, None);

    assert_eq!(sim.score(TeamSide::Player), 1);
    assert_eq!(sim.empty_raids(TeamSide::Player), 0);
    assert!(!sim.is_do_or_die());
}

#[test]
fn test_failed_defense_during_ai_raid_costs_the_defender() {
    let mut config = RaidConfig::default();
    config.retreat_block_chance = 0.0;
    config.ai_feint_chance = 0.0; // the AI raider goes straight for a touch
    config.ai_bonus_chance = 0.0;
    let mut sim = sim_with(config, 5);
    set_side_stats(&mut sim, TeamSide::Ai, 5, 3, 5);
    set_side_stats(&mut sim, TeamSide::Player, 5, 5, 7); // the defense holds the edge

    // Hand the turn to the AI via a quick scoreless player raid.
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Retreat, None);
    sim.next_turn();
    assert_eq!(sim.phase(), GamePhase::AiRaid);

    let mut guard = 0;
    while sim.phase() == GamePhase::AiRaid {
        sim.tick();
        guard += 1;
        assert!(guard < 100, "AI never engaged");
    }
    assert_eq!(sim.phase(), GamePhase::QteActive);
    let qte = sim.raid().unwrap().active_qte.unwrap();
    let QteContext::TackleEscape { defender } = qte.context else {
        panic!("expected a defensive tackle, got {:?}", qte.context);
    };

    sim.handle_qte_outcome(false); // the human defender blows the tackle

    assert!(sim.player_squad().get(defender).unwrap().is_out);
    assert_eq!(sim.score(TeamSide::Ai), 1);
    assert_eq!(sim.empty_raids(TeamSide::Ai), 0);
    assert_eq!(sim.phase(), GamePhase::RaidEnd);
}

#[test]
fn test_won_defense_during_ai_raid_fells_the_raider() {
    let mut config = RaidConfig::default();
    config.retreat_block_chance = 0.0;
    config.ai_feint_chance = 0.0;
    config.ai_bonus_chance = 0.0;
    let mut sim = sim_with(config, 5);
    set_side_stats(&mut sim, TeamSide::Ai, 5, 3, 5);
    set_side_stats(&mut sim, TeamSide::Player, 5, 5, 7);

    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Retreat, None);
    sim.next_turn();
    let raider = sim.current_raider().unwrap();
    let mut guard = 0;
    while sim.phase() == GamePhase::AiRaid {
        sim.tick();
        guard += 1;
        assert!(guard < 100);
    }

    sim.handle_qte_outcome(true); // clean defensive stop

    assert!(sim.ai_squad().get(raider).unwrap().is_out);
    assert_eq!(sim.score(TeamSide::Ai), 0);
    assert_eq!(sim.empty_raids(TeamSide::Ai), 1);
}

#[test]
fn test_raid_ends_exactly_once() {
    let mut config = RaidConfig::default();
    config.retreat_block_chance = 0.0;
    let mut sim = sim_with(config, 5);
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Retreat, None);
    assert_eq!(sim.raid_count(), 1);

    // Late arrivals after the raid closed are all absorbed.
    sim.handle_raid_action(RaidAction::Retreat, None);
    sim.handle_qte_outcome(true);
    sim.feint(FeintDirection::Up);
    sim.resolve_multi_kill(MultiKillDecision::Press);
    assert_eq!(sim.raid_count(), 1);
    assert_eq!(sim.phase(), GamePhase::RaidEnd);
}

#[test]
fn test_uncontested_bonus_scores_and_forces_retreat() {
    let mut config = RaidConfig::default();
    config.bonus_contest_chance = 0.0;
    config.bait_base_chance = 0.0;
    config.bait_per_agility_edge = 0.0;
    config.retreat_block_chance = 0.0;
    let mut sim = sim_with(config, 5);
    sim.start_player_raid(p(0));

    sim.handle_raid_action(RaidAction::Bonus, None);
    assert_eq!(sim.phase(), GamePhase::PlayerRaid);
    assert_eq!(sim.raid().unwrap().points, 1);
    assert!(sim.raid().unwrap().must_retreat);

    sim.handle_raid_action(RaidAction::Retreat, None);
    assert_eq!(sim.score(TeamSide::Player), 1);
}

#[test]
fn test_contested_bonus_mash_target_in_range() {
    let mut config = RaidConfig::default();
    config.bonus_contest_chance = 1.0;
    config.bait_base_chance = 0.0;
    config.bait_per_agility_edge = 0.0;
    let mut sim = sim_with(config, 5);
    sim.start_player_raid(p(0));

    sim.handle_raid_action(RaidAction::Bonus, None);
    assert_eq!(sim.phase(), GamePhase::QteActive);
    let qte = sim.raid().unwrap().active_qte.unwrap();
    assert!(matches!(qte.context, QteContext::BonusStruggle { .. }));
    let QteInput::Mash { target } = qte.input else {
        panic!("bonus struggles are mash mini-games");
    };
    assert!((12..=16).contains(&target));
}

#[test]
fn test_blocked_retreat_outcomes() {
    let mut config = RaidConfig::default();
    config.retreat_block_chance = 1.0;
    let mut sim = sim_with(config.clone(), 5);
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Retreat, None);
    assert_eq!(sim.phase(), GamePhase::QteActive);
    assert_eq!(
        sim.raid().unwrap().active_qte.unwrap().context,
        QteContext::RetreatEscape
    );
    sim.handle_qte_outcome(false);
    assert!(sim.player_squad().get(p(0)).unwrap().is_out);
    assert!(sim.log().contains("Caught during retreat"));

    // And the escape branch.
    let mut sim = sim_with(config, 6);
    sim.start_player_raid(p(0));
    sim.handle_raid_action(RaidAction::Retreat, None);
    sim.handle_qte_outcome(true);
    assert_eq!(sim.phase(), GamePhase::RaidEnd);
    assert!(!sim.player_squad().get(p(0)).unwrap().is_out);
}
