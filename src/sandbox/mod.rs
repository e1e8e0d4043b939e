//! Headless skirmish used to exercise the engine end to end
//!
//! Two sides trade turns on a small map of income sites. The engine's side
//! is "own"; the scripted opponent is "enemy". Each call to `play_turn`
//! executes the engine's intents, lets the opponent move, pays income and
//! reports a `TurnOutcome` built from before/after deltas.

pub mod opponent;

pub use opponent::{EnemyMove, EnemyView, OpponentKind};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

use crate::actions::{ActionIntent, ActionKind};
use crate::core::error::Result;
use crate::core::types::Turn;
use crate::engine::{AdaptiveEngine, TurnPlan};
use crate::learning::TurnOutcome;

// Constants
pub const ARCHER_COST: u32 = 60;
pub const SWORDSMAN_COST: u32 = 100;
pub const ARCHER_POWER: f64 = 1.0;
pub const SWORDSMAN_POWER: f64 = 1.5;
/// Map moves the engine's hero gets per turn
pub const MOVES_PER_TURN: u32 = 3;
pub const MAX_FORTIFICATION: u32 = 50;
/// Ceiling for each stockpiled resource
pub const MAX_STOCKPILE: u32 = 1_000_000;
/// Ceiling for a single site's income
pub const MAX_SITE_INCOME: u32 = 10_000;
const ENEMY_MEMORY: usize = 6;
const WINNER_LOSS_RATIO: f64 = 0.2;
const LOSER_LOSS_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Own,
    Enemy,
}

impl Owner {
    fn opponent(self) -> Owner {
        match self {
            Owner::Own => Owner::Enemy,
            Owner::Enemy => Owner::Own,
        }
    }
}

/// One player's holdings
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    pub gold: u32,
    pub wood: u32,
    pub ore: u32,
    pub archers: u32,
    pub swordsmen: u32,
    pub fortification: u32,
}

impl Side {
    fn starting(archers: u32, swordsmen: u32) -> Self {
        Self {
            gold: 1000,
            wood: 10,
            ore: 10,
            archers,
            swordsmen,
            fortification: 0,
        }
    }

    pub fn strength(&self) -> f64 {
        f64::from(self.archers) * ARCHER_POWER + f64::from(self.swordsmen) * SWORDSMAN_POWER
    }

    pub fn units(&self) -> u32 {
        self.archers.saturating_add(self.swordsmen)
    }

    fn resource_value(&self) -> f64 {
        f64::from(self.gold) + (f64::from(self.wood) + f64::from(self.ore)) * 100.0
    }

    fn take_losses(&mut self, ratio: f64) {
        self.archers = (f64::from(self.archers) * (1.0 - ratio)) as u32;
        self.swordsmen = (f64::from(self.swordsmen) * (1.0 - ratio)) as u32;
    }

    /// Recruit up to the requested counts, as many as gold allows
    fn recruit(&mut self, archers: u32, swordsmen: u32) -> u32 {
        let swordsmen = swordsmen.min(self.gold / SWORDSMAN_COST);
        self.gold -= swordsmen * SWORDSMAN_COST;
        let archers = archers.min(self.gold / ARCHER_COST);
        self.gold -= archers * ARCHER_COST;
        self.swordsmen = self.swordsmen.saturating_add(swordsmen);
        self.archers = self.archers.saturating_add(archers);
        archers + swordsmen
    }

    /// Add to the stockpiles, each capped at `MAX_STOCKPILE`
    fn gain(&mut self, gold: u32, wood: u32, ore: u32) {
        self.gold = self.gold.saturating_add(gold).min(MAX_STOCKPILE);
        self.wood = self.wood.saturating_add(wood).min(MAX_STOCKPILE);
        self.ore = self.ore.saturating_add(ore).min(MAX_STOCKPILE);
    }

    fn fortify(&mut self) -> bool {
        if self.fortification >= MAX_FORTIFICATION {
            return false;
        }
        if self.ore >= 5 {
            self.ore -= 5;
        } else if self.gold >= 200 {
            self.gold -= 200;
        } else {
            return false;
        }
        self.fortification = (self.fortification + 10).min(MAX_FORTIFICATION);
        true
    }
}

/// An income site on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub name: &'static str,
    pub owner: Option<Owner>,
    /// Gold per turn when owned
    pub income: u32,
}

/// Stances that only matter if the opponent attacks this turn
#[derive(Debug, Clone, Copy, Default)]
struct Stance {
    defence_bonus: f64,
    evade: bool,
    conserve: bool,
}

#[derive(Debug, Clone)]
pub struct Skirmish {
    turn: Turn,
    opponent: OpponentKind,
    own: Side,
    enemy: Side,
    sites: Vec<Site>,
    enemy_actions: VecDeque<&'static str>,
    winner: Option<Owner>,
    rng: ChaCha8Rng,
}

/// Before/after measures of the engine's side
#[derive(Debug, Clone, Copy)]
struct Standing {
    resource_value: f64,
    sites: usize,
    income: u32,
    position: f64,
}

impl Skirmish {
    pub fn new(opponent: OpponentKind, seed: u64) -> Self {
        let site = |name, income| Site {
            name,
            owner: None,
            income,
        };
        Self {
            turn: 1,
            opponent,
            own: Side::starting(20, 15),
            enemy: Side::starting(18, 12),
            sites: vec![
                site("mine", 500),
                site("castle", 300),
                site("sawmill", 200),
                site("quarry", 200),
                site("village", 150),
                site("artifact", 100),
            ],
            enemy_actions: VecDeque::new(),
            winner: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn opponent(&self) -> OpponentKind {
        self.opponent
    }

    pub fn own(&self) -> &Side {
        &self.own
    }

    pub fn enemy(&self) -> &Side {
        &self.enemy
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn winner(&self) -> Option<Owner> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Snapshot in the analyzer's input schema, from the engine's side
    pub fn snapshot(&self) -> Value {
        let side_resources = |side: &Side| json!({"gold": side.gold, "wood": side.wood, "ore": side.ore});
        let side_army = |side: &Side| json!({"archers": side.archers, "swordsmen": side.swordsmen});

        let mut locations = Map::new();
        for site in &self.sites {
            let owner = match site.owner {
                Some(Owner::Own) => json!("own"),
                Some(Owner::Enemy) => json!("enemy"),
                None => Value::Null,
            };
            locations.insert(site.name.to_string(), json!({"owner": owner, "income": site.income}));
        }

        json!({
            "turn": self.turn,
            "own_resources": side_resources(&self.own),
            "enemy_resources": side_resources(&self.enemy),
            "own_army": side_army(&self.own),
            "enemy_army": side_army(&self.enemy),
            "locations": locations,
            "enemy_recent_actions": self.enemy_actions.iter().collect::<Vec<_>>(),
        })
    }

    /// Execute the engine's intents, let the opponent move, pay income and
    /// advance the turn. Returns the engine side's outcome.
    pub fn play_turn(&mut self, intents: &[ActionIntent]) -> TurnOutcome {
        let before = self.standing();
        let mut victories = 0u32;
        let mut stance = Stance::default();
        let mut moves = MOVES_PER_TURN;

        for intent in intents {
            if self.is_over() {
                break;
            }
            if needs_move(intent.kind) {
                if moves == 0 {
                    debug!(action = %intent.kind, "out of moves");
                    continue;
                }
                moves -= 1;
            }
            victories += self.execute(intent, &mut stance);
        }

        if !self.is_over() {
            victories += self.enemy_turn(&stance);
        }
        self.income(&stance);
        self.turn += 1;

        let after = self.standing();
        TurnOutcome::new(
            after.resource_value - before.resource_value,
            f64::from(victories),
            after.sites as f64 - before.sites as f64,
            f64::from(after.income) - f64::from(before.income),
            after.position - before.position,
        )
    }

    fn standing(&self) -> Standing {
        let owned: Vec<&Site> = self.sites.iter().filter(|s| s.owner == Some(Owner::Own)).collect();
        let total_strength = self.own.strength() + self.enemy.strength();
        let army_share = if total_strength > 0.0 {
            self.own.strength() / total_strength
        } else {
            0.5
        };
        let map_share = owned.len() as f64 / self.sites.len() as f64;
        Standing {
            resource_value: self.own.resource_value(),
            sites: owned.len(),
            income: owned.iter().map(|s| s.income).sum(),
            position: 0.5 * army_share + 0.5 * map_share,
        }
    }

    /// Returns battles won by the engine's side
    fn execute(&mut self, intent: &ActionIntent, stance: &mut Stance) -> u32 {
        let target = intent.target.as_deref().unwrap_or("");
        match intent.kind {
            ActionKind::Explore => {
                if self.rng.gen_bool(0.4) {
                    let found = self.rng.gen_range(100..=300);
                    self.own.gain(found, 0, 0);
                }
                0
            }
            ActionKind::Scout => {
                self.own.gain(0, 2, 2);
                0
            }
            ActionKind::Fortify => {
                if !stance.conserve {
                    self.own.fortify();
                }
                0
            }
            ActionKind::Expand | ActionKind::Capture => {
                let contested = target.starts_with("enemy") || target == "contested_locations";
                if !self.capture_neutral(Owner::Own) && contested {
                    u32::from(self.assault_site(Owner::Own, 1.0, 0.0) == Some(true))
                } else {
                    0
                }
            }
            ActionKind::VictoryPush => self.battle(Owner::Own, 1.1, 1.0),
            ActionKind::Attack => {
                let boost = if intent.param("commitment") == Some("full") { 1.1 } else { 1.0 };
                let losses = if intent.param("intensity") == Some("low") { 0.5 } else { 1.0 };
                if target == "enemy_outposts" && self.owned_by(Owner::Enemy) > 0 {
                    u32::from(self.assault_site(Owner::Own, boost, 0.0) == Some(true))
                } else {
                    self.battle(Owner::Own, boost, losses)
                }
            }
            ActionKind::Raid => {
                self.raid(Owner::Own);
                0
            }
            ActionKind::Ambush => {
                stance.defence_bonus = stance.defence_bonus.max(0.3);
                0
            }
            ActionKind::DefensiveCounter => {
                stance.defence_bonus = stance.defence_bonus.max(0.2);
                0
            }
            ActionKind::Retreat => {
                stance.evade = true;
                0
            }
            ActionKind::SecureResources => {
                let owned = self.owned_by(Owner::Own) as u32;
                self.own.gain(50 * owned, 3, 3);
                if target == "all_resources" {
                    self.capture_neutral(Owner::Own);
                }
                0
            }
            ActionKind::ConserveResources => {
                stance.conserve = true;
                0
            }
            ActionKind::BoostEconomy => {
                self.upgrade_site(Owner::Own, 100, 200);
                0
            }
            ActionKind::StealthDevelopment => {
                self.upgrade_site(Owner::Own, 50, 150);
                0
            }
            ActionKind::Recruit => {
                if stance.conserve && intent.param("amount") != Some("large") {
                    return 0;
                }
                let amount = match intent.param("amount") {
                    Some("small") => 5,
                    Some("large") => 20,
                    _ => 10,
                };
                let recruited = if intent.param("unit") == Some("elite") {
                    self.own.recruit(0, amount)
                } else {
                    self.own.recruit(amount, 0)
                };
                debug!(recruited, "recruited");
                0
            }
            ActionKind::ResourceOverwhelm => {
                let spare_wood = self.own.wood.saturating_sub(5);
                let spare_ore = self.own.ore.saturating_sub(5);
                self.own.wood -= spare_wood;
                self.own.ore -= spare_ore;
                self.own
                    .gain(spare_wood.saturating_add(spare_ore).saturating_mul(50), 0, 0);
                self.own.recruit(20, 0);
                0
            }
            ActionKind::RandomManeuver => match self.rng.gen_range(0..3) {
                0 => {
                    self.capture_neutral(Owner::Own);
                    0
                }
                1 => self.battle(Owner::Own, 1.0, 1.0),
                _ => {
                    self.raid(Owner::Own);
                    0
                }
            },
        }
    }

    /// Returns battles won by the engine's side while defending
    fn enemy_turn(&mut self, stance: &Stance) -> u32 {
        let view = EnemyView {
            turn: self.turn,
            gold: self.enemy.gold,
            own_strength: self.enemy.strength(),
            enemy_strength: self.own.strength(),
            neutral_sites: self.sites.iter().filter(|s| s.owner.is_none()).count(),
        };

        let mut own_wins = 0;
        for step in self.opponent.plan(&view) {
            if self.is_over() {
                break;
            }
            self.remember_enemy(step.word());
            match step {
                EnemyMove::Recruit { archers, swordsmen } => {
                    self.enemy.recruit(archers, swordsmen);
                }
                EnemyMove::CaptureNeutral => {
                    self.capture_neutral(Owner::Enemy);
                }
                EnemyMove::CaptureContested => {
                    if !self.capture_neutral(Owner::Enemy)
                        && !stance.evade
                        && self.assault_site(Owner::Enemy, 1.0, stance.defence_bonus) == Some(false)
                    {
                        own_wins += 1;
                    }
                }
                EnemyMove::Attack => {
                    if stance.evade {
                        debug!("evaded enemy attack");
                        continue;
                    }
                    if !self.fight(Owner::Enemy, 1.0, 1.0 + stance.defence_bonus, 1.0) {
                        own_wins += 1;
                    }
                }
                EnemyMove::Raid => self.raid(Owner::Enemy),
                EnemyMove::Fortify => {
                    self.enemy.fortify();
                }
                EnemyMove::Build => self.upgrade_site(Owner::Enemy, 100, 200),
            }
        }
        own_wins
    }

    fn income(&mut self, stance: &Stance) {
        for site in &self.sites {
            let Some(owner) = site.owner else { continue };
            let side = match owner {
                Owner::Own => &mut self.own,
                Owner::Enemy => &mut self.enemy,
            };
            let (wood, ore) = match site.name {
                "sawmill" => (5, 0),
                "quarry" => (0, 5),
                _ => (0, 0),
            };
            side.gain(site.income / 2, wood, ore);
        }
        if stance.conserve {
            let interest = self.own.gold / 10;
            self.own.gain(interest, 0, 0);
        }
    }

    fn side_mut(&mut self, owner: Owner) -> &mut Side {
        match owner {
            Owner::Own => &mut self.own,
            Owner::Enemy => &mut self.enemy,
        }
    }

    fn side(&self, owner: Owner) -> &Side {
        match owner {
            Owner::Own => &self.own,
            Owner::Enemy => &self.enemy,
        }
    }

    fn owned_by(&self, owner: Owner) -> usize {
        self.sites.iter().filter(|s| s.owner == Some(owner)).count()
    }

    /// Claim the richest unowned site
    fn capture_neutral(&mut self, owner: Owner) -> bool {
        let best = self
            .sites
            .iter_mut()
            .filter(|s| s.owner.is_none())
            .max_by_key(|s| s.income);
        match best {
            Some(site) => {
                site.owner = Some(owner);
                debug!(site = site.name, ?owner, "captured");
                true
            }
            None => false,
        }
    }

    /// Fight for the defender's richest site. `None` if the defender holds
    /// nothing, else whether the attacker won (and took the site).
    fn assault_site(&mut self, attacker: Owner, attack_boost: f64, defence_bonus: f64) -> Option<bool> {
        let defender = attacker.opponent();
        if self.owned_by(defender) == 0 {
            return None;
        }
        let won = self.fight(attacker, attack_boost, 1.0 + defence_bonus, 1.0);
        if won {
            if let Some(site) = self
                .sites
                .iter_mut()
                .filter(|s| s.owner == Some(defender))
                .max_by_key(|s| s.income)
            {
                site.owner = Some(attacker);
                debug!(site = site.name, ?attacker, "site taken by force");
            }
        }
        Some(won)
    }

    /// Open battle; returns 1 if the engine's side won
    fn battle(&mut self, attacker: Owner, boost: f64, losses: f64) -> u32 {
        let won = self.fight(attacker, boost, 1.0, losses);
        u32::from(won && attacker == Owner::Own)
    }

    /// Resolve one battle; returns true if the attacker won
    fn fight(&mut self, attacker: Owner, attack_boost: f64, defence_boost: f64, losses: f64) -> bool {
        let defender = attacker.opponent();
        let fort = 1.0 + f64::from(self.side(defender).fortification) / 100.0;
        let attack_roll = self.side(attacker).strength() * attack_boost * self.rng.gen_range(0.8..1.2);
        let defence_roll = self.side(defender).strength() * defence_boost * fort * self.rng.gen_range(0.8..1.2);

        let attacker_won = attack_roll > defence_roll;
        let (winner, loser) = if attacker_won {
            (attacker, defender)
        } else {
            (defender, attacker)
        };
        self.side_mut(loser).take_losses(LOSER_LOSS_RATIO * losses);
        self.side_mut(winner).take_losses(WINNER_LOSS_RATIO * losses * 0.5);
        debug!(?attacker, attacker_won, "battle");

        if self.side(loser).units() == 0 {
            self.winner = Some(winner);
        }
        attacker_won
    }

    /// Steal gold; a raid party is sometimes caught
    fn raid(&mut self, raider: Owner) {
        if self.side(raider).units() < 5 {
            return;
        }
        let victim = raider.opponent();
        let haul = self.rng.gen_range(200..=400).min(self.side(victim).gold);
        self.side_mut(victim).gold -= haul;
        self.side_mut(raider).gain(haul, 0, 0);
        if self.rng.gen_bool(0.3) {
            self.side_mut(raider).take_losses(0.1);
        }
    }

    /// Raise income of the side's poorest site
    fn upgrade_site(&mut self, owner: Owner, gain: u32, cost: u32) {
        let side = self.side(owner);
        if side.gold < cost || side.wood < 5 {
            return;
        }
        let Some(site) = self
            .sites
            .iter_mut()
            .filter(|s| s.owner == Some(owner))
            .min_by_key(|s| s.income)
        else {
            return;
        };
        site.income = site.income.saturating_add(gain).min(MAX_SITE_INCOME);
        let side = self.side_mut(owner);
        side.gold -= cost;
        side.wood -= 5;
    }

    fn remember_enemy(&mut self, word: &'static str) {
        if self.enemy_actions.len() == ENEMY_MEMORY {
            self.enemy_actions.pop_front();
        }
        self.enemy_actions.push_back(word);
    }
}

/// Actions that spend one of the hero's map moves
fn needs_move(kind: ActionKind) -> bool {
    matches!(
        kind,
        ActionKind::Explore
            | ActionKind::Scout
            | ActionKind::Expand
            | ActionKind::Capture
            | ActionKind::VictoryPush
            | ActionKind::Attack
            | ActionKind::Raid
            | ActionKind::Ambush
            | ActionKind::Retreat
            | ActionKind::RandomManeuver
    )
}

/// Summary of a finished skirmish
#[derive(Debug, Clone, Default)]
pub struct SkirmishTally {
    pub turns: u32,
    pub successes: u32,
    pub total_effectiveness: f64,
    pub victories: u32,
    pub innovative_turns: u32,
    /// Primary focus name -> turns it was chosen
    pub foci: BTreeMap<String, u32>,
    pub winner: Option<Owner>,
}

impl SkirmishTally {
    pub fn mean_effectiveness(&self) -> f64 {
        if self.turns == 0 {
            0.0
        } else {
            self.total_effectiveness / f64::from(self.turns)
        }
    }
}

/// Drive the engine through up to `turns` turns of the skirmish
///
/// `on_turn` sees each plan with its outcome and effectiveness.
pub fn run_skirmish<F>(
    engine: &mut AdaptiveEngine,
    skirmish: &mut Skirmish,
    turns: u32,
    mut on_turn: F,
) -> Result<SkirmishTally>
where
    F: FnMut(&TurnPlan, &TurnOutcome, f64),
{
    let mut tally = SkirmishTally::default();
    for _ in 0..turns {
        if skirmish.is_over() {
            break;
        }
        let plan = engine.decide(&skirmish.snapshot());
        let outcome = skirmish.play_turn(&plan.actions);
        let effectiveness = engine.complete_turn(&outcome)?;

        tally.turns += 1;
        tally.total_effectiveness += effectiveness;
        tally.victories += outcome.military_victories as u32;
        if effectiveness > engine.config().success_threshold {
            tally.successes += 1;
        }
        if plan.strategy.is_innovative() {
            tally.innovative_turns += 1;
        }
        *tally
            .foci
            .entry(plan.strategy.primary_focus.to_string())
            .or_default() += 1;

        on_turn(&plan, &outcome, effectiveness);
    }
    tally.winner = skirmish.winner();
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::SituationAnalyzer;

    fn intent(kind: ActionKind) -> ActionIntent {
        ActionIntent::new(kind, "test")
    }

    #[test]
    fn test_snapshot_matches_analyzer_schema() {
        let skirmish = Skirmish::new(OpponentKind::Mixed, 7);
        let factors = SituationAnalyzer::default().analyze(&skirmish.snapshot());
        // 20 archers + 15 swordsmen against 18 + 12
        assert!((factors.military_pressure - 30.0 / 65.0).abs() < 1e-12);
        assert_eq!(factors.expansion_opportunity, 1.0);
        assert_eq!(factors.map_control, 0.0);
        assert!((factors.resource_abundance - 3000.0 / 6000.0).abs() < 1e-12);
    }

    #[test]
    fn test_capture_claims_richest_site() {
        let mut skirmish = Skirmish::new(OpponentKind::Turtle, 1);
        let outcome = skirmish.play_turn(&[intent(ActionKind::Capture)]);
        assert_eq!(skirmish.sites()[0].owner, Some(Owner::Own));
        assert_eq!(outcome.territory_gained, 1.0);
        assert_eq!(outcome.economic_improvement, 500.0);
        assert_eq!(skirmish.turn(), 2);
    }

    #[test]
    fn test_moves_are_limited() {
        let mut skirmish = Skirmish::new(OpponentKind::Turtle, 1);
        let captures = vec![intent(ActionKind::Capture); 5];
        skirmish.play_turn(&captures);
        let owned = skirmish
            .sites()
            .iter()
            .filter(|s| s.owner == Some(Owner::Own))
            .count();
        assert_eq!(owned, MOVES_PER_TURN as usize);
    }

    #[test]
    fn test_recruit_spends_gold() {
        let mut skirmish = Skirmish::new(OpponentKind::Turtle, 3);
        let before = skirmish.own().archers;
        skirmish.play_turn(&[intent(ActionKind::Recruit)]);
        assert_eq!(skirmish.own().archers, before + 10);
        assert_eq!(skirmish.own().gold, 1000 - 10 * ARCHER_COST);
    }

    #[test]
    fn test_stockpiles_are_capped() {
        let mut side = Side::starting(0, 0);
        side.gain(u32::MAX, MAX_STOCKPILE, 7);
        assert_eq!(side.gold, MAX_STOCKPILE);
        assert_eq!(side.wood, MAX_STOCKPILE);
        assert_eq!(side.ore, 17);
    }

    #[test]
    fn test_long_hoarding_game_does_not_overflow() {
        let mut skirmish = Skirmish::new(OpponentKind::Turtle, 1);
        let moves = [intent(ActionKind::ConserveResources), intent(ActionKind::Capture)];
        for _ in 0..400 {
            skirmish.play_turn(&moves);
        }
        assert!(skirmish.own().gold <= MAX_STOCKPILE);
        assert!(skirmish.sites().iter().all(|s| s.income <= MAX_SITE_INCOME));
    }

    #[test]
    fn test_enemy_actions_reported() {
        let mut skirmish = Skirmish::new(OpponentKind::Economic, 5);
        skirmish.play_turn(&[]);
        let snapshot = skirmish.snapshot();
        let actions = snapshot["enemy_recent_actions"].as_array().unwrap();
        assert_eq!(actions[0], "capture");
        assert_eq!(actions[1], "build");
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = || {
            let mut skirmish = Skirmish::new(OpponentKind::Rush, 42);
            let moves = [intent(ActionKind::Attack), intent(ActionKind::Explore)];
            let outcomes: Vec<TurnOutcome> = (0..6).map(|_| skirmish.play_turn(&moves)).collect();
            (outcomes, skirmish.snapshot())
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_run_skirmish_tallies() {
        let mut engine = AdaptiveEngine::default();
        let mut skirmish = Skirmish::new(OpponentKind::Mixed, 11);
        let mut seen = 0;
        let tally = run_skirmish(&mut engine, &mut skirmish, 8, |_, _, _| seen += 1).unwrap();
        assert_eq!(tally.turns, seen);
        assert_eq!(engine.ledger().len(), seen as usize);
        assert_eq!(tally.foci.values().sum::<u32>(), tally.turns);
        assert!(tally.mean_effectiveness() >= 0.0 && tally.mean_effectiveness() <= 1.0);
    }
}
