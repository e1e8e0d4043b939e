//! Scripted opponent personalities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EngineError;
use crate::core::types::Turn;

/// Opponent play style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    /// Recruits archers and attacks as soon as it can
    Rush,
    /// Fortifies and recruits, rarely leaves home
    Turtle,
    /// Grabs income and builds
    Economic,
    /// Captures everything, fights for contested sites
    Expansionist,
    /// Resources early, army mid, attack late
    #[default]
    Mixed,
}

impl OpponentKind {
    pub const ALL: [OpponentKind; 5] = [
        OpponentKind::Rush,
        OpponentKind::Turtle,
        OpponentKind::Economic,
        OpponentKind::Expansionist,
        OpponentKind::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpponentKind::Rush => "rush",
            OpponentKind::Turtle => "turtle",
            OpponentKind::Economic => "economic",
            OpponentKind::Expansionist => "expansionist",
            OpponentKind::Mixed => "mixed",
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpponentKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpponentKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| EngineError::Config(format!("unknown opponent kind: {}", s)))
    }
}

/// One opponent move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyMove {
    Recruit { archers: u32, swordsmen: u32 },
    CaptureNeutral,
    CaptureContested,
    Attack,
    Raid,
    Fortify,
    Build,
}

impl EnemyMove {
    /// Word reported in the snapshot's `enemy_recent_actions`
    pub fn word(&self) -> &'static str {
        match self {
            EnemyMove::Recruit { .. } => "recruit",
            EnemyMove::CaptureNeutral | EnemyMove::CaptureContested => "capture",
            EnemyMove::Attack => "attack",
            EnemyMove::Raid => "raid",
            EnemyMove::Fortify => "fortify",
            EnemyMove::Build => "build",
        }
    }
}

/// What the opponent can see when choosing its moves
#[derive(Debug, Clone, Copy)]
pub struct EnemyView {
    pub turn: Turn,
    pub gold: u32,
    pub own_strength: f64,
    pub enemy_strength: f64,
    pub neutral_sites: usize,
}

impl OpponentKind {
    /// Up to two moves for this turn
    pub fn plan(&self, view: &EnemyView) -> Vec<EnemyMove> {
        let stronger = view.own_strength >= view.enemy_strength;
        let can_recruit = |cost: u32| view.gold >= cost;

        match self {
            OpponentKind::Rush => {
                let mut moves = Vec::new();
                if can_recruit(600) {
                    moves.push(EnemyMove::Recruit { archers: 10, swordsmen: 0 });
                }
                if view.turn >= 2 && view.own_strength >= view.enemy_strength * 0.8 {
                    moves.push(EnemyMove::Attack);
                } else {
                    moves.push(EnemyMove::Raid);
                }
                moves
            }
            OpponentKind::Turtle => {
                let mut moves = vec![EnemyMove::Fortify];
                if can_recruit(500) {
                    moves.push(EnemyMove::Recruit { archers: 0, swordsmen: 5 });
                } else if view.neutral_sites > 0 && view.turn % 4 == 0 {
                    moves.push(EnemyMove::CaptureNeutral);
                }
                moves
            }
            OpponentKind::Economic => {
                let mut moves = Vec::new();
                if view.neutral_sites > 0 {
                    moves.push(EnemyMove::CaptureNeutral);
                }
                moves.push(EnemyMove::Build);
                if view.turn > 8 && can_recruit(800) {
                    moves.push(EnemyMove::Recruit { archers: 0, swordsmen: 8 });
                }
                moves.truncate(2);
                moves
            }
            OpponentKind::Expansionist => {
                let capture = if view.neutral_sites > 0 {
                    EnemyMove::CaptureNeutral
                } else {
                    EnemyMove::CaptureContested
                };
                let follow_up = if stronger {
                    EnemyMove::Attack
                } else if can_recruit(600) {
                    EnemyMove::Recruit { archers: 10, swordsmen: 0 }
                } else {
                    EnemyMove::Build
                };
                vec![capture, follow_up]
            }
            OpponentKind::Mixed => {
                if view.turn <= 5 {
                    if can_recruit(800) {
                        vec![EnemyMove::Recruit { archers: 10, swordsmen: 0 }]
                    } else {
                        vec![EnemyMove::CaptureNeutral]
                    }
                } else if view.turn <= 10 {
                    if can_recruit(1200) {
                        vec![EnemyMove::Recruit { archers: 0, swordsmen: 8 }]
                    } else {
                        vec![EnemyMove::CaptureContested]
                    }
                } else if stronger {
                    vec![EnemyMove::Attack]
                } else {
                    vec![EnemyMove::Recruit { archers: 0, swordsmen: 5 }]
                }
            }
        }
    }
}
