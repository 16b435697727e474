//! Threshold-based role classification from skill point spending.
//!
//! Players are labeled by where their skill points went: mostly combat
//! skills makes a Soldier, mostly economy a Worker or Entrepreneur. The
//! thresholds are injectable so the policy can change without touching
//! the scoring engine.

use crate::skills::alloc_cost;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Skill categories tracked for role assignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SkillCategory {
    Entrepreneur,
    Worker,
    Soldier,
}

impl SkillCategory {
    pub fn all() -> [SkillCategory; 3] {
        [
            SkillCategory::Entrepreneur,
            SkillCategory::Worker,
            SkillCategory::Soldier,
        ]
    }

    /// API skill keys counted toward this category.
    pub fn skills(&self) -> &'static [&'static str] {
        match self {
            SkillCategory::Entrepreneur => &["companies", "entrepreneurship"],
            SkillCategory::Worker => &["energy", "production"],
            SkillCategory::Soldier => &[
                "health",
                "hunger",
                "attack",
                "criticalChance",
                "criticalDamages",
                "armor",
                "construction",
                "precision",
                "dodge",
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Entrepreneur => "Entrepreneur",
            SkillCategory::Worker => "Worker",
            SkillCategory::Soldier => "Soldier",
        }
    }
}

/// Share-of-points thresholds for role labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleThresholds {
    /// At or above this share the player is a "Super X".
    pub super_primary: f64,
    /// At or above this share the player is an "X".
    pub primary: f64,
    /// Other categories at or above this share become secondary roles.
    pub secondary: f64,
}

impl Default for RoleThresholds {
    fn default() -> Self {
        Self {
            super_primary: 0.85,
            primary: 0.70,
            secondary: 0.40,
        }
    }
}

/// Primary label plus any secondary category labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleAssignment {
    pub primary: String,
    pub secondary: Vec<String>,
}

/// Classifies a player from their per-skill levels.
///
/// Points spent per category are the triangular costs of the levels in
/// that category's skills; shares are taken over all tracked points. A
/// player with no tracked points at all is a Generalist.
pub fn assign_roles(skills: &HashMap<String, u32>, thresholds: &RoleThresholds) -> RoleAssignment {
    let mut spent = [0u32; 3];
    for (i, category) in SkillCategory::all().iter().enumerate() {
        for key in category.skills() {
            if let Some(&level) = skills.get(*key) {
                spent[i] += alloc_cost(level);
            }
        }
    }
    let total = spent.iter().sum::<u32>().max(1) as f64;

    let mut primary = String::from("Generalist");
    for (i, category) in SkillCategory::all().iter().enumerate() {
        let share = spent[i] as f64 / total;
        if share >= thresholds.super_primary {
            primary = format!("Super {}", category.label());
            break;
        } else if share >= thresholds.primary {
            primary = category.label().to_string();
            break;
        }
    }

    let secondary = SkillCategory::all()
        .iter()
        .enumerate()
        .filter(|(i, category)| {
            !primary.contains(category.label()) && spent[*i] as f64 / total >= thresholds.secondary
        })
        .map(|(_, category)| category.label().to_string())
        .collect();

    RoleAssignment { primary, secondary }
}
