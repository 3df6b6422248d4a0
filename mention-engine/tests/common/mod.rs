//! Shared fixtures for engine tests.

#![allow(dead_code)]

use mention_engine::{StaticCatalog, Trigger, TriggerSpec};
use mention_types::{Entity, TriggerKind};

pub fn agent() -> Trigger {
    Trigger::compile(TriggerSpec::agent()).unwrap()
}

pub fn methodology() -> Trigger {
    Trigger::compile(TriggerSpec::methodology()).unwrap()
}

pub fn skill() -> Trigger {
    Trigger::compile(TriggerSpec::skill()).unwrap()
}

pub fn agents() -> Vec<Entity> {
    vec![
        Entity::new("alice-1", "Alice"),
        Entity::new("abdul-1", "Abdul"),
        Entity::new("rev-9", "Code Reviewer"),
    ]
}

pub fn methodologies() -> Vec<Entity> {
    vec![
        Entity::new("rca", "Root Cause Analysis"),
        Entity::new("five-whys", "Five Whys"),
    ]
}

pub fn skills() -> Vec<Entity> {
    vec![
        Entity::new("web-search", "Web Search"),
        Entity::new("gdrive", "Google Drive"),
    ]
}

pub fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with(TriggerKind::Agent, agents())
        .with(TriggerKind::Methodology, methodologies())
        .with(TriggerKind::Skill, skills())
}

pub fn ids(entities: &[Entity]) -> Vec<&str> {
    entities.iter().map(|e| e.id.as_str()).collect()
}
