//! Shared fixtures for provider tests.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_model::{ConverterRegistry, Entity, EntityConverterConfig, JsonConverter};
use strata_provider::MemoryDataProvider;
use strata_types::{EntityPath, SequentialIdGenerator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "typeKey")]
    pub type_key: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl Entity for Task {
    type Id = Option<String>;

    fn id(&self) -> &Option<String> {
        &self.id
    }

    fn type_key(&self) -> &str {
        &self.type_key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(rename = "typeKey")]
    pub type_key: String,
    pub name: String,
}

impl Entity for Project {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn type_key(&self) -> &str {
        &self.type_key
    }
}

pub fn task(id: &str, title: &str) -> Task {
    Task {
        id: Some(id.to_string()),
        type_key: "task".to_string(),
        title: title.to_string(),
        done: false,
    }
}

pub fn registry() -> ConverterRegistry {
    ConverterRegistry::from_configs([
        EntityConverterConfig::new("task", JsonConverter::<Task>::for_type_key("task")),
        EntityConverterConfig::new("project", JsonConverter::<Project>::for_type_key("project")),
    ])
    .unwrap()
}

/// A provider whose ids are `task-1`, `task-2`, ...
pub fn provider() -> MemoryDataProvider {
    init_tracing();
    MemoryDataProvider::with_id_generator(registry(), Arc::new(SequentialIdGenerator::new("task")))
}

pub fn path(s: &str) -> EntityPath {
    EntityPath::parse(s).unwrap()
}

pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
