//! The `Game` walkthrough: a record class, two data layers, and a report
//! of everything the layered record can answer.

use crate::config::DemoConfig;
use laminate_core::{LayerOptions, Result};
use laminate_layer::{CapabilityModule, Class, ModuleRegistry, Object};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;

pub struct Demo {
    game: Arc<Class>,
    registry: ModuleRegistry,
}

impl Demo {
    pub fn new() -> Result<Self> {
        let record = Class::builder("ActiveRecord::Base")
            .method("id", |this, _| Ok(this.field("id").cloned().unwrap_or(Value::Null)))
            .build()?;
        let game = Class::builder("Game")
            .extends(&record)
            .method("get_some_game_data", |_, _| Ok(json!("some_game_data")))
            .build()?;

        let mut registry = ModuleRegistry::new();
        registry.register(
            CapabilityModule::builder("Lpis")
                .method("get_some_lpi_data", |_, _| Ok(json!("some_lpi_data")))
                .build()?,
        );
        registry.register(
            CapabilityModule::builder("BrainAreas")
                .method("get_some_brain_area_data", |_, _| Ok(json!("some_brain_area_data")))
                .build()?,
        );

        Ok(Self { game, registry })
    }

    pub fn game(&self) -> &Arc<Class> { &self.game }

    pub fn registry(&self) -> &ModuleRegistry { &self.registry }

    pub fn registry_mut(&mut self) -> &mut ModuleRegistry { &mut self.registry }

    /// `Game.find(id)`: a plain game record.
    pub fn find(&self, id: u64) -> Object {
        let mut fields = Map::new();
        fields.insert("id".into(), json!(id));
        self.game.instantiate(fields)
    }

    /// Find the record and apply the configured layers.
    pub fn load(&self, config: &DemoConfig, options: &LayerOptions) -> Result<Object> {
        let mut game = self.find(config.id);
        if config.layers.is_empty() {
            return Ok(game);
        }
        if config.combined {
            game = self.registry.with_layers(&game, config.layers.as_slice(), options)?;
        } else {
            for name in &config.layers {
                game = self.registry.with_layer(&game, name, options)?;
            }
        }
        info!("Loaded {} as {}", config.id, game.type_name());
        Ok(game)
    }
}

/// Type name, id, then every `get_*` answer: the class's first, then each
/// layer's from the innermost outward.
pub fn report(game: &Object) -> Result<Vec<String>> {
    let mut getters: Vec<String> = game
        .class()
        .methods()
        .iter()
        .filter(|name| is_getter(name))
        .cloned()
        .collect();
    let chain: Vec<&Object> = game.chain().collect();
    for layer in chain.iter().rev() {
        for module in layer.applied_modules() {
            for name in module.method_names().filter(|name| is_getter(name)) {
                if !getters.iter().any(|g| g == name) {
                    getters.push(name.to_string());
                }
            }
        }
    }

    let mut lines = vec![game.type_name().to_string(), render(&game.invoke("id")?)];
    for getter in &getters {
        lines.push(render(&game.invoke(getter)?));
    }
    Ok(lines)
}

fn is_getter(name: &str) -> bool {
    name.starts_with("get_")
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
