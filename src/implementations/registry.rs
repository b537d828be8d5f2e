use std::any::{ type_name, Any };
use std::collections::HashMap;
use std::sync::Arc;
use log::{ debug, warn };
use rand::rngs::StdRng;

use crate::errors::{ EngineError, EngineResult };
use crate::models::common::GeneratorInfo;
use crate::traits::generator::PropertyGenerator;

struct GeneratorEntry {
    info: GeneratorInfo,
    /// Holds an `Arc<dyn PropertyGenerator<T>>` for the generator's value type
    handle: Box<dyn Any + Send + Sync>,
}

/// Named generators, keyed by id; the last registration under an id wins
#[derive(Default)]
pub struct GeneratorRegistry {
    entries: HashMap<String, GeneratorEntry>,
    order: Vec<String>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T, G>(&mut self, generator: G)
        where T: 'static, G: PropertyGenerator<T> + 'static
    {
        let shared: Arc<dyn PropertyGenerator<T>> = Arc::new(generator);
        self.register_shared(shared);
    }

    pub fn register_shared<T: 'static>(&mut self, generator: Arc<dyn PropertyGenerator<T>>) {
        let info = generator.info();
        let id = info.id.clone();
        let entry = GeneratorEntry { info, handle: Box::new(generator) };

        if self.entries.insert(id.clone(), entry).is_some() {
            warn!("Generator '{}' re-registered; previous registration replaced", id);
        } else {
            debug!("Registered generator '{}'", id);
            self.order.push(id);
        }
    }

    pub fn get<T: 'static>(&self, id: &str) -> EngineResult<Arc<dyn PropertyGenerator<T>>> {
        let entry = self.entries
            .get(id)
            .ok_or_else(|| EngineError::GeneratorNotFound(id.to_string()))?;

        entry.handle
            .downcast_ref::<Arc<dyn PropertyGenerator<T>>>()
            .cloned()
            .ok_or_else(|| EngineError::GeneratorTypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>().to_string(),
            })
    }

    /// Draw one value from the generator registered under `id`
    pub fn generate<T: 'static>(&self, id: &str, rng: &mut StdRng) -> EngineResult<T> {
        let generator = self.get::<T>(id)?;
        generator.generate(rng).map_err(|e| EngineError::GeneratorFault {
            test_id: "(direct draw)".to_string(),
            generator: id.to_string(),
            message: e.to_string(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered generators in first-registration order
    pub fn infos(&self) -> Vec<GeneratorInfo> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|entry| entry.info.clone())
            .collect()
    }
}
