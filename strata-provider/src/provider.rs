use crate::{ProviderResult, Subscription};
use serde_json::Value;
use strata_model::{ConverterRegistry, Draft, Entity};
use strata_types::{EntityPath, IdGenerator};

/// Single point of access to persisted entities.
///
/// Every operation is an independent request; the returned subscriptions
/// share nothing with each other. Raw → typed conversion always goes
/// through [`converters`](Self::converters), and new identifiers always
/// come from [`id_generator`](Self::id_generator).
pub trait DataProvider: Send + Sync {
    /// The type-key → converter map. Read-only for the provider's lifetime.
    fn converters(&self) -> &ConverterRegistry;

    /// Source of identifiers for newly created entities.
    fn id_generator(&self) -> &dyn IdGenerator;

    /// Looks up the document at `path`.
    ///
    /// Emits at least once; `None` means absent. Whether later changes are
    /// pushed is up to the implementation.
    fn get_entity<T: Entity>(&self, path: &EntityPath) -> Subscription<Option<T>>;

    /// Creates an entity from `draft` inside the collection at `path`.
    ///
    /// Emits exactly once: the created entity, whose identifier came from the
    /// id generator, or the reason creation failed.
    fn create_entity<T: Entity>(
        &self,
        path: &EntityPath,
        draft: Draft<T>,
    ) -> Subscription<ProviderResult<T>>;

    /// Emits the full membership of the collection at `path` each time it
    /// changes, in the order the changes happened.
    fn listen_to_collection_changes<T: Entity>(&self, path: &EntityPath) -> Subscription<Vec<T>>;

    /// Converts a raw plain object with the converter registered under its
    /// discriminator. `None` when no converter matches or it rejects the value.
    fn convert_into_entity<T: Entity>(&self, raw: &Value) -> Option<T> {
        self.converters().convert(raw)
    }

    /// Builds a draft of `T` with the converter registered for `T`.
    fn create_draft<T: Entity>(&self, data: Value) -> ProviderResult<Draft<T>> {
        Ok(self.converters().create_draft(data)?)
    }
}
