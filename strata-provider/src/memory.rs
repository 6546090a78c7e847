//! In-process `DataProvider` backend.
//!
//! Documents are kept as canonical plain objects ordered by path, so a
//! collection snapshot lists its members in path order (creation order
//! when ids are UUID v7). Subscribers are notified synchronously while the
//! store is locked, which keeps each subscription's emissions in mutation
//! order.

use crate::config::{GetEntityMode, MemoryProviderConfig};
use crate::{DataProvider, ProviderError, ProviderResult, Subscription};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use strata_model::{type_key_of, ConverterRegistry, Draft, Entity};
use strata_types::{EntityPath, IdGenerator, UuidV7Generator};
use tracing::{debug, info, warn};

type Documents = BTreeMap<EntityPath, Value>;
type Notify = Box<dyn FnMut(&Documents) -> bool + Send>;

/// What a watcher is interested in.
#[derive(Debug, Clone)]
enum WatchTarget {
    Document(EntityPath),
    Collection(EntityPath),
}

impl WatchTarget {
    fn is_affected_by(&self, changed: &EntityPath) -> bool {
        match self {
            Self::Document(path) => path == changed,
            Self::Collection(path) => changed.is_member_of(path),
        }
    }
}

struct Watcher {
    id: u64,
    target: WatchTarget,
    /// Returns `false` once its subscriber is gone.
    notify: Notify,
}

#[derive(Default)]
struct Store {
    documents: Documents,
    watchers: Vec<Watcher>,
    next_watcher_id: u64,
}

impl Store {
    fn add_watcher(&mut self, target: WatchTarget, notify: Notify) -> u64 {
        let id = self.next_watcher_id;
        self.next_watcher_id += 1;
        debug!("Watching {:?} (watcher {})", target, id);
        self.watchers.push(Watcher { id, target, notify });
        id
    }

    fn remove_watcher(&mut self, id: u64) {
        self.watchers.retain(|w| w.id != id);
    }

    /// Writes `value` at `path`. Returns false if nothing changed.
    fn put(&mut self, path: EntityPath, value: Value) -> bool {
        if self.documents.get(&path) == Some(&value) {
            return false;
        }
        self.documents.insert(path.clone(), value);
        self.notify(&path);
        true
    }

    fn remove(&mut self, path: &EntityPath) -> Option<Value> {
        let removed = self.documents.remove(path)?;
        self.notify(path);
        Some(removed)
    }

    fn notify(&mut self, changed: &EntityPath) {
        let documents = &self.documents;
        let before = self.watchers.len();
        self.watchers
            .retain_mut(|w| !w.target.is_affected_by(changed) || (w.notify)(documents));
        let pruned = before - self.watchers.len();
        if pruned > 0 {
            debug!("Pruned {} closed watcher(s) after change at {}", pruned, changed);
        }
    }
}

/// Converts the document at `path`, if any.
fn lookup<T: Entity>(converters: &ConverterRegistry, documents: &Documents, path: &EntityPath) -> Option<T> {
    let raw = documents.get(path)?;
    let entity = converters.convert(raw);
    if entity.is_none() {
        debug!("Document at {} did not convert", path);
    }
    entity
}

/// Converts every document directly inside `collection`, skipping those
/// that do not convert.
fn snapshot<T: Entity>(
    converters: &ConverterRegistry,
    documents: &Documents,
    collection: &EntityPath,
) -> Vec<T> {
    documents
        .range(collection.clone()..)
        .take_while(|(path, _)| path.starts_with(collection))
        .filter(|(path, _)| path.is_member_of(collection))
        .filter_map(|(path, raw)| {
            let entity = converters.convert(raw);
            if entity.is_none() {
                warn!(
                    "Skipping {} in snapshot of {}: no converter accepted type key {:?}",
                    path,
                    collection,
                    type_key_of(raw)
                );
            }
            entity
        })
        .collect()
}

/// A `DataProvider` that keeps everything in memory.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct MemoryDataProvider {
    converters: Arc<ConverterRegistry>,
    id_generator: Arc<dyn IdGenerator>,
    config: MemoryProviderConfig,
    store: Arc<Mutex<Store>>,
}

impl MemoryDataProvider {
    /// Creates a provider that assigns UUID v7 identifiers.
    pub fn new(converters: impl Into<Arc<ConverterRegistry>>) -> Self {
        Self::with_id_generator(converters, Arc::new(UuidV7Generator))
    }

    pub fn with_id_generator(
        converters: impl Into<Arc<ConverterRegistry>>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            converters: converters.into(),
            id_generator,
            config: MemoryProviderConfig::default(),
            store: Arc::new(Mutex::new(Store::default())),
        }
    }

    pub fn with_config(mut self, config: MemoryProviderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MemoryProviderConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wraps `subscription` so cancelling it unregisters watcher `id`.
    fn release_on_cancel<T>(&self, subscription: Subscription<T>, id: u64) -> Subscription<T> {
        let store: Weak<Mutex<Store>> = Arc::downgrade(&self.store);
        subscription.with_cancel_hook(move || {
            if let Some(store) = store.upgrade() {
                store
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove_watcher(id);
                debug!("Released watcher {}", id);
            }
        })
    }

    /// Stores a raw plain object at a document path, as a backend write
    /// from outside this process would. The value is not validated.
    pub fn insert_raw(&self, path: &EntityPath, value: Value) -> ProviderResult<()> {
        require_document(path)?;
        self.lock().put(path.clone(), value);
        Ok(())
    }

    /// Stores `entity` at a document path using its converter.
    pub fn set_entity<T: Entity>(&self, path: &EntityPath, entity: &T) -> ProviderResult<()> {
        require_document(path)?;
        let plain = self.converters.to_plain_object(entity)?;
        if self.lock().put(path.clone(), plain) {
            debug!("Stored entity at {}", path);
        }
        Ok(())
    }

    /// Removes the document at `path`, returning its plain object.
    pub fn delete(&self, path: &EntityPath) -> ProviderResult<Value> {
        require_document(path)?;
        let removed = self
            .lock()
            .remove(path)
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))?;
        debug!("Deleted entity at {}", path);
        Ok(removed)
    }

    /// Returns the stored plain object at `path`.
    pub fn raw(&self, path: &EntityPath) -> Option<Value> {
        self.lock().documents.get(path).cloned()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().documents.is_empty()
    }

    /// Number of live `get_entity`/collection watchers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().watchers.len()
    }

    fn create<T: Entity>(&self, collection: &EntityPath, draft: Draft<T>) -> ProviderResult<T> {
        if !collection.is_collection() {
            return Err(ProviderError::InvalidPath(format!(
                "{collection} is not a collection path"
            )));
        }
        let type_key = self
            .converters
            .type_key_for::<T>()
            .ok_or(ProviderError::UnregisteredEntityType(std::any::type_name::<T>()))?
            .to_string();
        let id = self
            .id_generator
            .next_id()
            .map_err(ProviderError::IdGeneration)?;
        let path = collection
            .child(&id)
            .map_err(|e| ProviderError::InvalidPath(e.to_string()))?;

        let entity: T = self
            .converters
            .convert(&draft.into_plain_object(&id, &type_key))
            .ok_or_else(|| ProviderError::Conversion {
                type_key: type_key.clone(),
            })?;
        let plain = self.converters.to_plain_object(&entity)?;

        let mut store = self.lock();
        if store.documents.contains_key(&path) {
            return Err(ProviderError::AlreadyExists(path.to_string()));
        }
        store.put(path.clone(), plain);
        drop(store);

        info!("Created {} entity at {}", type_key, path);
        Ok(entity)
    }
}

impl DataProvider for MemoryDataProvider {
    fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    fn id_generator(&self) -> &dyn IdGenerator {
        self.id_generator.as_ref()
    }

    fn get_entity<T: Entity>(&self, path: &EntityPath) -> Subscription<Option<T>> {
        if !path.is_document() {
            warn!("get_entity called with collection path {}", path);
            return Subscription::once(None);
        }

        let (emitter, subscription) = Subscription::channel();
        let converters = Arc::clone(&self.converters);
        let target = path.clone();
        let notify = move |documents: &Documents| {
            emitter.emit(lookup::<T>(&converters, documents, &target))
        };

        let mut store = self.lock();
        notify(&store.documents);
        match self.config.get_mode {
            GetEntityMode::Once => subscription,
            GetEntityMode::Watch => {
                let id = store.add_watcher(WatchTarget::Document(path.clone()), Box::new(notify));
                drop(store);
                self.release_on_cancel(subscription, id)
            }
        }
    }

    fn create_entity<T: Entity>(
        &self,
        path: &EntityPath,
        draft: Draft<T>,
    ) -> Subscription<ProviderResult<T>> {
        let result = self.create(path, draft);
        if let Err(e) = &result {
            warn!("Failed to create entity in {}: {}", path, e);
        }
        Subscription::once(result)
    }

    fn listen_to_collection_changes<T: Entity>(&self, path: &EntityPath) -> Subscription<Vec<T>> {
        if !path.is_collection() {
            warn!("listen_to_collection_changes called with document path {}", path);
            return Subscription::empty();
        }

        let (emitter, subscription) = Subscription::channel();
        let converters = Arc::clone(&self.converters);
        let collection = path.clone();
        let notify = move |documents: &Documents| {
            emitter.emit(snapshot::<T>(&converters, documents, &collection))
        };

        let mut store = self.lock();
        if self.config.emit_initial_snapshot {
            notify(&store.documents);
        }
        let id = store.add_watcher(WatchTarget::Collection(path.clone()), Box::new(notify));
        drop(store);
        self.release_on_cancel(subscription, id)
    }
}

impl fmt::Debug for MemoryDataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDataProvider")
            .field("converters", &self.converters)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn require_document(path: &EntityPath) -> ProviderResult<()> {
    if path.is_document() {
        Ok(())
    } else {
        Err(ProviderError::InvalidPath(format!("{path} is not a document path")))
    }
}
