//! Shape factory and registry
//!
//! The factory owns two maps: registered shape families (plugins, keyed by
//! lowercase library name) and previously constructed shapes available by
//! name. It is passed explicitly into every plugin `create` call so that
//! recursive inline construction and by-name lookup go through the same
//! service object; there is no ambient global registry.
//!
//! Lifecycle: plugins are registered once at startup; named shapes are
//! added once during setup and are read-only during construction.

use crate::{apply_common_inputs, BlockSchema, Shape, ShapeError};
use fermion_core::Input;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// One registered shape family.
pub trait ShapePlugin: Send + Sync {
    /// Registration name matched against the `library` selector.
    fn library(&self) -> &'static str;

    /// The family's configuration schema. Built lazily on first call and
    /// cached for the process lifetime; later calls return the same `Arc`.
    fn schema(&self) -> Arc<BlockSchema>;

    /// Static example configuration text, for documentation and tooling.
    fn example(&self) -> &'static str;

    /// Build a shape from a validated configuration block. The factory is
    /// available for resolving nested shape definitions or references.
    fn create(&self, input: &mut Input, factory: &ShapeFactory)
        -> Result<Box<dyn Shape>, ShapeError>;
}

/// Registry of shape families and named shapes, and the entry point for
/// resolving a configuration block into a live shape.
#[derive(Default)]
pub struct ShapeFactory {
    plugins: HashMap<String, Arc<dyn ShapePlugin>>,
    named: HashMap<String, Arc<dyn Shape>>,
}

impl ShapeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin<P: ShapePlugin + 'static>(mut self, plugin: P) -> Self {
        self.plugins
            .insert(plugin.library().to_lowercase(), Arc::new(plugin));
        self
    }

    /// Make a shape available for by-name reference.
    pub fn register_shape(&mut self, name: impl Into<String>, shape: Arc<dyn Shape>) {
        self.named.insert(name.into(), shape);
    }

    pub fn plugin(&self, library: &str) -> Option<&dyn ShapePlugin> {
        self.plugins.get(&library.to_lowercase()).map(|p| p.as_ref())
    }

    /// By-name lookup path. The returned handle is shared: the registry
    /// keeps its own reference.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Shape>> {
        self.named.get(name).cloned()
    }

    /// Inline-construction path: read the `library` selector, dispatch to
    /// the matching family, and apply the shared post-construction inputs
    /// (name, transform). The caller owns the returned shape.
    pub fn construct(&self, input: &mut Input) -> Result<Box<dyn Shape>, ShapeError> {
        let library = match input.get_string("library") {
            Ok(lib) => lib.to_string(),
            Err(_) => {
                warn!("createShape: no 'library' input");
                return Err(ShapeError::invalid("library", "required input missing"));
            }
        };
        let Some(plugin) = self.plugins.get(&library.to_lowercase()) else {
            warn!(library, "createShape: unknown shape library");
            return Err(ShapeError::UnknownLibrary { library });
        };
        let mut shape = plugin.create(input, self)?;
        apply_common_inputs(shape.as_mut(), input)?;
        Ok(shape)
    }

    /// Construct from a block and, if the shape came out named, register it
    /// for later by-name reference. Setup-time convenience for hosts
    /// processing a whole input file.
    pub fn construct_and_register(
        &mut self,
        input: &mut Input,
    ) -> Result<Arc<dyn Shape>, ShapeError> {
        let shape: Arc<dyn Shape> = Arc::from(self.construct(input)?);
        if let Some(name) = shape.name() {
            self.named.insert(name.to_string(), shape.clone());
        }
        Ok(shape)
    }
}
