//! Named processor variants.
//!
//! Variants are registered once at startup through [`RegistryBuilder`],
//! then frozen into a [`ProcessorRegistry`] that only supports lookups and
//! can be shared freely between concurrent dispatches.

use std::collections::HashMap;
use std::sync::Arc;

use payments_types::{PaymentError, PaymentProcessor, ProcessorHandle};
use tracing::info;

/// Collects processor variants during startup.
#[derive(Default)]
pub struct RegistryBuilder {
    variants: HashMap<String, ProcessorHandle>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variant under `name`.
    ///
    /// Names are trimmed. Fails with `DuplicateVariant` if the name is
    /// already taken and `InvalidVariantName` if it is blank.
    pub fn register(
        &mut self,
        name: impl AsRef<str>,
        variant: impl PaymentProcessor,
    ) -> Result<&mut Self, PaymentError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(PaymentError::InvalidVariantName);
        }
        if self.variants.contains_key(name) {
            return Err(PaymentError::DuplicateVariant(name.to_string()));
        }

        info!(variant = name, "registered payment processor");
        self.variants.insert(name.to_string(), Arc::new(variant));
        Ok(self)
    }

    /// Freezes the registry. No variants can be added afterwards.
    pub fn build(self) -> ProcessorRegistry {
        ProcessorRegistry {
            variants: Arc::new(self.variants),
        }
    }
}

/// Immutable lookup table of processor variants.
///
/// Cloning is cheap; all clones share the same table.
#[derive(Clone)]
pub struct ProcessorRegistry {
    variants: Arc<HashMap<String, ProcessorHandle>>,
}

impl ProcessorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolves a variant by name, failing with `UnknownVariant`.
    pub fn resolve(&self, name: &str) -> Result<&ProcessorHandle, PaymentError> {
        let name = name.trim();
        self.variants
            .get(name)
            .ok_or_else(|| PaymentError::UnknownVariant(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name.trim())
    }

    /// Lists registered variant names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variants.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("variants", &self.names())
            .finish()
    }
}
