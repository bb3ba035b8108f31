//! Mapping configuration.

/// Settings shared by every mapping in one generation run.
///
/// # Example
///
/// ```
/// use oxidize::MappingConfig;
///
/// let config = MappingConfig::new()
///     .with_base_namespace("DotNet")
///     .with_max_field_depth(16);
/// assert_eq!(config.base_namespace(), "DotNet");
/// assert_eq!(config.object_handle(), MappingConfig::DEFAULT_OBJECT_HANDLE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    base_namespace: String,
    object_handle: String,
    max_field_depth: usize,
}

impl MappingConfig {
    /// Native handle type wrapping a raw managed object pointer.
    pub const DEFAULT_OBJECT_HANDLE: &'static str = "::Reinterop::ObjectHandle";
    /// Default bound on value type nesting during blittability analysis.
    pub const DEFAULT_MAX_FIELD_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace placed outside every mapped user namespace. Empty for none.
    pub fn with_base_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.base_namespace = namespace.into();
        self
    }

    /// Fully-qualified native handle type used when wrapping a raw managed
    /// object pointer back into a class wrapper.
    pub fn with_object_handle(mut self, handle: impl Into<String>) -> Self {
        self.object_handle = handle.into();
        self
    }

    /// Deepest value type allowed below the one being checked. The checked
    /// type itself is at depth 0, so a bound of 0 still accepts a struct
    /// whose fields are all scalars or pointers.
    pub fn with_max_field_depth(mut self, depth: usize) -> Self {
        self.max_field_depth = depth;
        self
    }

    pub fn base_namespace(&self) -> &str {
        &self.base_namespace
    }

    pub fn object_handle(&self) -> &str {
        &self.object_handle
    }

    pub fn max_field_depth(&self) -> usize {
        self.max_field_depth
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            base_namespace: String::new(),
            object_handle: Self::DEFAULT_OBJECT_HANDLE.to_string(),
            max_field_depth: Self::DEFAULT_MAX_FIELD_DEPTH,
        }
    }
}
