use std::fmt;

/// Namespace of a native type.
///
/// The standard library namespace and the global (no) namespace are explicit
/// variants rather than well-known segment lists, so a user namespace that
/// happens to be spelled `std` is never mistaken for the standard one.
///
/// # Examples
///
/// ```
/// use oxidize_core::CppNamespace;
///
/// let user_std = CppNamespace::named(["std"]);
/// assert_ne!(user_std, CppNamespace::Standard);
/// assert_eq!(user_std.to_string(), CppNamespace::Standard.to_string());
///
/// let game = CppNamespace::named(["Game", "Core"]);
/// assert_eq!(game.to_string(), "Game::Core");
/// assert_eq!(game.join("/"), "Game/Core");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CppNamespace {
    /// The global namespace.
    #[default]
    None,
    /// The standard library namespace (`std`).
    Standard,
    /// A user namespace, outermost segment first. Never empty.
    Named(Vec<String>),
}

impl CppNamespace {
    /// Spelling of the standard library namespace.
    pub const STANDARD_SEGMENT: &'static str = "std";

    /// Create a user namespace from its segments, outermost first.
    ///
    /// An empty segment list yields [`CppNamespace::None`].
    pub fn named<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            Self::None
        } else {
            Self::Named(segments)
        }
    }

    /// Check if this is the global namespace.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check if this is the standard library namespace.
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard)
    }

    /// Get the namespace segments, outermost first.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::None => Vec::new(),
            Self::Standard => vec![Self::STANDARD_SEGMENT],
            Self::Named(segments) => segments.iter().map(String::as_str).collect(),
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Standard => 1,
            Self::Named(segments) => segments.len(),
        }
    }

    /// Check if the namespace has no segments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join the segments with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.segments().join(separator)
    }
}

impl fmt::Display for CppNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join("::"))
    }
}
