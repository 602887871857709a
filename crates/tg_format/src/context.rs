/// Per-call state threaded through every format.
///
/// ```
/// use tg_format::SerializationContext;
///
/// let ctx = SerializationContext::new().with_type_hints(true);
/// assert!(ctx.type_hints());
/// assert!(ctx.unresolved_type_hints().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SerializationContext {
    type_hints: bool,
    unresolved: Vec<String>,
}

impl SerializationContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a `"$type"` entry with the type path into every struct compound.
    #[inline]
    pub fn with_type_hints(mut self, enabled: bool) -> Self {
        self.type_hints = enabled;
        self
    }

    #[inline]
    pub fn type_hints(&self) -> bool {
        self.type_hints
    }

    /// Records a `"$type"` name that no registered type matched.
    pub fn push_unresolved(&mut self, name: &str) {
        self.unresolved.push(name.to_owned());
    }

    /// `"$type"` names seen while reading that fell back to the declared type.
    #[inline]
    pub fn unresolved_type_hints(&self) -> &[String] {
        &self.unresolved
    }
}
