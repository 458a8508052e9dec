use std::sync::Arc;

/// Core rendering trait for every piece of a template
///
/// Implementations must be pure: rendering the same value twice yields the
/// same string. The compiler cannot check this for closures handed to
/// [`Delegate`](crate::section::Delegate), so those must be deterministic too.
pub trait Render: Send + Sync {
    fn render(&self) -> String;
}

/// Shared handle to any renderer in a template tree
pub type Section = Arc<dyn Render>;

/// A value object that presents itself as a tree built from the primitives
///
/// Implementors get [`Render`] for free; the tree is rebuilt on every render.
pub trait Delegating: Send + Sync {
    fn delegate(&self) -> Section;
}

impl<T: Delegating> Render for T {
    fn render(&self) -> String {
        self.delegate().render()
    }
}

/// Conversion of owned renderers into shared [`Section`] handles
pub trait IntoSection {
    fn into_section(self) -> Section;
}

impl<R: Render + 'static> IntoSection for R {
    fn into_section(self) -> Section {
        Arc::new(self)
    }
}
