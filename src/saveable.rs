//! The [`Saveable`] bound that content values must satisfy to be managed
//! by the coordinator.

/// Marker trait for content values the coordinator can manage.
///
/// The coordinator treats content as opaque: it never inspects the value,
/// it only clones it when a save fires and compares successive values to
/// decide whether a save is owed. Any `Clone + PartialEq` type that can
/// cross task boundaries qualifies; the blanket impl below means you never
/// implement this trait by hand.
///
/// # Example
///
/// ```
/// #[derive(Clone, PartialEq)]
/// struct Draft {
///     title: String,
///     body: String,
/// }
///
/// fn assert_saveable<C: autosave::Saveable>() {}
/// assert_saveable::<Draft>();
/// assert_saveable::<String>();
/// ```
pub trait Saveable: Clone + PartialEq + Send + Sync + 'static {}

impl<T> Saveable for T where T: Clone + PartialEq + Send + Sync + 'static {}
