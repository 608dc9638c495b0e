//! # Reducer Trait
//!
//! The `Reducer` trait is the contract every state snapshot managed by a
//! [`StoreActor`](crate::StoreActor) implements. A reducer is a pure function from
//! `(snapshot, action, context)` to either a brand new snapshot plus an outcome, or an error.
//! The snapshot passed in is never mutated, so a rejected action leaves the store exactly as it was.
//!
//! # Associated Types
//! - `Action`: the typed commands the store accepts (e.g. `AddCategory`).
//! - `Outcome`: what a successful dispatch reports back to the caller.
//! - `Context`: settings injected once when the store starts running (late binding).
//! - `Error`: the rejection type for this state.

use std::fmt::Debug;

/// Trait that any state snapshot must implement to be managed by a `StoreActor`.
///
/// # Purity
/// `reduce` borrows the current snapshot and returns the next one. Implementations must not
/// rely on interior mutability or I/O; given the same snapshot, action and context they must
/// return the same result. This keeps every reducer unit-testable without spawning a store.
///
/// # Example
///
/// ```rust
/// use catalog_store::Reducer;
///
/// #[derive(Clone, Debug, Default)]
/// struct Counter { value: u32 }
///
/// #[derive(Debug)]
/// enum CounterAction { Add(u32), Take(u32) }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter underflow")]
/// struct Underflow;
///
/// impl Reducer for Counter {
///     type Action = CounterAction;
///     type Outcome = u32;
///     type Context = ();
///     type Error = Underflow;
///
///     fn reduce(&self, action: CounterAction, _: &()) -> Result<(Self, u32), Underflow> {
///         let value = match action {
///             CounterAction::Add(n) => self.value + n,
///             CounterAction::Take(n) => self.value.checked_sub(n).ok_or(Underflow)?,
///         };
///         Ok((Self { value }, value))
///     }
/// }
///
/// let start = Counter::default();
/// let (next, outcome) = start.reduce(CounterAction::Add(3), &()).unwrap();
/// assert_eq!(outcome, 3);
/// assert_eq!(start.value, 0);
/// assert!(next.reduce(CounterAction::Take(4), &()).is_err());
/// ```
pub trait Reducer: Clone + Debug + Send + Sync + Sized + 'static {
    /// Typed command accepted by the store.
    type Action: Send + Debug;

    /// Result reported to the dispatcher when an action is applied.
    type Outcome: Send + Debug;

    /// Runtime settings injected into every `reduce` call.
    /// Use `()` if the reducer needs none.
    type Context: Send + Sync;

    /// The rejection type for this state.
    ///
    /// The store wraps it in [`StoreError::Rejected`](crate::StoreError::Rejected); domain
    /// clients downcast it back to recover the typed error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply `action` to this snapshot, producing the next snapshot.
    fn reduce(
        &self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<(Self, Self::Outcome), Self::Error>;
}
