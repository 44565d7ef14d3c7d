//! The [`Rules`] strategy trait.
//!
//! Transition formulas are injected, not fixed: the engine computes
//! neighbourhood aggregates and delegates every cell update to a `Rules`
//! implementation supplied at configuration time.

/// Transition rules for one cellular-automaton variant.
///
/// # Contract
///
/// - Both transition methods MUST be pure and deterministic: the same
///   inputs produce identical outputs. Multi-worker runs are bit-compared
///   against single-worker runs, so any hidden state breaks that property.
/// - A cell is *alive* iff its state is non-zero; `live_neighbours` counts
///   alive cells over the 8-connected Moore neighbourhood.
/// - The orthogonal and diagonal pollution sums are passed separately,
///   never pre-combined, so rule-sets may weight them differently.
/// - [`max_pollution()`](Rules::max_pollution) must be strictly positive;
///   it is used only to normalise the average-pollution query.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores rules as `Box<dyn Rules>`.
///
/// # Examples
///
/// A rule-set under which every cell dies and pollution is inert:
///
/// ```
/// use smog_core::Rules;
///
/// struct Barren;
///
/// impl Rules for Barren {
///     fn cell_next_state(&self, _state: i32, _live_neighbours: u32, _pollution: i32) -> i32 {
///         0
///     }
///
///     fn next_pollution(&self, _state: i32, pollution: i32, _orthogonal: i32, _diagonal: i32) -> i32 {
///         pollution
///     }
///
///     fn max_pollution(&self) -> i32 {
///         1
///     }
/// }
///
/// let rules = Barren;
/// assert_eq!(rules.cell_next_state(1, 3, 0), 0);
/// ```
pub trait Rules: Send + 'static {
    /// Next state for a cell, from its current state, the number of alive
    /// Moore neighbours, and its current pollution value.
    fn cell_next_state(&self, state: i32, live_neighbours: u32, pollution: i32) -> i32;

    /// Next pollution value for a cell.
    ///
    /// `orthogonal` is the sum of the four edge-adjacent neighbours'
    /// pollution values; `diagonal` the sum of the four corner-adjacent
    /// ones. Both are computed from pre-step values.
    fn next_pollution(&self, state: i32, pollution: i32, orthogonal: i32, diagonal: i32) -> i32;

    /// Upper bound on pollution values produced by this rule-set.
    ///
    /// Used only to normalise the average-pollution query to `[0, 1]`.
    /// Must be strictly positive.
    fn max_pollution(&self) -> i32;
}
