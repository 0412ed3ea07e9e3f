//! Macros for ergonomic machine construction.

/// Declare a machine inline.
///
/// Expands to a [`MachineBuilder`](crate::builder::MachineBuilder) chain and
/// evaluates to `Result<Machine, FormatError>`.
///
/// # Example
///
/// ```
/// use mealy_mutant::mealy_machine;
///
/// let machine = mealy_machine! {
///     states: 2,
///     inputs: 2,
///     outputs: 2,
///     initial: 0,
///     transitions: [
///         (0, 0) -> (1, 0),
///         (0, 1) -> (0, 1),
///         (1, 0) -> (0, 1),
///         (1, 1) -> (1, 0),
///     ]
/// }
/// .unwrap();
///
/// assert_eq!(machine.transition_for(1, 0), Some((0, 1)));
/// ```
#[macro_export]
macro_rules! mealy_machine {
    (
        states: $states:expr,
        inputs: $inputs:expr,
        outputs: $outputs:expr,
        initial: $initial:expr,
        transitions: [
            $(
                ($from:expr, $input:expr) -> ($to:expr, $output:expr)
            ),* $(,)?
        ] $(,)?
    ) => {
        $crate::builder::MachineBuilder::new()
            .states($states)
            .inputs($inputs)
            .outputs($outputs)
            .initial($initial)
            $(.transition($from, $input, $to, $output))*
            .build()
    };
}
