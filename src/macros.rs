//! Constructor macros for frames and column paths.

/* -----------------------------------------------------------------------------
DataFrame literal macro
----------------------------------------------------------------------------- */
/// Create a `DataFrame` from column literals.
///
/// Each argument is a `name => [cells]` pair; a column's base type is
/// inferred from its first non-null cell, and `()` stands for a null.
/// Mismatched cell types or unequal column lengths make the macro return
/// an `Err`, like the checked constructors it wraps.
///
/// # Examples:
///
/// ```
/// use canopy::df;
///
/// let frame = df! {
///     name => ["Alice", "Bob", "Mark"],
///     age  => [15, 20, 25],
/// }
/// .unwrap();
/// assert_eq!(frame.n_row(), 3);
/// ```
#[macro_export]
macro_rules! df {
    () => {
        Ok::<$crate::frame::DataFrame, $crate::error::FrameError>(
            $crate::frame::DataFrame::empty(),
        )
    };
    ( $( $name:ident => [ $( $cell:expr ),* $(,)? ] ),+ $(,)? ) => {
        (|| {
            let columns = vec![
                $(
                    $crate::column::Column::of(
                        stringify!($name),
                        vec![ $( $crate::value::Value::from($cell) ),* ],
                    )?,
                )+
            ];
            $crate::frame::DataFrame::new(columns)
        })()
    };
}

/* -----------------------------------------------------------------------------
column path literal macro
----------------------------------------------------------------------------- */
/// Create a `ColumnPath` from name segments.
///
/// # Examples:
///
/// ```
/// use canopy::path;
///
/// let nested = path!["info", "age"];
/// assert_eq!(nested.to_string(), "info/age");
/// ```
#[macro_export]
macro_rules! path {
    [ $( $segment:expr ),+ $(,)? ] => {
        $crate::column::ColumnPath::from_iter(
            [ $( $segment.to_string() ),+ ]
        )
    };
}
