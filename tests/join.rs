use canopy::prelude::*;
use pretty_assertions::assert_eq;

// left keys [1, 2], right keys [1, 1, 3]
fn left() -> DataFrame {
    df! {
        k => [1, 2],
        l => ["a", "b"],
    }
    .unwrap()
}

fn right() -> DataFrame {
    df! {
        k => [1, 1, 3],
        r => ["x", "y", "z"],
    }
    .unwrap()
}

fn ints(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name).unwrap().as_value().unwrap().ints().unwrap().clone()
}

fn strs(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name).unwrap().as_value().unwrap().strs().unwrap().clone()
}

fn s(text: &str) -> Option<String> {
    Some(text.to_string())
}

#[test]
fn inner_join_cross_multiplies_matches() {
    let out = left().inner_join(&right(), &["k".into()]).unwrap();
    assert_eq!(out.n_row(), 2);
    assert_eq!(ints(&out, "k"), vec![Some(1), Some(1)]);
    assert_eq!(strs(&out, "l"), vec![s("a"), s("a")]);
    assert_eq!(strs(&out, "r"), vec![s("x"), s("y")]);
}

#[test]
fn left_join_keeps_unmatched_left_rows() {
    let out = left().left_join(&right(), &["k".into()]).unwrap();
    assert_eq!(out.n_row(), 3);
    assert_eq!(ints(&out, "k"), vec![Some(1), Some(1), Some(2)]);
    assert_eq!(strs(&out, "r"), vec![s("x"), s("y"), None]);
}

#[test]
fn right_join_appends_unmatched_right_rows_with_mapped_keys() {
    let out = left().right_join(&right(), &["k".into()]).unwrap();
    assert_eq!(out.n_row(), 3);
    // the final block comes from right rows, key slots filled from the
    // right key column, other left columns null
    assert_eq!(ints(&out, "k"), vec![Some(1), Some(1), Some(3)]);
    assert_eq!(strs(&out, "l"), vec![s("a"), s("a"), None]);
    assert_eq!(strs(&out, "r"), vec![s("x"), s("y"), s("z")]);
}

#[test]
fn outer_join_unions_both_sides() {
    let out = left().outer_join(&right(), &["k".into()]).unwrap();
    assert_eq!(out.n_row(), 4);
    assert_eq!(ints(&out, "k"), vec![Some(1), Some(1), Some(2), Some(3)]);
    assert_eq!(strs(&out, "l"), vec![s("a"), s("a"), s("b"), None]);
    assert_eq!(strs(&out, "r"), vec![s("x"), s("y"), None, s("z")]);
}

#[test]
fn filter_join_keeps_matched_left_rows_only() {
    let out = left().filter_join(&right(), &["k".into()]).unwrap();
    assert_eq!(out.column_names(), vec!["k", "l"]);
    // matches still cross-multiply; only the projection changes
    assert_eq!(ints(&out, "k"), vec![Some(1), Some(1)]);
}

#[test]
fn exclude_join_keeps_unmatched_left_rows_only() {
    let out = left().exclude_join(&right(), &["k".into()]).unwrap();
    assert_eq!(out.column_names(), vec!["k", "l"]);
    assert_eq!(ints(&out, "k"), vec![Some(2)]);
    assert_eq!(strs(&out, "l"), vec![s("b")]);
}

#[test]
fn default_keys_are_the_shared_top_level_names() {
    let out = left().inner_join(&right(), &[]).unwrap();
    assert_eq!(out.n_row(), 2);

    let unrelated = df! { other => [1] }.unwrap();
    let err = left().inner_join(&unrelated, &[]).unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));
}

#[test]
fn match_on_pairs_differently_named_columns() {
    let renamed = df! {
        id => [1, 1, 3],
        r  => ["x", "y", "z"],
    }
    .unwrap();
    let out = left()
        .inner_join(&renamed, &[match_on(col("k"), col("id"))])
        .unwrap();
    assert_eq!(out.n_row(), 2);
    // the right key column is consumed by the match, not projected
    assert_eq!(out.column_names(), vec!["k", "l", "r"]);
}

#[test]
fn join_row_count_bounds_hold() {
    let l = left();
    let r = right();
    let inner = l.inner_join(&r, &["k".into()]).unwrap().n_row();
    let left_rows = l.left_join(&r, &["k".into()]).unwrap().n_row();
    let outer = l.outer_join(&r, &["k".into()]).unwrap().n_row();
    assert!(inner <= l.n_row() * r.n_row());
    assert!(left_rows >= l.n_row());
    assert!(outer >= left_rows);
}

#[test]
fn self_join_on_unique_keys_is_identity_shaped() {
    let df = left();
    let out = df.inner_join(&df, &["k".into()]).unwrap();
    assert_eq!(out.n_row(), df.n_row());
    assert_eq!(ints(&out, "k"), ints(&df, "k"));
    // the non-key right column collides and gets a fresh name
    assert_eq!(out.column_names(), vec!["k", "l", "l_1"]);
    assert_eq!(strs(&out, "l_1"), strs(&df, "l"));
}

#[test]
fn group_keys_expand_to_common_leaves() {
    let base = |tag: &str| {
        df! { v => [10, 20] }
            .unwrap()
            .insert(path!["key", "a"], Column::of("a", vec![1, 2]).unwrap())
            .unwrap()
            .insert(
                path!["key", "b"],
                Column::of("b", vec![tag, tag]).unwrap(),
            )
            .unwrap()
    };
    let l = base("m");
    let r = base("m").rename("v", "w").unwrap();

    let out = l.inner_join(&r, &[match_on(col("key"), col("key"))]).unwrap();
    assert_eq!(out.n_row(), 2);
    assert!(out.has_column(&path!["key", "a"]));
    assert!(out.has_column(&path!["key", "b"]));
    assert_eq!(ints(&out, "v"), vec![Some(10), Some(20)]);
    assert_eq!(ints(&out, "w"), vec![Some(10), Some(20)]);
}

#[test]
fn group_keys_join_on_their_shared_leaves() {
    // the left group has an extra leaf; matching falls back to the
    // intersection, so rows pair on `a` alone
    let l = df! { v => [10, 20] }
        .unwrap()
        .insert(path!["key", "a"], Column::of("a", vec![1, 2]).unwrap())
        .unwrap()
        .insert(path!["key", "extra"], Column::of("extra", vec!["x", "y"]).unwrap())
        .unwrap();
    let r = df! { w => [7] }
        .unwrap()
        .insert(path!["key", "a"], Column::of("a", vec![2]).unwrap())
        .unwrap();

    let out = l.inner_join(&r, &[match_on(col("key"), col("key"))]).unwrap();
    assert_eq!(out.n_row(), 1);
    assert_eq!(ints(&out, "v"), vec![Some(20)]);
    assert_eq!(ints(&out, "w"), vec![Some(7)]);
    assert_eq!(
        out.column_at(&path!["key", "extra"]).unwrap().as_value().unwrap().strs().unwrap(),
        &vec![Some("y".to_string())]
    );
}

#[test]
fn group_keys_without_shared_leaves_fail_fast() {
    let l = df! { v => [1] }
        .unwrap()
        .insert(path!["key", "a"], Column::of("a", vec![1]).unwrap())
        .unwrap();
    let r = df! { w => [1] }
        .unwrap()
        .insert(path!["key", "b"], Column::of("b", vec![1]).unwrap())
        .unwrap();
    let err = l.inner_join(&r, &[match_on(col("key"), col("key"))]).unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));
}

#[test]
fn exclude_join_works_over_expanded_group_keys() {
    let make = |a: Vec<i64>| {
        let n = a.len();
        DataFrame::new(vec![Column::of("v", vec![0; n]).unwrap()])
            .unwrap()
            .insert(path!["key", "a"], Column::of("a", a).unwrap())
            .unwrap()
    };
    let l = make(vec![1, 2, 3]);
    let r = make(vec![2]);
    let out = l.exclude_join(&r, &[match_on(col("key"), col("key"))]).unwrap();
    assert_eq!(out.n_row(), 2);
    assert_eq!(
        out.column_at(&path!["key", "a"]).unwrap().as_value().unwrap().ints().unwrap(),
        &vec![Some(1), Some(3)]
    );
}

#[test]
fn output_nullability_is_recomputed_from_written_values() {
    // the right frame's r column holds a null, but the single matched
    // row carries a value, so the joined column reports non-nullable
    let l = df! { k => [1] }.unwrap();
    let r = df! { k => [1, 2], r => ["x", ()] }.unwrap();
    assert!(r.column("r").unwrap().dtype().unwrap().nullable);

    let out = l.inner_join(&r, &["k".into()]).unwrap();
    assert_eq!(
        out.column("r").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Str, false)
    );
}

#[test]
fn frame_columns_cannot_join() {
    let grouped = left().group_by(&col("k")).unwrap().to_frame().unwrap();
    let err = left()
        .inner_join(&grouped, &[match_on(col("k"), col(GROUPS_COLUMN))])
        .unwrap_err();
    assert!(matches!(err, FrameError::Unsupported(_) | FrameError::KindMismatch { .. }));
}
