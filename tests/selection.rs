use canopy::prelude::*;
use pretty_assertions::assert_eq;

// name, age, and an `info` group holding city and height
fn nested() -> DataFrame {
    df! {
        name => ["Alice", "Bob", "Mark"],
        age  => [15, 20, 25],
    }
    .unwrap()
    .insert(
        path!["info", "city"],
        Column::of("city", vec!["London", "Paris", "Oslo"]).unwrap(),
    )
    .unwrap()
    .insert(
        path!["info", "height"],
        Column::of("height", vec![Some(1.5), Some(1.8), None]).unwrap(),
    )
    .unwrap()
}

fn paths(resolved: &[ColumnWithPath]) -> Vec<String> {
    resolved.iter().map(|c| c.path.to_string()).collect()
}

#[test]
fn names_resolve_direct_children_only() {
    let df = nested();
    let resolved = df.resolve_strict(&cols(["age", "name"])).unwrap();
    assert_eq!(paths(&resolved), vec!["age", "name"]);

    // a nested column is not a direct child
    let err = df.resolve_strict(&col("city")).unwrap_err();
    assert!(matches!(err, FrameError::ColumnNotFound(_)));
    let resolved = df.resolve_strict(&at(path!["info", "city"])).unwrap();
    assert_eq!(paths(&resolved), vec!["info/city"]);
}

#[test]
fn all_dfs_visits_parents_before_children() {
    let df = nested();
    let with_groups = df.resolve_strict(&all_dfs(true)).unwrap();
    assert_eq!(
        paths(&with_groups),
        vec!["name", "age", "info", "info/city", "info/height"]
    );

    let leaves_only = df.resolve_strict(&all_dfs(false)).unwrap();
    assert_eq!(paths(&leaves_only), vec!["name", "age", "info/city", "info/height"]);

    // resolved paths are unique
    let mut seen = paths(&with_groups);
    seen.dedup();
    assert_eq!(seen.len(), with_groups.len());
}

#[test]
fn dfs_descends_from_a_resolved_group() {
    let df = nested()
        .insert(
            path!["info", "more", "note"],
            Column::of("note", vec!["a", "b", "c"]).unwrap(),
        )
        .unwrap();

    // every descendant of info, parents before children, groups included
    let all = df.resolve_strict(&col("info").dfs(|_| true)).unwrap();
    assert_eq!(
        paths(&all),
        vec!["info/city", "info/height", "info/more", "info/more/note"]
    );

    let values_only = df
        .resolve_strict(&col("info").dfs(|c| c.col.kind() == ColumnKind::Value))
        .unwrap();
    assert_eq!(paths(&values_only), vec!["info/city", "info/height", "info/more/note"]);

    // a value column has no descendants to visit
    let none = df.resolve_strict(&col("name").dfs(|_| true)).unwrap();
    assert!(none.is_empty());
}

#[test]
fn resolution_is_deterministic() {
    let df = nested();
    let set = all_dfs(true);
    assert_eq!(
        paths(&df.resolve_strict(&set).unwrap()),
        paths(&df.resolve_strict(&set).unwrap())
    );
}

#[test]
fn cols_of_is_nullability_aware() {
    let df = df! {
        a => [1, 2],
        b => [1, ()],
        c => ["x", "y"],
    }
    .unwrap();

    // a non-nullable target rejects the column that actually holds a null
    let strict = df
        .resolve_strict(&cols_of(TypeDescriptor::new(ValueType::Int, false)))
        .unwrap();
    assert_eq!(paths(&strict), vec!["a"]);

    let lenient = df
        .resolve_strict(&cols_of(TypeDescriptor::new(ValueType::Int, true)))
        .unwrap();
    assert_eq!(paths(&lenient), vec!["a", "b"]);
}

#[test]
fn except_dissolves_groups_with_removed_children() {
    let df = nested();
    let resolved = df
        .resolve_strict(&all().except(at(path!["info", "city"])))
        .unwrap();
    assert_eq!(paths(&resolved), vec!["name", "age", "info/height"]);

    // excepting a whole group drops its subtree
    let resolved = df.resolve_strict(&all().except(col("info"))).unwrap();
    assert_eq!(paths(&resolved), vec!["name", "age"]);
}

#[test]
fn span_covers_the_sibling_range() {
    let df = nested();
    let resolved = df.resolve_strict(&col("name").span(col("info"))).unwrap();
    assert_eq!(paths(&resolved), vec!["name", "age", "info"]);

    let err = df
        .resolve_strict(&col("name").span(at(path!["info", "city"])))
        .unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));
}

#[test]
fn first_last_single_enforce_cardinality() {
    let df = nested();
    assert_eq!(paths(&df.resolve_strict(&all().first()).unwrap()), vec!["name"]);
    assert_eq!(paths(&df.resolve_strict(&all().last()).unwrap()), vec!["info"]);

    let err = df
        .resolve_strict(&all().filter(|_| false).first())
        .unwrap_err();
    assert!(matches!(err, FrameError::EmptyMatch));

    let err = df.resolve_strict(&all().single()).unwrap_err();
    assert!(matches!(err, FrameError::AmbiguousMatch(3)));
}

#[test]
fn filter_children_and_indexes() {
    let df = nested();
    let resolved = df
        .resolve_strict(&all_dfs(false).filter(|c| c.name().starts_with('c')))
        .unwrap();
    assert_eq!(paths(&resolved), vec!["info/city"]);

    let resolved = df.resolve_strict(&col("info").children()).unwrap();
    assert_eq!(paths(&resolved), vec!["info/city", "info/height"]);

    assert_eq!(paths(&df.resolve_strict(&col_at(1)).unwrap()), vec!["age"]);
    assert_eq!(
        paths(&df.resolve_strict(&cols_range(0..2)).unwrap()),
        vec!["name", "age"]
    );
    let err = df.resolve_strict(&col_at(9)).unwrap_err();
    assert!(matches!(err, FrameError::ShapeMismatch(_)));
}

#[test]
fn and_distinct_and_named() {
    let df = nested();
    let resolved = df
        .resolve_strict(&col("age").and(col("age")).distinct())
        .unwrap();
    assert_eq!(paths(&resolved), vec!["age"]);

    let renamed = df.resolve_strict(&col("age").named("years")).unwrap();
    assert_eq!(paths(&renamed), vec!["years"]);
    assert_eq!(renamed[0].name(), "years");
}

#[test]
fn kind_assertions_fail_loudly() {
    let df = nested();
    assert!(df.resolve_strict(&col("info").as_group()).is_ok());
    let err = df.resolve_strict(&col("info").as_value()).unwrap_err();
    assert!(matches!(
        err,
        FrameError::KindMismatch { expected: ColumnKind::Value, found: ColumnKind::Group, .. }
    ));
}

#[test]
fn missing_column_policies() {
    let df = nested();
    let set = cols(["age", "ghost"]);

    let err = df.resolve(&set, UnresolvedPolicy::Fail).unwrap_err();
    assert!(matches!(err, FrameError::ColumnNotFound(_)));

    let skipped = df.resolve(&set, UnresolvedPolicy::Skip).unwrap();
    assert_eq!(paths(&skipped), vec!["age"]);

    let created = df.resolve(&set, UnresolvedPolicy::Create).unwrap();
    assert_eq!(paths(&created), vec!["age", "ghost"]);
    let ghost = &created[1];
    assert_eq!(ghost.col.len(), 3);
    assert!(ghost.col.dtype().unwrap().nullable);
}

#[test]
fn select_preserves_nesting() {
    let df = nested();
    let selected = df
        .select(&at(path!["info", "city"]).and(col("name")))
        .unwrap();
    assert_eq!(selected.column_names(), vec!["info", "name"]);
    assert!(selected.has_column(&path!["info", "city"]));
    assert!(!selected.has_column(&path!["info", "height"]));
}

#[test]
fn select_and_remove_are_complements() {
    let df = nested();
    let set = at(path!["info", "height"]).and(col("age"));

    let selected = df.select(&set).unwrap();
    let (kept, removed) = df.remove(&set).unwrap();

    assert_eq!(paths(&removed), vec!["info/height", "age"]);
    // every column lands on exactly one side
    let mut all_paths = selected.leaf_paths();
    all_paths.extend(kept.leaf_paths());
    all_paths.sort();
    let mut expected = df.leaf_paths();
    expected.sort();
    assert_eq!(all_paths, expected);
}

#[test]
fn removing_the_last_child_prunes_the_group() {
    let df = nested();
    let (kept, _) = df
        .remove(&at(path!["info", "city"]).and(at(path!["info", "height"])))
        .unwrap();
    assert_eq!(kept.column_names(), vec!["name", "age"]);
}
