use canopy::prelude::*;
use pretty_assertions::assert_eq;

fn people() -> DataFrame {
    df! {
        name => ["Alice", "Bob", "Mark"],
        age  => [15, 20, 25],
    }
    .unwrap()
}

#[test]
fn construction_checks_shapes_and_names() {
    let short = Column::of("b", vec![1, 2]).unwrap();
    let long = Column::of("a", vec![1, 2, 3]).unwrap();
    let err = DataFrame::new(vec![long.clone(), short]).unwrap_err();
    assert!(matches!(err, FrameError::ShapeMismatch(_)));

    let twin = Column::of("a", vec![4, 5, 6]).unwrap();
    let err = DataFrame::new(vec![long, twin]).unwrap_err();
    assert!(matches!(err, FrameError::DuplicateName(name) if name == "a"));
}

#[test]
fn mixed_cell_types_are_rejected() {
    let err = Column::of("a", vec![Value::Int(1), Value::Str("x".to_string())]).unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));
}

#[test]
fn take_rows_reorders_and_repeats() {
    let df = people();
    let taken = df.take_rows(&[2, 0, 0]).unwrap();
    assert_eq!(taken.n_row(), 3);
    assert_eq!(
        taken.column("name").unwrap().as_value().unwrap().strs().unwrap(),
        &vec![
            Some("Mark".to_string()),
            Some("Alice".to_string()),
            Some("Alice".to_string())
        ]
    );
}

#[test]
fn head_tail_and_filter() {
    let df = people();
    assert_eq!(df.head(2).unwrap().n_row(), 2);
    assert_eq!(df.tail(1).unwrap().n_row(), 1);
    assert_eq!(df.head(10).unwrap().n_row(), 3);

    let adults = df
        .filter_rows(|row| Ok(row.get("age")?.as_int().is_some_and(|a| a >= 20)))
        .unwrap();
    assert_eq!(adults.n_row(), 2);
}

#[test]
fn row_access_is_bounds_checked() {
    let df = people();
    assert_eq!(df.row(2).unwrap().get("age").unwrap(), Value::Int(25));
    let err = df.row(3).unwrap_err();
    assert!(matches!(err, FrameError::ShapeMismatch(_)));
}

#[test]
fn nullability_reflects_actual_nulls() {
    let df = df! {
        a => [1, 2, ()],
        b => [1, 2, 3],
    }
    .unwrap();
    assert_eq!(
        df.column("a").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Int, true)
    );
    assert_eq!(
        df.column("b").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Int, false)
    );

    // dropping the null row tightens the descriptor
    let tightened = df.take_rows(&[0, 1]).unwrap();
    assert_eq!(
        tightened.column("a").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Int, false)
    );
}

#[test]
fn insert_creates_intermediate_groups() {
    let df = people();
    let scores = Column::of("score", vec![1.0, 2.0, 3.0]).unwrap();
    let df = df.insert(path!["stats", "exam", "score"], scores).unwrap();

    let col = df.column_at(&path!["stats", "exam", "score"]).unwrap();
    assert_eq!(col.len(), 3);
    assert_eq!(df.column("stats").unwrap().kind(), ColumnKind::Group);
}

#[test]
fn insert_under_a_leaf_fails() {
    let df = people();
    let extra = Column::of("x", vec![1, 2, 3]).unwrap();
    let err = df.insert(path!["age", "x"], extra).unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));
}

#[test]
fn insert_rejects_name_collisions_and_bad_shapes() {
    let df = people();
    let err = df
        .insert(path!["age"], Column::of("age", vec![1, 2, 3]).unwrap())
        .unwrap_err();
    assert!(matches!(err, FrameError::DuplicateName(_)));

    let err = df
        .insert(path!["extra"], Column::of("extra", vec![1]).unwrap())
        .unwrap_err();
    assert!(matches!(err, FrameError::ShapeMismatch(_)));
}

#[test]
fn update_maps_cells_and_reinfers_types() {
    let df = people();
    let doubled = df
        .update(&col("age"), |v| match v {
            Value::Int(x) => Value::Int(x * 2),
            other => other,
        })
        .unwrap();
    assert_eq!(
        doubled.column("age").unwrap().as_value().unwrap().ints().unwrap(),
        &vec![Some(30), Some(40), Some(50)]
    );
    // untouched columns are shared, not copied
    assert_eq!(
        doubled.column("name").unwrap().as_value().unwrap().strs().unwrap(),
        df.column("name").unwrap().as_value().unwrap().strs().unwrap()
    );
}

#[test]
fn concat_unions_schemas_and_null_fills() {
    let left = df! { a => [1, 2], b => ["x", "y"] }.unwrap();
    let right = df! { a => [3], c => [true] }.unwrap();
    let out = left.concat(&right).unwrap();

    assert_eq!(out.n_row(), 3);
    assert_eq!(out.column_names(), vec!["a", "b", "c"]);
    assert_eq!(
        out.column("b").unwrap().as_value().unwrap().strs().unwrap(),
        &vec![Some("x".to_string()), Some("y".to_string()), None]
    );
    assert_eq!(
        out.column("c").unwrap().as_value().unwrap().bools().unwrap(),
        &vec![None, None, Some(true)]
    );
}

#[test]
fn concat_rejects_base_type_conflicts() {
    let left = df! { a => [1] }.unwrap();
    let right = df! { a => ["x"] }.unwrap();
    let err = left.concat(&right).unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));
}

#[test]
fn sort_is_stable_with_null_placement() {
    let df = df! {
        k => [2, (), 1, 2],
        tag => ["a", "b", "c", "d"],
    }
    .unwrap();

    let sorted = df.sort_by(&[SortColumn::asc("k")]).unwrap();
    assert_eq!(
        sorted.column("tag").unwrap().as_value().unwrap().strs().unwrap(),
        &vec![
            Some("b".to_string()),
            Some("c".to_string()),
            Some("a".to_string()),
            Some("d".to_string())
        ]
    );

    let sorted = df
        .sort_by(&[SortColumn::desc("k").nulls_last()])
        .unwrap();
    assert_eq!(
        sorted.column("tag").unwrap().as_value().unwrap().strs().unwrap(),
        &vec![
            Some("a".to_string()),
            Some("d".to_string()),
            Some("c".to_string()),
            Some("b".to_string())
        ]
    );
}

#[test]
fn sorting_a_group_column_is_unsupported() {
    let df = people()
        .insert(path!["info", "x"], Column::of("x", vec![1, 2, 3]).unwrap())
        .unwrap();
    let err = df.sort_by(&[SortColumn::asc("info")]).unwrap_err();
    assert!(matches!(err, FrameError::Unsupported(_)));
}

#[test]
fn distinct_keeps_first_occurrences() {
    let df = df! {
        a => [1, 1, 2, 1],
        b => ["x", "x", "y", "z"],
    }
    .unwrap();
    let unique = df.distinct().unwrap();
    assert_eq!(unique.n_row(), 3);
    assert_eq!(
        unique.column("b").unwrap().as_value().unwrap().strs().unwrap(),
        &vec![Some("x".to_string()), Some("y".to_string()), Some("z".to_string())]
    );
}

#[test]
fn pivot_spreads_key_values() {
    let df = df! {
        name  => ["Alice", "Alice", "Bob"],
        what  => ["math", "art", "math"],
        score => [90, 80, 70],
    }
    .unwrap();
    let wide = df.pivot("what", "score").unwrap();
    assert_eq!(wide.n_row(), 2);
    assert_eq!(wide.column_names(), vec!["name", "math", "art"]);
    assert_eq!(
        wide.column("art").unwrap().as_value().unwrap().ints().unwrap(),
        &vec![Some(80), None]
    );
}

#[test]
fn display_annotates_types_and_counts_rows() {
    let rendered = people().to_string();
    assert!(rendered.contains("name <str>"));
    assert!(rendered.contains("age <i64>"));
    assert!(rendered.contains("3 rows x 2 columns"));
}

#[test]
fn schema_renders_nested_structure() {
    let df = people()
        .insert(path!["info", "height"], Column::of("height", vec![1.1, 2.2, 3.3]).unwrap())
        .unwrap();
    let schema = df.schema();
    assert_eq!(schema.columns.len(), 3);
    let rendered = schema.to_string();
    assert!(rendered.contains("info:"));
    assert!(rendered.contains("height: f64"));
}
