use canopy::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn csv_reading_infers_column_types() {
    let text = "name,age,height,ok\nAlice,15,1.5,true\nBob,NA,1.8,false\nMark,25,,true\n";
    let df = DataFrame::read_csv(text.as_bytes()).unwrap();

    assert_eq!(df.n_row(), 3);
    assert_eq!(
        df.column("name").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Str, false)
    );
    assert_eq!(
        df.column("age").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Int, true)
    );
    assert_eq!(
        df.column("height").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Float, true)
    );
    assert_eq!(
        df.column("ok").unwrap().dtype().unwrap(),
        TypeDescriptor::new(ValueType::Bool, false)
    );
    assert_eq!(
        df.column("age").unwrap().as_value().unwrap().ints().unwrap(),
        &vec![Some(15), None, Some(25)]
    );
}

#[test]
fn csv_numbers_fall_back_to_wider_types() {
    let text = "x\n1\n2.5\n";
    let df = DataFrame::read_csv(text.as_bytes()).unwrap();
    assert_eq!(df.column("x").unwrap().dtype().unwrap().base, ValueType::Float);

    let text = "x\n1\nnope\n";
    let df = DataFrame::read_csv(text.as_bytes()).unwrap();
    assert_eq!(df.column("x").unwrap().dtype().unwrap().base, ValueType::Str);
}

#[test]
fn csv_schema_reader_validates_the_header() {
    let text = "a,b\n1,x\n";
    let schema = vec![
        ("a".to_string(), ValueType::Int),
        ("b".to_string(), ValueType::Str),
    ];
    let df = DataFrame::read_csv_with_schema(text.as_bytes(), &schema).unwrap();
    assert_eq!(df.column("a").unwrap().dtype().unwrap().base, ValueType::Int);

    let reordered = vec![
        ("b".to_string(), ValueType::Str),
        ("a".to_string(), ValueType::Int),
    ];
    let err = DataFrame::read_csv_with_schema(text.as_bytes(), &reordered).unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));

    let wrong_type = vec![
        ("a".to_string(), ValueType::Bool),
        ("b".to_string(), ValueType::Str),
    ];
    let err = DataFrame::read_csv_with_schema(text.as_bytes(), &wrong_type).unwrap_err();
    assert!(matches!(err, FrameError::SchemaMismatch(_)));
}

#[test]
fn csv_round_trips_flat_frames() {
    let df = df! {
        name => ["Alice", "Bob"],
        age  => [15, ()],
    }
    .unwrap();
    let mut buffer = Vec::new();
    df.write_csv(&mut buffer).unwrap();
    let text = String::from_utf8(buffer.clone()).unwrap();
    assert!(text.starts_with("name,age\n"));
    assert!(text.contains("Bob,NA"));

    let back = DataFrame::read_csv(buffer.as_slice()).unwrap();
    assert_eq!(back, df);
}

#[test]
fn csv_gz_round_trips_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.csv.gz");
    let path = path.to_str().unwrap();

    let df = df! { a => [1, 2, 3], b => ["x", "y", "z"] }.unwrap();
    df.write_csv_path(path).unwrap();
    let back = DataFrame::read_csv_path(path).unwrap();
    assert_eq!(back, df);
}

#[test]
fn nested_frames_do_not_write_as_csv() {
    let df = df! { a => [1] }
        .unwrap()
        .insert(path!["g", "b"], Column::of("b", vec![2]).unwrap())
        .unwrap();
    let err = df.write_csv(Vec::new()).unwrap_err();
    assert!(matches!(err, FrameError::Unsupported(_)));
}

#[test]
fn json_round_trips_hierarchical_frames() {
    let df = df! {
        name => ["Alice", "Bob"],
        age  => [15, 20],
    }
    .unwrap()
    .insert(
        path!["info", "city"],
        Column::of("city", vec!["London", "Paris"]).unwrap(),
    )
    .unwrap();
    let grouped = df.group_by(&col("name")).unwrap().to_frame().unwrap();

    let json = grouped.to_json().unwrap();
    let back = DataFrame::from_json(&json).unwrap();
    assert_eq!(back, grouped);
}

#[test]
fn json_reads_missing_keys_as_nulls() {
    let json: serde_json::Value = serde_json::from_str(
        r#"[{"a": 1, "b": "x"}, {"a": 2}]"#,
    )
    .unwrap();
    let df = DataFrame::from_json(&json).unwrap();
    assert_eq!(
        df.column("b").unwrap().as_value().unwrap().strs().unwrap(),
        &vec![Some("x".to_string()), None]
    );
}

#[test]
fn json_widens_mixed_numbers_to_float() {
    let json: serde_json::Value = serde_json::from_str(r#"[{"x": 1}, {"x": 2.5}]"#).unwrap();
    let df = DataFrame::from_json(&json).unwrap();
    assert_eq!(
        df.column("x").unwrap().as_value().unwrap().floats().unwrap(),
        &vec![Some(1.0), Some(2.5)]
    );
}

#[test]
fn json_writer_streams_to_any_writer() {
    let df = df! { a => [1, 2] }.unwrap();
    let mut buffer = Vec::new();
    df.write_json(&mut buffer).unwrap();
    let back = DataFrame::read_json(buffer.as_slice()).unwrap();
    assert_eq!(back, df);
}

#[test]
fn schema_snapshots_serialize() {
    let df = df! { a => [1, ()] }.unwrap();
    let schema = df.schema();
    let text = serde_json::to_string(&schema).unwrap();
    let back: DataFrameSchema = serde_json::from_str(&text).unwrap();
    assert_eq!(back, schema);
}
