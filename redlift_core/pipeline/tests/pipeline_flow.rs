use pipeline::load::run_etl;
use pipeline::migrate::reset_schema;
use pipeline::statements::{CopyParams, TABLES};
use pipeline::PipelineError;
use test_utils::RecordingWarehouse;

fn copy_params() -> CopyParams {
    CopyParams {
        role_arn: "arn:aws:iam::123456789012:role/dwhRole".into(),
        log_data: "s3://udacity-dend/log_data".into(),
        song_data: "s3://udacity-dend/song_data".into(),
        log_jsonpath: "s3://udacity-dend/log_json_path.json".into(),
        region: "us-west-2".into(),
    }
}

#[tokio::test]
async fn reset_drops_every_table_then_creates_every_table() {
    let mut warehouse = RecordingWarehouse::new();

    reset_schema(&mut warehouse).await.expect("reset succeeds");

    let expected: Vec<String> = TABLES
        .iter()
        .chain(TABLES.iter())
        .map(|t| t.to_string())
        .collect();
    assert_eq!(warehouse.touched_tables(), expected);
    assert_eq!(warehouse.executed.len(), TABLES.len() * 2);
}

#[tokio::test]
async fn resetting_twice_issues_the_same_statements_both_times() {
    let mut warehouse = RecordingWarehouse::new();

    reset_schema(&mut warehouse).await.expect("first reset");
    reset_schema(&mut warehouse).await.expect("second reset");

    let half = warehouse.executed.len() / 2;
    assert_eq!(warehouse.executed[..half], warehouse.executed[half..]);
}

#[tokio::test]
async fn etl_finishes_every_copy_before_the_first_insert() {
    let mut warehouse = RecordingWarehouse::new();

    run_etl(&mut warehouse, &copy_params())
        .await
        .expect("etl succeeds");

    assert_eq!(warehouse.executed.len(), 7);
    assert!(warehouse.executed[0].starts_with("COPY staging_events"));
    assert!(warehouse.executed[1].starts_with("COPY staging_songs"));
    for insert in &warehouse.executed[2..] {
        assert!(insert.starts_with("INSERT INTO"), "{insert}");
    }
}

#[tokio::test]
async fn a_failing_statement_stops_the_rest_of_the_run() {
    // Third statement overall: the first insert (songplays).
    let mut warehouse = RecordingWarehouse::failing_at(2);

    let err = run_etl(&mut warehouse, &copy_params())
        .await
        .expect_err("songplays insert fails");

    let PipelineError::Statement { group, table, .. } = err;
    assert_eq!(group, "insert");
    assert_eq!(table, "songplays");
    // Both copies committed, nothing after the failure ran.
    assert_eq!(warehouse.executed.len(), 2);
}

#[tokio::test]
async fn a_failing_drop_aborts_before_any_create() {
    let mut warehouse = RecordingWarehouse::failing_at(4);

    let err = reset_schema(&mut warehouse)
        .await
        .expect_err("fifth drop fails");

    let PipelineError::Statement { group, table, .. } = err;
    assert_eq!(group, "drop");
    assert_eq!(table, "songs");
    assert!(warehouse
        .executed
        .iter()
        .all(|sql| sql.starts_with("DROP TABLE IF EXISTS")));
}
