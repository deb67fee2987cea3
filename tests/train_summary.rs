use clap::Parser;
use snake_qlearn::{
    adapters::FileStore,
    cli::commands::{
        reset::{ResetArgs, execute as reset},
        train::{TrainArgs, execute},
    },
    ports::KeyValueStore,
    q_learning::MODEL_KEY,
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");
    let store_dir = tmp.path().join("store");

    let args = parse_args([
        "snake-q-train",
        "--episodes",
        "5",
        "--board-size",
        "8",
        "--seed",
        "3",
        "--store-dir",
        store_dir.to_str().unwrap(),
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["episodes"], 5);
    assert_eq!(parsed["cancelled"], false);
    assert_eq!(parsed["batches"].as_array().unwrap().len(), 0);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}{}", summary_dir.display(), std::path::MAIN_SEPARATOR);
    let store_dir = tmp.path().join("store");

    let args = parse_args([
        "snake-q-train",
        "--episodes",
        "4",
        "--batch-size",
        "2",
        "--board-size",
        "6",
        "--store-dir",
        store_dir.to_str().unwrap(),
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["episodes"], 4);
    assert_eq!(parsed["batches"][1]["first_episode"], 3);
    assert_eq!(parsed["batches"][1]["last_episode"], 4);
}

#[test]
fn train_saves_model_and_reset_removes_it() {
    let tmp = tempdir().unwrap();
    let store_dir = tmp.path().join("store");

    let args = parse_args([
        "snake-q-train",
        "--episodes",
        "3",
        "--board-size",
        "6",
        "--seed",
        "1",
        "--store-dir",
        store_dir.to_str().unwrap(),
    ]);
    execute(args).unwrap();

    let store = FileStore::new(&store_dir);
    let text = store.get(MODEL_KEY).unwrap().expect("model should be saved");
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.as_object().unwrap().len(), 432);

    reset(ResetArgs::parse_from([
        "snake-q-reset",
        "--store-dir",
        store_dir.to_str().unwrap(),
    ]))
    .unwrap();
    assert!(store.get(MODEL_KEY).unwrap().is_none());
}

#[test]
fn invalid_lpc_is_rejected() {
    let tmp = tempdir().unwrap();
    let store_dir = tmp.path().join("store");

    let args = parse_args([
        "snake-q-train",
        "--episodes",
        "1",
        "--lpc",
        "0",
        "--store-dir",
        store_dir.to_str().unwrap(),
    ]);

    let err = execute(args).unwrap_err();
    assert!(err.to_string().contains("lpc"), "unexpected error: {err}");
    assert!(!store_dir.join("QModel.json").exists());
}
