//! End-to-end sync-run scenarios: a one-way script transformer compiling
//! ES2015 sources to ES5 on the way to the server, and suppressing on the
//! way back so the source files are never overwritten.

use duplex_transform_pipeline::{MockTranspiler, Pipeline, ScriptConfig, ScriptTransformer};
use transform_types::{Encoding, Unit, UnitOrigin, UnitPath};

const ES2015_SOURCE: &str = r#"class Greeter {
    constructor(name = "world") {
        this.name = name;
    }

    greet() {
        return `Hello, ${this.name}!`;
    }
}
"#;

const ES5_OUTPUT: &str = r#"var Greeter = function (name) {
    if (name === undefined) { name = "world"; }
    this.name = name;
};

Greeter.prototype.greet = function () {
    return "Hello, " + this.name + "!";
};
"#;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

fn script_pipeline(transpiler: MockTranspiler) -> Pipeline {
    let config = ScriptConfig::default().with_extension("js").with_presets(&["es2015"]);
    Pipeline::builder()
        .register(ScriptTransformer::with_config(transpiler, config))
        .build()
}

#[tokio::test]
async fn forward_sync_compiles_es2015_to_es5() {
    init_tracing();
    let transpiler = MockTranspiler::new();
    transpiler.queue_output(ES5_OUTPUT);
    let pipeline = script_pipeline(transpiler.clone());

    let source = Unit::new(
        "src/Main.js",
        ES2015_SOURCE.as_bytes().to_vec(),
        UnitOrigin::Filesystem,
    );
    let pushed = pipeline
        .run_to_server(source.clone(), Encoding::Utf8)
        .await
        .unwrap()
        .expect("forward transform must emit one unit");

    // Same identity, new content
    assert_eq!(pushed.path, source.path);
    assert_ne!(pushed.content, source.content);

    // Only ES5-compatible constructs remain
    let compiled = pushed.content_str().unwrap();
    assert!(!compiled.contains("class "));
    assert!(!compiled.contains('`'));
    assert!(!compiled.contains("name = \"world\")"));

    // The transpiler saw the original source with the configured presets
    let calls = transpiler.compile_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, ES2015_SOURCE);
    assert_eq!(calls[0].1, vec!["es2015".to_string()]);
}

#[tokio::test]
async fn reverse_sync_never_regenerates_the_source() {
    init_tracing();
    let transpiler = MockTranspiler::new();
    transpiler.queue_output(ES5_OUTPUT);
    let pipeline = script_pipeline(transpiler);

    let source = Unit::new(
        "src/Main.js",
        ES2015_SOURCE.as_bytes().to_vec(),
        UnitOrigin::Filesystem,
    );
    let pushed = pipeline
        .run_to_server(source.clone(), Encoding::Utf8)
        .await
        .unwrap()
        .unwrap();

    // Feeding the compiled unit back through the reverse direction yields
    // zero output units, twice over (idempotent suppression).
    let first_pull = pipeline
        .run_to_filesystem(pushed.clone(), Encoding::Utf8)
        .await
        .unwrap();
    assert!(first_pull.is_none());

    let second_pull = pipeline
        .run_to_filesystem(pushed, Encoding::Utf8)
        .await
        .unwrap();
    assert!(second_pull.is_none());

    // The original source unit was never touched
    assert_eq!(source.content, ES2015_SOURCE.as_bytes());
    assert_eq!(
        pipeline.suppressed_paths().await,
        vec![UnitPath::new("src/Main.js")]
    );
}

#[tokio::test]
async fn non_script_units_are_untouched_in_both_directions() {
    init_tracing();
    let transpiler = MockTranspiler::new();
    let pipeline = script_pipeline(transpiler.clone());

    let asset = Unit::new(
        "assets/logo.png",
        vec![0x89, 0x50, 0x4e, 0x47],
        UnitOrigin::Filesystem,
    );

    let pushed = pipeline
        .run_to_server(asset.clone(), Encoding::Binary)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pushed, asset);

    let pulled = pipeline
        .run_to_filesystem(asset.clone(), Encoding::Binary)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pulled, asset);

    assert!(transpiler.compile_calls().is_empty());
    assert_eq!(pipeline.stats().await.passed_through, 1);
}

#[tokio::test]
async fn run_stats_summarize_a_mixed_sync() {
    init_tracing();
    let transpiler = MockTranspiler::new();
    transpiler.queue_output(ES5_OUTPUT);
    let pipeline = script_pipeline(transpiler);

    let script = Unit::new(
        "src/Main.js",
        ES2015_SOURCE.as_bytes().to_vec(),
        UnitOrigin::Filesystem,
    );
    let readme = Unit::new("README.md", b"# hi".to_vec(), UnitOrigin::Filesystem);

    let compiled = pipeline
        .run_to_server(script, Encoding::Utf8)
        .await
        .unwrap()
        .unwrap();
    pipeline
        .run_to_server(readme, Encoding::Utf8)
        .await
        .unwrap();
    pipeline
        .run_to_filesystem(compiled, Encoding::Utf8)
        .await
        .unwrap();

    let stats = pipeline.stats().await;
    // Main.js ends the run suppressed (the pull overwrote its forward record)
    assert_eq!(stats.suppressed, 1);
    assert_eq!(stats.passed_through, 1);
    assert_eq!(stats.failed, 0);
}
