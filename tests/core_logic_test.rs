use comment_stripper::builders::reporter::MemoryReporter;
use comment_stripper::core::config::StripperConfig;
use comment_stripper::core::engine::{FileAction, StripEngine};
use comment_stripper::core::source::DiskTree;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("src/components")).unwrap();
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::create_dir_all(root.join("web/node_modules/dep")).unwrap();
    fs::create_dir_all(root.join("pkg/__pycache__")).unwrap();

    fs::write(root.join("src/app.js"), "code; // trailing comment\nrun();\n").unwrap();
    fs::write(root.join("src/components/Button.tsx"), "/* a */ keep /* b */").unwrap();
    fs::write(root.join("pkg/main.py"), "x = 1  # note\n'''doc'''\ny = 2\n").unwrap();
    fs::write(root.join("web/index.html"), "<!-- note -->kept").unwrap();
    fs::write(root.join("web/style.css"), "a {} /* c */\n<!-- d -->b {}\n").unwrap();
    fs::write(root.join("web/node_modules/dep/index.js"), "// vendored").unwrap();
    fs::write(root.join(".git/objects/pack.js"), "// not ours").unwrap();
    fs::write(root.join("pkg/__pycache__/main.py"), "# cached").unwrap();
    fs::write(root.join("comment_remover.py"), "PATTERN = r'#.*?$'  # keep me\n").unwrap();
    fs::write(root.join("README.md"), "<!-- md is not handled -->").unwrap();

    dir
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_core_workflow() {
    let td = setup_test_tree();
    let root = td.path();

    let mut engine = StripEngine::new(DiskTree::new(), StripperConfig::default());
    let mut reporter = MemoryReporter::new();
    let summary = engine.process_directory(root, &mut reporter).unwrap();

    // 1. Supported files are stripped
    assert_eq!(read(root, "src/app.js"), "code; \nrun();\n");
    assert_eq!(read(root, "src/components/Button.tsx"), " keep ");
    assert_eq!(read(root, "pkg/main.py"), "x = 1  \n\ny = 2\n");
    assert_eq!(read(root, "web/index.html"), "kept");
    assert_eq!(read(root, "web/style.css"), "a {} \nb {}\n");

    // 2. Excluded directories and the script itself are untouched
    assert_eq!(read(root, "web/node_modules/dep/index.js"), "// vendored");
    assert_eq!(read(root, ".git/objects/pack.js"), "// not ours");
    assert_eq!(read(root, "pkg/__pycache__/main.py"), "# cached");
    assert_eq!(read(root, "comment_remover.py"), "PATTERN = r'#.*?$'  # keep me\n");

    // 3. Unsupported files are skipped
    assert_eq!(read(root, "README.md"), "<!-- md is not handled -->");

    assert_eq!(summary.files_visited, 6);
    assert_eq!(summary.files_stripped, 5);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.files_failed, 0);
    assert!(
        reporter
            .lines
            .iter()
            .all(|line| !line.contains("node_modules") && !line.contains(".git"))
    );
}

#[test]
fn test_second_run_is_idempotent() {
    let td = setup_test_tree();
    let root = td.path();

    let mut engine = StripEngine::new(DiskTree::new(), StripperConfig::default());
    engine.process_directory(root, &mut MemoryReporter::new()).unwrap();
    let after_first = read(root, "web/style.css");

    let summary = engine.process_directory(root, &mut MemoryReporter::new()).unwrap();

    assert_eq!(summary.files_stripped, 0);
    assert_eq!(summary.files_unchanged, 5);
    assert_eq!(read(root, "web/style.css"), after_first);
}

#[test]
fn test_plan_does_not_touch_files() {
    let td = setup_test_tree();
    let root = td.path();

    let engine = StripEngine::new(DiskTree::new(), StripperConfig::default());
    let plan = engine.plan(root).unwrap();

    let relative: Vec<String> = plan
        .iter()
        .map(|p| p.path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        relative,
        vec![
            "README.md",
            "pkg/main.py",
            "src/app.js",
            "src/components/Button.tsx",
            "web/index.html",
            "web/style.css",
        ]
    );
    assert_eq!(plan[0].action, FileAction::SkipUnsupported);
    assert_eq!(read(root, "src/app.js"), "code; // trailing comment\nrun();\n");
}

#[test]
fn test_dry_run_writes_nothing() {
    let td = setup_test_tree();
    let root = td.path();

    let mut engine =
        StripEngine::new(DiskTree::new(), StripperConfig::default()).with_dry_run(true);
    let mut reporter = MemoryReporter::new();
    let summary = engine.process_directory(root, &mut reporter).unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.files_stripped, 5);
    assert_eq!(read(root, "web/index.html"), "<!-- note -->kept");
    assert!(reporter.lines.iter().any(|l| l.starts_with("Would remove 13 bytes")));
}

#[test]
fn test_invalid_utf8_is_dropped_on_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("data.json");
    fs::write(&file_path, b"{\"a\": 1} \xfe// note\n").unwrap();

    let mut engine = StripEngine::new(DiskTree::new(), StripperConfig::default());
    engine
        .process_directory(dir.path(), &mut MemoryReporter::new())
        .unwrap();

    assert_eq!(fs::read(&file_path).unwrap(), b"{\"a\": 1} \n");
}

#[test]
fn test_crlf_line_endings_survive_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("app.ts"), "let a = 1; // one\r\nlet b = 2;\r\n").unwrap();
    fs::write(root.join("tool.py"), "x = 1  # note\r\ny = 2\r\n").unwrap();

    let mut engine = StripEngine::new(DiskTree::new(), StripperConfig::default());
    engine
        .process_directory(root, &mut MemoryReporter::new())
        .unwrap();

    assert_eq!(read(root, "app.ts"), "let a = 1; \r\nlet b = 2;\r\n");
    assert_eq!(read(root, "tool.py"), "x = 1  \r\ny = 2\r\n");
}
