//! End-to-end conversion cases through the public detector API.

use pathmode_core::{
    is_unix_path, is_windows_path, is_wsl_path, HostContext, Mode, PathModeConfig,
    PathModeDetector,
};

fn docker_detector() -> PathModeDetector {
    let host = HostContext::with_root("/nonexistent").with_var("MCP_FILE_PATH_MODE", "docker");
    PathModeDetector::with_config(PathModeConfig::default(), host)
}

#[test]
fn test_host_paths_map_to_project_root() {
    let detector = docker_detector();
    let cases = [
        (
            r"C:\Users\dev\zen-mcp-server\main.py",
            "/app/project/zen-mcp-server/main.py",
        ),
        (
            "/home/dev/zen-mcp-server/main.py",
            "/app/project/zen-mcp-server/main.py",
        ),
        (
            "/mnt/c/Users/dev/zen-mcp-server/main.py",
            "/app/project/zen-mcp-server/main.py",
        ),
        ("src/utils.py", "/app/project/src/utils.py"),
        ("/app/project/file.py", "/app/project/file.py"),
        (r"C:\random\file.py", "/app/project/file.py"),
        ("", ""),
    ];

    for (input, expected) in cases {
        assert_eq!(detector.convert_path(input, None), expected, "input {:?}", input);
    }
}

#[test]
fn test_windows_source_tree_in_docker_mode() {
    let detector = docker_detector();
    let converted = detector.convert_path(r"C:\Users\Test\zen-mcp-server\src\main.py", None);

    assert!(converted.starts_with("/app/project/"));
    assert!(converted.ends_with("src/main.py"));
    assert!(!converted.contains('\\'));
}

#[test]
fn test_local_target_is_identity_even_in_docker_mode() {
    let detector = docker_detector();
    for path in [
        r"C:\Projects\zen-mcp-server\server.py",
        "/app/project/file.py",
        "/workspace/x",
        "relative/file.py",
        "",
    ] {
        assert_eq!(detector.convert_path(path, Some(Mode::Local)), path);
    }
}

#[test]
fn test_canonical_paths_are_idempotent() {
    let detector = docker_detector();
    for path in [
        "/app/project/a.py",
        "/app/project/deep/nested/b.py",
        "/workspace/c.py",
    ] {
        assert_eq!(detector.convert_path(path, Some(Mode::Docker)), path);
    }
}

#[test]
fn test_classifiers_never_overlap() {
    let inputs = [
        "",
        "/",
        "/mnt/",
        "/mnt/c",
        "C:/",
        r"C:\",
        "a:b",
        "relative",
        r"\\share\x",
        "/usr/bin",
    ];
    for input in inputs {
        let hits = [is_windows_path(input), is_wsl_path(input), is_unix_path(input)]
            .into_iter()
            .filter(|hit| *hit)
            .count();
        assert!(hits <= 1, "{:?}", input);
    }
}
