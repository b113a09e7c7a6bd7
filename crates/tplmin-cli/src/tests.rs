use crate::*;
use clap::Parser;
use tempfile::TempDir;

#[test]
fn test_args_required() {
    assert!(Args::try_parse_from(["tplmin"]).is_err());
    assert!(Args::try_parse_from(["tplmin", "-i", "in.html"]).is_err());
}

#[test]
fn test_args_short_and_long() {
    let args = Args::try_parse_from(["tplmin", "-i", "in.html", "--output", "out.html", "-v"]).unwrap();
    assert_eq!(args.input, PathBuf::from("in.html"));
    assert_eq!(args.output, PathBuf::from("out.html"));
    assert!(args.config.is_none());
    assert_eq!(args.log_level(), "debug");
}

#[test]
fn test_args_verbose_conflicts_with_quiet() {
    assert!(Args::try_parse_from(["tplmin", "-i", "a", "-o", "b", "-v", "-q"]).is_err());
}

#[test]
fn test_log_levels() {
    let quiet = Args::try_parse_from(["tplmin", "-i", "a", "-o", "b", "-q"]).unwrap();
    assert_eq!(quiet.log_level(), "error");
    let default = Args::try_parse_from(["tplmin", "-i", "a", "-o", "b"]).unwrap();
    assert_eq!(default.log_level(), "info");
}

#[test]
fn test_read_input_missing() {
    let err = read_input(Path::new("/nonexistent/page.html")).unwrap_err();
    assert_eq!(err.to_string(), "The input file does not exist, /nonexistent/page.html.");
}

#[test]
fn test_write_output_replaces_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.html");
    fs::write(&path, "old").unwrap();
    write_output(&path, "<p>new</p>").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "<p>new</p>");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_output_bad_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.html");
    let err = write_output(&path, "x").unwrap_err();
    assert!(err.to_string().contains("Output file failed"));
    assert!(!path.exists());
}

#[test]
fn test_load_config_default() {
    let config = load_config(None).unwrap();
    assert_eq!(config.style.program, "sass");
}

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tplmin.json");
    fs::write(&path, r#"{"placeholder":{"token_len":12}}"#).unwrap();
    let config = load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.placeholder.token_len, 12);
}

#[test]
fn test_load_config_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tplmin.json");
    fs::write(&path, r#"{"placeholder":{"token_len":2}}"#).unwrap();
    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("token_len"));
}
