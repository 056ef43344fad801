use planboard::config::AppConfig;
use planboard::internal_error::InternalError;
use planboard::root::shell::Shell;
use planboard::router::RouteName;

use std::io::Write;

// Kept as the only test in this binary: the boot guard is process wide.
#[test]
fn shell_boots_once_per_process() {
    let mut page = tempfile::NamedTempFile::new().unwrap();
    write!(page, r#"<html><body><section id="board"></section></body></html>"#).unwrap();

    let config = AppConfig {
        host_page: page.path().to_path_buf(),
        mount_target: "board".to_string(),
        ..AppConfig::default()
    };

    let mut shell = Shell::boot(&config).unwrap();
    shell.navigate("/").unwrap();
    assert_eq!(shell.active_route(), Some(RouteName::Todos));
    assert!(shell
        .render()
        .starts_with(r#"<html><body><section id="board"><div class="view view-todos"#));

    assert!(matches!(Shell::boot(&config), Err(InternalError::AlreadyBooted)));
}
