//! Tests for `opsync push env`.

use crate::support::*;

#[test]
fn test_push_env_creates_item_and_writes_template() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "prod-db", &[]);
    assert_success(&output);

    assert_eq!(t.op_verbs(), ["item list", "item create"]);
    assert_eq!(
        t.op_calls()[1],
        "item create --account acme.1password.com --vault Infra --format json"
    );

    let template = t.read(".env.tpl");
    assert!(template.contains("API_KEY={{op://vault-1/item-1/API_KEY}}\n"));
    assert!(template.contains("DATABASE_URL={{op://vault-1/item-1/DATABASE_URL}}\n"));
    assert!(template.find("API_KEY=").unwrap() < template.find("DATABASE_URL=").unwrap());
    assert!(template.contains("op inject --account acme.1password.com -i .env.tpl -o .env"));
    assert!(!template.contains("item-1/password"));
    assert!(!template.contains(DB_PASSWORD));

    assert_stdout_contains(&output, "mirrored 2 fields");
    assert_output_excludes(&output, DB_PASSWORD);
    assert_output_excludes(&output, API_KEY_VALUE);
}

#[test]
fn test_create_payload_is_sorted_and_concealed() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);

    assert_success(&t.push_env(".env", "prod-db", &[]));

    let payload = t.read_state("create.stdin").expect("create payload recorded");
    assert!(payload.contains("LOGIN"));
    assert!(payload.contains("CONCEALED"));
    assert!(payload.contains(DB_PASSWORD));
    assert!(payload.find("API_KEY").unwrap() < payload.find("DATABASE_URL").unwrap());
}

#[test]
fn test_existing_item_without_overwrite_conflicts() {
    let t = Test::with_fake_op();
    t.seed_existing_item();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "prod-db", &[]);

    assert_exit_code(&output, 3);
    assert_stderr_contains(&output, "already exists");
    assert_stdout_contains(&output, "--overwrite");
    assert_eq!(t.op_verbs(), ["item list"]);
    assert!(!t.path(".env.tpl").exists());
}

#[test]
fn test_overwrite_edits_existing_item_by_id() {
    let t = Test::with_fake_op();
    t.seed_existing_item();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "prod-db", &["--overwrite"]);
    assert_success(&output);

    assert_eq!(t.op_verbs(), ["item list", "item edit"]);
    assert!(t.op_calls()[1].starts_with("item edit item-1 --account acme.1password.com"));

    let payload = t.read_state("edit.stdin").expect("edit payload recorded");
    assert!(!payload.contains("LOGIN"));
    assert!(payload.contains("prod-db"));
    // File order is DATABASE_URL then API_KEY; the payload is sorted.
    let api = payload.find(r#""label":"API_KEY""#).expect("API_KEY in payload");
    let db = payload.find(r#""label":"DATABASE_URL""#).expect("DATABASE_URL in payload");
    assert!(api < db);
    assert!(t.read(".env.tpl").contains("{{op://vault-1/item-1/API_KEY}}"));
}

#[test]
fn test_ambiguous_name_fails_before_write() {
    let t = Test::with_fake_op();
    t.write_state("items.json", TWO_ITEM_LIST);
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "prod-db", &["--overwrite"]);

    assert_exit_code(&output, 4);
    assert_stderr_contains(&output, "2 items match 'prod-db'");
    assert_eq!(t.op_verbs(), ["item list"]);
}

#[test]
fn test_require_existing_reports_missing_item() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "prod-db", &["--require-existing"]);

    assert_exit_code(&output, 5);
    assert_stderr_contains(&output, "item not found: prod-db");
    assert_eq!(t.op_verbs(), ["item get"]);
}

#[test]
fn test_require_existing_updates_item() {
    let t = Test::with_fake_op();
    t.seed_existing_item();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "prod-db", &["--require-existing"]);
    assert_success(&output);

    assert_eq!(t.op_verbs(), ["item get", "item edit"]);
    assert_eq!(
        t.op_calls()[0],
        "item get prod-db --account acme.1password.com --vault Infra --format json"
    );
}

#[test]
fn test_existing_template_is_kept_without_force() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);
    t.write(".env.tpl", "keep me\n");

    let output = t.push_env(".env", "prod-db", &[]);

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, ".env.tpl already exists");
    assert!(t.op_calls().is_empty());
    assert_eq!(t.read(".env.tpl"), "keep me\n");
}

#[test]
fn test_force_replaces_template() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);
    t.write(".env.tpl", "keep me\n");

    let output = t.push_env(".env", "prod-db", &["--force"]);
    assert_success(&output);

    let template = t.read(".env.tpl");
    assert!(!template.contains("keep me"));
    assert!(template.contains("{{op://vault-1/item-1/DATABASE_URL}}"));
}

#[test]
fn test_custom_output_path() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "prod-db", &["--output", "secrets.tpl"]);
    assert_success(&output);

    assert!(t.path("secrets.tpl").exists());
    assert!(!t.path(".env.tpl").exists());
}

#[test]
fn test_manifest_format() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(
        ".env",
        "prod-db",
        &[
            "--format",
            "manifest",
            "--manifest-name",
            "app-secrets",
            "--manifest-namespace",
            "apps",
        ],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "kubectl apply -f -");

    let manifest = t.read("app-secrets.yaml");
    assert!(manifest.contains("apiVersion: v1"));
    assert!(manifest.contains("kind: Secret"));
    assert!(manifest.contains("name: app-secrets"));
    assert!(manifest.contains("namespace: apps"));
    assert!(manifest.contains("type: Opaque"));
    assert!(manifest.contains("{{op://vault-1/item-1/API_KEY}}"));
    assert!(!manifest.contains(DB_PASSWORD));
}

#[test]
fn test_flag_beats_env_beats_config() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);

    let output = t
        .cmd()
        .env("OP_VAULT", "Staging")
        .args(["push", "env", ".env", "--item", "prod-db"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.op_calls()[0].contains("--vault Staging"));

    let output = t
        .cmd()
        .env("OP_VAULT", "Staging")
        .args(["push", "env", ".env", "--item", "prod-db", "--vault", "Ops", "--force"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.op_calls()[2].contains("--vault Ops"));
}

#[test]
fn test_stale_fields_warning() {
    let t = Test::with_fake_op();
    t.seed_existing_item();
    t.write(".env", "API_KEY=rotated\n");

    let output = t.push_env(".env", "prod-db", &["--overwrite"]);
    assert_success(&output);
    assert_stdout_contains(&output, "fields not present in the source");
    assert_stdout_contains(&output, "template: DATABASE_URL");
}

#[test]
fn test_empty_env_file_makes_no_calls() {
    let t = Test::with_fake_op();
    t.write(".env", "# nothing here\n\n");

    let output = t.push_env(".env", "prod-db", &[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets found");
    assert!(t.op_calls().is_empty());
}

#[test]
fn test_missing_env_file() {
    let t = Test::with_fake_op();

    let output = t.push_env("missing.env", "prod-db", &[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read missing.env");
}

#[test]
fn test_op_failure_is_reported_with_context() {
    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);
    t.write_state("fail", "[ERROR] You are not currently signed in.\n");

    let output = t.push_env(".env", "prod-db", &[]);

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "failed to filter items");
    assert_stderr_contains(&output, "not currently signed in");
    assert!(!t.path(".env.tpl").exists());
}

#[test]
fn test_template_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_fake_op();
    t.write(".env", SAMPLE_ENV);
    assert_success(&t.push_env(".env", "prod-db", &[]));

    let mode = std::fs::metadata(t.path(".env.tpl"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
