//! Test fixtures and constants.

/// Account the test config selects.
pub const ACCOUNT: &str = "acme.1password.com";

/// Vault the test config selects.
pub const VAULT: &str = "Infra";

/// Plaintext values used across tests. Never expected in any output.
pub const DB_PASSWORD: &str = "hunter2-do-not-leak";
pub const API_KEY_VALUE: &str = "sk-test-12345";

/// Sample env file with the two secrets above.
pub const SAMPLE_ENV: &str = "# app secrets\nexport DATABASE_URL=\"postgres://app:hunter2-do-not-leak@db/app\"\nAPI_KEY=sk-test-12345\n";

/// Fake `op`: logs argv, replies from files in `op-state/` next to it.
///
/// A file named `fail` makes every call fail with its contents on stderr.
pub const FAKE_OP: &str = r#"#!/bin/sh
state="$(dirname "$0")/op-state"
echo "$*" >> "$state/calls.log"
if [ -f "$state/fail" ]; then
  cat "$state/fail" >&2
  exit 1
fi
case "$1 $2" in
  "account list") cat "$state/accounts.json" ;;
  "vault list") cat "$state/vaults.json" ;;
  "item list") cat "$state/items.json" ;;
  "item get")
    if [ -f "$state/get.json" ]; then
      cat "$state/get.json"
    else
      echo "[ERROR] \"$3\" isn't an item in the \"Infra\" vault." >&2
      exit 1
    fi
    ;;
  "item create") cat > "$state/create.stdin"; cat "$state/item.json" ;;
  "item edit") cat > "$state/edit.stdin"; cat "$state/item.json" ;;
  *) echo "[ERROR] unknown command: $*" >&2; exit 1 ;;
esac
"#;

/// Fake `kubectl`: logs argv, prints `op-state/secret.json`.
pub const FAKE_KUBECTL: &str = r#"#!/bin/sh
state="$(dirname "$0")/op-state"
echo "$*" >> "$state/kubectl.log"
if [ -f "$state/secret.json" ]; then
  cat "$state/secret.json"
else
  echo "Error from server (NotFound): secrets \"$3\" not found" >&2
  exit 1
fi
"#;

pub const ACCOUNTS_JSON: &str = r#"[
  {"url": "acme.1password.com", "email": "dev@acme.com", "user_uuid": "USER1", "account_uuid": "ACCT1"}
]"#;

pub const VAULTS_JSON: &str = r#"[
  {"id": "vault-1", "name": "Infra"},
  {"id": "vault-2", "name": "Private"}
]"#;

pub const ONE_ITEM_LIST: &str = r#"[
  {"id": "item-1", "title": "prod-db", "category": "LOGIN", "vault": {"id": "vault-1", "name": "Infra"}},
  {"id": "item-9", "title": "other", "category": "LOGIN", "vault": {"id": "vault-1", "name": "Infra"}}
]"#;

pub const TWO_ITEM_LIST: &str = r#"[
  {"id": "item-1", "title": "prod-db", "category": "LOGIN", "vault": {"id": "vault-1", "name": "Infra"}},
  {"id": "item-2", "title": "prod-db", "category": "LOGIN", "vault": {"id": "vault-1", "name": "Infra"}}
]"#;

/// Create/edit/get reply. Fields are out of order and include structural ones.
pub const ITEM_JSON: &str = r#"{
  "id": "item-1",
  "title": "prod-db",
  "category": "LOGIN",
  "vault": {"id": "vault-1", "name": "Infra"},
  "fields": [
    {"id": "username", "type": "STRING", "purpose": "USERNAME", "label": "username"},
    {"id": "password", "type": "CONCEALED", "purpose": "PASSWORD", "label": "password"},
    {"id": "DATABASE_URL", "type": "CONCEALED", "label": "DATABASE_URL", "value": "postgres://app:hunter2-do-not-leak@db/app"},
    {"id": "API_KEY", "type": "CONCEALED", "label": "API_KEY", "value": "sk-test-12345"}
  ]
}"#;

/// `kubectl get secret -o json` reply; data values are base64.
pub const K8S_SECRET_JSON: &str = r#"{
  "apiVersion": "v1",
  "kind": "Secret",
  "metadata": {"name": "db-creds", "namespace": "prod"},
  "type": "Opaque",
  "data": {
    "DATABASE_URL": "cG9zdGdyZXM6Ly9hcHA6aHVudGVyMi1kby1ub3QtbGVha0BkYi9hcHA=",
    "API_KEY": "c2stdGVzdC0xMjM0NQ=="
  }
}"#;
