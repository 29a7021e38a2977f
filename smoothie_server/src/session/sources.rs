//! File-backed configuration sources for session strategies.
//!
//! Two TOML files feed the chain:
//!
//! ```toml
//! # connections file
//! [connections.smoothies]
//! url = "postgres://orders@db.internal/smoothies"
//! search_path = "smoothies, public"
//! application_name = "smoothie-orders"
//! role = "order_writer"
//! ```
//!
//! ```toml
//! # secrets file
//! [smoothies]
//! host = "db.internal"
//! port = 5432
//! user = "orders"
//! password = "..."
//! database = "smoothies"
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use super::AcquireFailure;

#[derive(Debug, Default, Deserialize)]
struct ConnectionsFile {
    #[serde(default)]
    connections: HashMap<String, ConnectionProfile>,
}

/// A named, host-managed connection profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionProfile {
    pub url: String,
    pub search_path: Option<String>,
    pub application_name: Option<String>,
    pub role: Option<String>,
}

impl ConnectionProfile {
    /// Statements that turn a bare connection into the profile's session.
    pub fn session_statements(&self) -> Vec<String> {
        let mut statements = Vec::new();

        if let Some(role) = &self.role {
            statements.push(format!("SET ROLE {}", quote_ident(role)));
        }
        if let Some(search_path) = &self.search_path {
            let schemas: Vec<String> = search_path
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(quote_ident)
                .collect();
            if !schemas.is_empty() {
                statements.push(format!("SET search_path TO {}", schemas.join(", ")));
            }
        }
        if let Some(application_name) = &self.application_name {
            statements.push(format!(
                "SET application_name = {}",
                quote_literal(application_name)
            ));
        }

        statements
    }
}

/// Database credentials kept in the secrets file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSecrets {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

fn default_port() -> u16 {
    5432
}

impl DatabaseSecrets {
    /// libpq key/value connection string, every value quoted.
    pub fn connection_string(&self) -> String {
        let mut parts = vec![
            format!("host={}", quote_conninfo(&self.host)),
            format!("port={}", self.port),
            format!("user={}", quote_conninfo(&self.user)),
            format!("dbname={}", quote_conninfo(&self.database)),
        ];
        if let Some(password) = &self.password {
            parts.push(format!("password={}", quote_conninfo(password)));
        }
        parts.join(" ")
    }
}

/// Load profile `name` from the connections file at `path`.
pub fn load_profile(path: &Path, name: &str) -> Result<ConnectionProfile, AcquireFailure> {
    let content = read_source(path, "connections file")?;

    let file: ConnectionsFile = toml::from_str(&content).map_err(|e| {
        AcquireFailure::InvalidConfig(format!("{}: {}", path.display(), e.message()))
    })?;

    file.connections.get(name).cloned().ok_or_else(|| {
        AcquireFailure::NotConfigured(format!(
            "no connection profile named '{name}' in {}",
            path.display()
        ))
    })
}

/// Load the credentials table `key` from the secrets file at `path`.
pub fn load_secrets(path: &Path, key: &str) -> Result<DatabaseSecrets, AcquireFailure> {
    let content = read_source(path, "secrets file")?;

    let table: toml::Table = toml::from_str(&content).map_err(|e| {
        AcquireFailure::InvalidConfig(format!("{}: {}", path.display(), e.message()))
    })?;

    let entry = table.get(key).cloned().ok_or_else(|| {
        AcquireFailure::NotConfigured(format!("no [{key}] entry in {}", path.display()))
    })?;

    entry.try_into::<DatabaseSecrets>().map_err(|e| {
        AcquireFailure::InvalidConfig(format!("[{key}] in {}: {}", path.display(), e.message()))
    })
}

fn read_source(path: &Path, what: &str) -> Result<String, AcquireFailure> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            AcquireFailure::NotConfigured(format!("{what} {} not found", path.display()))
        }
        _ => AcquireFailure::InvalidConfig(format!(
            "failed to read {what} {}: {e}",
            path.display()
        )),
    })
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn quote_conninfo(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_named_profile() {
        let file = toml_file(
            r#"
[connections.smoothies]
url = "postgres://orders@localhost/smoothies"
search_path = "smoothies, public"

[connections.reporting]
url = "postgres://reader@localhost/smoothies"
"#,
        );

        let profile = load_profile(file.path(), "smoothies").unwrap();
        assert_eq!(profile.url, "postgres://orders@localhost/smoothies");
        assert_eq!(profile.search_path.as_deref(), Some("smoothies, public"));
        assert_eq!(profile.role, None);
    }

    #[test]
    fn missing_profile_is_not_configured() {
        let file = toml_file("[connections.reporting]\nurl = \"postgres://localhost\"\n");

        let err = load_profile(file.path(), "smoothies").unwrap_err();
        assert!(matches!(err, AcquireFailure::NotConfigured(ref msg) if msg.contains("'smoothies'")));
    }

    #[test]
    fn missing_file_is_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connections.toml");

        let err = load_profile(&path, "smoothies").unwrap_err();
        assert!(matches!(err, AcquireFailure::NotConfigured(_)));
    }

    #[test]
    fn malformed_file_is_invalid_config() {
        let file = toml_file("[connections.smoothies\nurl = ");

        let err = load_profile(file.path(), "smoothies").unwrap_err();
        assert!(matches!(err, AcquireFailure::InvalidConfig(_)));
    }

    #[test]
    fn profile_without_url_is_invalid_config() {
        let file = toml_file("[connections.smoothies]\nsearch_path = \"smoothies\"\n");

        let err = load_profile(file.path(), "smoothies").unwrap_err();
        assert!(matches!(err, AcquireFailure::InvalidConfig(_)));
    }

    #[test]
    fn session_statements_quote_identifiers_and_literals() {
        let profile = ConnectionProfile {
            url: "postgres://localhost".to_string(),
            search_path: Some("smoothies, \"odd\"schema".to_string()),
            application_name: Some("Mel's orders".to_string()),
            role: Some("order_writer".to_string()),
        };

        assert_eq!(
            profile.session_statements(),
            vec![
                "SET ROLE \"order_writer\"".to_string(),
                "SET search_path TO \"smoothies\", \"\"\"odd\"\"schema\"".to_string(),
                "SET application_name = 'Mel''s orders'".to_string(),
            ]
        );
    }

    #[test]
    fn bare_profile_has_no_session_statements() {
        let profile = ConnectionProfile {
            url: "postgres://localhost".to_string(),
            search_path: None,
            application_name: None,
            role: None,
        };
        assert!(profile.session_statements().is_empty());
    }

    #[test]
    fn loads_secrets_with_default_port() {
        let file = toml_file(
            r#"
[smoothies]
host = "db.internal"
user = "orders"
password = "hunter2"
database = "smoothies"
"#,
        );

        let secrets = load_secrets(file.path(), "smoothies").unwrap();
        assert_eq!(secrets.port, 5432);
        assert_eq!(secrets.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn secrets_without_entry_are_not_configured() {
        let file = toml_file("[other]\nhost = \"x\"\n");

        let err = load_secrets(file.path(), "smoothies").unwrap_err();
        assert_eq!(
            err,
            AcquireFailure::NotConfigured(format!("no [smoothies] entry in {}", file.path().display()))
        );
    }

    #[test]
    fn incomplete_secrets_are_invalid_config() {
        let file = toml_file("[smoothies]\nhost = \"db.internal\"\n");

        let err = load_secrets(file.path(), "smoothies").unwrap_err();
        assert!(matches!(err, AcquireFailure::InvalidConfig(_)));
    }

    #[test]
    fn connection_string_escapes_quotes_and_backslashes() {
        let secrets = DatabaseSecrets {
            host: "db.internal".to_string(),
            port: 6432,
            user: "orders".to_string(),
            password: Some("it's\\secret".to_string()),
            database: "smoothies".to_string(),
        };

        assert_eq!(
            secrets.connection_string(),
            "host='db.internal' port=6432 user='orders' dbname='smoothies' password='it\\'s\\\\secret'"
        );
    }
}
