//! Database options file schema.

use serde::{Deserialize, Serialize};

/// Contents of `profiles/DatabaseOptions.json`.
///
/// Only the fields the manager itself needs are modelled; the rest of the
/// file belongs to the database subsystem and is ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseConfig {
    /// Port the data-access API listens on.
    pub database_server_port: u16,
}
