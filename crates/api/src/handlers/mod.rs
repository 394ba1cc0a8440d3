pub mod project;
pub mod task;

use serde::Deserialize;

/// `?name=` query used by search and delete-by-name endpoints.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}
