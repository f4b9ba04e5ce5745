use serde::Serialize;

use crate::catalog::{self, CatalogEntry};
use crate::cli::SearchArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub results: Vec<CatalogEntry>,
}

pub fn run(args: &SearchArgs) -> Result<SearchReport, CliError> {
    if args.limit == 0 {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Command(String::from("query must not be empty")));
    }

    Ok(SearchReport {
        query: query.to_owned(),
        results: catalog::search(query, args.limit),
    })
}
