pub mod endpoint;
pub mod list;
pub mod request;
pub mod run;

pub use endpoint::EndpointCommand;
pub use list::ListCommand;
pub use request::{RequestArgs, RequestCommand};
pub use run::RunCommand;

use crate::error::CliResult;
use crate::suite::bundled_endpoints;
use apiprobe_core::{EndpointTable, Settings};

/// Endpoint table from `ENDPOINTS_FILE`, or the bundled one when that file
/// is missing or empty
pub fn load_endpoints(settings: &Settings) -> CliResult<EndpointTable> {
    let table = EndpointTable::load(&settings.endpoints_file)?;
    if table.is_empty() {
        tracing::debug!("Using bundled endpoint table");
        return Ok(bundled_endpoints()?);
    }
    Ok(table)
}
