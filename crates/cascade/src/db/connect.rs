use crate::{driver::Driver, err, Error, Result};

use url::Url;

/// Picks a driver from the scheme of a connection URL.
pub(super) fn driver(url: &str) -> Result<Box<dyn Driver>> {
    let parsed = Url::parse(url).map_err(|e| {
        Error::invalid_config(format!("invalid connection URL `{url}`: {e}"))
    })?;

    match parsed.scheme() {
        "memory" => connect_memory(url),
        scheme => Err(err!("unsupported database; scheme={scheme}; url={url}")),
    }
}

#[cfg(feature = "memory")]
fn connect_memory(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(cascade_driver_memory::Memory::new(url)?))
}

#[cfg(not(feature = "memory"))]
fn connect_memory(_url: &str) -> Result<Box<dyn Driver>> {
    Err(err!("`memory` feature not enabled"))
}
