//! Shared constants and helpers for MARCXML output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// MARC21 slim namespace.
pub const MARC_NS: &str = "http://www.loc.gov/MARC21/slim";

/// XML Schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Schema location pairing the MARC21 slim namespace with its XSD.
pub const SCHEMA_LOCATION: &str =
    "http://www.loc.gov/MARC21/slim http://www.loc.gov/standards/marcxml/schema/MARC21slim.xsd";

/// Create the output directory if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

/// File name for a derived identifier: `<identifier>.xml`.
///
/// Identifiers are used verbatim; ones that would escape the output
/// directory are rejected.
pub fn file_name_for(identifier: &str) -> Result<String> {
    if identifier.is_empty()
        || identifier == "."
        || identifier == ".."
        || identifier.contains(['/', '\\', '\0'])
    {
        bail!("identifier {identifier:?} cannot be used as a file name");
    }
    Ok(format!("{identifier}.xml"))
}
