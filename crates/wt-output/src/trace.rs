//! Reading a saved contact list back for tracing queries.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use wt_core::AgentUid;
use wt_sim::{ContactRecord, met_with};

use crate::OutputResult;

/// Load a `contact_list.json` written by [`JsonWriter`][crate::JsonWriter].
pub fn load_contacts_json(path: &Path) -> OutputResult<Vec<ContactRecord>> {
    read_contacts_json(BufReader::new(File::open(path)?))
}

/// Parse the contact-list wire format from any reader.
pub fn read_contacts_json<R: Read>(reader: R) -> OutputResult<Vec<ContactRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load `path` and report, for each infected id, everyone they met.
pub fn trace_file(path: &Path, infected: &[AgentUid]) -> OutputResult<BTreeMap<AgentUid, Vec<AgentUid>>> {
    let records = load_contacts_json(path)?;
    Ok(met_with(&records, infected))
}
