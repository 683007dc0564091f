//! Operating system identification (uname)

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// The five uname fields, in uname order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Uname {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

impl std::fmt::Display for Uname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "uname_result(sysname='{}', nodename='{}', release='{}', version='{}', machine='{}')",
            self.sysname, self.nodename, self.release, self.version, self.machine
        )
    }
}

#[cfg(unix)]
pub fn uname() -> Result<Uname> {
    let uts = nix::sys::utsname::uname().map_err(|e| {
        crate::errors::AstrolabError::file_operation(format!("uname failed: {}", e))
    })?;

    Ok(Uname {
        sysname: uts.sysname().to_string_lossy().into_owned(),
        nodename: uts.nodename().to_string_lossy().into_owned(),
        release: uts.release().to_string_lossy().into_owned(),
        version: uts.version().to_string_lossy().into_owned(),
        machine: uts.machine().to_string_lossy().into_owned(),
    })
}

#[cfg(not(unix))]
pub fn uname() -> Result<Uname> {
    Ok(Uname {
        sysname: std::env::consts::OS.to_string(),
        nodename: std::env::var("COMPUTERNAME").unwrap_or_else(|_| "unknown".to_string()),
        release: "unknown".to_string(),
        version: "unknown".to_string(),
        machine: std::env::consts::ARCH.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uname_fields_are_populated() {
        let info = uname().unwrap();
        assert!(!info.sysname.is_empty());
        assert!(!info.machine.is_empty());
    }

    #[test]
    fn serializes_exactly_five_keys() {
        let value = serde_json::to_value(uname().unwrap()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["machine", "nodename", "release", "sysname", "version"]);
    }
}
