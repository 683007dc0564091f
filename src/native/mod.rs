//! Native library bridge
//!
//! Loads a cgo-built shared object and calls its three exports:
//! `Add(int, int) int`, `Version() *C.char` and `WatchTime(*C.char) *C.char`.
//! Go's `int` is 64 bits wide on the targets cgo builds shared objects for.

use std::ffi::{CStr, CString, c_char, c_longlong};
use std::fmt;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, info};

use crate::errors::{AstrolabError, Result};

type AddFn = unsafe extern "C" fn(c_longlong, c_longlong) -> c_longlong;
type VersionFn = unsafe extern "C" fn() -> *mut c_char;
type WatchTimeFn = unsafe extern "C" fn(*mut c_char) -> *mut c_char;

/// Symbols the bridge expects the library to export
pub const REQUIRED_SYMBOLS: [&str; 3] = ["Add", "Version", "WatchTime"];

pub struct NativeLibrary {
    lib: Library,
    path: PathBuf,
}

impl NativeLibrary {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading native library {}", path.display());

        // SAFETY: loading runs the library's initializers; the caller chose this file.
        let lib = unsafe { Library::new(&path) }.map_err(|e| {
            AstrolabError::native_library(format!("cannot load {}: {}", path.display(), e))
        })?;

        Ok(Self { lib, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn symbol<T>(&self, name: &str) -> Result<Symbol<'_, T>> {
        // SAFETY: T is one of the fn types above, matching the cgo export signatures.
        unsafe { self.lib.get::<T>(name.as_bytes()) }.map_err(|e| {
            AstrolabError::native_library(format!(
                "symbol {} not found in {}: {}",
                name,
                self.path.display(),
                e
            ))
        })
    }

    /// Fails on the first required symbol the library does not export
    pub fn verify_exports(&self) -> Result<()> {
        for name in REQUIRED_SYMBOLS {
            self.symbol::<unsafe extern "C" fn()>(name)?;
        }
        Ok(())
    }

    pub fn add(&self, a: i64, b: i64) -> Result<i64> {
        let add = self.symbol::<AddFn>("Add")?;
        // SAFETY: plain integer arguments and result.
        Ok(unsafe { add(a, b) })
    }

    pub fn version(&self) -> Result<String> {
        let version = self.symbol::<VersionFn>("Version")?;
        // SAFETY: the export returns a NUL-terminated string it allocated.
        let ptr = unsafe { version() };
        owned_string(ptr, "Version")
    }

    pub fn watch_time(&self, video_id: &str) -> Result<String> {
        let watch_time = self.symbol::<WatchTimeFn>("WatchTime")?;
        let id = CString::new(video_id).map_err(|_| {
            AstrolabError::validation(format!("video id contains a NUL byte: {:?}", video_id))
        })?;

        // SAFETY: `id` outlives the call and the export only reads it.
        let ptr = unsafe { watch_time(id.as_ptr() as *mut c_char) };
        owned_string(ptr, "WatchTime")
    }
}

/// Copy a C string returned by the library. The library's allocation is not freed.
fn owned_string(ptr: *const c_char, symbol: &str) -> Result<String> {
    if ptr.is_null() {
        return Err(AstrolabError::native_library(format!(
            "{} returned a null pointer",
            symbol
        )));
    }
    // SAFETY: non-null and NUL-terminated per the export contract.
    Ok(unsafe { CStr::from_ptr(ptr) }
        .to_string_lossy()
        .into_owned())
}

/// Results of one bridge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeReport {
    pub add: i64,
    pub version: String,
    pub watch_time: String,
}

impl fmt::Display for BridgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Add: {}", self.add)?;
        writeln!(f, "Version: {}", self.version)?;
        write!(f, "WatchTime: {}", self.watch_time)
    }
}

/// Load `path` and call `Add(1, 2)`, `Version()` and `WatchTime(video_id)`
pub fn run_bridge<P: AsRef<Path>>(path: P, video_id: &str) -> Result<BridgeReport> {
    let lib = NativeLibrary::open(path)?;
    lib.verify_exports()?;

    let report = BridgeReport {
        add: lib.add(1, 2)?,
        version: lib.version()?,
        watch_time: lib.watch_time(video_id)?,
    };

    info!("Native bridge finished for {}", lib.path().display());
    Ok(report)
}
