use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{PRIMARY_STREAM_NAME, StreamRecord};
use crate::error::{AdsError, Result};
use crate::repo::StreamRepo;

/// NTFS streams addressed through the Win32 stream API.
pub struct NtfsStreamRepo {
    _priv: (),
}

impl NtfsStreamRepo {
    pub fn new() -> Result<Self> {
        sys::available()?;
        Ok(Self { _priv: () })
    }
}

/// Normalize a raw `FindFirstStreamW` name (`::$DATA`, `:name:$DATA`) into
/// `(name, is_primary)`. Streams of a type other than `$DATA` yield `None`.
pub fn parse_raw_stream_name(raw: &str) -> Option<(String, bool)> {
    let rest = raw.strip_prefix(':')?;
    let (name, kind) = rest.rsplit_once(':')?;
    if kind != "$DATA" {
        return None;
    }
    if name.is_empty() {
        Some((PRIMARY_STREAM_NAME.to_string(), true))
    } else {
        Some((name.to_string(), false))
    }
}

/// `host:name`, the path form the filesystem accepts for a named stream.
pub fn stream_path(host: &Path, name: &str) -> PathBuf {
    let mut s = OsString::from(host.as_os_str());
    s.push(":");
    s.push(name);
    PathBuf::from(s)
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == PRIMARY_STREAM_NAME
        || name.contains([':', '/', '\\'])
    {
        return Err(AdsError::InvalidStreamName {
            stream: name.to_string(),
        });
    }
    Ok(())
}

fn host_meta(host: &Path) -> Result<std::fs::Metadata> {
    std::fs::metadata(host).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AdsError::NotFound {
            path: host.to_path_buf(),
        },
        _ => e.into(),
    })
}

impl StreamRepo for NtfsStreamRepo {
    fn list_streams(&self, host: &Path) -> Result<Vec<StreamRecord>> {
        sys::available()?;
        host_meta(host)?;
        let host_file = host.display().to_string();
        let raw = sys::raw_streams(host).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AdsError::NotFound {
                path: host.to_path_buf(),
            },
            _ => e.into(),
        })?;
        let mut out = Vec::with_capacity(raw.len());
        for (raw_name, len) in raw {
            match parse_raw_stream_name(&raw_name) {
                Some((_, true)) => out.push(StreamRecord::primary(host_file.clone(), len)),
                Some((name, false)) => out.push(StreamRecord::named(host_file.clone(), name, len)),
                None => debug!(stream = %raw_name, "ignoring non-data stream"),
            }
        }
        Ok(out)
    }

    fn open_stream(&self, host: &Path, name: &str) -> Result<Box<dyn Read + Send + '_>> {
        sys::available()?;
        host_meta(host)?;
        let p = if name == PRIMARY_STREAM_NAME {
            host.to_path_buf()
        } else {
            check_name(name)?;
            stream_path(host, name)
        };
        let f = File::open(&p)
            .map_err(|e| AdsError::stream(&host.display().to_string(), name, e))?;
        Ok(Box::new(f))
    }

    fn create_stream(&self, host: &Path, name: &str) -> Result<Box<dyn Write + Send + '_>> {
        sys::available()?;
        host_meta(host)?;
        check_name(name)?;
        let f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(stream_path(host, name))
            .map_err(|e| AdsError::stream(&host.display().to_string(), name, e))?;
        Ok(Box::new(f))
    }

    fn delete_stream(&self, host: &Path, name: &str) -> Result<()> {
        sys::available()?;
        host_meta(host)?;
        check_name(name)?;
        std::fs::remove_file(stream_path(host, name))
            .map_err(|e| AdsError::stream(&host.display().to_string(), name, e))
    }
}

#[cfg(windows)]
#[allow(unsafe_code)]
mod sys {
    use std::io;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use windows::Win32::Foundation::{ERROR_HANDLE_EOF, HANDLE};
    use windows::Win32::Storage::FileSystem::{
        FindClose, FindFirstStreamW, FindNextStreamW, FindStreamInfoStandard,
        WIN32_FIND_STREAM_DATA,
    };
    use windows::core::PCWSTR;

    use crate::error::Result;

    pub fn available() -> Result<()> {
        Ok(())
    }

    struct FindGuard(HANDLE);

    impl Drop for FindGuard {
        fn drop(&mut self) {
            let _ = unsafe { FindClose(self.0) };
        }
    }

    fn entry(d: &WIN32_FIND_STREAM_DATA) -> (String, u64) {
        let end = d
            .cStreamName
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(d.cStreamName.len());
        (
            String::from_utf16_lossy(&d.cStreamName[..end]),
            d.StreamSize.max(0) as u64,
        )
    }

    /// Raw `(name, size)` pairs in the order the filesystem reports them.
    pub fn raw_streams(host: &Path) -> io::Result<Vec<(String, u64)>> {
        let wide: Vec<u16> = host.as_os_str().encode_wide().chain(once(0)).collect();
        let mut data = WIN32_FIND_STREAM_DATA::default();

        let first = unsafe {
            FindFirstStreamW(
                PCWSTR(wide.as_ptr()),
                FindStreamInfoStandard,
                &mut data as *mut _ as *mut _,
                None,
            )
        };
        let handle = match first {
            Ok(h) => h,
            // no data streams at all (e.g. a bare directory)
            Err(e) if e.code() == ERROR_HANDLE_EOF.to_hresult() => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let guard = FindGuard(handle);

        let mut out = vec![entry(&data)];
        loop {
            match unsafe { FindNextStreamW(guard.0, &mut data as *mut _ as *mut _) } {
                Ok(()) => out.push(entry(&data)),
                Err(e) if e.code() == ERROR_HANDLE_EOF.to_hresult() => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(out)
    }
}

#[cfg(not(windows))]
mod sys {
    use std::io;
    use std::path::Path;

    use crate::error::{AdsError, Result};

    const MSG: &str = "NTFS alternate data streams require Windows";

    pub fn available() -> Result<()> {
        Err(AdsError::Unsupported(MSG.into()))
    }

    pub fn raw_streams(_host: &Path) -> io::Result<Vec<(String, u64)>> {
        Err(io::Error::new(io::ErrorKind::Unsupported, MSG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_names_are_normalized() {
        assert_eq!(
            parse_raw_stream_name("::$DATA"),
            Some((PRIMARY_STREAM_NAME.to_string(), true))
        );
        assert_eq!(
            parse_raw_stream_name(":secret.txt:$DATA"),
            Some(("secret.txt".to_string(), false))
        );
        assert_eq!(
            parse_raw_stream_name(":Zone.Identifier:$DATA"),
            Some(("Zone.Identifier".to_string(), false))
        );
        assert_eq!(parse_raw_stream_name(":idx:$INDEX_ALLOCATION"), None);
        assert_eq!(parse_raw_stream_name("garbage"), None);
    }

    #[test]
    fn stream_path_appends_name() {
        let p = stream_path(Path::new("dir/doc.txt"), "secret.txt");
        assert_eq!(p, PathBuf::from("dir/doc.txt:secret.txt"));
    }

    #[test]
    fn names_with_separators_are_rejected() {
        assert!(check_name("a/b").is_err());
        assert!(check_name("a:b").is_err());
        assert!(check_name(PRIMARY_STREAM_NAME).is_err());
        assert!(check_name("ok.txt").is_ok());
    }

    #[cfg(not(windows))]
    #[test]
    fn unavailable_off_windows() {
        assert!(matches!(NtfsStreamRepo::new(), Err(AdsError::Unsupported(_))));
    }
}
