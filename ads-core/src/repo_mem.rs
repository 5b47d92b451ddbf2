use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::{PRIMARY_STREAM_NAME, StreamRecord};
use crate::error::{AdsError, Result};
use crate::repo::StreamRepo;

#[derive(Clone, Debug, Default)]
struct MemStream {
    data: Vec<u8>,
    poisoned: bool,
}

/// Named streams held in memory; the primary stream is the host file on disk.
///
/// A poisoned stream fails reads and deletes the way a stream locked by
/// another process would.
#[derive(Debug, Default)]
pub struct MemStreamRepo {
    hosts: Mutex<HashMap<PathBuf, BTreeMap<String, MemStream>>>,
    fail_writes: Mutex<bool>,
}

impl MemStreamRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach (or replace) a named stream on `host`.
    pub fn insert(&self, host: &Path, name: &str, data: &[u8]) {
        self.lock().entry(host.to_path_buf()).or_default().insert(
            name.to_string(),
            MemStream {
                data: data.to_vec(),
                poisoned: false,
            },
        );
    }

    pub fn poison(&self, host: &Path, name: &str) {
        if let Some(s) = self
            .lock()
            .get_mut(host)
            .and_then(|streams| streams.get_mut(name))
        {
            s.poisoned = true;
        }
    }

    /// Make every subsequent stream write fail until cleared.
    pub fn set_write_failure(&self, fail: bool) {
        *self
            .fail_writes
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = fail;
    }

    pub fn stream_bytes(&self, host: &Path, name: &str) -> Option<Vec<u8>> {
        self.lock()
            .get(host)
            .and_then(|streams| streams.get(name))
            .map(|s| s.data.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, BTreeMap<String, MemStream>>> {
        self.hosts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn host_len(host: &Path) -> Result<u64> {
        match std::fs::metadata(host) {
            Ok(md) => Ok(md.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AdsError::NotFound {
                path: host.to_path_buf(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn missing(host: &Path, name: &str) -> AdsError {
    AdsError::stream(
        &host.display().to_string(),
        name,
        io::Error::new(io::ErrorKind::NotFound, "stream not found"),
    )
}

fn locked(host: &Path, name: &str) -> AdsError {
    AdsError::stream(
        &host.display().to_string(),
        name,
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            "stream is locked by another process",
        ),
    )
}

impl StreamRepo for MemStreamRepo {
    fn list_streams(&self, host: &Path) -> Result<Vec<StreamRecord>> {
        let primary_len = Self::host_len(host)?;
        let host_file = host.display().to_string();
        let mut out = vec![StreamRecord::primary(host_file.clone(), primary_len)];
        if let Some(streams) = self.lock().get(host) {
            out.extend(
                streams
                    .iter()
                    .map(|(name, s)| StreamRecord::named(host_file.clone(), name, s.data.len() as u64)),
            );
        }
        Ok(out)
    }

    fn open_stream(&self, host: &Path, name: &str) -> Result<Box<dyn Read + Send + '_>> {
        Self::host_len(host)?;
        if name == PRIMARY_STREAM_NAME {
            return Ok(Box::new(File::open(host)?));
        }
        let hosts = self.lock();
        let s = hosts
            .get(host)
            .and_then(|streams| streams.get(name))
            .ok_or_else(|| missing(host, name))?;
        if s.poisoned {
            return Err(locked(host, name));
        }
        Ok(Box::new(Cursor::new(s.data.clone())))
    }

    fn create_stream(&self, host: &Path, name: &str) -> Result<Box<dyn Write + Send + '_>> {
        Self::host_len(host)?;
        if name.is_empty() || name == PRIMARY_STREAM_NAME || name.contains(':') {
            return Err(AdsError::InvalidStreamName {
                stream: name.to_string(),
            });
        }
        let mut hosts = self.lock();
        let streams = hosts.entry(host.to_path_buf()).or_default();
        if streams.contains_key(name) {
            return Err(AdsError::stream(
                &host.display().to_string(),
                name,
                io::Error::new(io::ErrorKind::AlreadyExists, "stream already exists"),
            ));
        }
        streams.insert(name.to_string(), MemStream::default());
        Ok(Box::new(MemWriter {
            repo: self,
            host: host.to_path_buf(),
            name: name.to_string(),
        }))
    }

    fn delete_stream(&self, host: &Path, name: &str) -> Result<()> {
        Self::host_len(host)?;
        if name == PRIMARY_STREAM_NAME {
            return Err(AdsError::InvalidStreamName {
                stream: name.to_string(),
            });
        }
        let mut hosts = self.lock();
        let streams = hosts.get_mut(host).ok_or_else(|| missing(host, name))?;
        let poisoned = streams
            .get(name)
            .map(|s| s.poisoned)
            .ok_or_else(|| missing(host, name))?;
        if poisoned {
            return Err(locked(host, name));
        }
        streams.remove(name);
        Ok(())
    }
}

struct MemWriter<'a> {
    repo: &'a MemStreamRepo,
    host: PathBuf,
    name: String,
}

impl Write for MemWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if *self
            .repo
            .fail_writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
        {
            return Err(io::Error::other("no space left on device"));
        }
        let mut hosts = self.repo.lock();
        let s = hosts
            .get_mut(&self.host)
            .and_then(|streams| streams.get_mut(&self.name))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "stream vanished"))?;
        s.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
