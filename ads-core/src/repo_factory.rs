use crate::error::Result;
use crate::repo::StreamRepo;
use crate::repo_mem::MemStreamRepo;
use crate::repo_ntfs::NtfsStreamRepo;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Ntfs,
    Memory,
}

pub fn open_repo(backend: Backend) -> Result<Box<dyn StreamRepo>> {
    match backend {
        Backend::Ntfs => Ok(Box::new(NtfsStreamRepo::new()?)),
        Backend::Memory => Ok(Box::new(MemStreamRepo::new())),
    }
}
