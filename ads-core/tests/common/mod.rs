#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ads_core::repo_mem::MemStreamRepo;
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
    pub repo: MemStreamRepo,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            repo: MemStreamRepo::new(),
        }
    }

    /// Host file with `primary_len` bytes of ordinary content.
    pub fn host(&self, name: &str, primary_len: usize) -> PathBuf {
        let p = self.dir.path().join(name);
        std::fs::write(&p, vec![b'p'; primary_len]).unwrap();
        p
    }

    pub fn source(&self, name: &str, data: &[u8]) -> PathBuf {
        let src_dir = self.dir.path().join("src");
        std::fs::create_dir_all(&src_dir).unwrap();
        let p = src_dir.join(name);
        std::fs::write(&p, data).unwrap();
        p
    }

    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }
}

pub fn files_in(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}
