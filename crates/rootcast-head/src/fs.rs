use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::HeadResult;
use crate::traits::KvStore;

/// File-per-key durable store.
///
/// Each key maps to one file under the root directory, named by the hex
/// encoding of the key (keys may contain path separators). Writes go to a
/// temporary sibling first and are moved into place with `rename`, so a
/// crash mid-write leaves either the old value or the new one, never a torn
/// file.
pub struct FsKvStore {
    root: PathBuf,
}

impl FsKvStore {
    /// Open (or create) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> HeadResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.val", hex::encode(key)))
    }
}

impl KvStore for FsKvStore {
    fn get(&self, key: &str) -> HeadResult<Option<Vec<u8>>> {
        match fs::read(self.value_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> HeadResult<()> {
        let path = self.value_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            // Leave no orphaned temp file behind on a failed replace.
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp file");
            }
            return Err(e.into());
        }
        Ok(())
    }
}

impl std::fmt::Debug for FsKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsKvStore")
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rootcast_types::HashRef;

    use crate::head::HeadStore;

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FsKvStore::open(dir.path()).unwrap();
        assert!(kv.get("/head/latest").unwrap().is_none());
    }

    #[test]
    fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FsKvStore::open(dir.path()).unwrap();
        kv.put("/head/latest", b"bytes").unwrap();
        assert_eq!(
            kv.get("/head/latest").unwrap().as_deref(),
            Some(b"bytes".as_ref())
        );
    }

    #[test]
    fn put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FsKvStore::open(dir.path()).unwrap();
        kv.put("/k", b"old").unwrap();
        kv.put("/k", b"new").unwrap();
        assert_eq!(kv.get("/k").unwrap().as_deref(), Some(b"new".as_ref()));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let kv = FsKvStore::open(dir.path()).unwrap();
            kv.put("/k", b"persisted").unwrap();
        }
        let kv = FsKvStore::open(dir.path()).unwrap();
        assert_eq!(kv.get("/k").unwrap().as_deref(), Some(b"persisted".as_ref()));
    }

    #[test]
    fn head_store_roundtrip_over_fs() {
        let dir = tempfile::tempdir().unwrap();
        let r = HashRef::from_hash([3u8; 32]);
        {
            let kv = Arc::new(FsKvStore::open(dir.path()).unwrap());
            HeadStore::new(kv).save(&r).unwrap();
        }
        let kv = Arc::new(FsKvStore::open(dir.path()).unwrap());
        assert_eq!(HeadStore::new(kv).load().unwrap(), Some(r));
    }

    #[test]
    fn keys_with_separators_do_not_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FsKvStore::open(dir.path()).unwrap();
        kv.put("../../escape", b"contained").unwrap();
        assert_eq!(
            kv.get("../../escape").unwrap().as_deref(),
            Some(b"contained".as_ref())
        );
        // The only entries under root are the value files themselves.
        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(name.to_string_lossy().ends_with(".val"));
        }
    }
}
