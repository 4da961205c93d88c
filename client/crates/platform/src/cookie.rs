//! Cookie Jar Infrastructure
//!
//! Client-side key/value persistence with per-entry expiry, standing in for
//! the browser cookie store. Reads never fail: a missing or expired cookie is
//! simply absent.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// SameSite policy recorded with each cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes applied to every cookie a jar writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            secure: true,
            same_site: SameSite::Strict,
        }
    }
}

/// Cookie persistence error
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("Cookie jar I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Cookie jar is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key/value store with expiry semantics
pub trait CookieJar: Send + Sync {
    /// Current value, or `None` when absent or expired
    fn get(&self, name: &str) -> Option<String>;

    /// Store `value` under `name`, expiring `ttl` from now
    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), CookieError>;

    /// Delete `name`; deleting an absent cookie is not an error
    fn remove(&self, name: &str) -> Result<(), CookieError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    expires_at_ms: i64,
    path: String,
    secure: bool,
    same_site: SameSite,
}

impl StoredCookie {
    fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// In-memory cookie jar
pub struct MemoryCookieJar {
    entries: Mutex<HashMap<String, StoredCookie>>,
    attributes: CookieAttributes,
    clock: Arc<dyn Clock>,
}

impl MemoryCookieJar {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_attributes(clock, CookieAttributes::default())
    }

    pub fn with_attributes(clock: Arc<dyn Clock>, attributes: CookieAttributes) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            attributes,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StoredCookie>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn insert(&self, name: &str, value: &str, ttl: Duration) {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let cookie = StoredCookie {
            value: value.to_string(),
            expires_at_ms: self.clock.now_ms().saturating_add(ttl_ms),
            path: self.attributes.path.clone(),
            secure: self.attributes.secure,
            same_site: self.attributes.same_site,
        };
        self.lock().insert(name.to_string(), cookie);
    }

    fn live_entries(&self) -> HashMap<String, StoredCookie> {
        let now_ms = self.clock.now_ms();
        let mut entries = self.lock();
        entries.retain(|_, cookie| !cookie.is_expired(now_ms));
        entries.clone()
    }

    /// Names of all cookies that have not expired
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.live_entries().into_keys().collect();
        names.sort();
        names
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let now_ms = self.clock.now_ms();
        let mut entries = self.lock();
        let expired = entries.get(name)?.is_expired(now_ms);
        if expired {
            entries.remove(name);
            return None;
        }
        entries.get(name).map(|cookie| cookie.value.clone())
    }

    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), CookieError> {
        self.insert(name, value, ttl);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), CookieError> {
        self.lock().remove(name);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct JarFile {
    cookies: HashMap<String, StoredCookie>,
}

/// Cookie jar persisted as a JSON file, written through on every change
pub struct FileCookieJar {
    path: PathBuf,
    memory: MemoryCookieJar,
}

impl FileCookieJar {
    /// Open (or lazily create) the jar at `path`
    pub fn open(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self, CookieError> {
        let path = path.into();
        let memory = MemoryCookieJar::new(clock);

        match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => {
                let file: JarFile = serde_json::from_str(&contents)?;
                memory.lock().extend(file.cookies);
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(path = %path.display(), "Opened cookie jar");

        Ok(Self { path, memory })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), CookieError> {
        let file = JarFile {
            cookies: self.memory.live_entries(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        write_private(&tmp, json.as_bytes())?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Write `contents` readable by the owner only
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation; a leftover temp file keeps its bits
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}

impl CookieJar for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.memory.get(name)
    }

    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), CookieError> {
        self.memory.insert(name, value, ttl);
        self.persist()
    }

    fn remove(&self, name: &str) -> Result<(), CookieError> {
        self.memory.lock().remove(name);
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use rand::RngCore;

    const HOUR: Duration = Duration::from_secs(3600);

    fn temp_jar_path() -> PathBuf {
        let mut suffix = [0u8; 8];
        rand::rngs::OsRng.fill_bytes(&mut suffix);
        let name: String = suffix.iter().map(|b| format!("{b:02x}")).collect();
        std::env::temp_dir()
            .join(format!("portal-jar-{name}"))
            .join("cookies.json")
    }

    #[test]
    fn test_get_missing_is_none() {
        let jar = MemoryCookieJar::new(Arc::new(ManualClock::new(0)));
        assert_eq!(jar.get("APP-ACCESS-TOKEN"), None);
        assert!(jar.remove("APP-ACCESS-TOKEN").is_ok());
    }

    #[test]
    fn test_cookie_expires_after_ttl() {
        let clock = Arc::new(ManualClock::new(1_000));
        let jar = MemoryCookieJar::new(clock.clone());

        jar.set("APP-IS-LOGGED-IN", "true", HOUR).unwrap();
        clock.advance_ms(3_599_999);
        assert_eq!(jar.get("APP-IS-LOGGED-IN"), Some("true".to_string()));

        clock.advance_ms(1);
        assert_eq!(jar.get("APP-IS-LOGGED-IN"), None);
        assert!(jar.names().is_empty());
    }

    #[test]
    fn test_set_overwrites_value_and_ttl() {
        let clock = Arc::new(ManualClock::new(0));
        let jar = MemoryCookieJar::new(clock.clone());

        jar.set("token", "old", Duration::from_secs(1)).unwrap();
        jar.set("token", "new", HOUR).unwrap();
        clock.advance_ms(10_000);

        assert_eq!(jar.get("token"), Some("new".to_string()));
    }

    #[test]
    fn test_file_jar_survives_reopen() {
        let path = temp_jar_path();
        let clock = Arc::new(ManualClock::new(0));

        let jar = FileCookieJar::open(&path, clock.clone()).unwrap();
        jar.set("APP-REFRESH-TOKEN", "refresh-1", HOUR).unwrap();
        jar.set("APP-ACCESS-TOKEN", "access-1", HOUR).unwrap();
        jar.remove("APP-ACCESS-TOKEN").unwrap();
        drop(jar);

        let reopened = FileCookieJar::open(&path, clock).unwrap();
        assert_eq!(reopened.get("APP-REFRESH-TOKEN"), Some("refresh-1".to_string()));
        assert_eq!(reopened.get("APP-ACCESS-TOKEN"), None);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Strict\""));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_jar_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_jar_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        // stale temp file from an interrupted write
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, "").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        let jar = FileCookieJar::open(&path, Arc::new(ManualClock::new(0))).unwrap();
        jar.set("APP-ACCESS-TOKEN", "access-1", HOUR).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_jar_rejects_corrupt_file() {
        let path = temp_jar_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let result = FileCookieJar::open(&path, Arc::new(ManualClock::new(0)));
        assert!(matches!(result, Err(CookieError::Corrupt(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
