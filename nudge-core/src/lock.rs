//! Single-instance guard.
//!
//! [`SingleInstance::try_acquire`] never blocks: it either hands back
//! an [`InstanceGuard`] (this process now owns the lock) or `None`
//! (another instance does). Dropping the guard releases the lock, on
//! unwinding too.

use crate::error::NudgeError;

// ── InstanceGuard ────────────────────────────────────────────────

/// RAII ownership of the single-instance lock.
pub struct InstanceGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl InstanceGuard {
    /// Guard that runs `release` exactly once when dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for InstanceGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceGuard")
            .field("held", &self.release.is_some())
            .finish()
    }
}

// ── SingleInstance ───────────────────────────────────────────────

/// A named, OS-visible mutual-exclusion primitive.
pub trait SingleInstance {
    /// Try to become the lock owner without waiting.
    fn try_acquire(&self) -> Result<Option<InstanceGuard>, NudgeError>;
}

impl<L: SingleInstance + ?Sized> SingleInstance for &L {
    fn try_acquire(&self) -> Result<Option<InstanceGuard>, NudgeError> {
        (**self).try_acquire()
    }
}

// ── NamedMutex ───────────────────────────────────────────────────

/// Win32 named mutex (`CreateMutexW` with initial ownership).
#[derive(Debug, Clone)]
pub struct NamedMutex {
    name: String,
}

impl NamedMutex {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use super::*;
    use crate::platform::win32::to_wide;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, TRUE};
    use windows::Win32::System::Threading::{CreateMutexW, ReleaseMutex};

    impl SingleInstance for NamedMutex {
        fn try_acquire(&self) -> Result<Option<InstanceGuard>, NudgeError> {
            let name = to_wide(&self.name);
            let (handle, existed) = unsafe {
                let handle = CreateMutexW(None, TRUE, PCWSTR(name.as_ptr()))
                    .map_err(|e| NudgeError::win32("CreateMutexW", e.code().0))?;
                (handle, GetLastError() == ERROR_ALREADY_EXISTS)
            };

            // The handle is valid either way; only a freshly created
            // mutex is owned by us.
            if existed {
                let _ = unsafe { CloseHandle(handle) };
                return Ok(None);
            }

            Ok(Some(InstanceGuard::new(move || unsafe {
                let _ = ReleaseMutex(handle);
                let _ = CloseHandle(handle);
            })))
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl SingleInstance for NamedMutex {
    fn try_acquire(&self) -> Result<Option<InstanceGuard>, NudgeError> {
        Err(NudgeError::Unsupported("single-instance lock"))
    }
}

// ── Tests ────────────────────────────────────────────────────────
